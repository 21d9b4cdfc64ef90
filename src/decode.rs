use crate::encode::{EncodeOutcome, EncodedStructure};
use crate::CodecError;

/// Value left at positions no record writes.
pub const GAP_FILL: f64 = 0.0;

fn write_clamped(out: &mut [f64], offset: usize, values: &[f64]) {
    if offset >= out.len() {
        return;
    }
    let end = offset.saturating_add(values.len()).min(out.len());
    out[offset..end].copy_from_slice(&values[..end - offset]);
}

/// Rebuild a sequence of `header.original_length` samples.
///
/// Writes masters, then references, then residuals; later writes win on
/// overlap. Writes past the end are clamped and references to missing
/// masters are skipped.
pub fn decode_structure(encoded: &EncodedStructure) -> Vec<f64> {
    let len = encoded.header.original_length;
    let mut out = vec![GAP_FILL; len];

    for master in &encoded.masters {
        write_clamped(&mut out, master.offset, &master.values);
    }
    for reference in &encoded.references {
        if let Some(master) = encoded.masters.get(reference.master_index) {
            write_clamped(&mut out, reference.offset, &master.values);
        }
    }
    for residual in &encoded.residuals {
        if let Some(slot) = out.get_mut(residual.offset) {
            *slot = residual.value;
        }
    }

    debug_assert_eq!(out.len(), len, "decoder must emit the declared length");
    out
}

/// Decode a successful encode result.
pub fn decode(outcome: &EncodeOutcome) -> Result<Vec<f64>, CodecError> {
    match outcome {
        EncodeOutcome::Encoded(encoding) => Ok(decode_structure(&encoding.encoded)),
        EncodeOutcome::NoPattern(_) => Err(CodecError::InvalidDecodeInput),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{EncodedHeader, MasterRecord, ReferenceRecord, ResidualRecord};

    fn structure(len: usize) -> EncodedStructure {
        EncodedStructure {
            header: EncodedHeader {
                segment_size: 3,
                scale_index: 1,
                original_length: len,
            },
            masters: vec![MasterRecord {
                cluster_index: 0,
                offset: 0,
                values: vec![1.0, 2.0, 3.0],
            }],
            references: vec![ReferenceRecord {
                master_index: 0,
                offset: 5,
                correlation: 1.0,
            }],
            residuals: vec![ResidualRecord {
                offset: 3,
                value: 9.0,
            }],
        }
    }

    #[test]
    fn writes_in_order_and_fills_gaps() {
        let out = decode_structure(&structure(8));
        assert_eq!(out, vec![1.0, 2.0, 3.0, 9.0, GAP_FILL, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn reference_past_end_is_clamped() {
        let out = decode_structure(&structure(6));
        assert_eq!(out, vec![1.0, 2.0, 3.0, 9.0, GAP_FILL, 1.0]);
    }

    #[test]
    fn residual_overrides_reference() {
        let mut s = structure(8);
        s.residuals.push(ResidualRecord {
            offset: 6,
            value: -4.0,
        });
        assert_eq!(decode_structure(&s)[6], -4.0);
    }

    #[test]
    fn dangling_reference_is_skipped() {
        let mut s = structure(8);
        s.references[0].master_index = 7;
        assert_eq!(&decode_structure(&s)[5..], &[GAP_FILL; 3]);
    }
}
