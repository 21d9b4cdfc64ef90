use std::io::{Read, Write};

use crate::CodecError;

/// Read one sample per record from the first CSV column.
///
/// A non-numeric first record is treated as a header row and skipped;
/// any later non-numeric cell is an error.
pub fn read_series_csv<R: Read>(reader: R) -> Result<Vec<f64>, CodecError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut samples = Vec::new();
    for (row, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| CodecError::InvalidInput(e.to_string()))?;
        let cell = match record.get(0) {
            Some(c) if !c.is_empty() => c,
            _ => continue,
        };
        match cell.parse::<f64>() {
            Ok(v) => samples.push(v),
            Err(_) if row == 0 => continue,
            Err(_) => {
                return Err(CodecError::InvalidInput(format!(
                    "row {}: '{}' is not a number",
                    row + 1,
                    cell
                )))
            }
        }
    }
    Ok(samples)
}

/// Write one sample per line.
pub fn write_series_csv<W: Write>(writer: W, samples: &[f64]) -> Result<(), CodecError> {
    let mut wtr = csv::Writer::from_writer(writer);
    for v in samples {
        wtr.write_record([v.to_string()])
            .map_err(|e| CodecError::Serialization(e.to_string()))?;
    }
    wtr.flush()?;
    Ok(())
}
