use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::encode::EncodedStructure;
use crate::CodecError;

/// File magic for `.phic` containers.
pub const MAGIC: [u8; 4] = *b"PHIC";
/// Current container version.
pub const VERSION: u8 = 1;
/// Magic, version byte and 2-byte payload checksum.
pub const PREAMBLE_LEN: usize = MAGIC.len() + 1 + 2;
/// Largest declared sequence length `read_container` will accept.
pub const MAX_ORIGINAL_LENGTH: usize = 1 << 28;

/// Errors that can occur while reading a container.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContainerError {
    #[error("container too short")]
    TooShort,
    #[error("bad magic")]
    BadMagic,
    #[error("unsupported container version {0}")]
    UnsupportedVersion(u8),
    #[error("payload checksum mismatch")]
    ChecksumMismatch,
    #[error("invalid payload: {0}")]
    Payload(String),
}

/// Lowest 13 bits of the SHA-256 of `data`.
pub fn truncated_hash(data: &[u8]) -> u16 {
    let digest = Sha256::digest(data);
    let arr: [u8; 32] = digest.into();
    let low = ((arr[30] as u16) << 8) | arr[31] as u16;
    low & 0x1FFF
}

/// Full hex SHA-256 of a container payload, for display.
pub fn payload_digest(bytes: &[u8]) -> String {
    let payload = bytes.get(PREAMBLE_LEN..).unwrap_or(&[]);
    hex::encode(Sha256::digest(payload))
}

/// Serialize an encoded structure into container bytes.
pub fn write_container(encoded: &EncodedStructure) -> Result<Vec<u8>, CodecError> {
    let payload =
        bincode::serialize(encoded).map_err(|e| CodecError::Serialization(e.to_string()))?;
    let mut out = Vec::with_capacity(PREAMBLE_LEN + payload.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.extend_from_slice(&truncated_hash(&payload).to_be_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

/// Check that every record stays within the declared bounds and the
/// declared length is at most `max_len`.
fn check_structure(encoded: &EncodedStructure, max_len: usize) -> Result<(), ContainerError> {
    let len = encoded.header.original_length;
    if len > max_len {
        return Err(ContainerError::Payload(format!(
            "declared length {len} exceeds limit {max_len}"
        )));
    }
    if let Some(r) = encoded
        .references
        .iter()
        .find(|r| r.master_index >= encoded.masters.len())
    {
        return Err(ContainerError::Payload(format!(
            "reference at offset {} points to missing master {}",
            r.offset, r.master_index
        )));
    }
    if let Some(r) = encoded.residuals.iter().find(|r| r.offset >= len) {
        return Err(ContainerError::Payload(format!(
            "residual offset {} outside length {}",
            r.offset, len
        )));
    }
    Ok(())
}

/// Parse and validate container bytes, capping the declared length at
/// [`MAX_ORIGINAL_LENGTH`].
pub fn read_container(data: &[u8]) -> Result<EncodedStructure, CodecError> {
    read_container_with_limit(data, MAX_ORIGINAL_LENGTH)
}

/// Parse and validate container bytes, rejecting structures that declare
/// more than `max_original_length` samples.
pub fn read_container_with_limit(
    data: &[u8],
    max_original_length: usize,
) -> Result<EncodedStructure, CodecError> {
    if data.len() < PREAMBLE_LEN {
        return Err(ContainerError::TooShort.into());
    }
    if data[..MAGIC.len()] != MAGIC {
        return Err(ContainerError::BadMagic.into());
    }
    let version = data[MAGIC.len()];
    if version != VERSION {
        return Err(ContainerError::UnsupportedVersion(version).into());
    }
    let stored = u16::from_be_bytes([data[MAGIC.len() + 1], data[MAGIC.len() + 2]]);
    let payload = &data[PREAMBLE_LEN..];
    if truncated_hash(payload) != stored {
        return Err(ContainerError::ChecksumMismatch.into());
    }
    let encoded: EncodedStructure = bincode::deserialize(payload)
        .map_err(|e| ContainerError::Payload(e.to_string()))?;
    check_structure(&encoded, max_original_length)?;
    Ok(encoded)
}

pub fn save_container<P: AsRef<Path>>(
    path: P,
    encoded: &EncodedStructure,
) -> Result<(), CodecError> {
    let bytes = write_container(encoded)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn load_container<P: AsRef<Path>>(path: P) -> Result<EncodedStructure, CodecError> {
    let bytes = fs::read(path)?;
    read_container(&bytes)
}
