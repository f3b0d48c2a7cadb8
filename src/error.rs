use std::io;
use thiserror::Error;

/// Errors raised while talking to a physical tag.
#[derive(Error, Debug)]
pub enum TagError {
    #[error("Tag reported no UID")]
    MissingUid,

    #[error("Authentication failed for sector {0}")]
    AuthenticationFailed(usize),

    #[error("Tag I/O error: {0}")]
    IoFailure(#[from] io::Error),
}

/// Errors raised while decoding a tag dump into structured fields.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Field at offset {offset} with length {len} is out of bounds (buffer is {available} bytes)")]
    OutOfBounds {
        offset: usize,
        len: usize,
        available: usize,
    },

    #[error("Unsupported field width: {0} bytes")]
    UnsupportedWidth(usize),

    #[error("Invalid datetime field: {0:?}")]
    InvalidDateTime(String),

    #[error("Insufficient data: expected at least {expected} bytes, got {actual}")]
    InsufficientData { expected: usize, actual: usize },
}
