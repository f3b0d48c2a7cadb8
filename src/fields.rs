//! Fixed-offset extraction primitives over a raw tag dump.
//!
//! All functions address the buffer as `(block, offset, len)` where a block
//! is 16 bytes and the absolute offset is `block * 16 + offset`. They are
//! pure and never touch state outside the given buffer.

use crate::constants::{BLOCK_SIZE, DATETIME_PATTERN};
use crate::error::DecodeError;
use chrono::NaiveDateTime;

/// Borrow `len` bytes starting at `block * 16 + offset`.
pub fn bytes_at(buf: &[u8], block: usize, offset: usize, len: usize) -> Result<&[u8], DecodeError> {
    let start = block * BLOCK_SIZE + offset;
    let oob = || DecodeError::OutOfBounds {
        offset: start,
        len,
        available: buf.len(),
    };
    let end = start.checked_add(len).ok_or_else(oob)?;
    buf.get(start..end).ok_or_else(oob)
}

/// Uppercase hex encoding of the field, two characters per byte.
pub fn hex_at(buf: &[u8], block: usize, offset: usize, len: usize) -> Result<String, DecodeError> {
    Ok(hex::encode_upper(bytes_at(buf, block, offset, len)?))
}

/// Decode the field as UTF-8 text. Tags pad text fields with zeros, so
/// embedded NUL characters are stripped.
pub fn string_at(buf: &[u8], block: usize, offset: usize, len: usize) -> Result<String, DecodeError> {
    let raw = bytes_at(buf, block, offset, len)?;
    Ok(String::from_utf8_lossy(raw)
        .chars()
        .filter(|c| *c != '\0')
        .collect())
}

/// Little-endian unsigned integer. Only 2- and 4-byte widths exist on the
/// tag; anything else is a programming error in the field map.
pub fn uint_at(buf: &[u8], block: usize, offset: usize, len: usize) -> Result<u64, DecodeError> {
    match len {
        2 => {
            let raw: [u8; 2] = bytes_at(buf, block, offset, len)?
                .try_into()
                .expect("length checked");
            Ok(u64::from(u16::from_le_bytes(raw)))
        }
        4 => {
            let raw: [u8; 4] = bytes_at(buf, block, offset, len)?
                .try_into()
                .expect("length checked");
            Ok(u64::from(u32::from_le_bytes(raw)))
        }
        other => Err(DecodeError::UnsupportedWidth(other)),
    }
}

/// Little-endian IEEE-754 float, 4 or 8 bytes wide. The 8-byte width is
/// narrowed to single precision on return. `decimals` optionally rounds the
/// value to that many fractional digits before narrowing.
pub fn float_at(
    buf: &[u8],
    block: usize,
    offset: usize,
    len: usize,
    decimals: Option<u32>,
) -> Result<f32, DecodeError> {
    let value = match len {
        4 => {
            let raw: [u8; 4] = bytes_at(buf, block, offset, len)?
                .try_into()
                .expect("length checked");
            f64::from(f32::from_le_bytes(raw))
        }
        8 => {
            let raw: [u8; 8] = bytes_at(buf, block, offset, len)?
                .try_into()
                .expect("length checked");
            f64::from_le_bytes(raw)
        }
        other => return Err(DecodeError::UnsupportedWidth(other)),
    };

    let value = match decimals {
        Some(n) => {
            let scale = 10f64.powi(n as i32);
            (value * scale).round() / scale
        }
        None => value,
    };

    Ok(value as f32)
}

/// Parse a NUL-padded text field holding a `yyyy_MM_dd_HH_mm` timestamp.
pub fn datetime_at(
    buf: &[u8],
    block: usize,
    offset: usize,
    len: usize,
) -> Result<NaiveDateTime, DecodeError> {
    let text = string_at(buf, block, offset, len)?;
    NaiveDateTime::parse_from_str(&text, DATETIME_PATTERN)
        .map_err(|_| DecodeError::InvalidDateTime(text))
}
