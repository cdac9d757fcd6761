// Hex and string codecs for binary material

use crate::error::{QrlError, Result};
use std::fmt::Write;

/// Lowercase hex encoding.
///
/// With `wrap > 0` a newline is emitted before every group of `wrap` input
/// bytes after the first, so each line holds `2 * wrap` hex characters.
pub fn bin2hstr(bytes: &[u8], wrap: usize) -> String {
    let newlines = if wrap > 0 {
        bytes.len().saturating_sub(1) / wrap
    } else {
        0
    };
    let mut out = String::with_capacity(bytes.len() * 2 + newlines);
    for (i, byte) in bytes.iter().enumerate() {
        if wrap > 0 && i > 0 && i % wrap == 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Hex encoding of the raw bytes of a string
pub fn binstr2hstr(s: &str, wrap: usize) -> String {
    bin2hstr(s.as_bytes(), wrap)
}

pub fn str2bin(s: &str) -> Vec<u8> {
    s.as_bytes().to_vec()
}

/// Decode a hex string; digits are case-insensitive. Positions in errors
/// count characters, not bytes.
pub fn hstr2bin(s: &str) -> Result<Vec<u8>> {
    let digits: Vec<char> = s.chars().collect();
    if digits.len() % 2 != 0 {
        return Err(QrlError::InvalidEncoding(
            "hex string is expected to have an even number of characters".to_string(),
        ));
    }

    digits
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, chunk)| {
            let hi = hex_value(chunk[0], pair * 2)?;
            let lo = hex_value(chunk[1], pair * 2 + 1)?;
            Ok((hi << 4) | lo)
        })
        .collect()
}

fn hex_value(c: char, position: usize) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(QrlError::InvalidDigit { digit: c, position })
}

/// Big-endian encoding of `value` into exactly `len` bytes; high bytes beyond
/// 8 are zero.
pub(crate) fn to_byte(value: u64, len: usize) -> Vec<u8> {
    let mut out = vec![0u8; len];
    let mut v = value;
    for byte in out.iter_mut().rev() {
        *byte = (v & 0xff) as u8;
        v >>= 8;
    }
    out
}
