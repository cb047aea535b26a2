//! Base64 VLQ
//!
//! Variable-length quantities as used by the `mappings` field of a version 3
//! source map. Every base64 digit carries five payload bits plus a continuation
//! bit; the lowest bit of the assembled value is the sign.

use thiserror::Error;

const B64_DIGITS: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const VLQ_BASE_SHIFT: u32 = 5;
const VLQ_CONTINUATION_BIT: u64 = 1 << VLQ_BASE_SHIFT;
const VLQ_BASE_MASK: u64 = VLQ_CONTINUATION_BIT - 1;

/// Enough digits for a 32 bit magnitude plus the sign bit.
const MAX_DIGITS: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VlqError {
    #[error("unexpected end of VLQ data at offset {offset}")]
    UnexpectedEnd { offset: usize },
    #[error("invalid base64 digit {digit:?} at offset {offset}")]
    InvalidDigit { digit: char, offset: usize },
    #[error("VLQ value starting at offset {offset} does not fit in 32 bits")]
    Overflow { offset: usize },
}

/// Cursor over the ASCII text of a `mappings` value.
#[derive(Debug, Clone)]
pub struct VlqCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> VlqCursor<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn has_next(&self) -> bool {
        self.pos < self.bytes.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn next_byte(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// True at end of input or when the next character ends a segment.
    pub fn at_separator(&self) -> bool {
        matches!(self.peek(), None | Some(b',') | Some(b';'))
    }
}

fn from_base64_digit(byte: u8) -> Option<u64> {
    let value = match byte {
        b'A'..=b'Z' => byte - b'A',
        b'a'..=b'z' => byte - b'a' + 26,
        b'0'..=b'9' => byte - b'0' + 52,
        b'+' => 62,
        b'/' => 63,
        _ => return None,
    };
    Some(value as u64)
}

/// Decode one signed value, advancing the cursor past exactly the digits it
/// consumed.
pub fn decode(cursor: &mut VlqCursor<'_>) -> Result<i32, VlqError> {
    let start = cursor.position();
    let mut accumulated: u64 = 0;
    let mut shift = 0u32;
    let mut digits = 0usize;

    loop {
        let offset = cursor.position();
        let byte = cursor
            .next_byte()
            .ok_or(VlqError::UnexpectedEnd { offset })?;
        let digit = from_base64_digit(byte).ok_or(VlqError::InvalidDigit {
            digit: byte as char,
            offset,
        })?;

        digits += 1;
        if digits > MAX_DIGITS {
            return Err(VlqError::Overflow { offset: start });
        }

        accumulated |= (digit & VLQ_BASE_MASK) << shift;
        shift += VLQ_BASE_SHIFT;

        if digit & VLQ_CONTINUATION_BIT == 0 {
            break;
        }
    }

    let negative = accumulated & 1 == 1;
    let magnitude = (accumulated >> 1) as i64;
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| VlqError::Overflow { offset: start })
}

/// Encode one signed value. Inverse of [`decode`].
pub fn encode_vlq(value: i32) -> String {
    let value = value as i64;
    let mut remaining: u64 = if value < 0 {
        ((-value as u64) << 1) | 1
    } else {
        (value as u64) << 1
    };

    let mut out = String::new();
    loop {
        let mut digit = remaining & VLQ_BASE_MASK;
        remaining >>= VLQ_BASE_SHIFT;
        if remaining > 0 {
            digit |= VLQ_CONTINUATION_BIT;
        }
        out.push(B64_DIGITS[digit as usize] as char);

        if remaining == 0 {
            break;
        }
    }
    out
}
