//! basE91 codec for arrays of little-endian `f32` values.
//!
//! Wave elevations travel inside samples as `waves: {z: "<basE91 text>"}`.
//! The decoded bytes are consecutive IEEE-754 single precision floats.

use thiserror::Error;

const ALPHABET: &[u8; 91] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!#$%&()*+,./:;<=>?@[]^_`{|}~\"";

const INVALID: u8 = 0xff;

const DECODE_TABLE: [u8; 256] = {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("invalid basE91 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },
    #[error("{len} decoded bytes do not form whole f32 values")]
    TruncatedFloat { len: usize },
}

/// Decodes an encoded wave payload into elevations.
pub trait WaveDecoder {
    fn decode(&self, encoded: &str) -> Result<Vec<f32>, DecodeError>;
}

/// Default [`WaveDecoder`]: basE91 text holding little-endian `f32`s.
#[derive(Debug, Clone, Copy, Default)]
pub struct Base91Float32;

impl WaveDecoder for Base91Float32 {
    fn decode(&self, encoded: &str) -> Result<Vec<f32>, DecodeError> {
        decode_f32s(encoded)
    }
}

/// Decode basE91 text to bytes. ASCII whitespace is skipped.
pub fn decode(text: &str) -> Result<Vec<u8>, DecodeError> {
    let mut out = Vec::with_capacity(text.len() * 7 / 8 + 1);
    let mut queue: u32 = 0;
    let mut bits: u32 = 0;
    let mut pending: Option<u32> = None;

    for (position, character) in text.char_indices() {
        if character.is_ascii_whitespace() {
            continue;
        }
        let digit = if character.is_ascii() {
            DECODE_TABLE[character as usize]
        } else {
            INVALID
        };
        if digit == INVALID {
            return Err(DecodeError::InvalidCharacter { character, position });
        }
        let digit = u32::from(digit);
        match pending.take() {
            None => pending = Some(digit),
            Some(low) => {
                let value = low + digit * 91;
                queue |= value << bits;
                bits += if value & 8191 > 88 { 13 } else { 14 };
                loop {
                    out.push((queue & 0xff) as u8);
                    queue >>= 8;
                    bits -= 8;
                    if bits <= 7 {
                        break;
                    }
                }
            }
        }
    }
    if let Some(low) = pending {
        out.push(((queue | low << bits) & 0xff) as u8);
    }
    Ok(out)
}

/// Encode bytes as basE91 text.
pub fn encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 16 / 13 + 2);
    let mut queue: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in bytes {
        queue |= u32::from(byte) << bits;
        bits += 8;
        if bits > 13 {
            let mut value = queue & 8191;
            if value > 88 {
                queue >>= 13;
                bits -= 13;
            } else {
                value = queue & 16383;
                queue >>= 14;
                bits -= 14;
            }
            out.push(ALPHABET[(value % 91) as usize] as char);
            out.push(ALPHABET[(value / 91) as usize] as char);
        }
    }
    if bits > 0 {
        out.push(ALPHABET[(queue % 91) as usize] as char);
        if bits > 7 || queue > 90 {
            out.push(ALPHABET[(queue / 91) as usize] as char);
        }
    }
    out
}

/// Decode basE91 text to little-endian `f32` values.
pub fn decode_f32s(text: &str) -> Result<Vec<f32>, DecodeError> {
    let bytes = decode(text)?;
    if bytes.len() % 4 != 0 {
        return Err(DecodeError::TruncatedFloat { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

/// Encode `f32` values as little-endian bytes in basE91 text.
pub fn encode_f32s(values: &[f32]) -> String {
    let bytes: Vec<u8> = values.iter().flat_map(|v| v.to_le_bytes()).collect();
    encode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_table_covers_alphabet() {
        assert_eq!(DECODE_TABLE[b'A' as usize], 0);
        assert_eq!(DECODE_TABLE[b'"' as usize], 90);
        assert_eq!(DECODE_TABLE[b'-' as usize], INVALID);
        assert_eq!(DECODE_TABLE[b'\'' as usize], INVALID);
    }

    #[test]
    fn known_text_vector() {
        assert_eq!(encode(b"Hello, World!"), ">OwJh>}AQ;r@@Y?F");
        assert_eq!(decode(">OwJh>}AQ;r@@Y?F").unwrap(), b"Hello, World!");
    }
}
