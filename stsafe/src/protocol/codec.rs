// stsafe-rs/stsafe/src/protocol/codec.rs

use crate::constants::AES_BLOCK_LEN;
use crate::{Error, Result};

const PADDING_MARKER: u8 = 0x80;

/// Append a length-value field (2-byte big-endian length).
pub fn put_lv(buf: &mut Vec<u8>, value: &[u8]) {
    buf.extend_from_slice(&(value.len() as u16).to_be_bytes());
    buf.extend_from_slice(value);
}

/// ISO/IEC 7816-4 padding: a 0x80 marker then zeros up to the next
/// block boundary.
pub fn pad(data: &mut Vec<u8>) {
    data.push(PADDING_MARKER);
    let rem = data.len() % AES_BLOCK_LEN;
    if rem != 0 {
        data.resize(data.len() + AES_BLOCK_LEN - rem, 0x00);
    }
}

/// Length of the unpadded message. The marker must sit in the final block
/// and only zeros may follow it.
pub fn unpad(data: &[u8]) -> Result<usize> {
    if data.is_empty() || data.len() % AES_BLOCK_LEN != 0 {
        return Err(Error::CryptoLibIssue(format!(
            "ciphertext length {} is not a positive multiple of {}",
            data.len(),
            AES_BLOCK_LEN
        )));
    }
    let tail_start = data.len() - AES_BLOCK_LEN;
    let marker = data[tail_start..]
        .iter()
        .rposition(|&b| b != 0x00)
        .map(|i| tail_start + i);
    match marker {
        Some(pos) if data[pos] == PADDING_MARKER => Ok(pos),
        _ => Err(Error::CryptoLibIssue("padding marker not found".into())),
    }
}
