// stsafe-rs/stsafe/src/protocol/parser.rs

use crate::{Error, Result};

/// Ensure the slice has at least `min` bytes.
pub fn ensure_len(data: &[u8], min: usize) -> Result<()> {
    if data.len() < min {
        return Err(Error::InvalidLength {
            expected: min,
            actual: data.len(),
        });
    }
    Ok(())
}

/// Read a big-endian u16 at given index, with bounds checking.
pub fn be_u16_at(data: &[u8], idx: usize) -> Result<u16> {
    ensure_len(data, idx + 2)?;
    Ok(u16::from_be_bytes([data[idx], data[idx + 1]]))
}

/// Read a big-endian u32 at given index, with bounds checking.
pub fn be_u32_at(data: &[u8], idx: usize) -> Result<u32> {
    let s = slice_at(data, idx, 4)?;
    Ok(u32::from_be_bytes([s[0], s[1], s[2], s[3]]))
}

/// Return a subslice with bounds checking.
pub fn slice_at(data: &[u8], idx: usize, len: usize) -> Result<&[u8]> {
    ensure_len(data, idx + len)?;
    Ok(&data[idx..idx + len])
}

/// Read a single byte at `idx` with bounds checking.
pub fn byte_at(data: &[u8], idx: usize) -> Result<u8> {
    ensure_len(data, idx + 1)?;
    Ok(data[idx])
}

/// Forward-only reader over a response payload. Every read is bounds
/// checked against the payload and advances the position.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn u8(&mut self) -> Result<u8> {
        let b = byte_at(self.data, self.pos)?;
        self.pos += 1;
        Ok(b)
    }

    pub fn be_u16(&mut self) -> Result<u16> {
        let v = be_u16_at(self.data, self.pos)?;
        self.pos += 2;
        Ok(v)
    }

    pub fn be_u32(&mut self) -> Result<u32> {
        let v = be_u32_at(self.data, self.pos)?;
        self.pos += 4;
        Ok(v)
    }

    pub fn bytes(&mut self, len: usize) -> Result<&'a [u8]> {
        let s = slice_at(self.data, self.pos, len)?;
        self.pos += len;
        Ok(s)
    }

    /// Length-value field: 2-byte big-endian length followed by the value.
    pub fn lv(&mut self) -> Result<&'a [u8]> {
        let len = self.be_u16()? as usize;
        self.bytes(len)
    }

    /// Everything not consumed yet.
    pub fn rest(&mut self) -> &'a [u8] {
        let s = &self.data[self.pos..];
        self.pos = self.data.len();
        s
    }
}
