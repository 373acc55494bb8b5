// stsafe-rs/stsafe/src/protocol/buffer.rs

use crate::constants::{CRC_LENGTH, EXCHANGE_BUFFER_SLACK, RESPONSE_PREAMBLE_LEN};
use crate::protocol::crc;
use crate::{Error, Result};

/// Scratch space for one in-flight command.
///
/// The same storage holds the request and then the response: `len()` always
/// reports the payload bytes valid at the current protocol step. Storage is
/// allocated once with a few bytes of slack behind the negotiated capacity so
/// MAC and CRC trailers can be appended in place.
///
/// Request wire format: `[header] [payload]`.
/// Response wire format: `[header] [length BE(2)] [payload]`.
#[derive(Debug, Clone)]
pub struct ExchangeBuffer {
    /// 7-bit bus address of the target device
    pub target_address: u8,
    /// Command code | MAC mode bits (request) or status (response)
    pub header: u8,
    length: usize,
    capacity: usize,
    data: Vec<u8>,
}

impl ExchangeBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            target_address: 0,
            header: 0,
            length: 0,
            capacity,
            data: vec![0u8; capacity + EXCHANGE_BUFFER_SLACK],
        }
    }

    /// Negotiated payload capacity (without slack).
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total bytes the payload may grow to, trailers included.
    pub fn storage_len(&self) -> usize {
        self.data.len()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[..self.length]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.length]
    }

    /// Reallocate for a new capacity; contents are discarded.
    pub fn resize(&mut self, capacity: usize) {
        self.capacity = capacity;
        self.length = 0;
        self.data = vec![0u8; capacity + EXCHANGE_BUFFER_SLACK];
    }

    /// Start a new request.
    pub fn load(&mut self, header: u8, payload: &[u8]) -> Result<()> {
        if payload.len() > self.capacity {
            return Err(Error::BufferOverflow {
                capacity: self.capacity,
                requested: payload.len(),
            });
        }
        self.header = header;
        self.data[..payload.len()].copy_from_slice(payload);
        self.length = payload.len();
        Ok(())
    }

    /// Append bytes after the current payload (trailers may use the slack).
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        let end = self.length + bytes.len();
        if end > self.data.len() {
            return Err(Error::BufferOverflow {
                capacity: self.data.len(),
                requested: end,
            });
        }
        self.data[self.length..end].copy_from_slice(bytes);
        self.length = end;
        Ok(())
    }

    /// Replace the whole payload (used after in-place cipher operations).
    pub fn replace_payload(&mut self, payload: &[u8]) -> Result<()> {
        self.length = 0;
        self.extend_from_slice(payload)
    }

    /// Shrink the valid payload; never grows.
    pub fn truncate(&mut self, len: usize) {
        self.length = self.length.min(len);
    }

    /// Announce the number of payload bytes the transport should read.
    /// Clamped to the storage so an oversized expectation cannot overrun.
    pub fn set_expected_len(&mut self, len: usize) {
        self.length = len.min(self.data.len());
    }

    /// Request bytes as they go on the bus.
    pub fn request_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.length);
        out.push(self.header);
        out.extend_from_slice(self.payload());
        out
    }

    /// Populate the buffer from a raw response `[header, len_hi, len_lo, data..]`.
    /// Returns the device-reported payload length.
    pub fn fill_from_response(&mut self, raw: &[u8]) -> Result<usize> {
        if raw.len() < RESPONSE_PREAMBLE_LEN {
            return Err(Error::InvalidLength {
                expected: RESPONSE_PREAMBLE_LEN,
                actual: raw.len(),
            });
        }
        let len = u16::from_be_bytes([raw[1], raw[2]]) as usize;
        if len > self.data.len() {
            return Err(Error::BufferOverflow {
                capacity: self.data.len(),
                requested: len,
            });
        }
        let body = &raw[RESPONSE_PREAMBLE_LEN..];
        if body.len() < len {
            return Err(Error::InvalidLength {
                expected: RESPONSE_PREAMBLE_LEN + len,
                actual: raw.len(),
            });
        }
        self.header = raw[0];
        self.data[..len].copy_from_slice(&body[..len]);
        self.length = len;
        Ok(len)
    }

    /// Append the CRC trailer over header + payload.
    pub fn append_crc(&mut self) -> Result<()> {
        let trailer = crc::trailer(self.header, self.payload());
        self.extend_from_slice(&trailer)
    }

    /// Verify the trailing CRC over header + payload and strip it.
    pub fn check_crc(&mut self) -> Result<()> {
        if self.length < CRC_LENGTH {
            return Err(Error::InvalidLength {
                expected: CRC_LENGTH,
                actual: self.length,
            });
        }
        let body = self.length - CRC_LENGTH;
        let expected = crc::checksum(self.header, &self.data[..body]);
        let actual = u16::from_be_bytes([self.data[body], self.data[body + 1]]);
        if expected != actual {
            return Err(Error::InvalidCrc { expected, actual });
        }
        self.length = body;
        Ok(())
    }
}
