// stsafe-rs/stsafe/src/transport/mock.rs

use std::time::Duration;

use crate::protocol::ExchangeBuffer;
use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records sent frames and replays queued
/// raw responses (`[header, len_hi, len_lo, payload..]`).
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Request bytes as they would appear on the bus: header then payload.
    pub sent: Vec<Vec<u8>>,
    pub addresses: Vec<u8>,
    pub responses: Vec<Vec<u8>>,
    /// Expected payload length announced on each receive.
    pub expected_lengths: Vec<usize>,
    pub waits: Vec<Duration>,
    /// Testing hook: number of upcoming sends that should fail.
    pub send_failures: usize,
    pub max_buffer_size: Option<usize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how many subsequent sends should fail (for tests).
    pub fn set_send_failures(&mut self, n: usize) {
        self.send_failures = n;
    }

    pub fn push_response(&mut self, resp: Vec<u8>) {
        self.responses.push(resp);
    }
}

impl Transport for MockTransport {
    fn send_bytes(&mut self, buffer: &ExchangeBuffer) -> Result<()> {
        if self.send_failures > 0 {
            self.send_failures -= 1;
            return Err(Error::Bus("injected send failure".into()));
        }
        self.addresses.push(buffer.target_address);
        self.sent.push(buffer.request_bytes());
        Ok(())
    }

    fn receive_bytes(&mut self, buffer: &mut ExchangeBuffer) -> Result<()> {
        self.expected_lengths.push(buffer.len());
        if self.responses.is_empty() {
            return Err(Error::Timeout);
        }
        let raw = self.responses.remove(0);
        buffer.fill_from_response(&raw)?;
        Ok(())
    }

    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }

    fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
            .unwrap_or(crate::constants::DEFAULT_EXCHANGE_BUFFER_SIZE)
    }
}
