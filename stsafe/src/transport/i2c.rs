// stsafe-rs/stsafe/src/transport/i2c.rs

use std::time::Duration;

use log::{debug, trace, warn};

use crate::constants::{
    DEFAULT_EXCHANGE_BUFFER_SIZE, EXCHANGE_BUFFER_SLACK, I2C_POLLING_ATTEMPTS,
    RESPONSE_PREAMBLE_LEN,
};
use crate::protocol::ExchangeBuffer;
use crate::transport::traits::Transport;
use crate::utils::{bytes_to_hex_spaced, polling_backoff};
use crate::{Error, Result};

/// Minimal I2C master the transport drives. A NACK from a busy device is
/// reported as an error and retried by the transport.
pub trait I2cBus {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<()>;

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<()>;

    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }
}

/// Polling transport over an I2C bus.
///
/// The device NACKs while it is busy, so every write and read is retried
/// with a linearly growing back-off until the polling budget is spent.
pub struct I2cTransport<B: I2cBus> {
    bus: B,
    attempts: u32,
    max_buffer_size: usize,
}

impl<B: I2cBus> I2cTransport<B> {
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            attempts: I2C_POLLING_ATTEMPTS,
            max_buffer_size: DEFAULT_EXCHANGE_BUFFER_SIZE,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    pub fn with_max_buffer_size(mut self, size: usize) -> Self {
        self.max_buffer_size = size;
        self
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn into_inner(self) -> B {
        self.bus
    }

    fn frame_capacity(&self) -> usize {
        1 + self.max_buffer_size + EXCHANGE_BUFFER_SLACK
    }

    fn poll<F>(&mut self, what: &str, mut op: F) -> Result<()>
    where
        F: FnMut(&mut B) -> Result<()>,
    {
        for attempt in 0..self.attempts {
            match op(&mut self.bus) {
                Ok(()) => return Ok(()),
                Err(e) => {
                    debug!("i2c {} attempt {} failed: {}", what, attempt + 1, e);
                    self.bus.delay(polling_backoff(attempt));
                }
            }
        }
        warn!("i2c {} gave up after {} attempts", what, self.attempts);
        Err(Error::Timeout)
    }

    fn read_frame(&mut self, address: u8, payload_len: usize) -> Result<Vec<u8>> {
        let mut raw = vec![0u8; RESPONSE_PREAMBLE_LEN + payload_len];
        self.poll("read", |bus| bus.read(address, &mut raw))?;
        Ok(raw)
    }
}

impl<B: I2cBus> Transport for I2cTransport<B> {
    fn send_bytes(&mut self, buffer: &ExchangeBuffer) -> Result<()> {
        let frame = buffer.request_bytes();
        if frame.len() > self.frame_capacity() {
            return Err(Error::BufferOverflow {
                capacity: self.frame_capacity(),
                requested: frame.len(),
            });
        }
        trace!("i2c write @{:#04x}: {}", buffer.target_address, bytes_to_hex_spaced(&frame));
        let address = buffer.target_address;
        self.poll("write", |bus| bus.write(address, &frame))
    }

    fn receive_bytes(&mut self, buffer: &mut ExchangeBuffer) -> Result<()> {
        let address = buffer.target_address;
        let expected = buffer.len();
        let mut raw = self.read_frame(address, expected)?;

        let reported = u16::from_be_bytes([raw[1], raw[2]]) as usize;
        if reported > expected {
            debug!(
                "device reports {} bytes, {} announced; reading again",
                reported, expected
            );
            if reported > buffer.storage_len() {
                return Err(Error::BufferOverflow {
                    capacity: buffer.storage_len(),
                    requested: reported,
                });
            }
            raw = self.read_frame(address, reported)?;
        }
        trace!("i2c read @{:#04x}: {}", address, bytes_to_hex_spaced(&raw));
        buffer.fill_from_response(&raw)?;
        Ok(())
    }

    fn wait(&mut self, duration: Duration) {
        self.bus.delay(duration)
    }

    fn max_buffer_size(&self) -> usize {
        self.max_buffer_size
    }
}
