// stsafe-rs/stsafe/src/transport/traits.rs

use std::time::Duration;

use crate::constants::DEFAULT_EXCHANGE_BUFFER_SIZE;
use crate::protocol::ExchangeBuffer;
use crate::Result;

/// Transport trait abstracts bus I/O away from protocol/device logic.
pub trait Transport {
    /// Transmit `[header][payload]` to `buffer.target_address`.
    fn send_bytes(&mut self, buffer: &ExchangeBuffer) -> Result<()>;

    /// Receive `[header][length BE][payload]` into the buffer. On entry
    /// `buffer.len()` is the payload size the caller expects; on return it
    /// is the length reported by the device.
    fn receive_bytes(&mut self, buffer: &mut ExchangeBuffer) -> Result<()>;

    /// Block while the device processes a command.
    fn wait(&mut self, duration: Duration) {
        std::thread::sleep(duration)
    }

    /// Largest exchange buffer payload the transport can carry.
    fn max_buffer_size(&self) -> usize {
        DEFAULT_EXCHANGE_BUFFER_SIZE
    }
}
