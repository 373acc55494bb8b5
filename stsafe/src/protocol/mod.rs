// stsafe-rs/stsafe/src/protocol/mod.rs

pub mod buffer;
pub mod codec;
pub mod commands;
pub mod crc;
pub mod mac;
pub mod parser;
pub mod responses;

pub use buffer::ExchangeBuffer;
pub use commands::{Command, Encryption};
pub use responses::*;
