// stsafe-rs/stsafe/src/lib.rs

//! stsafe
//!
//! Host-side protocol engine for STSAFE-A secure elements: command framing,
//! CRC and MAC protection, payload encryption and signature-session
//! transcripts over a pluggable transport and crypto capability.
#![warn(missing_docs)]

pub mod constants;
pub mod crypto;
pub mod device;
pub mod error;
pub mod prelude;
pub mod protocol;
pub mod test_support;
pub mod transport;
pub mod types;
pub mod utils;

// Re-export common types at crate root so `crate::Error`, `crate::Result`,
// and the enums in `types` are available for consumers and for the
// `prelude` re-exports.
pub use crate::error::*;
pub use crate::types::*;

pub use prelude::*;
