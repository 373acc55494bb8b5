// stsafe-rs/stsafe/src/utils/mod.rs

//! Small helpers shared across the crate: hex rendering for traces and
//! millisecond durations.

pub mod hex;
pub mod timeout;

pub use hex::*;
pub use timeout::*;
