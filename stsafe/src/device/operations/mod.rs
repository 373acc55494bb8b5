// stsafe-rs/stsafe/src/device/operations/mod.rs

//! Command set of a configured device, one `impl Device<Configured>` block
//! per command group.

pub mod general;
pub mod keys;
pub mod partition;
pub mod query;
pub mod signature;

pub use partition::certificate_length;
