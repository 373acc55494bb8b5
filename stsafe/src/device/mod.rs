// stsafe-rs/stsafe/src/device/mod.rs

pub mod builder;
pub mod handle;
pub mod operations;
pub mod session;
mod transceive;

pub use builder::DeviceBuilder;
pub use handle::{Configured, Device, Unconfigured};
pub use operations::certificate_length;
pub use session::SignatureSession;
