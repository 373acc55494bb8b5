// stsafe-rs/stsafe/src/transport/mod.rs

pub mod i2c;
pub mod mock;
pub mod traits;

pub use i2c::{I2cBus, I2cTransport};
pub use mock::MockTransport;
pub use traits::Transport;
