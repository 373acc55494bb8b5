// stsafe-rs/stsafe/src/crypto/mod.rs

//! Cryptographic capability consumed by the protocol engine.

pub mod mock;
#[cfg(feature = "soft-crypto")]
pub mod software;
pub mod traits;

pub use mock::{CallLog, CryptoCall, RecordingCrypto};
#[cfg(feature = "soft-crypto")]
pub use software::SoftwareCrypto;
pub use traits::{Crypto, MacKind};
