// stsafe-rs/stsafe/src/prelude.rs

pub use crate::crypto::{Crypto, MacKind};
#[cfg(feature = "soft-crypto")]
pub use crate::crypto::SoftwareCrypto;
pub use crate::device::{Configured, Device, DeviceBuilder, SignatureSession, Unconfigured};
pub use crate::protocol::{
    DataPartition, GeneratedKeyPair, HostKeySlot, I2cParameters, LocalEnvelopeKeySlot,
    PasswordVerification, ProductData, PublicKeySlot, ZoneInformationRecord,
};
pub use crate::transport::{I2cBus, I2cTransport, Transport};
pub use crate::{
    AccessCondition, AccessConditionChange, AesKeyType, AttributeTag, AuthorizationFlags,
    CurveId, Error, HashType, KeySlot, LifeCycleState, MacMode, PublicKey, RandomSubject, Result,
    ResponseCode, Signature, WakeUpMode,
};

pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, ms};
