// stsafe-rs/stsafe/src/constants.rs
//! Common protocol constants used across the crate

/// Default 7-bit I2C address of the secure element
pub const DEFAULT_I2C_ADDRESS: u8 = 0x20;

/// Default exchange buffer payload capacity before configuration
pub const DEFAULT_EXCHANGE_BUFFER_SIZE: usize = 0x1FB;

/// Extra room behind the payload for in-place MAC/CRC append
pub const EXCHANGE_BUFFER_SLACK: usize = 4;

/// Header byte + 2 length bytes preceding every response payload
pub const RESPONSE_PREAMBLE_LEN: usize = 3;

pub const CRC_LENGTH: usize = 2;
pub const MAC_LENGTH: usize = 4;

/// AES block size used for IVs and CBC padding
pub const AES_BLOCK_LEN: usize = 16;

/// 128-bit host key length
pub const HOST_KEY_LEN: usize = 16;

pub const PASSWORD_SIZE: usize = 16;

/// Uncompressed point representation identifier
pub const POINT_REPRESENTATION_ID: u8 = 0x04;

/// Host C-MAC sequence counter value reported when no host key is provisioned
pub const HOST_CMAC_COUNTER_ABSENT: u32 = 0x00FF_FFFF;

/// Transcript framing tags fed into the signature-session hash
pub const HASH_COMMAND_TAG: u8 = 0x01;
pub const HASH_RESPONSE_TAG: u8 = 0x02;

/// Bit of `zone_type` signalling a one-way counter zone
pub const ONE_WAY_COUNTER_PRESENCE: u8 = 0x01;

/// Update command atomicity flag
pub const UPDATE_ATOMICITY: u8 = 0x80;

/// VerifySignature sub-commands
pub const VERIFY_MESSAGE_SIGNATURE: u8 = 0x00;
pub const VERIFY_ENTITY_SIGNATURE: u8 = 0x01;

/// I2C polling budget and back-off step
pub const I2C_POLLING_ATTEMPTS: u32 = 35;
pub const I2C_BACKOFF_STEP_MS: u64 = 2;

/// Certificate read chunk before CRC overhead is removed
pub const CERTIFICATE_CHUNK: usize = 252;
