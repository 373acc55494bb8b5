// stsafe-rs/stsafe/src/types.rs

use std::convert::TryFrom;
use std::ops::BitOr;

use derive_more::Display;

use crate::Error;

/// Status byte returned by the secure element (and the host-detected codes
/// that share its numbering).
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCode {
    #[display(fmt = "OK")]
    Ok = 0x00,
    #[display(fmt = "COMMUNICATION_ERROR")]
    CommunicationError = 0x01,
    #[display(fmt = "INCONSISTENT_COMMAND_DATA")]
    InconsistentCommandData = 0x02,
    #[display(fmt = "VALUE_OUT_OF_RANGE")]
    ValueOutOfRange = 0x03,
    #[display(fmt = "UNSUPPORTED_COMMAND_CODE")]
    UnsupportedCommandCode = 0x04,
    #[display(fmt = "UNEXPECTED_ERROR")]
    UnexpectedError = 0x05,
    #[display(fmt = "BUFFER_LENGTH_EXCEEDED")]
    BufferLengthExceeded = 0x06,
    #[display(fmt = "WRONG_SESSION")]
    WrongSession = 0x07,
    #[display(fmt = "CMAC_COUNTER_LIMIT_REACHED")]
    CmacCounterLimitReached = 0x09,
    #[display(fmt = "KEY_NOT_FOUND")]
    KeyNotFound = 0x0A,
    #[display(fmt = "KEY_BLOCKED")]
    KeyBlocked = 0x0B,
    #[display(fmt = "WRONG_KEY_TYPE")]
    WrongKeyType = 0x0C,
    #[display(fmt = "SESSION_COUNTER_OUT_OF_RANGE")]
    SessionCounterOutOfRange = 0x0D,
    #[display(fmt = "DEPTH_OUT_OF_RANGE")]
    DepthOutOfRange = 0x0E,
    #[display(fmt = "INVALID_LIFE_CYCLE_STATE")]
    InvalidLifeCycleState = 0x0F,
    #[display(fmt = "ENTRY_NOT_FOUND")]
    EntryNotFound = 0x10,
    #[display(fmt = "UNSATISFIED_ACCESS_CONDITION")]
    UnsatisfiedAccessCondition = 0x11,
    #[display(fmt = "INCORRECT_ZONE_TYPE")]
    IncorrectZoneType = 0x12,
    #[display(fmt = "COUNTER_LIMIT_EXCEEDED")]
    CounterLimitExceeded = 0x13,
    #[display(fmt = "BOUNDARY_EXCEEDED")]
    BoundaryExceeded = 0x14,
    #[display(fmt = "INVALID_PRIVATE_KEY")]
    InvalidPrivateKey = 0x15,
    #[display(fmt = "INVALID_CMAC")]
    InvalidCmac = 0x16,
    #[display(fmt = "CHALLENGE_MISSING")]
    ChallengeMissing = 0x17,
    #[display(fmt = "COMMAND_DECRYPTION_ERROR")]
    CommandDecryptionError = 0x18,
    #[display(fmt = "INVALID_PUBLIC_KEY")]
    InvalidPublicKey = 0x19,
    #[display(fmt = "PASSWORD_BLOCKED")]
    PasswordBlocked = 0x1A,
    #[display(fmt = "CRYPTO_LIB_ISSUE")]
    CryptoLibIssue = 0x1C,
    #[display(fmt = "INVALID_RMAC")]
    InvalidRmac = 0x1D,
    #[display(fmt = "INVALID_CRC")]
    InvalidCrc = 0x1E,
}

impl ResponseCode {
    pub fn from_u8(value: u8) -> Option<Self> {
        use ResponseCode::*;
        let code = match value {
            0x00 => Ok,
            0x01 => CommunicationError,
            0x02 => InconsistentCommandData,
            0x03 => ValueOutOfRange,
            0x04 => UnsupportedCommandCode,
            0x05 => UnexpectedError,
            0x06 => BufferLengthExceeded,
            0x07 => WrongSession,
            0x09 => CmacCounterLimitReached,
            0x0A => KeyNotFound,
            0x0B => KeyBlocked,
            0x0C => WrongKeyType,
            0x0D => SessionCounterOutOfRange,
            0x0E => DepthOutOfRange,
            0x0F => InvalidLifeCycleState,
            0x10 => EntryNotFound,
            0x11 => UnsatisfiedAccessCondition,
            0x12 => IncorrectZoneType,
            0x13 => CounterLimitExceeded,
            0x14 => BoundaryExceeded,
            0x15 => InvalidPrivateKey,
            0x16 => InvalidCmac,
            0x17 => ChallengeMissing,
            0x18 => CommandDecryptionError,
            0x19 => InvalidPublicKey,
            0x1A => PasswordBlocked,
            0x1C => CryptoLibIssue,
            0x1D => InvalidRmac,
            0x1E => InvalidCrc,
            _ => return None,
        };
        Some(code)
    }

    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Command codes (low five bits of the header byte).
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandCode {
    Echo = 0x00,
    WarmReset = 0x01,
    GenerateRandom = 0x02,
    StartSession = 0x03,
    Decrement = 0x04,
    Read = 0x05,
    Update = 0x06,
    Increment = 0x07,
    CacheBaseKey = 0x08,
    GenerateCmacRmac = 0x09,
    VerifyRmac = 0x0A,
    UnwrapIssuerEnvelope = 0x0B,
    DeleteKey = 0x0C,
    Hibernate = 0x0D,
    WrapLocalEnvelope = 0x0E,
    UnwrapLocalEnvelope = 0x0F,
    PutAttribute = 0x10,
    GenerateKey = 0x11,
    PutKey = 0x12,
    Configure = 0x13,
    Query = 0x14,
    GetSignature = 0x15,
    GenerateSignature = 0x16,
    VerifySignature = 0x17,
    EstablishKey = 0x18,
    StandBy = 0x19,
    VerifyPassword = 0x1A,
}

impl CommandCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// MAC mode bits carried in the upper three bits of the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct MacMode(u8);

impl MacMode {
    pub const NONE: Self = Self(0x00);
    /// Use the host MAC key (requires a fresh host C-MAC sequence counter).
    pub const H_MAC: Self = Self(0x20);
    pub const R_MAC: Self = Self(0x40);
    pub const C_MAC: Self = Self(0x80);
    pub const HOST_C_MAC: Self = Self(0xA0);
    pub const HOST_R_MAC: Self = Self(0xE0);
    pub const ADMIN_PERIPHERAL_R_MAC: Self = Self(0xC0);

    const MASK: u8 = 0xE0;

    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::MASK)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }

    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for MacMode {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Attribute tags used by Query, PutAttribute and DeleteKey.
#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeTag {
    AdminBaseKeySlot = 0x01,
    PeripheralBaseKeySlot = 0x02,
    ServiceBaseKeySlot = 0x03,
    MasterKeyTable = 0x04,
    CacheBaseKeyTable = 0x05,
    LocalEnvelopeKeyTable = 0x07,
    LifeCycleState = 0x08,
    PasswordSlot = 0x09,
    I2cParameter = 0x0A,
    PublicKeySlot = 0x0B,
    RemainingCacheDerivations = 0x0C,
    ProductData = 0x11,
    DataPartition = 0x12,
    PrivateKeySlot = 0x13,
    PrivateKeyTable = 0x14,
    HostKeySlot = 0x17,
}

impl AttributeTag {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LifeCycleState {
    Born = 0x01,
    Operational = 0x03,
    Terminated = 0x04,
    BornAndLocked = 0x81,
    OperationalAndLocked = 0x83,
}

impl TryFrom<u8> for LifeCycleState {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x01 => Ok(Self::Born),
            0x03 => Ok(Self::Operational),
            0x04 => Ok(Self::Terminated),
            0x81 => Ok(Self::BornAndLocked),
            0x83 => Ok(Self::OperationalAndLocked),
            other => Err(Error::FrameFormat(format!(
                "unknown life cycle state {:#04x}",
                other
            ))),
        }
    }
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessCondition {
    Always = 0,
    Host = 1,
    Auth = 2,
    Mac = 3,
    Never = 4,
}

/// Request to change a zone access condition as a side effect of
/// Read/Update/Decrement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessConditionChange {
    /// New value of the "change right" bit.
    pub right: bool,
    pub condition: AccessCondition,
}

impl AccessConditionChange {
    const INDICATOR: u8 = 0x10;
    const RIGHT: u8 = 0x08;

    pub fn new(right: bool, condition: AccessCondition) -> Self {
        Self { right, condition }
    }

    /// First request byte shared by the partition commands.
    pub fn encode(change: Option<Self>) -> u8 {
        match change {
            Some(c) => {
                Self::INDICATOR | if c.right { Self::RIGHT } else { 0 } | c.condition as u8
            }
            None => 0,
        }
    }
}

/// StartSession session kinds.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionType {
    ServiceSession = 0x01,
    AdminSession = 0x02,
    PeripheralSession = 0x03,
    CacheSession = 0x06,
    SignatureSession = 0x08,
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RandomSubject {
    Ephemeral = 0x00,
    Authentication = 0x01,
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeySlot {
    Slot0 = 0x00,
    Slot1 = 0x01,
}

impl KeySlot {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Slot0),
            0x01 => Some(Self::Slot1),
            _ => None,
        }
    }
}

/// Private key authorization flags (bit set).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AuthorizationFlags(u16);

impl AuthorizationFlags {
    pub const NONE: Self = Self(0x0000);
    pub const KEY_ESTABLISHMENT: Self = Self(0x0001);
    pub const MSG_DIGEST_SIGNATURE: Self = Self(0x0004);
    pub const CMD_RSP_SIGNATURE: Self = Self(0x0008);

    const MASK: u16 = 0x000D;
    const CHANGE_RIGHT: u16 = 0x8000;

    pub const fn bits(self) -> u16 {
        self.0
    }

    /// Private key mode word: change-right bit and the masked flags.
    pub fn mode(self, change_right: bool) -> u16 {
        (if change_right { Self::CHANGE_RIGHT } else { 0 }) | (self.0 & Self::MASK)
    }
}

impl BitOr for AuthorizationFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AesKeyType {
    Aes128 = 0x00,
    Aes256 = 0x01,
}

impl AesKeyType {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Aes128),
            0x01 => Some(Self::Aes256),
            _ => None,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HashType {
    #[default]
    Sha256 = 0x00,
    Sha384 = 0x01,
}

impl HashType {
    pub fn digest_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
        }
    }
}

#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeUpMode {
    I2cStartOrReset = 0x01,
    Reset = 0x02,
}

/// Elliptic curves the secure element can hold keys for.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveId {
    NistP256,
    NistP384,
    BrainpoolP256,
    BrainpoolP384,
}

impl CurveId {
    pub const ALL: [CurveId; 4] = [
        CurveId::NistP256,
        CurveId::NistP384,
        CurveId::BrainpoolP256,
        CurveId::BrainpoolP384,
    ];

    /// DER object identifier body (without tag/length).
    pub fn oid(self) -> &'static [u8] {
        match self {
            Self::NistP256 => &[0x2A, 0x86, 0x48, 0xCE, 0x3D, 0x03, 0x01, 0x07],
            Self::NistP384 => &[0x2B, 0x81, 0x04, 0x00, 0x22],
            Self::BrainpoolP256 => &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x07],
            Self::BrainpoolP384 => &[0x2B, 0x24, 0x03, 0x03, 0x02, 0x08, 0x01, 0x01, 0x0B],
        }
    }

    pub fn from_oid(oid: &[u8]) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.oid() == oid)
    }

    /// Coordinate size in bytes.
    pub fn coordinate_len(self) -> usize {
        match self {
            Self::NistP256 | Self::BrainpoolP256 => 32,
            Self::NistP384 | Self::BrainpoolP384 => 48,
        }
    }
}

/// Uncompressed public point (big-endian coordinates).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicKey {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl PublicKey {
    pub fn new(x: impl Into<Vec<u8>>, y: impl Into<Vec<u8>>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
        }
    }
}

/// ECDSA signature as returned by the device (R and S, big-endian).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Signature {
    pub r: Vec<u8>,
    pub s: Vec<u8>,
}
