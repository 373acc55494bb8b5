// stsafe-rs/stsafe/src/error.rs

use thiserror::Error;

use crate::types::ResponseCode;

/// Common error type.
#[derive(Error, Debug)]
pub enum Error {
    /// The secure element answered with a non-zero status byte.
    #[error("device reported {0}")]
    Device(ResponseCode),

    #[error("unknown device status {0:#04x}")]
    UnknownStatus(u8),

    #[error("communication error: {0}")]
    Communication(String),

    #[error("invalid crc: expected {expected:#06x}, got {actual:#06x}")]
    InvalidCrc { expected: u16, actual: u16 },

    #[error("invalid response mac")]
    InvalidRmac,

    #[error("crypto library issue: {0}")]
    CryptoLibIssue(String),

    #[error("a signature session is already open")]
    SessionAlreadyOpen,

    #[error("buffer overflow: capacity {capacity}, requested {requested}")]
    BufferOverflow { capacity: usize, requested: usize },

    #[error("invalid packet length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("frame format error: {0}")]
    FrameFormat(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("operation timed out")]
    Timeout,

    #[error("i2c bus error: {0}")]
    Bus(String),
}

impl Error {
    /// Collapse the error onto the flat status taxonomy used by the device.
    pub fn response_code(&self) -> ResponseCode {
        match self {
            Error::Device(code) => *code,
            Error::Communication(_) | Error::Timeout | Error::Bus(_) => {
                ResponseCode::CommunicationError
            }
            Error::InvalidCrc { .. } => ResponseCode::InvalidCrc,
            Error::InvalidRmac => ResponseCode::InvalidRmac,
            Error::CryptoLibIssue(_) => ResponseCode::CryptoLibIssue,
            Error::BufferOverflow { .. } => ResponseCode::BufferLengthExceeded,
            Error::InvalidArgument(_) => ResponseCode::ValueOutOfRange,
            Error::UnknownStatus(_)
            | Error::SessionAlreadyOpen
            | Error::InvalidLength { .. }
            | Error::FrameFormat(_) => ResponseCode::UnexpectedError,
        }
    }

    /// True for failures detected by the host rather than reported by the
    /// secure element.
    pub fn is_host_detected(&self) -> bool {
        !matches!(self, Error::Device(_) | Error::UnknownStatus(_))
    }

    pub(crate) fn into_communication(self) -> Self {
        match self {
            Error::Communication(_) | Error::BufferOverflow { .. } => self,
            other => Error::Communication(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
