// stsafe-rs/stsafe/src/protocol/responses/general.rs

use crate::protocol::parser::{self, Cursor};
use crate::types::Signature;
use crate::{Error, Result};

/// Decrement response: the new one-way counter value (4 bytes BE).
pub fn decode_decrement(data: &[u8]) -> Result<u32> {
    parser::be_u32_at(data, 0)
}

/// Signature response: R LV followed by S LV.
pub fn decode_signature(data: &[u8]) -> Result<Signature> {
    let mut c = Cursor::new(data);
    let r = c.lv()?.to_vec();
    let s = c.lv()?.to_vec();
    Ok(Signature { r, s })
}

/// VerifySignature response: a single validity byte.
pub fn decode_validity(data: &[u8]) -> Result<bool> {
    Ok(parser::byte_at(data, 0)? != 0)
}

/// Outcome of VerifyPassword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PasswordVerification {
    pub verified: bool,
    pub remaining_tries: u8,
}

/// Layout: verification status(1) + remaining tries(1)
pub fn decode_verify_password(data: &[u8]) -> Result<PasswordVerification> {
    parser::ensure_len(data, 2)?;
    Ok(PasswordVerification {
        verified: data[0] != 0,
        remaining_tries: data[1],
    })
}

/// EstablishKey response (after decryption): shared secret LV.
pub fn decode_shared_secret(data: &[u8]) -> Result<Vec<u8>> {
    let mut c = Cursor::new(data);
    let secret = c.lv()?;
    if secret.is_empty() {
        return Err(Error::FrameFormat("empty shared secret".into()));
    }
    Ok(secret.to_vec())
}
