// stsafe-rs/stsafe/src/protocol/responses/keys.rs

use crate::protocol::parser::Cursor;
use crate::Result;

/// Public part of a freshly generated key pair.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneratedKeyPair {
    pub point_representation_id: u8,
    pub x: Vec<u8>,
    /// Absent for point representations that only carry X.
    pub y: Option<Vec<u8>>,
}

/// Layout: point rep id(1) [+ X LV [+ Y LV]]
pub fn decode_generate_key_pair(data: &[u8]) -> Result<GeneratedKeyPair> {
    let mut c = Cursor::new(data);
    let point_representation_id = c.u8()?;
    let x = if c.remaining() >= 2 {
        c.lv()?.to_vec()
    } else {
        Vec::new()
    };
    let y = if c.remaining() >= 2 {
        Some(c.lv()?.to_vec())
    } else {
        None
    };
    Ok(GeneratedKeyPair {
        point_representation_id,
        x,
        y,
    })
}
