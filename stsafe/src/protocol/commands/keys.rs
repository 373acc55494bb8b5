// stsafe-rs/stsafe/src/protocol/commands/keys.rs

use crate::types::{AesKeyType, AttributeTag, AuthorizationFlags, CurveId, KeySlot};

/// Encode GenerateKey for a private key slot
/// Layout: tag(1) + slot(1) + use limit(2 BE) + mode(2 BE) + oid length(2 BE) + oid
pub fn encode_generate_key_pair(
    slot: KeySlot,
    use_limit: u16,
    change_auth_flags_right: bool,
    auth_flags: AuthorizationFlags,
    curve: CurveId,
) -> Vec<u8> {
    let oid = curve.oid();
    let mut buf = Vec::with_capacity(8 + oid.len());
    buf.push(AttributeTag::PrivateKeySlot.as_u8());
    buf.push(slot as u8);
    buf.extend_from_slice(&use_limit.to_be_bytes());
    buf.extend_from_slice(&auth_flags.mode(change_auth_flags_right).to_be_bytes());
    buf.extend_from_slice(&(oid.len() as u16).to_be_bytes());
    buf.extend_from_slice(oid);
    buf
}

/// Encode GenerateKey for a local envelope key slot
/// Layout: tag(1) + slot(1) + key type(1) [+ seed]
pub fn encode_generate_local_envelope_key(
    slot: KeySlot,
    key_type: AesKeyType,
    seed: Option<&[u8]>,
) -> Vec<u8> {
    let seed = seed.unwrap_or(&[]);
    let mut buf = Vec::with_capacity(3 + seed.len());
    buf.push(AttributeTag::LocalEnvelopeKeyTable.as_u8());
    buf.push(slot as u8);
    buf.push(key_type as u8);
    buf.extend_from_slice(seed);
    buf
}

/// Encode DeleteKey: tag(1) [+ slot(1) for slotted tables]
pub fn encode_delete_key(tag: AttributeTag, slot: Option<KeySlot>) -> Vec<u8> {
    let mut buf = vec![tag.as_u8()];
    if let Some(slot) = slot {
        buf.push(slot as u8);
    }
    buf
}

/// Wrap/Unwrap local envelope: slot(1) + data
pub fn encode_local_envelope(slot: KeySlot, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(slot as u8);
    buf.extend_from_slice(data);
    buf
}

pub fn encode_verify_password(password: &[u8]) -> Vec<u8> {
    password.to_vec()
}
