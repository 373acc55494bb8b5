// stsafe-rs/stsafe/src/protocol/commands/signature.rs

use crate::constants::{POINT_REPRESENTATION_ID, VERIFY_ENTITY_SIGNATURE, VERIFY_MESSAGE_SIGNATURE};
use crate::protocol::codec::put_lv;
use crate::types::{CurveId, KeySlot, PublicKey, Signature};

/// GetSignature: optional host challenge.
pub fn encode_get_signature(challenge: &[u8]) -> Vec<u8> {
    challenge.to_vec()
}

/// Layout: slot(1) + digest length(2 BE) + digest
pub fn encode_generate_signature(slot: KeySlot, digest: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(3 + digest.len());
    buf.push(slot as u8);
    put_lv(&mut buf, digest);
    buf
}

/// Layout: sub-command(1) + oid LV + point rep id(1) + X LV + Y LV + R LV + S LV + digest LV
pub fn encode_verify_message_signature(
    curve: CurveId,
    public_key: &PublicKey,
    signature: &Signature,
    digest: &[u8],
) -> Vec<u8> {
    let mut buf = vec![VERIFY_MESSAGE_SIGNATURE];
    put_lv(&mut buf, curve.oid());
    buf.push(POINT_REPRESENTATION_ID);
    put_lv(&mut buf, &public_key.x);
    put_lv(&mut buf, &public_key.y);
    put_lv(&mut buf, &signature.r);
    put_lv(&mut buf, &signature.s);
    put_lv(&mut buf, digest);
    buf
}

/// Layout: sub-command(1) + R LV + S LV
pub fn encode_verify_entity_signature(signature: &Signature) -> Vec<u8> {
    let mut buf = vec![VERIFY_ENTITY_SIGNATURE];
    put_lv(&mut buf, &signature.r);
    put_lv(&mut buf, &signature.s);
    buf
}

/// Layout: slot(1) + point rep id(1) + X LV + Y LV
pub fn encode_establish_key(slot: KeySlot, public_key: &PublicKey) -> Vec<u8> {
    let mut buf = vec![slot as u8, POINT_REPRESENTATION_ID];
    put_lv(&mut buf, &public_key.x);
    put_lv(&mut buf, &public_key.y);
    buf
}
