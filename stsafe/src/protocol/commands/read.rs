// stsafe-rs/stsafe/src/protocol/commands/read.rs

use crate::types::AccessConditionChange;

/// Encode Read command payload
/// Layout: ac change(1) + zone index(1) + offset(2 BE) + length(2 BE)
pub fn encode_read(
    ac_change: Option<AccessConditionChange>,
    zone: u8,
    offset: u16,
    length: u16,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(6);
    buf.push(AccessConditionChange::encode(ac_change));
    buf.push(zone);
    buf.extend_from_slice(&offset.to_be_bytes());
    buf.extend_from_slice(&length.to_be_bytes());
    buf
}
