// stsafe-rs/stsafe/src/protocol/commands/write.rs

use crate::constants::UPDATE_ATOMICITY;
use crate::types::AccessConditionChange;

/// Encode Update command payload
/// Layout: atomicity|ac change(1) + zone index(1) + offset(2 BE) + data
pub fn encode_update(
    atomic: bool,
    ac_change: Option<AccessConditionChange>,
    zone: u8,
    offset: u16,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(4 + data.len());
    let atomicity = if atomic { UPDATE_ATOMICITY } else { 0 };
    buf.push(atomicity | AccessConditionChange::encode(ac_change));
    buf.push(zone);
    buf.extend_from_slice(&offset.to_be_bytes());
    buf.extend_from_slice(data);
    buf
}

/// Encode Decrement command payload
/// Layout: ac change(1) + zone index(1) + offset(2 BE) + amount(4 BE) + data
pub fn encode_decrement(
    ac_change: Option<AccessConditionChange>,
    zone: u8,
    offset: u16,
    amount: u32,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(8 + data.len());
    buf.push(AccessConditionChange::encode(ac_change));
    buf.push(zone);
    buf.extend_from_slice(&offset.to_be_bytes());
    buf.extend_from_slice(&amount.to_be_bytes());
    buf.extend_from_slice(data);
    buf
}
