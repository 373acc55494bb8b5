// stsafe-rs/stsafe/src/protocol/commands/query.rs

use crate::types::AttributeTag;

/// Query: the single payload byte selects the attribute.
pub fn encode_query(tag: AttributeTag) -> Vec<u8> {
    vec![tag.as_u8()]
}

/// PutAttribute: tag(1) + value
pub fn encode_put_attribute(tag: AttributeTag, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(1 + data.len());
    buf.push(tag.as_u8());
    buf.extend_from_slice(data);
    buf
}
