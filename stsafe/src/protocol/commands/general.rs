// stsafe-rs/stsafe/src/protocol/commands/general.rs

use crate::types::{KeySlot, RandomSubject, SessionType, WakeUpMode};

/// Echo: the payload is the data to be echoed.
pub fn encode_echo(data: &[u8]) -> Vec<u8> {
    data.to_vec()
}

/// Layout: subject(1) [+ length(1) for ephemeral randoms]
pub fn encode_generate_random(subject: RandomSubject, length: u8) -> Vec<u8> {
    let mut buf = Vec::with_capacity(2);
    buf.push(subject as u8);
    if subject == RandomSubject::Ephemeral {
        buf.push(length);
    }
    buf
}

/// Layout: session type(1) + key slot(1)
pub fn encode_start_signature_session(slot: KeySlot) -> Vec<u8> {
    vec![SessionType::SignatureSession as u8, slot as u8]
}

pub fn encode_hibernate(wake_up: WakeUpMode) -> Vec<u8> {
    vec![wake_up as u8]
}
