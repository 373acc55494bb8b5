// fixtures.rs: keys, payloads and frames shared by the integration tests

use stsafe::protocol::mac::{
    command_mac_input, initial_value, rmac_counter_byte, InitialValueSubject,
};
use stsafe::protocol::Command;
use stsafe::types::{MacMode, PublicKey, Signature};

pub const CIPHER_KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];
pub const MAC_KEY: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

pub fn sample_public_key() -> PublicKey {
    PublicKey::new([0x5A; 32], [0xA5; 32])
}

pub fn sample_signature() -> Signature {
    Signature {
        r: vec![0x11; 32],
        s: vec![0x22; 32],
    }
}

/// HostKeySlotQuery payload: key present, given 24-bit counter.
pub fn host_key_slot_payload(counter: u32) -> Vec<u8> {
    let c = counter.to_be_bytes();
    vec![0x01, c[1], c[2], c[3]]
}

/// Signature response: R LV + S LV.
pub fn signature_payload(sig: &Signature) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(sig.r.len() as u16).to_be_bytes());
    v.extend_from_slice(&sig.r);
    v.extend_from_slice(&(sig.s.len() as u16).to_be_bytes());
    v.extend_from_slice(&sig.s);
    v
}

/// MAC input the host feeds into the response MAC for a host-keyed
/// request, i.e. what the device mirrors when it computes its R-MAC.
pub fn host_rmac_request_input(command: &Command, mac: MacMode, host_counter: u32) -> Vec<u8> {
    let header = command.command_code().as_u8() | mac.bits();
    let iv = initial_value(host_counter, InitialValueSubject::RmacComputation);
    command_mac_input(Some(&iv), rmac_counter_byte(true, 0), header, &command.encode())
}
