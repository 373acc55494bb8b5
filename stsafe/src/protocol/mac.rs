// stsafe-rs/stsafe/src/protocol/mac.rs

//! Input framing for command/response MACs and cipher IVs.

use crate::constants::AES_BLOCK_LEN;

/// Which operation an initial value is derived for.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitialValueSubject {
    CmacComputation = 0,
    RmacComputation = 1,
    CommandEncryption = 2,
    ResponseEncryption = 3,
}

/// Counter byte of a command MAC: zero under the host key, otherwise the
/// 7-bit peripheral counter.
pub fn cmac_counter_byte(host: bool, mac_counter: u8) -> u8 {
    if host { 0x00 } else { mac_counter & 0x7F }
}

/// Counter byte of a response MAC: always carries the response bit.
pub fn rmac_counter_byte(host: bool, mac_counter: u8) -> u8 {
    if host { 0x80 } else { mac_counter | 0x80 }
}

/// 16-byte IV block from the 24-bit host C-MAC sequence counter.
///
/// Everything except the command MAC is bound to the counter value the
/// device will hold after the exchange, hence the increment.
pub fn initial_value(host_cmac_counter: u32, subject: InitialValueSubject) -> [u8; AES_BLOCK_LEN] {
    let counter = if subject == InitialValueSubject::CmacComputation {
        host_cmac_counter
    } else {
        host_cmac_counter.wrapping_add(1)
    };
    let mut iv = [0u8; AES_BLOCK_LEN];
    iv[0] = (counter >> 16) as u8;
    iv[1] = (counter >> 8) as u8;
    iv[2] = counter as u8;
    iv[3] = ((subject as u8) << 6) & 0xC0;
    iv[4] = 0x80;
    iv
}

/// `[iv?] [counter byte] [header] [length BE] [payload]`
pub fn command_mac_input(
    iv: Option<&[u8; AES_BLOCK_LEN]>,
    counter_byte: u8,
    header: u8,
    payload: &[u8],
) -> Vec<u8> {
    let mut input = Vec::with_capacity(AES_BLOCK_LEN + 4 + payload.len());
    if let Some(iv) = iv {
        input.extend_from_slice(iv);
    }
    input.push(counter_byte);
    input.extend_from_slice(&response_mac_input(header, payload));
    input
}

/// `[header] [length BE] [payload]`
pub fn response_mac_input(header: u8, payload: &[u8]) -> Vec<u8> {
    let mut input = Vec::with_capacity(3 + payload.len());
    input.push(header);
    input.extend_from_slice(&(payload.len() as u16).to_be_bytes());
    input.extend_from_slice(payload);
    input
}

/// Four-byte transcript header fed to the signature-session hash.
pub fn transcript_header(tag: u8, header: u8, payload_len: usize) -> [u8; 4] {
    let [hi, lo] = ((payload_len + 1) as u16).to_be_bytes();
    [tag, hi, lo, header]
}
