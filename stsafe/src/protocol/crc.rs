// stsafe-rs/stsafe/src/protocol/crc.rs

//! CRC-16/CCITT as framed by the secure element.
//!
//! Bytes are bit-reversed before entering the MSB-first table step and the
//! running value is reflected and inverted on the way out, which makes the
//! trailer identical to CRC-16/IBM-SDLC (X.25) written big-endian.

const POLYNOMIAL: u16 = 0x1021;
const INITIAL: u16 = 0xFFFF;
const FINAL_XOR: u16 = 0xFFFF;

const fn build_table() -> [u16; 256] {
    let mut table = [0u16; 256];
    let mut i = 0;
    while i < 256 {
        let mut crc = (i as u16) << 8;
        let mut bit = 0;
        while bit < 8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ POLYNOMIAL
            } else {
                crc << 1
            };
            bit += 1;
        }
        table[i] = crc;
        i += 1;
    }
    table
}

static TABLE: [u16; 256] = build_table();

fn step(crc: u16, byte: u8) -> u16 {
    let idx = ((crc >> 8) ^ byte.reverse_bits() as u16) & 0xFF;
    TABLE[idx as usize] ^ (crc << 8)
}

/// Running (unfinalized) CRC over the header byte then the payload.
pub fn compute(header: u8, payload: &[u8]) -> u16 {
    payload.iter().fold(step(INITIAL, header), |crc, &b| step(crc, b))
}

/// Swap, bit-reverse each byte, swap back and invert.
pub fn finalize(crc: u16) -> u16 {
    let [hi, lo] = crc.to_be_bytes();
    u16::from_be_bytes([lo.reverse_bits(), hi.reverse_bits()]) ^ FINAL_XOR
}

/// Finalized CRC of a frame.
pub fn checksum(header: u8, payload: &[u8]) -> u16 {
    finalize(compute(header, payload))
}

/// The two bytes appended after the payload on the wire.
pub fn trailer(header: u8, payload: &[u8]) -> [u8; 2] {
    checksum(header, payload).to_be_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn table_spot_values() {
        assert_eq!(TABLE[0], 0x0000);
        assert_eq!(TABLE[1], 0x1021);
        assert_eq!(TABLE[0xFF], 0x1EF0);
    }

    #[test]
    fn check_value() {
        // "123456789" split as header '1' plus payload
        assert_eq!(checksum(b'1', b"23456789"), 0x906E);
        assert_eq!(trailer(b'1', b"23456789"), [0x90, 0x6E]);
    }

    #[test]
    fn empty_payload_covers_header() {
        assert_ne!(checksum(0x00, &[]), checksum(0x01, &[]));
    }

    proptest! {
        #[test]
        fn single_bit_flip_changes_crc(header in any::<u8>(),
                                       payload in prop::collection::vec(any::<u8>(), 0..64),
                                       bit in any::<prop::sample::Index>()) {
            let mut frame = vec![header];
            frame.extend_from_slice(&payload);
            let original = checksum(frame[0], &frame[1..]);
            let pos = bit.index(frame.len() * 8);
            frame[pos / 8] ^= 1 << (pos % 8);
            prop_assert_ne!(checksum(frame[0], &frame[1..]), original);
        }
    }
}
