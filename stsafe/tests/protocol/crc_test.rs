#[path = "../common/mod.rs"]
mod common;

use proptest::prelude::*;
use stsafe::protocol::crc;

const IBM_SDLC: ::crc::Crc<u16> = ::crc::Crc::<u16>::new(&::crc::CRC_16_IBM_SDLC);

#[test]
fn check_value_of_the_standard_string() {
    let data = b"123456789";
    assert_eq!(crc::checksum(data[0], &data[1..]), 0x906E);
    assert_eq!(crc::trailer(data[0], &data[1..]), [0x90, 0x6E]);
}

#[test]
fn header_only_frame() {
    assert_eq!(crc::checksum(0x14, &[]), IBM_SDLC.checksum(&[0x14]));
}

proptest! {
    #[test]
    fn matches_reference_implementation(
        header in any::<u8>(),
        payload in prop::collection::vec(any::<u8>(), 0..300),
    ) {
        let mut frame = vec![header];
        frame.extend_from_slice(&payload);
        prop_assert_eq!(crc::checksum(header, &payload), IBM_SDLC.checksum(&frame));
    }
}
