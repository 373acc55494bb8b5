#[path = "../common/mod.rs"]
mod common;

use stsafe::test_support::{mock_device, response_frame};
use stsafe::types::{KeySlot, MacMode, ResponseCode};
use stsafe::Error;

fn reference_crc(frame: &[u8]) -> [u8; 2] {
    crc::Crc::<u16>::new(&crc::CRC_16_IBM_SDLC)
        .checksum(frame)
        .to_be_bytes()
}

#[test]
fn echo_frames_match_reference_crc() {
    common::init_logging();
    let (mock, mut dev) = mock_device().unwrap();
    let data = hex::decode("0102030405").unwrap();
    mock.borrow_mut().push_response(response_frame(0x00, &data, true));

    let echoed = dev.echo(&data, MacMode::NONE).unwrap();
    assert_eq!(echoed, data);

    let sent = mock.borrow().sent[0].clone();
    let (body, trailer) = sent.split_at(sent.len() - 2);
    assert_eq!(body, &[0x00, 0x01, 0x02, 0x03, 0x04, 0x05]);
    assert_eq!(trailer, reference_crc(body));
    // announced length covers the CRC
    assert_eq!(mock.borrow().expected_lengths, vec![data.len() + 2]);
}

#[test]
fn corrupted_response_crc_is_reported() {
    let (mock, mut dev) = mock_device().unwrap();
    let mut frame = response_frame(0x00, &[0xAA, 0xBB], true);
    let last = frame.len() - 1;
    frame[last] ^= 0xFF;
    mock.borrow_mut().push_response(frame);

    let err = dev.echo(&[0xAA, 0xBB], MacMode::NONE).unwrap_err();
    assert!(matches!(err, Error::InvalidCrc { .. }));
}

#[test]
fn device_errors_carry_the_status_code() {
    let (mock, mut dev) = mock_device().unwrap();
    mock.borrow_mut().push_response(response_frame(0x0A, &[], true));

    let err = dev
        .generate_signature(KeySlot::Slot0, &[0u8; 32], MacMode::NONE)
        .unwrap_err();
    assert_eq!(err.response_code(), ResponseCode::KeyNotFound);
    assert!(!err.is_host_detected());
}

#[test]
fn missing_response_is_a_communication_error() {
    let (_mock, mut dev) = mock_device().unwrap();
    let err = dev.echo(&[0x01], MacMode::NONE).unwrap_err();
    assert!(matches!(err, Error::Communication(_)));
}

#[test]
fn certificate_is_read_in_chunks() {
    let (mock, mut dev) = mock_device().unwrap();
    let mut cert = vec![0x30, 0x81, 0x40, 0x02];
    cert.extend((0..0x3F).map(|i| i as u8));
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &cert[..4], true));
        m.push_response(response_frame(0x00, &cert, true));
    }

    let read = dev.read_certificate(0).unwrap();
    assert_eq!(read, cert);
    assert_eq!(mock.borrow().sent.len(), 2);
}
