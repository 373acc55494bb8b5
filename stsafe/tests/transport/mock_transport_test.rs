#[path = "../common/mod.rs"]
mod common;

use stsafe::protocol::ExchangeBuffer;
use stsafe::transport::{MockTransport, Transport};
use stsafe::test_support::response_frame;
use stsafe::Error;

#[test]
fn mock_transport_send_and_receive() {
    let mut m = MockTransport::new();
    m.push_response(response_frame(0x00, &[0x01, 0x02], false));

    let mut buf = ExchangeBuffer::new(32);
    buf.target_address = 0x20;
    buf.load(0x00, &[0x01, 0x02]).unwrap();
    m.send_bytes(&buf).unwrap();
    assert_eq!(m.sent, vec![vec![0x00, 0x01, 0x02]]);
    assert_eq!(m.addresses, vec![0x20]);

    buf.set_expected_len(2);
    m.receive_bytes(&mut buf).unwrap();
    assert_eq!(buf.payload(), &[0x01, 0x02]);
}

#[test]
fn oversized_response_is_rejected() {
    let mut m = MockTransport::new();
    m.push_response(response_frame(0x00, &[0u8; 40], false));
    let mut buf = ExchangeBuffer::new(8);
    let err = m.receive_bytes(&mut buf).unwrap_err();
    assert!(matches!(err, Error::BufferOverflow { .. }));
}

#[test]
fn send_failure_then_recovery() {
    let mut m = MockTransport::new();
    m.set_send_failures(1);
    let buf = ExchangeBuffer::new(8);
    assert!(m.send_bytes(&buf).is_err());
    assert!(m.send_bytes(&buf).is_ok());
    assert_eq!(m.sent.len(), 1);
}
