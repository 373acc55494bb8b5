// stsafe-rs/stsafe/src/test_support.rs

//! Test support helpers intended for use by unit and integration tests.
//!
//! These helpers centralize MockTransport setup and response framing so
//! tests across the crate and the tests/ directory build frames the same
//! way the device does.
#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::constants::CRC_LENGTH;
use crate::device::{Configured, Device, DeviceBuilder};
use crate::protocol::{crc, ExchangeBuffer};
use crate::transport::{MockTransport, Transport};
use crate::Result;

/// Transport that delegates into a shared MockTransport so a test can
/// inspect traffic after the Device has taken ownership.
pub struct SharedTransport {
    inner: Rc<RefCell<MockTransport>>,
}

impl SharedTransport {
    pub fn new(inner: Rc<RefCell<MockTransport>>) -> Self {
        Self { inner }
    }
}

impl Transport for SharedTransport {
    fn send_bytes(&mut self, buffer: &ExchangeBuffer) -> Result<()> {
        self.inner.borrow_mut().send_bytes(buffer)
    }

    fn receive_bytes(&mut self, buffer: &mut ExchangeBuffer) -> Result<()> {
        self.inner.borrow_mut().receive_bytes(buffer)
    }

    fn wait(&mut self, duration: Duration) {
        self.inner.borrow_mut().wait(duration)
    }

    fn max_buffer_size(&self) -> usize {
        self.inner.borrow().max_buffer_size()
    }
}

/// A fresh MockTransport plus a boxed handle onto it.
#[doc(hidden)]
pub fn shared_mock() -> (Rc<RefCell<MockTransport>>, Box<dyn Transport>) {
    let inner = Rc::new(RefCell::new(MockTransport::new()));
    let boxed: Box<dyn Transport> = Box::new(SharedTransport::new(inner.clone()));
    (inner, boxed)
}

/// Raw response as the device puts it on the bus:
/// `[header] [length BE] [payload] [crc?]`, the length covering the CRC.
#[doc(hidden)]
pub fn response_frame(header: u8, payload: &[u8], with_crc: bool) -> Vec<u8> {
    let crc_len = if with_crc { CRC_LENGTH } else { 0 };
    let mut frame = Vec::with_capacity(3 + payload.len() + crc_len);
    frame.push(header);
    frame.extend_from_slice(&((payload.len() + crc_len) as u16).to_be_bytes());
    frame.extend_from_slice(payload);
    if with_crc {
        frame.extend_from_slice(&crc::trailer(header, payload));
    }
    frame
}

/// ProductDataQuery payload advertising the given I/O buffer size.
#[doc(hidden)]
pub fn product_data_payload(io_buffer_size: u16) -> Vec<u8> {
    let mut v = vec![0x01, 0x03, 0x09, 0x01, 0x02];
    v.extend_from_slice(&[0x02, 0x09, 0x02, 0x09, 0x08, 0x00, 0x00, 0x00, 0x00, 0x12, 0x34]);
    for (tag, value) in [
        (0x03u8, io_buffer_size),
        (0x04, 0x01E0),
        (0x05, 0x1800),
        (0x06, 0x2017),
        (0x07, 0x0300),
        (0x08, 0x2018),
    ] {
        v.push(tag);
        v.push(2);
        v.extend_from_slice(&value.to_be_bytes());
    }
    v
}

/// Attach a shared mock to `builder`, answer the configuration exchange and
/// return the configured device with the mock's records cleared.
#[doc(hidden)]
pub fn configured_device(
    builder: DeviceBuilder,
) -> Result<(Rc<RefCell<MockTransport>>, Device<Configured>)> {
    let (mock, transport) = shared_mock();
    let crc = builder.crc_enabled();
    mock.borrow_mut()
        .push_response(response_frame(0x00, &product_data_payload(0x1FB), crc));
    let device = builder.with_transport(transport).build()?;
    {
        let mut m = mock.borrow_mut();
        m.sent.clear();
        m.addresses.clear();
        m.expected_lengths.clear();
        m.waits.clear();
    }
    Ok((mock, device))
}

/// Default configured device: CRC on, no crypto.
#[doc(hidden)]
pub fn mock_device() -> Result<(Rc<RefCell<MockTransport>>, Device<Configured>)> {
    configured_device(DeviceBuilder::new())
}

#[cfg(feature = "soft-crypto")]
mod rmac {
    use crate::constants::{HOST_KEY_LEN, MAC_LENGTH};
    use crate::crypto::{Crypto, MacKind, SoftwareCrypto};
    use crate::protocol::mac::response_mac_input;
    use crate::types::MacMode;
    use crate::Result;

    /// Response MAC the device would append, given the MAC input of the
    /// request (see `protocol::mac::command_mac_input`).
    #[doc(hidden)]
    pub fn response_mac(
        key: &[u8; HOST_KEY_LEN],
        request_input: &[u8],
        header: u8,
        payload: &[u8],
    ) -> Result<[u8; MAC_LENGTH]> {
        let mut c = SoftwareCrypto::new();
        c.mac_start(key, MacKind::Response)?;
        c.mac_update(MacKind::Response, request_input)?;
        c.mac_update(MacKind::Response, &response_mac_input(header, payload))?;
        c.mac_final(MacKind::Response)
    }

    /// Successful response frame carrying a response MAC.
    #[doc(hidden)]
    pub fn rmac_response_frame(
        key: &[u8; HOST_KEY_LEN],
        request_input: &[u8],
        payload: &[u8],
        with_crc: bool,
    ) -> Result<Vec<u8>> {
        let header = MacMode::R_MAC.bits();
        let mac = response_mac(key, request_input, header, payload)?;
        let mut body = payload.to_vec();
        body.extend_from_slice(&mac);
        Ok(super::response_frame(header, &body, with_crc))
    }
}

#[cfg(feature = "soft-crypto")]
pub use rmac::{response_mac, rmac_response_frame};
