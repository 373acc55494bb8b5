// helpers.rs: device construction shortcuts for integration tests

use std::cell::RefCell;
use std::rc::Rc;

use stsafe::crypto::{CallLog, RecordingCrypto, SoftwareCrypto};
use stsafe::device::{Configured, Device, DeviceBuilder};
use stsafe::test_support::configured_device;
use stsafe::transport::MockTransport;

use super::fixtures::{CIPHER_KEY, MAC_KEY};

pub type Mock = Rc<RefCell<MockTransport>>;

/// Configured device with software crypto and the fixture host keys.
pub fn crypto_device(crc: bool) -> anyhow::Result<(Mock, Device<Configured>)> {
    let builder = DeviceBuilder::new()
        .with_crc_support(crc)
        .with_software_crypto()
        .with_host_keys(CIPHER_KEY, MAC_KEY);
    Ok(configured_device(builder)?)
}

/// Same as `crypto_device` but every crypto call is logged.
pub fn recording_device(crc: bool) -> anyhow::Result<(Mock, CallLog, Device<Configured>)> {
    let crypto = RecordingCrypto::new(SoftwareCrypto::new());
    let log = crypto.log();
    let builder = DeviceBuilder::new()
        .with_crc_support(crc)
        .with_crypto(Box::new(crypto))
        .with_host_keys(CIPHER_KEY, MAC_KEY);
    let (mock, dev) = configured_device(builder)?;
    log.borrow_mut().clear();
    Ok((mock, log, dev))
}
