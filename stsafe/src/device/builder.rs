// stsafe-rs/stsafe/src/device/builder.rs

use crate::constants::{DEFAULT_EXCHANGE_BUFFER_SIZE, DEFAULT_I2C_ADDRESS, HOST_KEY_LEN};
use crate::crypto::Crypto;
use crate::device::handle::{Configured, Device, Unconfigured};
use crate::device::session::{HostKeys, SessionState};
use crate::transport::Transport;
use crate::types::HashType;
use crate::{Error, Result};

/// Helper to construct a Device with optional configuration.
pub struct DeviceBuilder {
    transport: Option<Box<dyn Transport>>,
    crypto: Option<Box<dyn Crypto>>,
    i2c_address: u8,
    crc_support: bool,
    hash_type: HashType,
    mac_counter: u8,
    host_keys: Option<HostKeys>,
    buffer_size: usize,
}

impl Default for DeviceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DeviceBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            crypto: None,
            i2c_address: DEFAULT_I2C_ADDRESS,
            crc_support: true,
            hash_type: HashType::default(),
            mac_counter: 0,
            host_keys: None,
            buffer_size: DEFAULT_EXCHANGE_BUFFER_SIZE,
        }
    }

    /// Provide an already-created transport instance (e.g. MockTransport)
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Bind a crypto capability. Without one, MAC'd and encrypted commands
    /// fail with `CryptoLibIssue` and signature sessions carry no digest.
    pub fn with_crypto(mut self, crypto: Box<dyn Crypto>) -> Self {
        self.crypto = Some(crypto);
        self
    }

    #[cfg(feature = "soft-crypto")]
    pub fn with_software_crypto(self) -> Self {
        self.with_crypto(Box::new(crate::crypto::SoftwareCrypto::new()))
    }

    pub fn with_i2c_address(mut self, address: u8) -> Self {
        self.i2c_address = address;
        self
    }

    /// Initial CRC framing; `configure()` falls back to no CRC if the
    /// device does not answer CRC-framed requests.
    pub fn with_crc_support(mut self, enabled: bool) -> Self {
        self.crc_support = enabled;
        self
    }

    pub fn with_hash_type(mut self, hash: HashType) -> Self {
        self.hash_type = hash;
        self
    }

    pub fn with_mac_counter(mut self, counter: u8) -> Self {
        self.mac_counter = counter & 0x7F;
        self
    }

    pub fn with_host_keys(mut self, cipher: [u8; HOST_KEY_LEN], mac: [u8; HOST_KEY_LEN]) -> Self {
        self.host_keys = Some(HostKeys::new(cipher, mac));
        self
    }

    /// Upper bound for the exchange buffer; the transport limit and the
    /// device-reported size may shrink it further.
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    pub(crate) fn crc_enabled(&self) -> bool {
        self.crc_support
    }

    /// Consume the builder and return an unconfigured Device.
    pub fn build_unconfigured(self) -> Result<Device<Unconfigured>> {
        let transport = self
            .transport
            .ok_or_else(|| Error::InvalidArgument("no transport provided".into()))?;
        let size = self.buffer_size.min(transport.max_buffer_size());
        let session = SessionState {
            i2c_address: self.i2c_address,
            crc_support: self.crc_support,
            hash_type: self.hash_type,
            mac_counter: self.mac_counter,
            host_keys: self.host_keys,
            ..SessionState::default()
        };
        Ok(Device::from_parts(transport, self.crypto, session, size))
    }

    /// Build and run the data buffer configuration exchange.
    pub fn build(self) -> Result<Device<Configured>> {
        self.build_unconfigured()?.configure()
    }
}
