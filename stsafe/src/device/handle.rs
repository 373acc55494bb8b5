// stsafe-rs/stsafe/src/device/handle.rs

use std::marker::PhantomData;

use log::{debug, warn};

use crate::crypto::Crypto;
use crate::device::session::{HostKeys, SessionState};
use crate::protocol::{ExchangeBuffer, ProductData};
use crate::transport::Transport;
use crate::types::{HashType, MacMode};
use crate::Result;

/// Type-state markers
pub struct Unconfigured;
pub struct Configured;

/// Protocol engine bound to one secure element.
///
/// Owns the exchange buffer, the session counters and the host keys. A
/// handle starts `Unconfigured`; `configure()` probes CRC support and sizes
/// the exchange buffer, after which the command set becomes available.
pub struct Device<State = Unconfigured> {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) crypto: Option<Box<dyn Crypto>>,
    pub(crate) buffer: ExchangeBuffer,
    pub(crate) session: SessionState,
    pub(crate) product_data: Option<ProductData>,
    _state: PhantomData<State>,
}

impl Device<Unconfigured> {
    /// Create a Device from an existing Transport instance with default
    /// settings and no crypto capability.
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        let size = transport.max_buffer_size();
        Self::from_parts(transport, None, SessionState::default(), size)
    }

    pub(crate) fn from_parts(
        transport: Box<dyn Transport>,
        crypto: Option<Box<dyn Crypto>>,
        session: SessionState,
        buffer_size: usize,
    ) -> Self {
        Self {
            transport,
            crypto,
            buffer: ExchangeBuffer::new(buffer_size),
            session,
            product_data: None,
            _state: PhantomData,
        }
    }

    /// Negotiate the data buffer configuration.
    ///
    /// Queries product data with CRC framing; when that exchange fails the
    /// query is retried once without CRC. The exchange buffer is then shrunk
    /// to the I/O buffer size the device reports.
    pub fn configure(mut self) -> Result<Device<Configured>> {
        let product = match self.query_product_data(MacMode::NONE) {
            Ok(product) => product,
            Err(e) if self.session.crc_support => {
                warn!("product data query with crc failed ({}); retrying without crc", e);
                self.session.crc_support = false;
                self.query_product_data(MacMode::NONE)?
            }
            Err(e) => return Err(e),
        };

        let size = usize::from(product.input_output_buffer_size).min(self.buffer.capacity());
        if size < self.buffer.capacity() {
            debug!(
                "shrinking exchange buffer from {} to {} bytes",
                self.buffer.capacity(),
                size
            );
            self.buffer.resize(size);
        }
        debug!(
            "configured: crc {}, buffer {} bytes",
            self.session.crc_support,
            self.buffer.capacity()
        );

        Ok(Device {
            transport: self.transport,
            crypto: self.crypto,
            buffer: self.buffer,
            session: self.session,
            product_data: Some(product),
            _state: PhantomData,
        })
    }
}

impl Device<Configured> {
    /// Product data captured while configuring.
    pub fn product_data(&self) -> Option<&ProductData> {
        self.product_data.as_ref()
    }
}

impl<S> Device<S> {
    pub fn i2c_address(&self) -> u8 {
        self.session.i2c_address
    }

    pub fn set_i2c_address(&mut self, address: u8) {
        self.session.i2c_address = address;
    }

    pub fn crc_support(&self) -> bool {
        self.session.crc_support
    }

    pub fn set_crc_support(&mut self, enabled: bool) {
        self.session.crc_support = enabled;
    }

    pub fn hash_type(&self) -> HashType {
        self.session.hash_type
    }

    /// Select the hash used by the next signature session. Always persists
    /// and returns the stored value.
    pub fn set_hash_type(&mut self, hash: HashType) -> HashType {
        self.session.hash_type = hash;
        self.session.hash_type
    }

    pub fn mac_counter(&self) -> u8 {
        self.session.mac_counter
    }

    /// Counter used by admin/peripheral MACs (7 bits).
    pub fn set_mac_counter(&mut self, counter: u8) {
        self.session.mac_counter = counter & 0x7F;
    }

    /// Last host C-MAC sequence counter read from the device.
    pub fn host_cmac_counter(&self) -> u32 {
        self.session.host_cmac_counter
    }

    pub fn set_host_keys(&mut self, cipher: [u8; 16], mac: [u8; 16]) {
        self.session.host_keys = Some(HostKeys::new(cipher, mac));
    }

    pub fn clear_host_keys(&mut self) {
        self.session.host_keys = None;
    }

    pub fn has_crypto(&self) -> bool {
        self.crypto.is_some()
    }

    /// Negotiated exchange buffer capacity.
    pub fn data_buffer_size(&self) -> usize {
        self.buffer.capacity()
    }

    /// Digest of the transcript closed by the last `get_signature`.
    pub fn last_digest(&self) -> &[u8] {
        &self.session.last_digest
    }

    pub fn signature_session_open(&self) -> bool {
        self.session.signature_slot.is_some()
    }
}
