// stsafe-rs/stsafe/src/device/transceive.rs

use log::{debug, trace, warn};

use crate::constants::{CRC_LENGTH, HASH_COMMAND_TAG, HASH_RESPONSE_TAG, MAC_LENGTH};
use crate::crypto::{Crypto, MacKind};
use crate::device::handle::Device;
use crate::device::session::SessionState;
use crate::protocol::codec::{pad, unpad};
use crate::protocol::mac::{
    cmac_counter_byte, command_mac_input, initial_value, response_mac_input, rmac_counter_byte,
    transcript_header, InitialValueSubject,
};
use crate::protocol::{
    decode_host_key_slot, decode_product_data, Command, Encryption, ExchangeBuffer, HostKeySlot,
    ProductData,
};
use crate::types::{AttributeTag, MacMode, ResponseCode};
use crate::utils::bytes_to_hex_spaced;
use crate::{Error, Result};

fn no_crypto() -> Error {
    Error::CryptoLibIssue("no crypto capability bound".into())
}

fn status_to_result(status: u8) -> Result<()> {
    match ResponseCode::from_u8(status) {
        Some(ResponseCode::Ok) => Ok(()),
        Some(code) => Err(Error::Device(code)),
        None => Err(Error::UnknownStatus(status)),
    }
}

fn mac_iv(
    session: &SessionState,
    host: bool,
    subject: InitialValueSubject,
) -> Option<[u8; 16]> {
    host.then(|| initial_value(session.host_cmac_counter, subject))
}

/// Start the response MAC over the request framing. Finished in
/// `verify_rmac` once the response arrives.
fn precompute_rmac(
    crypto: &mut dyn Crypto,
    session: &SessionState,
    buffer: &ExchangeBuffer,
) -> Result<()> {
    let key = session.mac_key()?;
    let host = MacMode::from_bits(buffer.header).contains(MacMode::H_MAC);
    let iv = mac_iv(session, host, InitialValueSubject::RmacComputation);
    let input = command_mac_input(
        iv.as_ref(),
        rmac_counter_byte(host, session.mac_counter),
        buffer.header,
        buffer.payload(),
    );
    crypto.mac_start(key, MacKind::Response)?;
    crypto.mac_update(MacKind::Response, &input)
}

fn append_cmac(
    crypto: &mut dyn Crypto,
    session: &SessionState,
    buffer: &mut ExchangeBuffer,
) -> Result<()> {
    let key = session.mac_key()?;
    let host = MacMode::from_bits(buffer.header).contains(MacMode::H_MAC);
    let iv = mac_iv(session, host, InitialValueSubject::CmacComputation);
    let input = command_mac_input(
        iv.as_ref(),
        cmac_counter_byte(host, session.mac_counter),
        buffer.header,
        buffer.payload(),
    );
    crypto.mac_start(key, MacKind::Command)?;
    crypto.mac_update(MacKind::Command, &input)?;
    let mac = crypto.mac_final(MacKind::Command)?;
    buffer.extend_from_slice(&mac)
}

/// Strip the trailing response MAC and check it. On mismatch the MAC bytes
/// are left in place.
fn verify_rmac(crypto: &mut dyn Crypto, buffer: &mut ExchangeBuffer) -> Result<()> {
    let len = buffer.len();
    if len < MAC_LENGTH {
        return Err(Error::InvalidLength {
            expected: MAC_LENGTH,
            actual: len,
        });
    }
    let body = len - MAC_LENGTH;
    let mut received = [0u8; MAC_LENGTH];
    received.copy_from_slice(&buffer.payload()[body..]);
    buffer.truncate(body);

    let input = response_mac_input(buffer.header, buffer.payload());
    crypto.mac_update(MacKind::Response, &input)?;
    let computed = crypto.mac_final(MacKind::Response)?;
    if computed != received {
        warn!(
            "response mac mismatch: computed {}, received {}",
            bytes_to_hex_spaced(&computed),
            bytes_to_hex_spaced(&received)
        );
        buffer.extend_from_slice(&received)?;
        return Err(Error::InvalidRmac);
    }
    Ok(())
}

fn hash_exchange(
    crypto: &mut dyn Crypto,
    session: &SessionState,
    tag: u8,
    buffer: &ExchangeBuffer,
) -> Result<()> {
    if let Some(hash) = session.transcript {
        let header = transcript_header(tag, buffer.header, buffer.len());
        crypto.sha_update(hash, &header)?;
        crypto.sha_update(hash, buffer.payload())?;
    }
    Ok(())
}

impl<S> Device<S> {
    /// Run one full command: build, authenticate, send, wait, receive and
    /// verify. Returns the response payload.
    pub(crate) fn execute(&mut self, command: &Command, mac: MacMode) -> Result<&[u8]> {
        let mac = self.send_command(command, mac)?;
        self.receive_response(command, mac)
    }

    /// First half of `execute`: everything up to and including the bus
    /// write. Returns the MAC mode actually used.
    pub(crate) fn send_command(&mut self, command: &Command, mac: MacMode) -> Result<MacMode> {
        let mac = command.forced_mac().unwrap_or(mac);
        if mac.contains(MacMode::H_MAC) {
            self.refresh_host_cmac_counter()?;
        }

        let header = command.command_code().as_u8() | mac.bits();
        let payload = command.encode();
        self.buffer.load(header, &payload)?;
        if command.encryption() == Encryption::Command {
            self.encrypt_payload()?;
        }

        debug!(
            "{:?}: header {:#04x}, {} payload bytes",
            command.command_code(),
            header,
            self.buffer.len()
        );
        self.transmit()?;
        Ok(mac)
    }

    /// Second half of `execute`: wait out the processing time, then read
    /// and verify the response.
    pub(crate) fn receive_response(&mut self, command: &Command, mac: MacMode) -> Result<&[u8]> {
        if !command.expects_response() {
            self.buffer.truncate(0);
            return Ok(self.buffer.payload());
        }

        let mut expected = command.expected_response_len();
        if mac.contains(MacMode::R_MAC) {
            expected += MAC_LENGTH;
        }
        self.buffer.set_expected_len(expected);
        self.transport.wait(command.processing_time());
        self.receive()?;

        if command.encryption() == Encryption::Response {
            self.decrypt_payload()?;
        }
        Ok(self.buffer.payload())
    }

    pub(crate) fn transmit(&mut self) -> Result<()> {
        let mac = MacMode::from_bits(self.buffer.header);
        let authenticated = mac.contains(MacMode::R_MAC) || mac.contains(MacMode::C_MAC);

        match self.crypto.as_deref_mut() {
            Some(crypto) => {
                if mac.contains(MacMode::R_MAC) {
                    precompute_rmac(crypto, &self.session, &self.buffer)?;
                }
                if mac.contains(MacMode::C_MAC) {
                    append_cmac(crypto, &self.session, &mut self.buffer)?;
                }
                hash_exchange(crypto, &self.session, HASH_COMMAND_TAG, &self.buffer)?;
            }
            None if authenticated => return Err(no_crypto()),
            None => {}
        }

        if self.session.crc_support {
            self.buffer.append_crc()?;
        }

        self.buffer.target_address = self.session.i2c_address;
        trace!("tx: {}", bytes_to_hex_spaced(&self.buffer.request_bytes()));
        self.transport.send_bytes(&self.buffer).map_err(|e| {
            warn!("send failed: {}", e);
            e.into_communication()
        })
    }

    /// Read the response announced by `buffer.len()` and return the status
    /// carried in its header.
    pub(crate) fn receive(&mut self) -> Result<()> {
        if self.session.crc_support {
            let expected = self.buffer.len() + CRC_LENGTH;
            self.buffer.set_expected_len(expected);
        }

        self.buffer.target_address = self.session.i2c_address;
        self.transport.receive_bytes(&mut self.buffer).map_err(|e| {
            warn!("receive failed: {}", e);
            e.into_communication()
        })?;
        trace!(
            "rx: {:02x} {}",
            self.buffer.header,
            bytes_to_hex_spaced(self.buffer.payload())
        );

        if self.session.crc_support {
            self.buffer.check_crc().inspect_err(|e| warn!("{}", e))?;
        }

        let header = self.buffer.header;
        if MacMode::from_bits(header).contains(MacMode::R_MAC) {
            let crypto = self.crypto.as_deref_mut().ok_or_else(no_crypto)?;
            verify_rmac(crypto, &mut self.buffer)?;
        }

        if let Some(crypto) = self.crypto.as_deref_mut() {
            hash_exchange(crypto, &self.session, HASH_RESPONSE_TAG, &self.buffer)?;
        }

        status_to_result(header & !MacMode::R_MAC.bits())
    }

    /// Pad and encipher the request payload under the host cipher key.
    fn encrypt_payload(&mut self) -> Result<()> {
        let crypto = self.crypto.as_deref_mut().ok_or_else(no_crypto)?;
        let key = self.session.cipher_key()?;
        let mut iv = initial_value(
            self.session.host_cmac_counter,
            InitialValueSubject::CommandEncryption,
        );
        crypto.aes_ecb_encrypt(key, &mut iv)?;

        let mut data = self.buffer.payload().to_vec();
        pad(&mut data);
        crypto.aes_cbc_encrypt(key, &iv, &mut data)?;
        self.buffer.replace_payload(&data)
    }

    /// Decipher the response payload and strip its padding.
    fn decrypt_payload(&mut self) -> Result<()> {
        let crypto = self.crypto.as_deref_mut().ok_or_else(no_crypto)?;
        let key = self.session.cipher_key()?;
        let mut iv = initial_value(
            self.session.host_cmac_counter,
            InitialValueSubject::ResponseEncryption,
        );
        crypto.aes_ecb_encrypt(key, &mut iv)?;

        let mut data = self.buffer.payload().to_vec();
        crypto.aes_cbc_decrypt(key, &iv, &mut data)?;
        let len = unpad(&data)?;
        self.buffer.replace_payload(&data[..len])
    }

    pub(crate) fn query_product_data(&mut self, mac: MacMode) -> Result<ProductData> {
        let cmd = Command::Query {
            tag: AttributeTag::ProductData,
        };
        let payload = self.execute(&cmd, mac)?;
        decode_product_data(payload)
    }

    /// HostKeySlotQuery; also refreshes the cached host C-MAC counter.
    pub(crate) fn query_host_key_slot(&mut self, mac: MacMode) -> Result<HostKeySlot> {
        let cmd = Command::Query {
            tag: AttributeTag::HostKeySlot,
        };
        let payload = self.execute(&cmd, mac)?;
        let slot = decode_host_key_slot(payload)?;
        self.session.host_cmac_counter = slot.cmac_sequence_counter;
        Ok(slot)
    }

    fn refresh_host_cmac_counter(&mut self) -> Result<u32> {
        let slot = self.query_host_key_slot(MacMode::NONE)?;
        debug!(
            "host c-mac counter {:#08x} (key present: {})",
            slot.cmac_sequence_counter, slot.present
        );
        Ok(slot.cmac_sequence_counter)
    }
}
