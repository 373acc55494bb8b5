// stsafe-rs/stsafe/src/device/operations/partition.rs

use log::debug;

use crate::constants::{CERTIFICATE_CHUNK, CRC_LENGTH};
use crate::device::handle::{Configured, Device};
use crate::protocol::{decode_data_partition, decode_decrement, Command, DataPartition};
use crate::types::{AccessConditionChange, AttributeTag, MacMode};
use crate::{Error, Result};

const DER_SEQUENCE: u8 = 0x30;

/// Total DER length of a certificate from its first four bytes.
pub fn certificate_length(header: &[u8]) -> Result<usize> {
    match header {
        [DER_SEQUENCE, 0x81, len, _] => Ok(usize::from(*len) + 3),
        [DER_SEQUENCE, 0x82, hi, lo] => Ok(usize::from(u16::from_be_bytes([*hi, *lo])) + 4),
        [DER_SEQUENCE, len, _, _] if *len < 0x81 => Ok(usize::from(*len) + 2),
        [DER_SEQUENCE, form, _, _] => Err(Error::FrameFormat(format!(
            "unsupported DER length form {:#04x}",
            form
        ))),
        _ => Err(Error::FrameFormat(
            "zone does not start with a DER sequence".into(),
        )),
    }
}

impl Device<Configured> {
    /// Read `length` bytes of a data zone starting at `offset`.
    pub fn read(
        &mut self,
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        length: u16,
        mac: MacMode,
    ) -> Result<Vec<u8>> {
        let cmd = Command::Read {
            ac_change,
            zone,
            offset,
            length,
        };
        self.execute(&cmd, mac).map(<[u8]>::to_vec)
    }

    /// Decrement the one-way counter of a counter zone, optionally writing
    /// `data` at `offset`. Returns the new counter value.
    pub fn decrement(
        &mut self,
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        amount: u32,
        data: &[u8],
        mac: MacMode,
    ) -> Result<u32> {
        let cmd = Command::Decrement {
            ac_change,
            zone,
            offset,
            amount,
            data: data.to_vec(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_decrement(payload)
    }

    pub fn update(
        &mut self,
        atomic: bool,
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        data: &[u8],
        mac: MacMode,
    ) -> Result<()> {
        let cmd = Command::Update {
            atomic,
            ac_change,
            zone,
            offset,
            data: data.to_vec(),
        };
        self.execute(&cmd, mac)?;
        Ok(())
    }

    /// Zone layout of the data partition.
    pub fn data_partition_query(&mut self, mac: MacMode) -> Result<DataPartition> {
        let cmd = Command::Query {
            tag: AttributeTag::DataPartition,
        };
        let payload = self.execute(&cmd, mac)?;
        decode_data_partition(payload)
    }

    /// Read the DER certificate stored at the start of `zone`.
    pub fn read_certificate(&mut self, zone: u8) -> Result<Vec<u8>> {
        let header = self.read(None, zone, 0, 4, MacMode::NONE)?;
        let total = certificate_length(&header)?;

        let crc = if self.session.crc_support { CRC_LENGTH } else { 0 };
        let step = CERTIFICATE_CHUNK.min(self.buffer.capacity()) - crc;
        debug!("certificate in zone {}: {} bytes, {} per read", zone, total, step);

        let mut certificate = Vec::with_capacity(total);
        while certificate.len() < total {
            let offset = certificate.len();
            let len = step.min(total - offset);
            let chunk = self.read(None, zone, offset as u16, len as u16, MacMode::NONE)?;
            if chunk.len() != len {
                return Err(Error::InvalidLength {
                    expected: len,
                    actual: chunk.len(),
                });
            }
            certificate.extend_from_slice(&chunk);
        }
        Ok(certificate)
    }
}
