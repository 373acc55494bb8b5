// stsafe-rs/stsafe/src/protocol/responses/query.rs

use std::convert::TryFrom;

use crate::constants::HOST_CMAC_COUNTER_ABSENT;
use crate::protocol::parser::{self, Cursor};
use crate::types::{AesKeyType, CurveId, KeySlot, LifeCycleState, PublicKey};
use crate::{Error, Result};

/// Product data reported by the device (tag/length/value fields in a
/// fixed order).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProductData {
    pub mask_identification: Vec<u8>,
    pub st_number: Vec<u8>,
    pub input_output_buffer_size: u16,
    pub atomicity_buffer_size: u16,
    pub non_volatile_memory_size: u16,
    pub test_date: u16,
    pub internal_product_version: u16,
    pub module_date: u16,
}

fn tlv<'a>(c: &mut Cursor<'a>) -> Result<&'a [u8]> {
    let _tag = c.u8()?;
    let len = c.u8()? as usize;
    c.bytes(len)
}

fn tlv_u16(c: &mut Cursor<'_>) -> Result<u16> {
    let value = tlv(c)?;
    if value.len() != 2 {
        return Err(Error::FrameFormat(format!(
            "product data field of {} bytes, expected 2",
            value.len()
        )));
    }
    parser::be_u16_at(value, 0)
}

pub fn decode_product_data(data: &[u8]) -> Result<ProductData> {
    let mut c = Cursor::new(data);
    Ok(ProductData {
        mask_identification: tlv(&mut c)?.to_vec(),
        st_number: tlv(&mut c)?.to_vec(),
        input_output_buffer_size: tlv_u16(&mut c)?,
        atomicity_buffer_size: tlv_u16(&mut c)?,
        non_volatile_memory_size: tlv_u16(&mut c)?,
        test_date: tlv_u16(&mut c)?,
        internal_product_version: tlv_u16(&mut c)?,
        module_date: tlv_u16(&mut c)?,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct I2cParameters {
    pub i2c_address: u8,
    pub low_power_mode_and_lock: u8,
}

pub fn decode_i2c_parameters(data: &[u8]) -> Result<I2cParameters> {
    parser::ensure_len(data, 2)?;
    Ok(I2cParameters {
        i2c_address: data[0],
        low_power_mode_and_lock: data[1],
    })
}

pub fn decode_life_cycle_state(data: &[u8]) -> Result<LifeCycleState> {
    LifeCycleState::try_from(parser::byte_at(data, 0)?)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HostKeySlot {
    pub present: bool,
    /// 24-bit host C-MAC sequence counter; 0xFFFFFF when no key is present.
    pub cmac_sequence_counter: u32,
}

/// Layout: presence(1) + counter(3 BE)
pub fn decode_host_key_slot(data: &[u8]) -> Result<HostKeySlot> {
    let present = parser::byte_at(data, 0)? != 0;
    if !present {
        return Ok(HostKeySlot {
            present,
            cmac_sequence_counter: HOST_CMAC_COUNTER_ABSENT,
        });
    }
    let c = parser::slice_at(data, 1, 3)?;
    Ok(HostKeySlot {
        present,
        cmac_sequence_counter: u32::from_be_bytes([0, c[0], c[1], c[2]]),
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PublicKeySlot {
    pub present: bool,
    pub point_representation_id: Option<u8>,
    pub public_key: Option<PublicKey>,
    /// Raw curve OID as stored in the slot.
    pub curve_oid: Vec<u8>,
}

impl PublicKeySlot {
    pub fn curve(&self) -> Option<CurveId> {
        CurveId::from_oid(&self.curve_oid)
    }
}

/// Layout: presence(1) [+ point rep id(1) + X LV + Y LV + curve OID LV]
pub fn decode_public_key_slot(data: &[u8]) -> Result<PublicKeySlot> {
    let mut c = Cursor::new(data);
    let present = c.u8()? != 0;
    if !present || c.is_empty() {
        return Ok(PublicKeySlot {
            present,
            point_representation_id: None,
            public_key: None,
            curve_oid: Vec::new(),
        });
    }
    let point_representation_id = c.u8()?;
    let x = c.lv()?;
    let y = c.lv()?;
    let curve_oid = c.lv()?.to_vec();
    Ok(PublicKeySlot {
        present,
        point_representation_id: Some(point_representation_id),
        public_key: Some(PublicKey::new(x, y)),
        curve_oid,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocalEnvelopeKeySlot {
    pub slot: KeySlot,
    pub present: bool,
    pub key_type: Option<AesKeyType>,
}

/// Layout: slot count(1), then per slot: number(1) + presence(1)
/// [+ key length(1) only when present]
pub fn decode_local_envelope_key_slots(data: &[u8]) -> Result<Vec<LocalEnvelopeKeySlot>> {
    let mut c = Cursor::new(data);
    let count = c.u8()? as usize;
    let mut slots = Vec::with_capacity(count);
    for _ in 0..count {
        let raw_slot = c.u8()?;
        let slot = KeySlot::from_u8(raw_slot).ok_or_else(|| {
            Error::FrameFormat(format!("unknown local envelope slot {:#04x}", raw_slot))
        })?;
        let present = c.u8()? != 0;
        let key_type = if present {
            let raw = c.u8()?;
            Some(AesKeyType::from_u8(raw).ok_or_else(|| {
                Error::FrameFormat(format!("unknown envelope key length {:#04x}", raw))
            })?)
        } else {
            None
        };
        slots.push(LocalEnvelopeKeySlot {
            slot,
            present,
            key_type,
        });
    }
    Ok(slots)
}
