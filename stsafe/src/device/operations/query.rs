// stsafe-rs/stsafe/src/device/operations/query.rs

use crate::device::handle::{Configured, Device};
use crate::protocol::{
    decode_i2c_parameters, decode_life_cycle_state, decode_local_envelope_key_slots,
    decode_public_key_slot, Command, HostKeySlot, I2cParameters, LocalEnvelopeKeySlot,
    ProductData, PublicKeySlot,
};
use crate::types::{AttributeTag, LifeCycleState, MacMode};
use crate::Result;

impl Device<Configured> {
    fn query(&mut self, tag: AttributeTag, mac: MacMode) -> Result<&[u8]> {
        self.execute(&Command::Query { tag }, mac)
    }

    pub fn product_data_query(&mut self, mac: MacMode) -> Result<ProductData> {
        self.query_product_data(mac)
    }

    pub fn i2c_parameter_query(&mut self, mac: MacMode) -> Result<I2cParameters> {
        let payload = self.query(AttributeTag::I2cParameter, mac)?;
        decode_i2c_parameters(payload)
    }

    pub fn life_cycle_state_query(&mut self, mac: MacMode) -> Result<LifeCycleState> {
        let payload = self.query(AttributeTag::LifeCycleState, mac)?;
        decode_life_cycle_state(payload)
    }

    pub fn public_key_slot_query(&mut self, mac: MacMode) -> Result<PublicKeySlot> {
        let payload = self.query(AttributeTag::PublicKeySlot, mac)?;
        decode_public_key_slot(payload)
    }

    /// Also refreshes the host C-MAC sequence counter used for H_MAC
    /// commands.
    pub fn host_key_slot_query(&mut self, mac: MacMode) -> Result<HostKeySlot> {
        self.query_host_key_slot(mac)
    }

    pub fn local_envelope_key_slot_query(
        &mut self,
        mac: MacMode,
    ) -> Result<Vec<LocalEnvelopeKeySlot>> {
        let payload = self.query(AttributeTag::LocalEnvelopeKeyTable, mac)?;
        decode_local_envelope_key_slots(payload)
    }

    pub fn put_attribute(&mut self, tag: AttributeTag, data: &[u8], mac: MacMode) -> Result<()> {
        self.execute(&Command::PutAttribute { tag, data: data.to_vec() }, mac)?;
        Ok(())
    }
}
