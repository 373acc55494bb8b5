// stsafe-rs/stsafe/src/protocol/responses/mod.rs

pub mod general;
pub mod keys;
pub mod partition;
pub mod query;

pub use general::{
    decode_decrement, decode_shared_secret, decode_signature, decode_validity,
    decode_verify_password, PasswordVerification,
};
pub use keys::{decode_generate_key_pair, GeneratedKeyPair};
pub use partition::{decode_data_partition, DataPartition, ZoneInformationRecord};
pub use query::{
    decode_host_key_slot, decode_i2c_parameters, decode_life_cycle_state,
    decode_local_envelope_key_slots, decode_product_data, decode_public_key_slot, HostKeySlot,
    I2cParameters, LocalEnvelopeKeySlot, ProductData, PublicKeySlot,
};
