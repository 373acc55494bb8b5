#[path = "../common/mod.rs"]
mod common;

use stsafe::protocol::{
    decode_data_partition, decode_local_envelope_key_slots, decode_product_data,
    decode_public_key_slot,
};
use stsafe::test_support::product_data_payload;
use stsafe::types::{AesKeyType, CurveId, KeySlot};

#[test]
fn product_data_fields() {
    let pd = decode_product_data(&product_data_payload(0x01FB)).unwrap();
    assert_eq!(pd.mask_identification, vec![0x09, 0x01, 0x02]);
    assert_eq!(pd.st_number.len(), 9);
    assert_eq!(pd.input_output_buffer_size, 0x01FB);
    assert_eq!(pd.atomicity_buffer_size, 0x01E0);
    assert_eq!(pd.module_date, 0x2018);
}

#[test]
fn public_key_slot_with_curve() {
    let key = common::fixtures::sample_public_key();
    let oid = CurveId::NistP256.oid();
    let mut wire = vec![0x01, 0x04];
    for part in [&key.x[..], &key.y[..], oid] {
        wire.extend_from_slice(&(part.len() as u16).to_be_bytes());
        wire.extend_from_slice(part);
    }

    let slot = decode_public_key_slot(&wire).unwrap();
    assert!(slot.present);
    assert_eq!(slot.point_representation_id, Some(0x04));
    assert_eq!(slot.public_key, Some(key));
    assert_eq!(slot.curve(), Some(CurveId::NistP256));

    let empty = decode_public_key_slot(&[0x00]).unwrap();
    assert!(!empty.present);
    assert!(empty.public_key.is_none());
}

#[test]
fn data_partition_normalizes_counterless_zones() {
    let wire = hex::decode(concat!(
        "03",
        "00 00 01 00 40",
        "01 01 01 00 40 00 01 86 9f",
        "02 00 03 04 00",
    )
    .replace(' ', ""))
    .unwrap();

    let p = decode_data_partition(&wire).unwrap();
    assert_eq!(p.zones.len(), 3);
    assert_eq!(p.length, wire.len() + 2 * 4);
    assert_eq!(p.zone(1).unwrap().one_way_counter, 99_999);
    assert!(!p.zone(2).unwrap().has_counter());
    assert_eq!(p.to_normalized_bytes().len(), p.length);
}

#[test]
fn local_envelope_table() {
    let slots = decode_local_envelope_key_slots(&[0x02, 0x00, 0x01, 0x00, 0x01, 0x00]).unwrap();
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].slot, KeySlot::Slot0);
    assert_eq!(slots[0].key_type, Some(AesKeyType::Aes128));
    assert!(!slots[1].present);
}
