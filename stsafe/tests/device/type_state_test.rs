#[path = "../common/mod.rs"]
mod common;

use stsafe::device::{Device, DeviceBuilder};
use stsafe::test_support::{product_data_payload, response_frame, shared_mock};
use stsafe::Error;

#[test]
fn configure_transitions_and_reads_product_data() {
    common::init_logging();
    let (mock, transport) = shared_mock();
    mock.borrow_mut()
        .push_response(response_frame(0x00, &product_data_payload(0x0100), true));

    let device = Device::new_with_transport(transport);
    let configured = device.configure().unwrap();

    let pd = configured.product_data().unwrap();
    assert_eq!(pd.input_output_buffer_size, 0x0100);
    assert_eq!(configured.data_buffer_size(), 0x0100);
    // Query(ProductData) with its CRC
    assert_eq!(mock.borrow().sent[0].len(), 4);
}

#[test]
fn builder_requires_transport() {
    let err = DeviceBuilder::new().build().err().unwrap();
    assert!(matches!(err, Error::InvalidArgument(_)));
}

#[test]
fn builder_settings_reach_the_bus() {
    let (mock, transport) = shared_mock();
    mock.borrow_mut()
        .push_response(response_frame(0x00, &product_data_payload(0x01FB), false));

    let dev = DeviceBuilder::new()
        .with_transport(transport)
        .with_i2c_address(0x40)
        .with_crc_support(false)
        .build()
        .unwrap();

    assert_eq!(mock.borrow().addresses, vec![0x40]);
    assert_eq!(mock.borrow().sent[0], vec![0x14, 0x11]);
    assert!(!dev.crc_support());
    assert!(!dev.has_crypto());
}
