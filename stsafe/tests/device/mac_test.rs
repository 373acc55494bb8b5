#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{host_key_slot_payload, host_rmac_request_input, MAC_KEY};
use common::helpers::{crypto_device, recording_device};
use stsafe::crypto::mock::mac_calls;
use stsafe::crypto::{CryptoCall, MacKind};
use stsafe::device::DeviceBuilder;
use stsafe::protocol::Command;
use stsafe::test_support::{configured_device, response_frame, response_mac, rmac_response_frame};
use stsafe::types::MacMode;
use stsafe::Error;

fn read_zone_two() -> Command {
    Command::Read {
        ac_change: None,
        zone: 2,
        offset: 0,
        length: 4,
    }
}

#[test]
fn host_rmac_read_is_verified() -> anyhow::Result<()> {
    common::init_logging();
    let (mock, mut dev) = crypto_device(true)?;
    let data = [0xDE, 0xAD, 0xBE, 0xEF];
    let input = host_rmac_request_input(&read_zone_two(), MacMode::HOST_R_MAC, 5);
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &host_key_slot_payload(5), true));
        m.push_response(rmac_response_frame(&MAC_KEY, &input, &data, true)?);
    }

    let read = dev.read(None, 2, 0, 4, MacMode::HOST_R_MAC)?;
    assert_eq!(read, data);
    assert_eq!(dev.host_cmac_counter(), 5);

    let m = mock.borrow();
    assert_eq!(&m.sent[0][..2], &[0x14, 0x17]);
    assert_eq!(m.sent[1][0], 0xE5);
    // header + payload + C-MAC + CRC
    assert_eq!(m.sent[1].len(), 1 + 6 + 4 + 2);
    // the R-MAC is announced on top of the response payload and CRC
    assert_eq!(m.expected_lengths[1], 4 + 4 + 2);
    Ok(())
}

#[test]
fn corrupted_rmac_is_rejected() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    let data = [0x01, 0x02, 0x03, 0x04];
    let input = host_rmac_request_input(&read_zone_two(), MacMode::HOST_R_MAC, 5);
    let mut mac = response_mac(&MAC_KEY, &input, 0x40, &data)?;
    mac[0] ^= 0x01;
    let mut body = data.to_vec();
    body.extend_from_slice(&mac);
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &host_key_slot_payload(5), true));
        m.push_response(response_frame(0x40, &body, true));
    }

    let err = dev.read(None, 2, 0, 4, MacMode::HOST_R_MAC).unwrap_err();
    assert!(matches!(err, Error::InvalidRmac));
    Ok(())
}

#[test]
fn host_counter_query_failure_aborts_the_command() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    mock.borrow_mut().push_response(response_frame(0x0A, &[], true));

    let err = dev.read(None, 2, 0, 4, MacMode::HOST_C_MAC).unwrap_err();
    assert!(matches!(err, Error::Device(_)));
    assert_eq!(mock.borrow().sent.len(), 1);
    Ok(())
}

#[test]
fn no_mac_calls_without_mac_bits() -> anyhow::Result<()> {
    let (mock, log, mut dev) = recording_device(false)?;
    mock.borrow_mut().push_response(response_frame(0x00, &[0xAA], false));

    dev.echo(&[0xAA], MacMode::NONE)?;
    assert_eq!(mac_calls(&log), 0);
    assert!(log.borrow().is_empty());
    Ok(())
}

#[test]
fn peripheral_cmac_input_framing() -> anyhow::Result<()> {
    let (mock, log, mut dev) = recording_device(false)?;
    mock.borrow_mut().push_response(response_frame(0x00, &[0xAA, 0xBB], false));

    dev.echo(&[0xAA, 0xBB], MacMode::C_MAC)?;
    assert_eq!(
        *log.borrow(),
        vec![
            CryptoCall::MacStart(MacKind::Command, MAC_KEY),
            CryptoCall::MacUpdate(MacKind::Command, vec![0x00, 0x80, 0x00, 0x02, 0xAA, 0xBB]),
            CryptoCall::MacFinal(MacKind::Command),
        ]
    );
    assert_eq!(mock.borrow().sent[0].len(), 1 + 2 + 4);
    Ok(())
}

#[test]
fn cmac_depends_on_the_key() -> anyhow::Result<()> {
    let mut macs = Vec::new();
    for key in [MAC_KEY, [0x42; 16]] {
        let builder = DeviceBuilder::new()
            .with_crc_support(false)
            .with_software_crypto()
            .with_host_keys([0u8; 16], key);
        let (mock, mut dev) = configured_device(builder)?;
        mock.borrow_mut().push_response(response_frame(0x00, &[0x01], false));
        dev.echo(&[0x01], MacMode::C_MAC)?;
        let sent = mock.borrow().sent[0].clone();
        macs.push(sent[sent.len() - 4..].to_vec());
    }
    assert_ne!(macs[0], macs[1]);
    Ok(())
}

#[test]
fn mac_without_keys_is_a_crypto_issue() -> anyhow::Result<()> {
    let builder = DeviceBuilder::new().with_software_crypto();
    let (mock, mut dev) = configured_device(builder)?;
    let err = dev.echo(&[0x01], MacMode::C_MAC).unwrap_err();
    assert!(matches!(err, Error::CryptoLibIssue(_)));
    assert!(mock.borrow().sent.is_empty());
    Ok(())
}
