#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{sample_signature, signature_payload};
use common::helpers::crypto_device;
use sha2::{Digest, Sha256};
use stsafe::test_support::response_frame;
use stsafe::types::{HashType, KeySlot, MacMode};
use stsafe::Error;

#[test]
fn transcript_digest_covers_the_session() -> anyhow::Result<()> {
    common::init_logging();
    let (mock, mut dev) = crypto_device(true)?;
    let sig = sample_signature();
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &[], true));
        m.push_response(response_frame(0x00, &[0xAA, 0xBB], true));
        m.push_response(response_frame(0x00, &signature_payload(&sig), true));
    }

    let session = dev.start_signature_session(KeySlot::Slot0)?;
    assert!(dev.signature_session_open());
    assert_eq!(session.hash_type(), HashType::Sha256);
    dev.echo(&[0xAA, 0xBB], MacMode::NONE)?;
    let got = dev.get_signature(session, &[], MacMode::NONE)?;
    assert_eq!(got, sig);
    assert!(!dev.signature_session_open());

    let mut expected = Sha256::new();
    // StartSession response
    expected.update([0x02, 0x00, 0x01, 0x00]);
    // Echo command and response
    expected.update([0x01, 0x00, 0x03, 0x00, 0xAA, 0xBB]);
    expected.update([0x02, 0x00, 0x03, 0x00, 0xAA, 0xBB]);
    // GetSignature command
    expected.update([0x01, 0x00, 0x01, 0x15]);
    assert_eq!(dev.last_digest(), expected.finalize().as_slice());
    Ok(())
}

#[test]
fn second_session_is_refused() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    mock.borrow_mut().push_response(response_frame(0x00, &[], true));

    let _session = dev.start_signature_session(KeySlot::Slot0)?;
    let err = dev.start_signature_session(KeySlot::Slot1).unwrap_err();
    assert!(matches!(err, Error::SessionAlreadyOpen));
    assert_eq!(mock.borrow().sent.len(), 1);
    Ok(())
}

#[test]
fn failed_start_leaves_no_session() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    mock.borrow_mut().push_response(response_frame(0x0A, &[], true));

    assert!(dev.start_signature_session(KeySlot::Slot0).is_err());
    assert!(!dev.signature_session_open());
    Ok(())
}

#[test]
fn reset_closes_the_session() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &[], true));
        m.push_response(response_frame(0x00, &[], true));
    }

    let _session = dev.start_signature_session(KeySlot::Slot0)?;
    dev.reset()?;
    assert!(!dev.signature_session_open());
    Ok(())
}

#[test]
fn failed_reset_still_closes_the_session() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(true)?;
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &[], true));
        m.push_response(response_frame(0x0A, &[], true));
    }

    let _session = dev.start_signature_session(KeySlot::Slot0)?;
    assert!(dev.reset().is_err());
    assert!(!dev.signature_session_open());
    Ok(())
}

#[test]
fn sha384_sessions_produce_48_byte_digests() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(false)?;
    dev.set_hash_type(HashType::Sha384);
    {
        let mut m = mock.borrow_mut();
        m.push_response(response_frame(0x00, &[], false));
        m.push_response(response_frame(0x00, &signature_payload(&sample_signature()), false));
    }

    let session = dev.start_signature_session(KeySlot::Slot1)?;
    dev.get_signature(session, &[0x42; 16], MacMode::NONE)?;
    assert_eq!(dev.last_digest().len(), 48);
    Ok(())
}
