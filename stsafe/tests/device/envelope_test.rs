#[path = "../common/mod.rs"]
mod common;

use common::fixtures::{sample_public_key, CIPHER_KEY};
use common::helpers::crypto_device;
use stsafe::constants::HOST_CMAC_COUNTER_ABSENT;
use stsafe::crypto::{Crypto, SoftwareCrypto};
use stsafe::protocol::codec::{pad, put_lv, unpad};
use stsafe::protocol::mac::{initial_value, InitialValueSubject};
use stsafe::test_support::response_frame;
use stsafe::types::{KeySlot, MacMode};

/// The device side of payload encryption, keyed on the counter the host
/// holds when no host-keyed exchange has happened yet.
fn device_iv(crypto: &mut SoftwareCrypto, subject: InitialValueSubject) -> [u8; 16] {
    let mut iv = initial_value(HOST_CMAC_COUNTER_ABSENT, subject);
    crypto.aes_ecb_encrypt(&CIPHER_KEY, &mut iv).unwrap();
    iv
}

fn device_encrypt(plain: &[u8]) -> Vec<u8> {
    let mut crypto = SoftwareCrypto::new();
    let iv = device_iv(&mut crypto, InitialValueSubject::ResponseEncryption);
    let mut data = plain.to_vec();
    pad(&mut data);
    crypto.aes_cbc_encrypt(&CIPHER_KEY, &iv, &mut data).unwrap();
    data
}

fn device_decrypt(cipher: &[u8]) -> Vec<u8> {
    let mut crypto = SoftwareCrypto::new();
    let iv = device_iv(&mut crypto, InitialValueSubject::CommandEncryption);
    let mut data = cipher.to_vec();
    crypto.aes_cbc_decrypt(&CIPHER_KEY, &iv, &mut data).unwrap();
    let n = unpad(&data).unwrap();
    data.truncate(n);
    data
}

#[test]
fn wrap_request_is_encrypted_including_slot() -> anyhow::Result<()> {
    common::init_logging();
    let (mock, mut dev) = crypto_device(false)?;
    let secret = hex::decode("00112233445566778899aabbccddeeff")?;
    mock.borrow_mut().push_response(response_frame(0x00, &[0x33; 24], false));

    let envelope = dev.wrap_local_envelope(KeySlot::Slot1, &secret, MacMode::NONE)?;
    assert_eq!(envelope, vec![0x33; 24]);

    let sent = mock.borrow().sent[0].clone();
    assert_eq!(sent[0], 0x0E);
    // slot + 16 data bytes pad to two blocks
    assert_eq!(sent.len(), 1 + 32);
    let plain = device_decrypt(&sent[1..]);
    assert_eq!(plain[0], 0x01);
    assert_eq!(&plain[1..], &secret[..]);
    Ok(())
}

#[test]
fn unwrap_response_is_decrypted() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(false)?;
    let secret = b"local envelope payload".to_vec();
    mock.borrow_mut()
        .push_response(response_frame(0x00, &device_encrypt(&secret), false));

    let plain = dev.unwrap_local_envelope(KeySlot::Slot0, &[0x44; 32], MacMode::NONE)?;
    assert_eq!(plain, secret);
    // the request itself travels in clear
    assert_eq!(&mock.borrow().sent[0][..2], &[0x0F, 0x00]);
    Ok(())
}

#[test]
fn establish_key_returns_deciphered_secret() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(false)?;
    let shared = [0x5C; 32];
    let mut response = Vec::new();
    put_lv(&mut response, &shared);
    mock.borrow_mut()
        .push_response(response_frame(0x00, &device_encrypt(&response), false));

    let secret = dev.establish_key(KeySlot::Slot1, &sample_public_key(), MacMode::NONE)?;
    assert_eq!(secret, shared);
    Ok(())
}

#[test]
fn bad_padding_is_a_crypto_issue() -> anyhow::Result<()> {
    let (mock, mut dev) = crypto_device(false)?;
    // an all-zero plaintext block carries no padding marker
    let mut crypto = SoftwareCrypto::new();
    let iv = device_iv(&mut crypto, InitialValueSubject::ResponseEncryption);
    let mut block = [0u8; 16];
    crypto.aes_cbc_encrypt(&CIPHER_KEY, &iv, &mut block)?;
    mock.borrow_mut().push_response(response_frame(0x00, &block, false));

    let err = dev
        .unwrap_local_envelope(KeySlot::Slot0, &[0x44; 32], MacMode::NONE)
        .unwrap_err();
    assert!(matches!(err, stsafe::Error::CryptoLibIssue(_)));
    Ok(())
}
