// stsafe-rs/stsafe/src/crypto/software.rs

use aes::Aes128;
use aes::cipher::block_padding::NoPadding;
use aes::cipher::{BlockDecryptMut, BlockEncrypt, BlockEncryptMut, KeyInit, KeyIvInit};
use cmac::{Cmac, Mac};
use sha2::{Digest, Sha256, Sha384};

use crate::constants::{AES_BLOCK_LEN, HOST_KEY_LEN, MAC_LENGTH};
use crate::crypto::traits::{Crypto, MacKind};
use crate::types::HashType;
use crate::{Error, Result};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;

/// Pure software backend built on the RustCrypto block cipher, CMAC and
/// SHA-2 implementations.
#[derive(Default)]
pub struct SoftwareCrypto {
    sha256: Option<Sha256>,
    sha384: Option<Sha384>,
    command_mac: Option<Cmac<Aes128>>,
    response_mac: Option<Cmac<Aes128>>,
}

impl SoftwareCrypto {
    pub fn new() -> Self {
        Self::default()
    }

    fn mac_slot(&mut self, kind: MacKind) -> &mut Option<Cmac<Aes128>> {
        match kind {
            MacKind::Command => &mut self.command_mac,
            MacKind::Response => &mut self.response_mac,
        }
    }
}

fn check_blocks(data: &[u8]) -> Result<()> {
    if data.len() % AES_BLOCK_LEN != 0 {
        return Err(Error::CryptoLibIssue(format!(
            "cbc input of {} bytes is not block aligned",
            data.len()
        )));
    }
    Ok(())
}

fn no_context(what: &str) -> Error {
    Error::CryptoLibIssue(format!("no running {} context", what))
}

impl Crypto for SoftwareCrypto {
    fn sha_init(&mut self, hash: HashType) -> Result<()> {
        match hash {
            HashType::Sha256 => self.sha256 = Some(Sha256::new()),
            HashType::Sha384 => self.sha384 = Some(Sha384::new()),
        }
        Ok(())
    }

    fn sha_update(&mut self, hash: HashType, data: &[u8]) -> Result<()> {
        match hash {
            HashType::Sha256 => {
                let sha = self.sha256.as_mut().ok_or_else(|| no_context("sha-256"))?;
                Digest::update(sha, data);
            }
            HashType::Sha384 => {
                let sha = self.sha384.as_mut().ok_or_else(|| no_context("sha-384"))?;
                Digest::update(sha, data);
            }
        }
        Ok(())
    }

    fn sha_final(&mut self, hash: HashType) -> Result<Vec<u8>> {
        let digest = match hash {
            HashType::Sha256 => self
                .sha256
                .take()
                .ok_or_else(|| no_context("sha-256"))?
                .finalize()
                .to_vec(),
            HashType::Sha384 => self
                .sha384
                .take()
                .ok_or_else(|| no_context("sha-384"))?
                .finalize()
                .to_vec(),
        };
        Ok(digest)
    }

    fn sha_active(&self, hash: HashType) -> bool {
        match hash {
            HashType::Sha256 => self.sha256.is_some(),
            HashType::Sha384 => self.sha384.is_some(),
        }
    }

    fn aes_ecb_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        block: &mut [u8; AES_BLOCK_LEN],
    ) -> Result<()> {
        let cipher = Aes128::new(key.into());
        cipher.encrypt_block(block.into());
        Ok(())
    }

    fn aes_cbc_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()> {
        check_blocks(data)?;
        let len = data.len();
        Aes128CbcEnc::new(key.into(), iv.into())
            .encrypt_padded_mut::<NoPadding>(data, len)
            .map_err(|e| Error::CryptoLibIssue(e.to_string()))?;
        Ok(())
    }

    fn aes_cbc_decrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()> {
        check_blocks(data)?;
        Aes128CbcDec::new(key.into(), iv.into())
            .decrypt_padded_mut::<NoPadding>(data)
            .map_err(|e| Error::CryptoLibIssue(e.to_string()))?;
        Ok(())
    }

    fn mac_start(&mut self, key: &[u8; HOST_KEY_LEN], kind: MacKind) -> Result<()> {
        let mac = <Cmac<Aes128> as Mac>::new_from_slice(key)
            .map_err(|e| Error::CryptoLibIssue(e.to_string()))?;
        *self.mac_slot(kind) = Some(mac);
        Ok(())
    }

    fn mac_update(&mut self, kind: MacKind, data: &[u8]) -> Result<()> {
        let mac = self.mac_slot(kind).as_mut().ok_or_else(|| no_context("cmac"))?;
        Mac::update(mac, data);
        Ok(())
    }

    fn mac_final(&mut self, kind: MacKind) -> Result<[u8; MAC_LENGTH]> {
        let mac = self.mac_slot(kind).take().ok_or_else(|| no_context("cmac"))?;
        let tag = mac.finalize().into_bytes();
        let mut out = [0u8; MAC_LENGTH];
        out.copy_from_slice(&tag[..MAC_LENGTH]);
        Ok(out)
    }
}
