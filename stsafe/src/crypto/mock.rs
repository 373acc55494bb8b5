// stsafe-rs/stsafe/src/crypto/mock.rs

use std::cell::RefCell;
use std::rc::Rc;

use crate::constants::{AES_BLOCK_LEN, HOST_KEY_LEN, MAC_LENGTH};
use crate::crypto::traits::{Crypto, MacKind};
use crate::types::HashType;
use crate::Result;

/// One invocation of the crypto capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CryptoCall {
    ShaInit(HashType),
    ShaUpdate(HashType, Vec<u8>),
    ShaFinal(HashType),
    EcbEncrypt,
    CbcEncrypt(usize),
    CbcDecrypt(usize),
    MacStart(MacKind, [u8; HOST_KEY_LEN]),
    MacUpdate(MacKind, Vec<u8>),
    MacFinal(MacKind),
}

/// Shared log handle so tests can inspect calls after the wrapper has been
/// boxed into a device.
pub type CallLog = Rc<RefCell<Vec<CryptoCall>>>;

/// Crypto wrapper for tests: forwards to an inner implementation and
/// records every call.
pub struct RecordingCrypto<C: Crypto> {
    inner: C,
    log: CallLog,
}

impl<C: Crypto> RecordingCrypto<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            log: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    fn record(&self, call: CryptoCall) {
        self.log.borrow_mut().push(call);
    }
}

/// Number of MAC calls (start/update/final) in a log.
pub fn mac_calls(log: &CallLog) -> usize {
    log.borrow()
        .iter()
        .filter(|c| {
            matches!(
                c,
                CryptoCall::MacStart(..) | CryptoCall::MacUpdate(..) | CryptoCall::MacFinal(_)
            )
        })
        .count()
}

impl<C: Crypto> Crypto for RecordingCrypto<C> {
    fn sha_init(&mut self, hash: HashType) -> Result<()> {
        self.record(CryptoCall::ShaInit(hash));
        self.inner.sha_init(hash)
    }

    fn sha_update(&mut self, hash: HashType, data: &[u8]) -> Result<()> {
        self.record(CryptoCall::ShaUpdate(hash, data.to_vec()));
        self.inner.sha_update(hash, data)
    }

    fn sha_final(&mut self, hash: HashType) -> Result<Vec<u8>> {
        self.record(CryptoCall::ShaFinal(hash));
        self.inner.sha_final(hash)
    }

    fn sha_active(&self, hash: HashType) -> bool {
        self.inner.sha_active(hash)
    }

    fn aes_ecb_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        block: &mut [u8; AES_BLOCK_LEN],
    ) -> Result<()> {
        self.record(CryptoCall::EcbEncrypt);
        self.inner.aes_ecb_encrypt(key, block)
    }

    fn aes_cbc_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()> {
        self.record(CryptoCall::CbcEncrypt(data.len()));
        self.inner.aes_cbc_encrypt(key, iv, data)
    }

    fn aes_cbc_decrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()> {
        self.record(CryptoCall::CbcDecrypt(data.len()));
        self.inner.aes_cbc_decrypt(key, iv, data)
    }

    fn mac_start(&mut self, key: &[u8; HOST_KEY_LEN], kind: MacKind) -> Result<()> {
        self.record(CryptoCall::MacStart(kind, *key));
        self.inner.mac_start(key, kind)
    }

    fn mac_update(&mut self, kind: MacKind, data: &[u8]) -> Result<()> {
        self.record(CryptoCall::MacUpdate(kind, data.to_vec()));
        self.inner.mac_update(kind, data)
    }

    fn mac_final(&mut self, kind: MacKind) -> Result<[u8; MAC_LENGTH]> {
        self.record(CryptoCall::MacFinal(kind));
        self.inner.mac_final(kind)
    }
}
