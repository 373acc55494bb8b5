// stsafe-rs/stsafe/src/crypto/traits.rs

use crate::constants::{AES_BLOCK_LEN, HOST_KEY_LEN, MAC_LENGTH};
use crate::types::HashType;
use crate::Result;

/// Command and response MACs run in separate streaming contexts because
/// the response MAC is started before the command is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MacKind {
    Command,
    Response,
}

/// Cryptographic primitives consumed by the engine. Implementations may be
/// hardware accelerated; the engine only relies on this contract.
pub trait Crypto {
    /// Start (or restart) a running hash.
    fn sha_init(&mut self, hash: HashType) -> Result<()>;

    fn sha_update(&mut self, hash: HashType, data: &[u8]) -> Result<()>;

    /// Finish the running hash and return its digest.
    fn sha_final(&mut self, hash: HashType) -> Result<Vec<u8>>;

    /// Whether a running hash of this type is open.
    fn sha_active(&self, hash: HashType) -> bool;

    fn aes_ecb_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        block: &mut [u8; AES_BLOCK_LEN],
    ) -> Result<()>;

    /// In-place AES-128-CBC; `data` is a whole number of blocks.
    fn aes_cbc_encrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()>;

    fn aes_cbc_decrypt(
        &mut self,
        key: &[u8; HOST_KEY_LEN],
        iv: &[u8; AES_BLOCK_LEN],
        data: &mut [u8],
    ) -> Result<()>;

    /// Start a streaming AES-CMAC.
    fn mac_start(&mut self, key: &[u8; HOST_KEY_LEN], kind: MacKind) -> Result<()>;

    fn mac_update(&mut self, kind: MacKind, data: &[u8]) -> Result<()>;

    /// Finish the CMAC and return its leading bytes.
    fn mac_final(&mut self, kind: MacKind) -> Result<[u8; MAC_LENGTH]>;
}
