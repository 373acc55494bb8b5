// stsafe-rs/stsafe/src/device/session.rs

use zeroize::Zeroizing;

use crate::constants::{DEFAULT_I2C_ADDRESS, HOST_CMAC_COUNTER_ABSENT, HOST_KEY_LEN};
use crate::types::{HashType, KeySlot};
use crate::{Error, Result};

/// Host key material. Both keys are wiped from memory on drop.
#[derive(Clone)]
pub(crate) struct HostKeys {
    pub cipher: Zeroizing<[u8; HOST_KEY_LEN]>,
    pub mac: Zeroizing<[u8; HOST_KEY_LEN]>,
}

impl HostKeys {
    pub fn new(cipher: [u8; HOST_KEY_LEN], mac: [u8; HOST_KEY_LEN]) -> Self {
        Self {
            cipher: Zeroizing::new(cipher),
            mac: Zeroizing::new(mac),
        }
    }
}

/// Per-engine protocol state carried between exchanges.
pub(crate) struct SessionState {
    pub i2c_address: u8,
    pub crc_support: bool,
    pub hash_type: HashType,
    /// 7-bit counter used by admin/peripheral MACs.
    pub mac_counter: u8,
    /// 24-bit host C-MAC sequence counter, refreshed before H_MAC commands.
    pub host_cmac_counter: u32,
    pub host_keys: Option<HostKeys>,
    /// Slot of the open signature session, independent of hashing.
    pub signature_slot: Option<KeySlot>,
    /// Hash running over the signature-session transcript, if one is open.
    pub transcript: Option<HashType>,
    pub last_digest: Vec<u8>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            i2c_address: DEFAULT_I2C_ADDRESS,
            crc_support: true,
            hash_type: HashType::default(),
            mac_counter: 0,
            host_cmac_counter: HOST_CMAC_COUNTER_ABSENT,
            host_keys: None,
            signature_slot: None,
            transcript: None,
            last_digest: Vec::new(),
        }
    }
}

impl SessionState {
    pub fn mac_key(&self) -> Result<&[u8; HOST_KEY_LEN]> {
        self.host_keys
            .as_ref()
            .map(|k| &*k.mac)
            .ok_or_else(|| Error::CryptoLibIssue("host mac key not set".into()))
    }

    /// Forget any open signature session and its running transcript.
    pub fn close_signature_session(&mut self) {
        self.signature_slot = None;
        self.transcript = None;
    }

    pub fn cipher_key(&self) -> Result<&[u8; HOST_KEY_LEN]> {
        self.host_keys
            .as_ref()
            .map(|k| &*k.cipher)
            .ok_or_else(|| Error::CryptoLibIssue("host cipher key not set".into()))
    }
}

/// Proof that a signature session is open on the device.
///
/// Returned by `start_signature_session` and consumed by `get_signature`;
/// the engine refuses to open a second one while this token is live.
#[must_use = "an open signature session keeps hashing every exchange until closed"]
#[derive(Debug)]
pub struct SignatureSession {
    slot: KeySlot,
    hash: HashType,
}

impl SignatureSession {
    pub(crate) fn new(slot: KeySlot, hash: HashType) -> Self {
        Self { slot, hash }
    }

    pub fn slot(&self) -> KeySlot {
        self.slot
    }

    /// Hash algorithm accumulating the transcript.
    pub fn hash_type(&self) -> HashType {
        self.hash
    }
}
