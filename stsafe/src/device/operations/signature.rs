// stsafe-rs/stsafe/src/device/operations/signature.rs

use log::debug;

use crate::device::handle::{Configured, Device};
use crate::device::session::SignatureSession;
use crate::protocol::{decode_shared_secret, decode_signature, decode_validity, Command};
use crate::types::{CurveId, KeySlot, MacMode, PublicKey, Signature};
use crate::{Error, Result};

impl Device<Configured> {
    /// Open a signature session: from now on every exchange is hashed
    /// until `get_signature` closes it.
    ///
    /// Without a crypto capability the session still opens on the device
    /// but no transcript digest is kept.
    pub fn start_signature_session(&mut self, slot: KeySlot) -> Result<SignatureSession> {
        if self.session.signature_slot.is_some() {
            return Err(Error::SessionAlreadyOpen);
        }
        let hash = self.session.hash_type;
        let cmd = Command::StartSignatureSession { slot };
        let mac = self.send_command(&cmd, MacMode::NONE)?;

        if let Some(crypto) = self.crypto.as_deref_mut() {
            crypto.sha_init(hash)?;
            self.session.transcript = Some(hash);
        }
        let received = self.receive_response(&cmd, mac).map(|_| ());
        if let Err(e) = received {
            self.session.close_signature_session();
            return Err(e);
        }
        self.session.signature_slot = Some(slot);
        debug!("signature session opened on {:?} ({})", slot, hash);
        Ok(SignatureSession::new(slot, hash))
    }

    /// Close the session and return the device's signature over the
    /// transcript. The host-side digest is kept in `last_digest()`.
    pub fn get_signature(
        &mut self,
        session: SignatureSession,
        challenge: &[u8],
        mac: MacMode,
    ) -> Result<Signature> {
        let cmd = Command::GetSignature {
            challenge: challenge.to_vec(),
        };
        let sent = self.send_command(&cmd, mac);

        let hash = self.session.transcript.take();
        self.session.signature_slot = None;
        if let (Some(hash), Some(crypto)) = (hash, self.crypto.as_deref_mut()) {
            if crypto.sha_active(hash) {
                self.session.last_digest = crypto.sha_final(hash)?;
            }
        }
        debug!("signature session on {:?} closed", session.slot());

        let payload = self.receive_response(&cmd, sent?)?;
        decode_signature(payload)
    }

    pub fn generate_signature(
        &mut self,
        slot: KeySlot,
        digest: &[u8],
        mac: MacMode,
    ) -> Result<Signature> {
        let cmd = Command::GenerateSignature {
            slot,
            digest: digest.to_vec(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_signature(payload)
    }

    /// Verify a signature over `digest` with an external public key.
    pub fn verify_message_signature(
        &mut self,
        curve: CurveId,
        public_key: &PublicKey,
        signature: &Signature,
        digest: &[u8],
        mac: MacMode,
    ) -> Result<bool> {
        let cmd = Command::VerifyMessageSignature {
            curve,
            public_key: public_key.clone(),
            signature: signature.clone(),
            digest: digest.to_vec(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_validity(payload)
    }

    /// Verify the entity signature over the challenge issued by the
    /// preceding authentication random.
    pub fn verify_entity_signature(
        &mut self,
        signature: &Signature,
        mac: MacMode,
    ) -> Result<bool> {
        let cmd = Command::VerifyEntitySignature {
            signature: signature.clone(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_validity(payload)
    }

    /// ECDH with the key in `slot`. The shared secret comes back encrypted
    /// under the host cipher key and is returned deciphered.
    pub fn establish_key(
        &mut self,
        slot: KeySlot,
        public_key: &PublicKey,
        mac: MacMode,
    ) -> Result<Vec<u8>> {
        let cmd = Command::EstablishKey {
            slot,
            public_key: public_key.clone(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_shared_secret(payload)
    }
}
