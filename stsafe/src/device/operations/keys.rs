// stsafe-rs/stsafe/src/device/operations/keys.rs

use crate::constants::PASSWORD_SIZE;
use crate::device::handle::{Configured, Device};
use crate::protocol::{
    decode_generate_key_pair, decode_verify_password, Command, GeneratedKeyPair,
    PasswordVerification,
};
use crate::types::{AesKeyType, AttributeTag, AuthorizationFlags, CurveId, KeySlot, MacMode};
use crate::{Error, Result};

impl Device<Configured> {
    /// Generate an EC key pair in a private key slot and return its public
    /// point.
    pub fn generate_key_pair(
        &mut self,
        slot: KeySlot,
        use_limit: u16,
        change_auth_flags_right: bool,
        auth_flags: AuthorizationFlags,
        curve: CurveId,
        mac: MacMode,
    ) -> Result<GeneratedKeyPair> {
        let cmd = Command::GenerateKeyPair {
            slot,
            use_limit,
            change_auth_flags_right,
            auth_flags,
            curve,
        };
        let payload = self.execute(&cmd, mac)?;
        decode_generate_key_pair(payload)
    }

    pub fn generate_local_envelope_key(
        &mut self,
        slot: KeySlot,
        key_type: AesKeyType,
        seed: Option<&[u8]>,
        mac: MacMode,
    ) -> Result<()> {
        let cmd = Command::GenerateLocalEnvelopeKey {
            slot,
            key_type,
            seed: seed.map(<[u8]>::to_vec),
        };
        self.execute(&cmd, mac)?;
        Ok(())
    }

    pub fn delete_key(
        &mut self,
        tag: AttributeTag,
        slot: Option<KeySlot>,
        mac: MacMode,
    ) -> Result<()> {
        self.execute(&Command::DeleteKey { tag, slot }, mac)?;
        Ok(())
    }

    pub fn delete_password(&mut self) -> Result<()> {
        self.delete_key(AttributeTag::PasswordSlot, None, MacMode::NONE)
    }

    /// Wrap host data under a local envelope key. The request travels
    /// encrypted under the host cipher key.
    pub fn wrap_local_envelope(
        &mut self,
        slot: KeySlot,
        data: &[u8],
        mac: MacMode,
    ) -> Result<Vec<u8>> {
        let cmd = Command::WrapLocalEnvelope {
            slot,
            data: data.to_vec(),
        };
        self.execute(&cmd, mac).map(<[u8]>::to_vec)
    }

    /// Unwrap a local envelope. The device answers encrypted under the host
    /// cipher key; the returned data is already deciphered.
    pub fn unwrap_local_envelope(
        &mut self,
        slot: KeySlot,
        envelope: &[u8],
        mac: MacMode,
    ) -> Result<Vec<u8>> {
        let cmd = Command::UnwrapLocalEnvelope {
            slot,
            envelope: envelope.to_vec(),
        };
        self.execute(&cmd, mac).map(<[u8]>::to_vec)
    }

    pub fn verify_password(
        &mut self,
        password: &[u8],
        mac: MacMode,
    ) -> Result<PasswordVerification> {
        if password.len() != PASSWORD_SIZE {
            return Err(Error::InvalidArgument(format!(
                "password must be {} bytes, got {}",
                PASSWORD_SIZE,
                password.len()
            )));
        }
        let cmd = Command::VerifyPassword {
            password: password.to_vec(),
        };
        let payload = self.execute(&cmd, mac)?;
        decode_verify_password(payload)
    }
}
