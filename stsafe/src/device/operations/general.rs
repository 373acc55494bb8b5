// stsafe-rs/stsafe/src/device/operations/general.rs

use crate::device::handle::{Configured, Device};
use crate::protocol::Command;
use crate::types::{MacMode, RandomSubject, WakeUpMode};
use crate::{Error, Result};

impl Device<Configured> {
    /// Echo: the device returns the data unchanged.
    pub fn echo(&mut self, data: &[u8], mac: MacMode) -> Result<Vec<u8>> {
        let cmd = Command::Echo {
            data: data.to_vec(),
        };
        self.execute(&cmd, mac).map(<[u8]>::to_vec)
    }

    /// Warm reset. Volatile device state, including an open signature
    /// session, is lost.
    pub fn reset(&mut self) -> Result<()> {
        let reset = self.execute(&Command::Reset, MacMode::NONE).map(|_| ());
        self.session.close_signature_session();
        reset
    }

    /// Put the device to sleep. No response is read.
    pub fn hibernate(&mut self, wake_up: WakeUpMode) -> Result<()> {
        self.execute(&Command::Hibernate { wake_up }, MacMode::NONE)?;
        Ok(())
    }

    /// Random bytes; authentication randoms are always 16 bytes long.
    pub fn generate_random(
        &mut self,
        subject: RandomSubject,
        length: u8,
        mac: MacMode,
    ) -> Result<Vec<u8>> {
        if length == 0 {
            return Err(Error::InvalidArgument("random length must be non-zero".into()));
        }
        let cmd = Command::GenerateRandom { subject, length };
        self.execute(&cmd, mac).map(<[u8]>::to_vec)
    }
}
