// stsafe-rs/stsafe/src/utils/timeout.rs

use std::time::Duration;

use crate::constants::I2C_BACKOFF_STEP_MS;

pub fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

/// Delay before retrying a NACKed bus transfer; grows linearly with the
/// zero-based attempt number, starting at one step.
pub fn polling_backoff(attempt: u32) -> Duration {
    ms(I2C_BACKOFF_STEP_MS * (u64::from(attempt) + 1))
}
