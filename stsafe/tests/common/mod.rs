// stsafe-rs/stsafe/tests/common/mod.rs
#![allow(dead_code)]

pub mod fixtures;
#[cfg(feature = "soft-crypto")]
pub mod helpers;

/// Route `log` output through the test harness; RUST_LOG=trace shows frames.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
