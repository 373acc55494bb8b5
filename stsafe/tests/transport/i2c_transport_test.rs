#[path = "../common/mod.rs"]
mod common;

use std::collections::VecDeque;
use std::time::Duration;

use stsafe::device::DeviceBuilder;
use stsafe::test_support::{product_data_payload, response_frame};
use stsafe::transport::{I2cBus, I2cTransport};
use stsafe::types::MacMode;
use stsafe::{Error, Result};

/// Bus that answers like a secure element: every write selects the next
/// queued response, reads return it (repeatedly) until the next write.
#[derive(Default)]
struct ScriptedBus {
    queued: VecDeque<Vec<u8>>,
    current: Vec<u8>,
    writes: Vec<(u8, Vec<u8>)>,
    nacks: u32,
    slept: Duration,
}

impl I2cBus for ScriptedBus {
    fn write(&mut self, address: u8, bytes: &[u8]) -> Result<()> {
        if self.nacks > 0 {
            self.nacks -= 1;
            return Err(Error::Bus("nack".into()));
        }
        self.writes.push((address, bytes.to_vec()));
        self.current = self.queued.pop_front().unwrap_or_default();
        Ok(())
    }

    fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<()> {
        buf.fill(0);
        let n = buf.len().min(self.current.len());
        buf[..n].copy_from_slice(&self.current[..n]);
        Ok(())
    }

    fn delay(&mut self, duration: Duration) {
        self.slept += duration;
    }
}

#[test]
fn configure_and_echo_over_i2c() -> anyhow::Result<()> {
    common::init_logging();
    let mut bus = ScriptedBus::default();
    bus.queued
        .push_back(response_frame(0x00, &product_data_payload(0x01FB), true));
    bus.queued
        .push_back(response_frame(0x00, &[0xCA, 0xFE], true));
    bus.nacks = 2;

    let mut dev = DeviceBuilder::new()
        .with_transport(Box::new(I2cTransport::new(bus)))
        .build()?;
    assert_eq!(dev.product_data().map(|p| p.input_output_buffer_size), Some(0x01FB));

    let echoed = dev.echo(&[0xCA, 0xFE], MacMode::NONE)?;
    assert_eq!(echoed, vec![0xCA, 0xFE]);
    Ok(())
}

#[test]
fn silent_bus_times_out() {
    let bus = ScriptedBus {
        nacks: u32::MAX,
        ..Default::default()
    };
    let transport = I2cTransport::new(bus).with_attempts(3);
    let err = DeviceBuilder::new()
        .with_transport(Box::new(transport))
        .with_crc_support(false)
        .build()
        .err()
        .unwrap();
    assert!(matches!(err, Error::Communication(_)));
}
