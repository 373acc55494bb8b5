#[path = "../common/mod.rs"]
mod common;

use stsafe::protocol::{Command, Encryption};
use stsafe::types::{
    AccessCondition, AccessConditionChange, AuthorizationFlags, CommandCode, CurveId, KeySlot,
    MacMode, WakeUpMode,
};

#[test]
fn header_combines_code_and_mac_bits() {
    let cmd = Command::Read {
        ac_change: None,
        zone: 1,
        offset: 0x0010,
        length: 0x20,
    };
    let header = cmd.command_code().as_u8() | MacMode::HOST_R_MAC.bits();
    assert_eq!(header, 0xE5);
    assert_eq!(cmd.encode(), vec![0x00, 0x01, 0x00, 0x10, 0x00, 0x20]);
}

#[test]
fn update_carries_atomicity_and_access_change() {
    let cmd = Command::Update {
        atomic: true,
        ac_change: Some(AccessConditionChange::new(true, AccessCondition::Host)),
        zone: 7,
        offset: 0,
        data: vec![0xAB],
    };
    let p = cmd.encode();
    assert_eq!(p[0], 0x99);
    assert_eq!(&p[1..], &[0x07, 0x00, 0x00, 0xAB]);
}

#[test]
fn generate_key_pair_for_every_curve() {
    for curve in CurveId::ALL {
        let cmd = Command::GenerateKeyPair {
            slot: KeySlot::Slot1,
            use_limit: 0xFFFF,
            change_auth_flags_right: false,
            auth_flags: AuthorizationFlags::MSG_DIGEST_SIGNATURE,
            curve,
        };
        assert_eq!(cmd.command_code(), CommandCode::GenerateKey);
        let p = cmd.encode();
        let oid = curve.oid();
        assert_eq!(&p[6..8], &(oid.len() as u16).to_be_bytes());
        assert_eq!(&p[8..], oid);
    }
}

#[test]
fn forced_mac_and_encryption_directions() {
    let reset = Command::Reset;
    assert_eq!(reset.forced_mac(), Some(MacMode::NONE));

    let hibernate = Command::Hibernate {
        wake_up: WakeUpMode::I2cStartOrReset,
    };
    assert!(!hibernate.expects_response());

    let wrap = Command::WrapLocalEnvelope {
        slot: KeySlot::Slot0,
        data: vec![0; 8],
    };
    assert_eq!(wrap.encryption(), Encryption::Command);
    assert_eq!(wrap.expected_response_len(), 16);

    let echo = Command::Echo { data: vec![1, 2, 3] };
    assert_eq!(echo.forced_mac(), None);
    assert_eq!(echo.encryption(), Encryption::None);
    assert_eq!(echo.expected_response_len(), 3);
}
