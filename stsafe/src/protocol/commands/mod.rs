// stsafe-rs/stsafe/src/protocol/commands/mod.rs

pub mod general;
pub mod keys;
pub mod query;
pub mod read;
pub mod signature;
pub mod write;

pub use general::{
    encode_echo, encode_generate_random, encode_hibernate, encode_start_signature_session,
};
pub use keys::{
    encode_delete_key, encode_generate_key_pair, encode_generate_local_envelope_key,
    encode_local_envelope, encode_verify_password,
};
pub use query::{encode_put_attribute, encode_query};
pub use read::encode_read;
pub use signature::{
    encode_establish_key, encode_generate_signature, encode_get_signature,
    encode_verify_entity_signature, encode_verify_message_signature,
};
pub use write::{encode_decrement, encode_update};

use std::time::Duration;

use crate::types::{
    AccessConditionChange, AesKeyType, AttributeTag, AuthorizationFlags, CommandCode, CurveId,
    KeySlot, MacMode, PublicKey, RandomSubject, Signature, WakeUpMode,
};
use crate::utils::ms;

/// Direction in which the payload is enciphered under the host cipher key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encryption {
    None,
    Command,
    Response,
}

/// High-level Command enum. New commands should be added here and
/// their per-command encoder placed in `protocol::commands::<group>.rs`.
#[derive(Debug, Clone)]
pub enum Command {
    Echo {
        data: Vec<u8>,
    },
    Reset,
    Hibernate {
        wake_up: WakeUpMode,
    },
    GenerateRandom {
        subject: RandomSubject,
        length: u8,
    },
    StartSignatureSession {
        slot: KeySlot,
    },
    Read {
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        length: u16,
    },
    Decrement {
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        amount: u32,
        data: Vec<u8>,
    },
    Update {
        atomic: bool,
        ac_change: Option<AccessConditionChange>,
        zone: u8,
        offset: u16,
        data: Vec<u8>,
    },
    Query {
        tag: AttributeTag,
    },
    PutAttribute {
        tag: AttributeTag,
        data: Vec<u8>,
    },
    GenerateKeyPair {
        slot: KeySlot,
        use_limit: u16,
        change_auth_flags_right: bool,
        auth_flags: AuthorizationFlags,
        curve: CurveId,
    },
    GenerateLocalEnvelopeKey {
        slot: KeySlot,
        key_type: AesKeyType,
        seed: Option<Vec<u8>>,
    },
    DeleteKey {
        tag: AttributeTag,
        slot: Option<KeySlot>,
    },
    WrapLocalEnvelope {
        slot: KeySlot,
        data: Vec<u8>,
    },
    UnwrapLocalEnvelope {
        slot: KeySlot,
        envelope: Vec<u8>,
    },
    VerifyPassword {
        password: Vec<u8>,
    },
    GetSignature {
        challenge: Vec<u8>,
    },
    GenerateSignature {
        slot: KeySlot,
        digest: Vec<u8>,
    },
    VerifyMessageSignature {
        curve: CurveId,
        public_key: PublicKey,
        signature: Signature,
        digest: Vec<u8>,
    },
    VerifyEntitySignature {
        signature: Signature,
    },
    EstablishKey {
        slot: KeySlot,
        public_key: PublicKey,
    },
}

impl Command {
    pub fn command_code(&self) -> CommandCode {
        match self {
            Self::Echo { .. } => CommandCode::Echo,
            Self::Reset => CommandCode::WarmReset,
            Self::Hibernate { .. } => CommandCode::Hibernate,
            Self::GenerateRandom { .. } => CommandCode::GenerateRandom,
            Self::StartSignatureSession { .. } => CommandCode::StartSession,
            Self::Read { .. } => CommandCode::Read,
            Self::Decrement { .. } => CommandCode::Decrement,
            Self::Update { .. } => CommandCode::Update,
            Self::Query { .. } => CommandCode::Query,
            Self::PutAttribute { .. } => CommandCode::PutAttribute,
            Self::GenerateKeyPair { .. } | Self::GenerateLocalEnvelopeKey { .. } => {
                CommandCode::GenerateKey
            }
            Self::DeleteKey { .. } => CommandCode::DeleteKey,
            Self::WrapLocalEnvelope { .. } => CommandCode::WrapLocalEnvelope,
            Self::UnwrapLocalEnvelope { .. } => CommandCode::UnwrapLocalEnvelope,
            Self::VerifyPassword { .. } => CommandCode::VerifyPassword,
            Self::GetSignature { .. } => CommandCode::GetSignature,
            Self::GenerateSignature { .. } => CommandCode::GenerateSignature,
            Self::VerifyMessageSignature { .. } | Self::VerifyEntitySignature { .. } => {
                CommandCode::VerifySignature
            }
            Self::EstablishKey { .. } => CommandCode::EstablishKey,
        }
    }

    /// Encode the request payload (everything after the header byte).
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Self::Echo { data } => encode_echo(data),
            Self::Reset => Vec::new(),
            Self::Hibernate { wake_up } => encode_hibernate(*wake_up),
            Self::GenerateRandom { subject, length } => encode_generate_random(*subject, *length),
            Self::StartSignatureSession { slot } => encode_start_signature_session(*slot),
            Self::Read {
                ac_change,
                zone,
                offset,
                length,
            } => encode_read(*ac_change, *zone, *offset, *length),
            Self::Decrement {
                ac_change,
                zone,
                offset,
                amount,
                data,
            } => encode_decrement(*ac_change, *zone, *offset, *amount, data),
            Self::Update {
                atomic,
                ac_change,
                zone,
                offset,
                data,
            } => encode_update(*atomic, *ac_change, *zone, *offset, data),
            Self::Query { tag } => encode_query(*tag),
            Self::PutAttribute { tag, data } => encode_put_attribute(*tag, data),
            Self::GenerateKeyPair {
                slot,
                use_limit,
                change_auth_flags_right,
                auth_flags,
                curve,
            } => encode_generate_key_pair(
                *slot,
                *use_limit,
                *change_auth_flags_right,
                *auth_flags,
                *curve,
            ),
            Self::GenerateLocalEnvelopeKey {
                slot,
                key_type,
                seed,
            } => encode_generate_local_envelope_key(*slot, *key_type, seed.as_deref()),
            Self::DeleteKey { tag, slot } => encode_delete_key(*tag, *slot),
            Self::WrapLocalEnvelope { slot, data } => encode_local_envelope(*slot, data),
            Self::UnwrapLocalEnvelope { slot, envelope } => encode_local_envelope(*slot, envelope),
            Self::VerifyPassword { password } => encode_verify_password(password),
            Self::GetSignature { challenge } => encode_get_signature(challenge),
            Self::GenerateSignature { slot, digest } => encode_generate_signature(*slot, digest),
            Self::VerifyMessageSignature {
                curve,
                public_key,
                signature,
                digest,
            } => encode_verify_message_signature(*curve, public_key, signature, digest),
            Self::VerifyEntitySignature { signature } => encode_verify_entity_signature(signature),
            Self::EstablishKey { slot, public_key } => encode_establish_key(*slot, public_key),
        }
    }

    /// Payload bytes the transport should read, before MAC and CRC trailers.
    /// Variable-length responses under-announce; the transport re-reads at
    /// the length the device reports.
    pub fn expected_response_len(&self) -> usize {
        match self {
            Self::Echo { data } => data.len(),
            Self::GenerateRandom { subject, length } => match subject {
                RandomSubject::Authentication => 16,
                RandomSubject::Ephemeral => *length as usize,
            },
            Self::Reset | Self::Hibernate { .. } | Self::StartSignatureSession { .. } => 0,
            Self::Read { .. } | Self::Decrement { .. } | Self::Update { .. } => 4,
            Self::Query { tag } => match tag {
                AttributeTag::ProductData => 28,
                AttributeTag::PublicKeySlot => 1,
                AttributeTag::HostKeySlot | AttributeTag::LocalEnvelopeKeyTable => 4,
                _ => 0,
            },
            Self::PutAttribute { .. }
            | Self::GenerateKeyPair { .. }
            | Self::GenerateLocalEnvelopeKey { .. }
            | Self::DeleteKey { .. }
            | Self::VerifyPassword { .. }
            | Self::EstablishKey { .. } => 3,
            Self::WrapLocalEnvelope { data, .. } => data.len() + 8,
            Self::UnwrapLocalEnvelope { envelope, .. } => envelope.len() + 8,
            Self::GetSignature { .. } | Self::GenerateSignature { .. } => 4,
            Self::VerifyMessageSignature { .. } | Self::VerifyEntitySignature { .. } => 1,
        }
    }

    /// Minimum time the device needs before its response can be read.
    pub fn processing_time(&self) -> Duration {
        let millis = match self {
            Self::Hibernate { .. } => 0,
            Self::Echo { .. } | Self::Read { .. } | Self::Update { .. } | Self::Query { .. } => 5,
            Self::Reset => 30,
            Self::StartSignatureSession { .. } => 25,
            Self::GenerateRandom { .. }
            | Self::Decrement { .. }
            | Self::PutAttribute { .. }
            | Self::GenerateKeyPair { .. }
            | Self::GenerateLocalEnvelopeKey { .. }
            | Self::DeleteKey { .. }
            | Self::VerifyPassword { .. }
            | Self::VerifyEntitySignature { .. } => 15,
            Self::VerifyMessageSignature { .. } => 145,
            Self::GenerateSignature { .. } => 150,
            Self::WrapLocalEnvelope { .. } | Self::EstablishKey { .. } => 200,
            Self::UnwrapLocalEnvelope { .. } => 400,
            Self::GetSignature { .. } => 450,
        };
        ms(millis)
    }

    /// MAC mode forced by the command regardless of what the caller asks.
    pub fn forced_mac(&self) -> Option<MacMode> {
        match self {
            Self::Reset | Self::Hibernate { .. } | Self::StartSignatureSession { .. } => {
                Some(MacMode::NONE)
            }
            _ => None,
        }
    }

    pub fn encryption(&self) -> Encryption {
        match self {
            Self::WrapLocalEnvelope { .. } => Encryption::Command,
            Self::UnwrapLocalEnvelope { .. } | Self::EstablishKey { .. } => Encryption::Response,
            _ => Encryption::None,
        }
    }

    /// Hibernate puts the device to sleep without answering.
    pub fn expects_response(&self) -> bool {
        !matches!(self, Self::Hibernate { .. })
    }
}
