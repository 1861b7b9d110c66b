//! Key and signature-data errors

use gridway_errors::{codes, IsSdkError, ROOT_CODESPACE};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyError {
    #[error("invalid {algo} key:: {reason}")]
    InvalidKey { algo: &'static str, reason: String },

    #[error("unknown public key type:: {0}")]
    UnknownType(String),

    #[error("threshold {threshold} is invalid for a multisig of {keys} keys")]
    InvalidThreshold { threshold: u32, keys: usize },

    #[error("multisig nesting depth {depth} exceeds maximum {max}")]
    NestingTooDeep { depth: usize, max: usize },

    #[error("failed to decode public key:: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl IsSdkError for KeyError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            KeyError::UnknownType(_) => codes::INVALID_TYPE,
            KeyError::Decode(_) => codes::UNPACK_ANY,
            _ => codes::INVALID_PUB_KEY,
        }
    }
}

#[derive(Error, Debug)]
pub enum SigningError {
    #[error("signature index {index} out of range for {slots} slots")]
    IndexOutOfRange { index: usize, slots: usize },

    #[error("mode info is missing")]
    MissingModeInfo,

    #[error("unknown sign mode:: {0}")]
    UnknownSignMode(i32),

    #[error("mode infos ({mode_infos}) and signatures ({signatures}) do not line up")]
    SignatureCountMismatch { mode_infos: usize, signatures: usize },

    #[error("bit array has {set_bits} set bits but {signatures} signatures were provided")]
    BitArrayMismatch { set_bits: usize, signatures: usize },

    #[error("failed to decode multisignature:: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl IsSdkError for SigningError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            SigningError::IndexOutOfRange { .. } => codes::LOGIC,
            _ => codes::TX_DECODE,
        }
    }
}
