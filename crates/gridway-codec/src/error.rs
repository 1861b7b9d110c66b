//! Codec errors

use gridway_errors::{codes, IsSdkError, ROOT_CODESPACE};
use thiserror::Error;

/// Errors raised while encoding or decoding legacy amino data
#[derive(Error, Debug)]
pub enum CodecError {
    /// JSON encoding or decoding failed
    #[error("json:: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary record could not be decoded
    #[error("failed to decode amino binary:: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Message type has no amino name registered
    #[error("amino type not registered for {0}")]
    UnregisteredType(String),

    /// Type URL or amino name already taken
    #[error("amino type {type_url} conflicts with existing registration {name}")]
    DuplicateRegistration { type_url: String, name: String },

    /// Registration attempted after the codec was sealed
    #[error("codec is sealed; cannot register {0}")]
    Sealed(String),
}

impl CodecError {
    /// Whether the error stems from codec setup rather than from the data
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            CodecError::UnregisteredType(_)
                | CodecError::DuplicateRegistration { .. }
                | CodecError::Sealed(_)
        )
    }
}

impl IsSdkError for CodecError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            CodecError::Json(_) => codes::JSON_MARSHAL,
            CodecError::Decode(_) => codes::TX_DECODE,
            CodecError::UnregisteredType(_)
            | CodecError::DuplicateRegistration { .. }
            | CodecError::Sealed(_) => codes::APP_CONFIG,
        }
    }
}
