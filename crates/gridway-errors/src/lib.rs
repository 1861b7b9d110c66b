//! Error handling types and utilities for the gridway legacy transaction crates.
//!
//! Every crate in the workspace defines its own `thiserror` enum and implements
//! [`IsSdkError`] so that failures can be reported with the same codespace and
//! numeric codes as the Go SDK.

use std::fmt;
use thiserror::Error;

/// Codespace shared by the root SDK errors
pub const ROOT_CODESPACE: &str = "sdk";

/// Trait for errors that need to be compatible with ABCI error codes
pub trait IsSdkError {
    /// Returns the module's unique codespace string (e.g., "sdk")
    fn codespace(&self) -> &'static str;

    /// Returns the numeric error code, matching Go SDK values for compatibility
    fn code(&self) -> u32;
}

/// Error codes following the Go SDK root codespace
pub mod codes {
    /// Success
    pub const OK: u32 = 0;
    /// Internal error
    pub const INTERNAL: u32 = 1;
    /// Transaction could not be decoded
    pub const TX_DECODE: u32 = 2;
    /// Unauthorized
    pub const UNAUTHORIZED: u32 = 4;
    /// Invalid public key
    pub const INVALID_PUB_KEY: u32 = 8;
    /// Failed to marshal JSON
    pub const JSON_MARSHAL: u32 = 16;
    /// Failed to unmarshal JSON
    pub const JSON_UNMARSHAL: u32 = 17;
    /// Invalid request
    pub const INVALID_REQUEST: u32 = 18;
    /// Invalid type
    pub const INVALID_TYPE: u32 = 29;
    /// Failed unpacking an Any
    pub const UNPACK_ANY: u32 = 34;
    /// Logic error
    pub const LOGIC: u32 = 35;
    /// Node or application misconfiguration
    pub const APP_CONFIG: u32 = 40;
}

/// Flattened error as it is reported over ABCI
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("codespace {codespace} code {code}: {log}")]
pub struct AbciError {
    pub codespace: &'static str,
    pub code: u32,
    pub log: String,
}

impl AbciError {
    /// Project any SDK error onto its ABCI representation
    pub fn from_error<E>(err: &E) -> Self
    where
        E: IsSdkError + fmt::Display + ?Sized,
    {
        Self {
            codespace: err.codespace(),
            code: err.code(),
            log: err.to_string(),
        }
    }

    /// Whether this error represents success
    pub fn is_ok(&self) -> bool {
        self.code == codes::OK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Error, Debug)]
    #[error("bad pubkey:: {0}")]
    struct BadKey(String);

    impl IsSdkError for BadKey {
        fn codespace(&self) -> &'static str {
            ROOT_CODESPACE
        }

        fn code(&self) -> u32 {
            codes::INVALID_PUB_KEY
        }
    }

    #[test]
    fn test_abci_projection() {
        let err = BadKey("too short".to_string());
        let abci = AbciError::from_error(&err);
        assert_eq!(abci.codespace, "sdk");
        assert_eq!(abci.code, 8);
        assert_eq!(abci.log, "bad pubkey:: too short");
        assert!(!abci.is_ok());
        assert_eq!(abci.to_string(), "codespace sdk code 8: bad pubkey:: too short");
    }
}
