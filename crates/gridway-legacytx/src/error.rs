//! Error types for legacy signing

use gridway_codec::CodecError;
use gridway_crypto::{KeyError, SigningError};
use gridway_errors::{codes, IsSdkError, ROOT_CODESPACE};
use thiserror::Error;

/// Failure while building sign bytes.
///
/// These never depend on untrusted input: they mean the codec is missing a
/// registration or a message produced invalid JSON, and the caller should
/// abort rather than retry.
#[derive(Error, Debug)]
pub enum SignBytesError {
    #[error("legacy amino codec:: {0}")]
    Codec(#[from] CodecError),

    #[error("invalid sign document json:: {0}")]
    Json(#[from] serde_json::Error),
}

impl IsSdkError for SignBytesError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            SignBytesError::Codec(e) => e.code(),
            SignBytesError::Json(_) => codes::JSON_MARSHAL,
        }
    }
}

/// Failure while converting a legacy signature; the signature should be
/// rejected
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("malformed multisignature:: {0}")]
    MalformedMultisig(#[source] CodecError),

    #[error("signer at position {position} has no signature: only {available} provided")]
    MissingSignature { position: usize, available: usize },

    #[error("bit array marks position {position} but the multisig has {keys} keys")]
    BitArrayOutOfRange { position: usize, keys: usize },

    #[error("unable to convert signature to signature data at position {position}: {source}")]
    Nested {
        position: usize,
        #[source]
        source: Box<SignatureError>,
    },

    #[error("wrong sign mode: expected {expected}, got {actual}")]
    WrongSignMode {
        expected: &'static str,
        actual: &'static str,
    },

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl SignatureError {
    /// Positions from the outermost multisig down to the failing signature
    pub fn position_path(&self) -> Vec<usize> {
        let mut path = Vec::new();
        let mut current = self;
        while let SignatureError::Nested { position, source } = current {
            path.push(*position);
            current = source.as_ref();
        }
        path
    }

    /// Innermost error once nesting is stripped
    pub fn root_cause(&self) -> &SignatureError {
        match self {
            SignatureError::Nested { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

impl IsSdkError for SignatureError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        match self {
            SignatureError::MalformedMultisig(_)
            | SignatureError::MissingSignature { .. }
            | SignatureError::BitArrayOutOfRange { .. } => codes::TX_DECODE,
            SignatureError::Nested { source, .. } => source.code(),
            SignatureError::WrongSignMode { .. } => codes::INVALID_REQUEST,
            SignatureError::Key(e) => e.code(),
            SignatureError::Signing(e) => e.code(),
        }
    }
}

/// Failure while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error:: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parsing error:: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("amino registration:: {0}")]
    Codec(#[from] CodecError),

    #[error("failed to initialize logging:: {0}")]
    Logging(String),
}

impl IsSdkError for ConfigError {
    fn codespace(&self) -> &'static str {
        ROOT_CODESPACE
    }

    fn code(&self) -> u32 {
        codes::APP_CONFIG
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridway_errors::AbciError;

    #[test]
    fn test_nested_error_path() {
        let err = SignatureError::Nested {
            position: 1,
            source: Box::new(SignatureError::Nested {
                position: 0,
                source: Box::new(SignatureError::MissingSignature {
                    position: 2,
                    available: 1,
                }),
            }),
        };

        assert_eq!(err.position_path(), vec![1, 0]);
        assert!(matches!(
            err.root_cause(),
            SignatureError::MissingSignature { position: 2, .. }
        ));
        assert!(err.to_string().contains("position 1"));

        let abci = AbciError::from_error(&err);
        assert_eq!(abci.code, codes::TX_DECODE);
        assert_eq!(abci.codespace, "sdk");
    }

    #[test]
    fn test_sign_bytes_error_codes() {
        let err = SignBytesError::from(CodecError::UnregisteredType("/x.Msg".to_string()));
        assert_eq!(err.code(), codes::APP_CONFIG);

        let json_err = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        assert_eq!(SignBytesError::from(json_err).code(), codes::JSON_MARSHAL);
    }
}
