//! Cryptographic types for gridway's legacy transaction support
//!
//! This crate models public keys (including recursively nested legacy amino
//! multisig keys), the multisig signature wire record, and the structured
//! signature data handed to signature verification. Signature verification
//! itself lives elsewhere.

pub mod error;
pub mod keys;
pub mod multisig;
pub mod signing;

pub use error::{KeyError, SigningError};
pub use keys::PublicKey;
pub use multisig::{AminoMultisignature, CompactBitArray, LegacyAminoPubKey};
pub use signing::{
    from_mode_info_and_sig, to_mode_info_and_sig, ModeInfo, MultiSignatureData, SignMode,
    SignatureData, SignatureV2, SingleSignatureData,
};
