//! Legacy (amino JSON) transaction signing for gridway
//!
//! Two jobs live here. The [`SignBytesBuilder`] turns a transaction's chain
//! id, account number, sequence, fee, messages and memo into the canonical
//! bytes a legacy signer signs. The signature decoder turns a
//! [`StdSignature`] (including arbitrarily nested legacy multisignatures)
//! into structured [`SignatureV2`](gridway_crypto::SignatureV2) data for
//! verification.
//!
//! Both share one [`LegacyAmino`](gridway_codec::LegacyAmino) codec that is
//! built at startup and passed in explicitly; [`LegacyTxHandler`] bundles the
//! two behind a [`LegacyTxConfig`].

mod amino_json;
pub mod config;
pub mod error;
pub mod fee;
pub mod handler;
pub mod sign_doc;
pub mod signature;

pub use config::{AminoConfig, AminoRegistration, LegacyTxConfig};
pub use error::{ConfigError, SignBytesError, SignatureError};
pub use fee::{Coin, StdFee};
pub use handler::LegacyTxHandler;
pub use sign_doc::{SignBytesBuilder, StdSignDoc};
pub use signature::{
    pub_key_sig_to_sig_data, signature_data_to_amino_signature, std_signature_to_signature_v2,
    StdSignature,
};
