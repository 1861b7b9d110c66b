//! Encoding and decoding utilities for the legacy amino wire format.
//!
//! This crate provides the [`LegacyAmino`] codec used to build legacy sign
//! bytes and to decode amino binary records, plus the canonical JSON
//! procedure that makes those sign bytes independent of the encoder.

pub mod amino;
pub mod error;
pub mod json;

pub use amino::{LegacyAmino, LegacyMsg};
pub use error::CodecError;
pub use json::{canonicalize, sort_json, to_canonical_vec};

/// Protobuf `Any` used to carry polymorphic keys and messages
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Any {
    /// Type URL uniquely identifies the type of the serialized message
    #[prost(string, tag = "1")]
    pub type_url: String,

    /// Binary serialization of the protobuf message
    #[prost(bytes = "vec", tag = "2")]
    pub value: Vec<u8>,
}

impl Any {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>) -> Self {
        Self {
            type_url: type_url.into(),
            value,
        }
    }
}
