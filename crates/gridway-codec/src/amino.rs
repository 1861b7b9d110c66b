//! Legacy amino codec
//!
//! Amino JSON wraps every registered concrete type as
//! `{"type": <amino name>, "value": <body>}`. Amino binary for unregistered
//! structs is wire compatible with protobuf, so records are decoded with
//! `prost`.
//!
//! The codec is built once at startup, optionally sealed, and then shared
//! read-only (usually behind an `Arc`).

use crate::error::CodecError;
use prost::Message;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// Contract for messages that can be signed in legacy amino JSON mode
pub trait LegacyMsg {
    /// Get the Protobuf type URL (e.g., "/cosmos.bank.v1beta1.MsgSend")
    fn type_url(&self) -> &'static str;

    /// JSON body of the message, before it is wrapped with its amino name
    fn get_sign_bytes(&self) -> Result<Vec<u8>, serde_json::Error>;
}

#[derive(Serialize)]
struct AminoEnvelope<'a> {
    #[serde(rename = "type")]
    name: &'a str,
    value: Value,
}

/// Registry of amino names plus the amino JSON/binary encoders
#[derive(Debug, Default, Clone)]
pub struct LegacyAmino {
    names: HashMap<String, String>,
    type_urls: HashMap<String, String>,
    sealed: bool,
}

impl LegacyAmino {
    /// Create an empty, unsealed codec
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the amino name for a concrete message type
    pub fn register_concrete(
        &mut self,
        type_url: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<(), CodecError> {
        let type_url = type_url.into();
        let name = name.into();

        if self.sealed {
            return Err(CodecError::Sealed(type_url));
        }
        if let Some(existing) = self.names.get(&type_url) {
            return Err(CodecError::DuplicateRegistration {
                type_url,
                name: existing.clone(),
            });
        }
        if self.type_urls.contains_key(&name) {
            return Err(CodecError::DuplicateRegistration { type_url, name });
        }

        debug!("Registered amino type:: {} as {}", type_url, name);
        self.type_urls.insert(name.clone(), type_url.clone());
        self.names.insert(type_url, name);
        Ok(())
    }

    /// Refuse further registrations
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Amino name registered for a type URL
    pub fn amino_name(&self, type_url: &str) -> Option<&str> {
        self.names.get(type_url).map(String::as_str)
    }

    /// Type URL registered under an amino name
    pub fn type_url(&self, name: &str) -> Option<&str> {
        self.type_urls.get(name).map(String::as_str)
    }

    /// Number of registered concrete types
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Encode a plain serde value as JSON
    pub fn marshal_json<T>(&self, value: &T) -> Result<Vec<u8>, CodecError>
    where
        T: Serialize + ?Sized,
    {
        Ok(serde_json::to_vec(value)?)
    }

    /// Encode a message as amino JSON, wrapped with its registered name
    pub fn marshal_msg_json(&self, msg: &dyn LegacyMsg) -> Result<Vec<u8>, CodecError> {
        let type_url = msg.type_url();
        let name = self
            .amino_name(type_url)
            .ok_or_else(|| CodecError::UnregisteredType(type_url.to_string()))?;

        let value: Value = serde_json::from_slice(&msg.get_sign_bytes()?)?;
        self.marshal_json(&AminoEnvelope { name, value })
    }

    /// Encode an amino binary record
    pub fn marshal_binary<T>(&self, value: &T) -> Vec<u8>
    where
        T: Message,
    {
        value.encode_to_vec()
    }

    /// Decode an amino binary record
    pub fn unmarshal_binary<T>(&self, bz: &[u8]) -> Result<T, CodecError>
    where
        T: Message + Default,
    {
        Ok(T::decode(bz)?)
    }
}
