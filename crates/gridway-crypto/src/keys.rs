//! Key representations using static enum dispatch

use crate::error::KeyError;
use crate::multisig::LegacyAminoPubKey;
use base64::{engine::general_purpose, Engine as _};
use ed25519_dalek::VerifyingKey as Ed25519PubKey;
use gridway_codec::Any;
use k256::ecdsa::VerifyingKey as Secp256k1PubKey;
use prost::Message;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const SECP256K1_TYPE_URL: &str = "/cosmos.crypto.secp256k1.PubKey";
pub const ED25519_TYPE_URL: &str = "/cosmos.crypto.ed25519.PubKey";
pub const MULTISIG_TYPE_URL: &str = "/cosmos.crypto.multisig.LegacyAminoPubKey";

/// Protobuf body shared by the single-algorithm keys
#[derive(Clone, PartialEq, Message)]
struct SimplePubKeyProto {
    #[prost(bytes = "vec", tag = "1")]
    key: Vec<u8>,
}

#[derive(Clone, PartialEq, Message)]
struct LegacyAminoPubKeyProto {
    #[prost(uint32, tag = "1")]
    threshold: u32,
    #[prost(message, repeated, tag = "2")]
    public_keys: Vec<Any>,
}

/// All supported public key types
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublicKey {
    Secp256k1(Secp256k1PubKey),
    Ed25519(Ed25519PubKey),
    Multisig(LegacyAminoPubKey),
}

impl PublicKey {
    /// Parse a SEC1 encoded secp256k1 key
    pub fn from_secp256k1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        Secp256k1PubKey::from_sec1_bytes(bytes)
            .map(PublicKey::Secp256k1)
            .map_err(|e| KeyError::InvalidKey {
                algo: "secp256k1",
                reason: e.to_string(),
            })
    }

    /// Parse a 32 byte ed25519 key
    pub fn from_ed25519_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let raw: &[u8; 32] = bytes.try_into().map_err(|_| KeyError::InvalidKey {
            algo: "ed25519",
            reason: format!("expected 32 bytes, got {}", bytes.len()),
        })?;
        Ed25519PubKey::from_bytes(raw)
            .map(PublicKey::Ed25519)
            .map_err(|e| KeyError::InvalidKey {
                algo: "ed25519",
                reason: e.to_string(),
            })
    }

    pub fn is_multisig(&self) -> bool {
        matches!(self, PublicKey::Multisig(_))
    }

    /// The multisig structure, if this is a multisig key
    pub fn as_multisig(&self) -> Option<&LegacyAminoPubKey> {
        match self {
            PublicKey::Multisig(key) => Some(key),
            _ => None,
        }
    }

    /// Get the Protobuf type URL for this key type
    pub fn type_url(&self) -> &'static str {
        match self {
            PublicKey::Secp256k1(_) => SECP256K1_TYPE_URL,
            PublicKey::Ed25519(_) => ED25519_TYPE_URL,
            PublicKey::Multisig(_) => MULTISIG_TYPE_URL,
        }
    }

    /// Raw key bytes; multisig keys yield their protobuf encoding
    pub fn to_bytes(&self) -> Vec<u8> {
        match self {
            PublicKey::Secp256k1(key) => key.to_encoded_point(true).as_bytes().to_vec(),
            PublicKey::Ed25519(key) => key.as_bytes().to_vec(),
            PublicKey::Multisig(key) => LegacyAminoPubKeyProto {
                threshold: key.threshold(),
                public_keys: key.get_pub_keys().iter().map(PublicKey::to_any).collect(),
            }
            .encode_to_vec(),
        }
    }

    /// Convert to Protobuf Any
    pub fn to_any(&self) -> Any {
        let value = match self {
            PublicKey::Multisig(_) => self.to_bytes(),
            _ => SimplePubKeyProto {
                key: self.to_bytes(),
            }
            .encode_to_vec(),
        };
        Any::new(self.type_url(), value)
    }

    /// Create from Protobuf Any, recursing into multisig constituents
    pub fn from_any(any: &Any) -> Result<Self, KeyError> {
        match any.type_url.as_str() {
            SECP256K1_TYPE_URL => {
                let proto = SimplePubKeyProto::decode(any.value.as_slice())?;
                Self::from_secp256k1_bytes(&proto.key)
            }
            ED25519_TYPE_URL => {
                let proto = SimplePubKeyProto::decode(any.value.as_slice())?;
                Self::from_ed25519_bytes(&proto.key)
            }
            MULTISIG_TYPE_URL => {
                let proto = LegacyAminoPubKeyProto::decode(any.value.as_slice())?;
                let keys = proto
                    .public_keys
                    .iter()
                    .map(PublicKey::from_any)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(PublicKey::Multisig(LegacyAminoPubKey::new(
                    proto.threshold,
                    keys,
                )?))
            }
            other => Err(KeyError::UnknownType(other.to_string())),
        }
    }

    /// Number of multisig layers: 0 for a simple key
    pub fn nesting_depth(&self) -> usize {
        match self {
            PublicKey::Multisig(key) => {
                1 + key
                    .get_pub_keys()
                    .iter()
                    .map(PublicKey::nesting_depth)
                    .max()
                    .unwrap_or(0)
            }
            _ => 0,
        }
    }

    /// Reject keys nested deeper than `max` multisig layers
    pub fn validate_nesting(&self, max: usize) -> Result<(), KeyError> {
        let depth = self.nesting_depth();
        if depth > max {
            return Err(KeyError::NestingTooDeep { depth, max });
        }
        Ok(())
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublicKey::Secp256k1(_) => {
                write!(f, "PubKeySecp256k1{{{}}}", hex::encode_upper(self.to_bytes()))
            }
            PublicKey::Ed25519(_) => {
                write!(f, "PubKeyEd25519{{{}}}", hex::encode_upper(self.to_bytes()))
            }
            PublicKey::Multisig(key) => {
                write!(f, "PubKeyMultisigThreshold{{{}:[", key.threshold())?;
                for (i, pk) in key.get_pub_keys().iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{pk}")?;
                }
                write!(f, "]}}")
            }
        }
    }
}

// Amino JSON representation:
// {"type":"tendermint/PubKeySecp256k1","value":"<base64>"}
// {"type":"tendermint/PubKeyMultisigThreshold","value":{"threshold":"2","pubkeys":[...]}}

#[derive(Serialize)]
#[serde(tag = "type", content = "value")]
enum AminoPubKeyRef<'a> {
    #[serde(rename = "tendermint/PubKeySecp256k1")]
    Secp256k1(String),
    #[serde(rename = "tendermint/PubKeyEd25519")]
    Ed25519(String),
    #[serde(rename = "tendermint/PubKeyMultisigThreshold")]
    Multisig {
        threshold: String,
        pubkeys: &'a [PublicKey],
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", content = "value")]
enum AminoPubKey {
    #[serde(rename = "tendermint/PubKeySecp256k1")]
    Secp256k1(String),
    #[serde(rename = "tendermint/PubKeyEd25519")]
    Ed25519(String),
    #[serde(rename = "tendermint/PubKeyMultisigThreshold")]
    Multisig {
        threshold: String,
        pubkeys: Vec<PublicKey>,
    },
}

impl Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let data = match self {
            PublicKey::Secp256k1(_) => {
                AminoPubKeyRef::Secp256k1(general_purpose::STANDARD.encode(self.to_bytes()))
            }
            PublicKey::Ed25519(_) => {
                AminoPubKeyRef::Ed25519(general_purpose::STANDARD.encode(self.to_bytes()))
            }
            PublicKey::Multisig(key) => AminoPubKeyRef::Multisig {
                threshold: key.threshold().to_string(),
                pubkeys: key.get_pub_keys(),
            },
        };

        data.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Error;

        let decode = |value: &str| general_purpose::STANDARD.decode(value).map_err(D::Error::custom);

        match AminoPubKey::deserialize(deserializer)? {
            AminoPubKey::Secp256k1(value) => {
                PublicKey::from_secp256k1_bytes(&decode(&value)?).map_err(D::Error::custom)
            }
            AminoPubKey::Ed25519(value) => {
                PublicKey::from_ed25519_bytes(&decode(&value)?).map_err(D::Error::custom)
            }
            AminoPubKey::Multisig { threshold, pubkeys } => {
                let threshold = threshold.parse::<u32>().map_err(D::Error::custom)?;
                LegacyAminoPubKey::new(threshold, pubkeys)
                    .map(PublicKey::Multisig)
                    .map_err(D::Error::custom)
            }
        }
    }
}
