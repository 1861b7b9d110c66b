//! Structured signature data consumed by the signature verification pipeline
//!
//! [`SignatureData`] mirrors the shape of the signing key: a single signature
//! for a simple key, or one slot per constituent for a multisig key, with a
//! bit array recording which constituents signed.

use crate::error::SigningError;
use crate::keys::PublicKey;
use crate::multisig::CompactBitArray;
use prost::Message;

/// Sign mode enumeration
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, prost::Enumeration)]
#[repr(i32)]
pub enum SignMode {
    Unspecified = 0,
    Direct = 1,
    Textual = 2,
    LegacyAminoJson = 127,
}

impl SignMode {
    /// Protobuf enum value name
    pub fn as_str_name(&self) -> &'static str {
        match self {
            SignMode::Unspecified => "SIGN_MODE_UNSPECIFIED",
            SignMode::Direct => "SIGN_MODE_DIRECT",
            SignMode::Textual => "SIGN_MODE_TEXTUAL",
            SignMode::LegacyAminoJson => "SIGN_MODE_LEGACY_AMINO_JSON",
        }
    }
}

/// Signature produced by a single simple key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SingleSignatureData {
    pub sign_mode: SignMode,
    pub signature: Vec<u8>,
}

/// Signatures of a multisig key's constituents.
///
/// `bit_array` has one bit per constituent; `signatures` holds the data of the
/// set bits in ascending position order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MultiSignatureData {
    bit_array: CompactBitArray,
    signatures: Vec<SignatureData>,
}

/// Signature data for a simple or multisig key
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SignatureData {
    Single(SingleSignatureData),
    Multi(MultiSignatureData),
}

impl SignatureData {
    pub fn single(sign_mode: SignMode, signature: Vec<u8>) -> Self {
        SignatureData::Single(SingleSignatureData {
            sign_mode,
            signature,
        })
    }

    pub fn as_single(&self) -> Option<&SingleSignatureData> {
        match self {
            SignatureData::Single(data) => Some(data),
            SignatureData::Multi(_) => None,
        }
    }

    pub fn as_multi(&self) -> Option<&MultiSignatureData> {
        match self {
            SignatureData::Multi(data) => Some(data),
            SignatureData::Single(_) => None,
        }
    }
}

impl MultiSignatureData {
    /// Empty container with `slots` constituent positions
    pub fn new(slots: usize) -> Self {
        Self {
            bit_array: CompactBitArray::new(slots).unwrap_or_default(),
            signatures: Vec::new(),
        }
    }

    pub fn bit_array(&self) -> &CompactBitArray {
        &self.bit_array
    }

    /// Signer data in ascending position order
    pub fn signatures(&self) -> &[SignatureData] {
        &self.signatures
    }

    /// Total number of constituent positions
    pub fn slot_count(&self) -> usize {
        self.bit_array.count()
    }

    /// Number of constituents that signed
    pub fn signer_count(&self) -> usize {
        self.signatures.len()
    }

    /// Place `data` at constituent position `index`, replacing any previous
    /// signature at that position
    pub fn add_signature(&mut self, data: SignatureData, index: usize) -> Result<(), SigningError> {
        let slots = self.slot_count();
        if index >= slots {
            return Err(SigningError::IndexOutOfRange { index, slots });
        }

        let compact = self.bit_array.num_true_bits_before(index);
        if self.bit_array.get_index(index) {
            self.signatures[compact] = data;
            return Ok(());
        }

        self.bit_array.set_index(index, true);
        self.signatures.insert(compact, data);
        Ok(())
    }

    /// Signature of the constituent at `index`, if it signed
    pub fn get(&self, index: usize) -> Option<&SignatureData> {
        if !self.bit_array.get_index(index) {
            return None;
        }
        self.signatures.get(self.bit_array.num_true_bits_before(index))
    }

    /// Every constituent position with its signature, if any
    pub fn slots(&self) -> impl Iterator<Item = (usize, Option<&SignatureData>)> + '_ {
        (0..self.slot_count()).map(move |i| (i, self.get(i)))
    }
}

/// Signature together with the key and sequence it was produced for
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignatureV2 {
    /// Absent when the verifier already knows the signer from context
    pub pub_key: Option<PublicKey>,
    pub data: SignatureData,
    pub sequence: u64,
}

/// Protobuf representation of mode info
#[derive(Clone, PartialEq, Message)]
pub struct ModeInfo {
    #[prost(oneof = "mode_info::Sum", tags = "1, 2")]
    pub sum: Option<mode_info::Sum>,
}

/// Nested module for mode info variants
pub mod mode_info {
    use super::*;

    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Sum {
        #[prost(message, tag = "1")]
        Single(Single),
        #[prost(message, tag = "2")]
        Multi(Multi),
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct Single {
        #[prost(enumeration = "SignMode", tag = "1")]
        pub mode: i32,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct Multi {
        #[prost(message, optional, tag = "1")]
        pub bitarray: Option<CompactBitArray>,
        #[prost(message, repeated, tag = "2")]
        pub mode_infos: Vec<ModeInfo>,
    }
}

/// Protobuf wrapper for the nested signatures of a multisig
#[derive(Clone, PartialEq, Message)]
pub struct MultiSignature {
    #[prost(bytes = "vec", repeated, tag = "1")]
    pub signatures: Vec<Vec<u8>>,
}

/// Project signature data onto the mode info and raw signature bytes stored
/// in a transaction
pub fn to_mode_info_and_sig(data: &SignatureData) -> (ModeInfo, Vec<u8>) {
    match data {
        SignatureData::Single(single) => (
            ModeInfo {
                sum: Some(mode_info::Sum::Single(mode_info::Single {
                    mode: single.sign_mode as i32,
                })),
            },
            single.signature.clone(),
        ),
        SignatureData::Multi(multi) => {
            let (mode_infos, signatures): (Vec<_>, Vec<_>) =
                multi.signatures.iter().map(to_mode_info_and_sig).unzip();

            (
                ModeInfo {
                    sum: Some(mode_info::Sum::Multi(mode_info::Multi {
                        bitarray: Some(multi.bit_array.clone()),
                        mode_infos,
                    })),
                },
                MultiSignature { signatures }.encode_to_vec(),
            )
        }
    }
}

/// Inverse of [`to_mode_info_and_sig`]
pub fn from_mode_info_and_sig(
    mode_info: &ModeInfo,
    signature: &[u8],
) -> Result<SignatureData, SigningError> {
    match mode_info.sum.as_ref().ok_or(SigningError::MissingModeInfo)? {
        mode_info::Sum::Single(single) => {
            let mode = SignMode::try_from(single.mode)
                .map_err(|_| SigningError::UnknownSignMode(single.mode))?;
            Ok(SignatureData::single(mode, signature.to_vec()))
        }
        mode_info::Sum::Multi(multi) => {
            let nested = MultiSignature::decode(signature)?;
            if nested.signatures.len() != multi.mode_infos.len() {
                return Err(SigningError::SignatureCountMismatch {
                    mode_infos: multi.mode_infos.len(),
                    signatures: nested.signatures.len(),
                });
            }

            let signatures = multi
                .mode_infos
                .iter()
                .zip(nested.signatures.iter())
                .map(|(info, sig)| from_mode_info_and_sig(info, sig))
                .collect::<Result<Vec<_>, _>>()?;

            let bit_array = multi.bitarray.clone().unwrap_or_default();
            if bit_array.true_count() != signatures.len() {
                return Err(SigningError::BitArrayMismatch {
                    set_bits: bit_array.true_count(),
                    signatures: signatures.len(),
                });
            }

            Ok(SignatureData::Multi(MultiSignatureData {
                bit_array,
                signatures,
            }))
        }
    }
}
