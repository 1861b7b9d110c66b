//! Legacy signatures and their conversion to structured signature data

use crate::amino_json::base64_bytes;
use crate::error::SignatureError;
use gridway_codec::LegacyAmino;
use gridway_crypto::{
    AminoMultisignature, MultiSignatureData, PublicKey, SignMode, SignatureData, SignatureV2,
};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Legacy signature: an optional public key and the raw signature bytes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdSignature {
    /// Omitted when the verifier already knows the signer
    #[serde(default)]
    pub pub_key: Option<PublicKey>,
    #[serde(with = "base64_bytes")]
    pub signature: Vec<u8>,
}

#[derive(Serialize, Deserialize)]
struct StdSignatureYaml {
    pub_key: String,
    signature: String,
}

impl StdSignature {
    pub fn new(pub_key: Option<PublicKey>, signature: Vec<u8>) -> Self {
        Self { pub_key, signature }
    }

    pub fn get_signature(&self) -> &[u8] {
        &self.signature
    }

    pub fn get_pub_key(&self) -> Option<&PublicKey> {
        self.pub_key.as_ref()
    }

    /// Human readable rendering for display and debugging only
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(&StdSignatureYaml {
            pub_key: self
                .pub_key
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
            signature: hex::encode_upper(&self.signature),
        })
    }
}

/// Convert a legacy signature into [`SignatureV2`]; the sequence is left for
/// the caller to fill in
pub fn std_signature_to_signature_v2(
    cdc: &LegacyAmino,
    sig: &StdSignature,
) -> Result<SignatureV2, SignatureError> {
    let data = match sig.get_pub_key() {
        Some(pk) => pub_key_sig_to_sig_data(cdc, pk, &sig.signature)?,
        None => SignatureData::single(SignMode::LegacyAminoJson, sig.signature.clone()),
    };

    Ok(SignatureV2 {
        pub_key: sig.pub_key.clone(),
        data,
        sequence: 0,
    })
}

/// Decode a legacy signature blob produced against `key`.
///
/// Simple keys yield the blob verbatim. Multisig keys decode the blob as an
/// [`AminoMultisignature`] and recurse into every constituent whose bit is
/// set; the compacted signature list is consumed in position order, and the
/// result keeps one slot per constituent key.
pub fn pub_key_sig_to_sig_data(
    cdc: &LegacyAmino,
    key: &PublicKey,
    sig: &[u8],
) -> Result<SignatureData, SignatureError> {
    let Some(multi_pk) = key.as_multisig() else {
        return Ok(SignatureData::single(
            SignMode::LegacyAminoJson,
            sig.to_vec(),
        ));
    };

    let multi_sig: AminoMultisignature = cdc
        .unmarshal_binary(sig)
        .map_err(SignatureError::MalformedMultisig)?;

    let pub_keys = multi_pk.get_pub_keys();
    if let Some(position) = multi_sig
        .bit_array
        .as_ref()
        .and_then(|bits| bits.true_indices().find(|i| *i >= pub_keys.len()))
    {
        return Err(SignatureError::BitArrayOutOfRange {
            position,
            keys: pub_keys.len(),
        });
    }

    let mut signatures = MultiSignatureData::new(pub_keys.len());
    let mut sig_idx = 0;
    for (position, pk) in pub_keys.iter().enumerate() {
        if !multi_sig.signed(position) {
            continue;
        }

        let blob = multi_sig
            .sigs
            .get(sig_idx)
            .ok_or(SignatureError::MissingSignature {
                position,
                available: multi_sig.sigs.len(),
            })?;

        let data = pub_key_sig_to_sig_data(cdc, pk, blob).map_err(|e| SignatureError::Nested {
            position,
            source: Box::new(e),
        })?;

        signatures.add_signature(data, position)?;
        sig_idx += 1;
    }

    trace!(
        keys = pub_keys.len(),
        signers = sig_idx,
        unused = multi_sig.sigs.len() - sig_idx,
        "Decoded legacy multisignature"
    );
    Ok(SignatureData::Multi(signatures))
}

/// Re-encode structured signature data in the legacy wire format
pub fn signature_data_to_amino_signature(
    cdc: &LegacyAmino,
    data: &SignatureData,
) -> Result<Vec<u8>, SignatureError> {
    match data {
        SignatureData::Single(single) => {
            if single.sign_mode != SignMode::LegacyAminoJson {
                return Err(SignatureError::WrongSignMode {
                    expected: SignMode::LegacyAminoJson.as_str_name(),
                    actual: single.sign_mode.as_str_name(),
                });
            }
            Ok(single.signature.clone())
        }
        SignatureData::Multi(multi) => {
            let sigs = multi
                .signatures()
                .iter()
                .map(|d| signature_data_to_amino_signature(cdc, d))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(cdc.marshal_binary(&AminoMultisignature::new(
                multi.bit_array().clone(),
                sigs,
            )))
        }
    }
}
