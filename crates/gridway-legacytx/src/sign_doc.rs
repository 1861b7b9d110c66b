//! Legacy amino JSON sign documents
//!
//! A [`StdSignDoc`] binds a transaction's messages, fee and memo to the chain
//! (cross-chain replay protection) and to the signer's account number and
//! sequence (in-chain replay protection and ordering). Its canonical JSON is
//! what legacy signers actually sign.

use crate::amino_json::{is_zero, u64_string};
use crate::error::SignBytesError;
use crate::fee::StdFee;
use gridway_codec::{canonicalize, sort_json, LegacyAmino, LegacyMsg};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Replay-protected document signed in legacy amino JSON mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdSignDoc {
    #[serde(with = "u64_string")]
    pub account_number: u64,
    #[serde(with = "u64_string")]
    pub sequence: u64,
    #[serde(with = "u64_string", default, skip_serializing_if = "is_zero")]
    pub timeout_height: u64,
    pub chain_id: String,
    pub memo: String,
    pub fee: Value,
    pub msgs: Vec<Value>,
}

/// Builds canonical legacy sign bytes with an injected amino codec
#[derive(Debug, Clone)]
pub struct SignBytesBuilder {
    cdc: Arc<LegacyAmino>,
}

impl SignBytesBuilder {
    pub fn new(cdc: Arc<LegacyAmino>) -> Self {
        Self { cdc }
    }

    pub fn codec(&self) -> &LegacyAmino {
        &self.cdc
    }

    /// Assemble the sign document; every message body is canonicalized
    /// independently, in transaction order
    #[allow(clippy::too_many_arguments)]
    pub fn sign_doc(
        &self,
        chain_id: &str,
        account_number: u64,
        sequence: u64,
        timeout_height: u64,
        fee: &StdFee,
        msgs: &[&dyn LegacyMsg],
        memo: &str,
    ) -> Result<StdSignDoc, SignBytesError> {
        let msgs = msgs
            .iter()
            .map(|msg| {
                let bz = self.cdc.marshal_msg_json(*msg)?;
                let value: Value = serde_json::from_slice(&bz)?;
                Ok(canonicalize(value))
            })
            .collect::<Result<Vec<_>, SignBytesError>>()?;

        let fee: Value = serde_json::from_slice(&fee.bytes()?)?;

        Ok(StdSignDoc {
            account_number,
            sequence,
            timeout_height,
            chain_id: chain_id.to_string(),
            memo: memo.to_string(),
            fee: canonicalize(fee),
            msgs,
        })
    }

    /// Canonical bytes to sign or verify for a legacy transaction
    #[allow(clippy::too_many_arguments)]
    pub fn sign_bytes(
        &self,
        chain_id: &str,
        account_number: u64,
        sequence: u64,
        timeout_height: u64,
        fee: &StdFee,
        msgs: &[&dyn LegacyMsg],
        memo: &str,
    ) -> Result<Vec<u8>, SignBytesError> {
        let doc = self.sign_doc(
            chain_id,
            account_number,
            sequence,
            timeout_height,
            fee,
            msgs,
            memo,
        )?;
        self.doc_bytes(&doc)
    }

    /// Canonical bytes of an already assembled document
    pub fn doc_bytes(&self, doc: &StdSignDoc) -> Result<Vec<u8>, SignBytesError> {
        let bz = self.cdc.marshal_json(doc)?;
        let sorted = sort_json(&bz)?;

        debug!(
            chain_id = %doc.chain_id,
            account_number = doc.account_number,
            sequence = doc.sequence,
            msgs = doc.msgs.len(),
            len = sorted.len(),
            "Built legacy sign bytes"
        );
        Ok(sorted)
    }
}
