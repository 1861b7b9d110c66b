//! Entry point bundling the shared codec, sign bytes builder and decoder

use crate::error::{SignBytesError, SignatureError};
use crate::fee::StdFee;
use crate::sign_doc::SignBytesBuilder;
use crate::signature::{std_signature_to_signature_v2, StdSignature};
use gridway_codec::{LegacyAmino, LegacyMsg};
use gridway_crypto::SignatureV2;
use std::sync::Arc;
use tracing::info;

/// Legacy transaction support backed by one immutable codec
#[derive(Debug, Clone)]
pub struct LegacyTxHandler {
    cdc: Arc<LegacyAmino>,
    builder: SignBytesBuilder,
    max_multisig_depth: Option<usize>,
}

impl LegacyTxHandler {
    pub fn new(cdc: Arc<LegacyAmino>, max_multisig_depth: Option<usize>) -> Self {
        info!(
            "Initializing legacy tx handler:: {} amino types, max multisig depth {:?}",
            cdc.len(),
            max_multisig_depth
        );
        Self {
            builder: SignBytesBuilder::new(cdc.clone()),
            cdc,
            max_multisig_depth,
        }
    }

    pub fn codec(&self) -> &LegacyAmino {
        &self.cdc
    }

    pub fn builder(&self) -> &SignBytesBuilder {
        &self.builder
    }

    pub fn max_multisig_depth(&self) -> Option<usize> {
        self.max_multisig_depth
    }

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
        self.builder.sign_bytes(
            chain_id,
            account_number,
            sequence,
            timeout_height,
            fee,
            msgs,
            memo,
        )
    }

    /// Decode a legacy signature, rejecting keys nested past the configured
    /// depth before touching the signature bytes
    pub fn signature_to_v2(&self, sig: &StdSignature) -> Result<SignatureV2, SignatureError> {
        if let (Some(max), Some(pk)) = (self.max_multisig_depth, sig.get_pub_key()) {
            pk.validate_nesting(max)?;
        }
        std_signature_to_signature_v2(&self.cdc, sig)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridway_crypto::{KeyError, LegacyAminoPubKey, PublicKey};
    use k256::ecdsa::SigningKey as Secp256k1PrivKey;
    use rand::rngs::OsRng;

    fn secp() -> PublicKey {
        PublicKey::Secp256k1(*Secp256k1PrivKey::random(&mut OsRng).verifying_key())
    }

    fn nested(depth: usize) -> PublicKey {
        (0..depth).fold(secp(), |inner, _| {
            PublicKey::Multisig(LegacyAminoPubKey::new(1, vec![inner, secp()]).unwrap())
        })
    }

    #[test]
    fn test_handler_shares_one_codec() {
        let mut cdc = LegacyAmino::new();
        cdc.register_concrete("/cosmos.bank.v1beta1.MsgSend", "cosmos-sdk/MsgSend")
            .unwrap();
        cdc.seal();
        let handler = LegacyTxHandler::new(Arc::new(cdc), Some(4));

        assert_eq!(handler.max_multisig_depth(), Some(4));
        assert!(handler.codec().is_sealed());
        assert!(std::ptr::eq(handler.codec(), handler.builder().codec()));
        assert_eq!(
            handler.builder().codec().amino_name("/cosmos.bank.v1beta1.MsgSend"),
            Some("cosmos-sdk/MsgSend")
        );
    }

    #[test]
    fn test_depth_limit_rejects_before_decoding() {
        let handler = LegacyTxHandler::new(Arc::new(LegacyAmino::new()), Some(2));
        // garbage bytes: the depth check must fire first
        let sig = StdSignature::new(Some(nested(3)), vec![0xff; 4]);

        let err = handler.signature_to_v2(&sig).unwrap_err();
        assert!(matches!(
            err,
            SignatureError::Key(KeyError::NestingTooDeep { depth: 3, max: 2 })
        ));
    }

    #[test]
    fn test_unbounded_by_default() {
        let handler = LegacyTxHandler::new(Arc::new(LegacyAmino::new()), None);
        let sig = StdSignature::new(Some(nested(3)), vec![0xff; 4]);

        let err = handler.signature_to_v2(&sig).unwrap_err();
        assert!(matches!(err, SignatureError::MalformedMultisig(_)));
    }

    #[test]
    fn test_single_key_within_limit() {
        let handler = LegacyTxHandler::new(Arc::new(LegacyAmino::new()), Some(0));
        let sig = StdSignature::new(Some(secp()), vec![7; 64]);

        let v2 = handler.signature_to_v2(&sig).unwrap();
        assert_eq!(v2.data.as_single().unwrap().signature, vec![7; 64]);
        assert_eq!(v2.sequence, 0);
    }
}
