//! Legacy fee

use crate::amino_json::u64_string;
use serde::{Deserialize, Serialize};

/// A single coin with denomination and integer amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: u128) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }
}

/// Fee and gas limit of a legacy transaction
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    #[serde(with = "u64_string")]
    pub gas: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub payer: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub granter: String,
}

impl StdFee {
    pub fn new(amount: Vec<Coin>, gas: u64) -> Self {
        Self {
            amount,
            gas,
            ..Default::default()
        }
    }

    pub fn with_payer(mut self, payer: impl Into<String>) -> Self {
        self.payer = payer.into();
        self
    }

    pub fn with_granter(mut self, granter: impl Into<String>) -> Self {
        self.granter = granter.into();
        self
    }

    /// Amino JSON of the fee, as embedded in sign documents
    pub fn bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_bytes() {
        let fee = StdFee::new(vec![Coin::new("atom", 150)], 100_000);
        assert_eq!(
            String::from_utf8(fee.bytes().unwrap()).unwrap(),
            r#"{"amount":[{"denom":"atom","amount":"150"}],"gas":"100000"}"#
        );
    }

    #[test]
    fn test_empty_fee_amount_is_array() {
        let fee = StdFee::new(vec![], 0);
        assert_eq!(fee.bytes().unwrap(), br#"{"amount":[],"gas":"0"}"#);
    }

    #[test]
    fn test_fee_payer_and_granter() {
        let fee = StdFee::new(vec![], 7)
            .with_payer("payer")
            .with_granter("granter");
        let json: serde_json::Value = serde_json::from_slice(&fee.bytes().unwrap()).unwrap();
        assert_eq!(json["payer"], "payer");
        assert_eq!(json["granter"], "granter");

        let decoded: StdFee = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, fee);
    }

    #[test]
    fn test_gas_accepts_number_or_string() {
        let a: StdFee = serde_json::from_str(r#"{"amount":[],"gas":"12"}"#).unwrap();
        let b: StdFee = serde_json::from_str(r#"{"amount":[],"gas":12}"#).unwrap();
        assert_eq!(a.gas, 12);
        assert_eq!(a, b);
    }
}
