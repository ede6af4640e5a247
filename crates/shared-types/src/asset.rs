//! Asset amounts and prices.

use crate::flex;
use crate::object_id::ObjectId;
use ol_01_encoding::{ConsensusEncode, Encoder, EncodingError};
use serde::{Deserialize, Serialize};

/// An integer quantity of one asset, in the asset's smallest unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetAmount {
    /// Accepted as a JSON number or a decimal string.
    #[serde(deserialize_with = "flex::de_u64")]
    pub amount: u64,
    pub asset_id: ObjectId,
}

impl AssetAmount {
    pub const fn new(amount: u64, asset_id: ObjectId) -> Self {
        Self { amount, asset_id }
    }
}

/// `share_type` is a signed 64-bit field on chain: eight little-endian bytes,
/// not a varint, followed by the asset id's instance varint. The mainnet
/// transfer's `1000000` of `1.3.0` encodes as `40420f000000000000`.
impl ConsensusEncode for AssetAmount {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        let amount =
            i64::try_from(self.amount).map_err(|_| EncodingError::AmountOverflow(self.amount))?;
        encoder.encode_i64(amount);
        encoder.encode(&self.asset_id)
    }
}

/// Exchange rate expressed as `base` per `quote`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub base: AssetAmount,
    pub quote: AssetAmount,
}

impl ConsensusEncode for Price {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode(&self.base)?;
        encoder.encode(&self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_as_number() {
        let data = r#"{ "amount": 11211, "asset_id": "1.3.0" }"#;
        let am: AssetAmount = serde_json::from_str(data).unwrap();
        assert_eq!(am.amount, 11211);
        assert_eq!(am.asset_id, ObjectId::new(1, 3, 0));
    }

    #[test]
    fn test_amount_as_string() {
        let data = r#"{ "amount": "14450706212", "asset_id": "1.3.3232" }"#;
        let am: AssetAmount = serde_json::from_str(data).unwrap();
        assert_eq!(am.amount, 14450706212);
        assert_eq!(am.asset_id, ObjectId::new(1, 3, 3232));
    }

    #[test]
    fn test_serializes_amount_as_number() {
        let am = AssetAmount::new(10420, ObjectId::CORE_ASSET);
        assert_eq!(
            serde_json::to_value(am).unwrap(),
            serde_json::json!({"amount": 10420, "asset_id": "1.3.0"})
        );
    }

    #[test]
    fn test_consensus_encoding() {
        let am = AssetAmount::new(1_000_000, ObjectId::CORE_ASSET);
        let bytes = ol_01_encoding::encode_to_vec(&am).unwrap();
        assert_eq!(hex::encode(bytes), "40420f000000000000");
    }

    #[test]
    fn test_amount_beyond_share_type_range() {
        let am = AssetAmount::new(u64::MAX, ObjectId::CORE_ASSET);
        assert_eq!(
            ol_01_encoding::encode_to_vec(&am),
            Err(EncodingError::AmountOverflow(u64::MAX))
        );
    }

    #[test]
    fn test_price_json() {
        let data = r#"{
            "base": {"amount": "2000", "asset_id": "1.3.121"},
            "quote": {"amount": 1000, "asset_id": "1.3.0"}
        }"#;
        let price: Price = serde_json::from_str(data).unwrap();
        assert_eq!(price.base.amount, 2000);
        assert_eq!(price.quote.asset_id, ObjectId::CORE_ASSET);
    }
}
