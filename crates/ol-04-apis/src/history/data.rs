//! Response types of `history_api`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared_types::{flex, AssetAmount, ObjectId, Operation, Price, Time};

/// One market-history candle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: ObjectId,
    pub key: BucketKey,
    #[serde(deserialize_with = "flex::de_u64")]
    pub high_base: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub high_quote: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub low_base: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub low_quote: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub open_base: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub open_quote: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub close_base: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub close_quote: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub base_volume: u64,
    #[serde(deserialize_with = "flex::de_u64")]
    pub quote_volume: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketKey {
    pub base: ObjectId,
    pub quote: ObjectId,
    #[serde(deserialize_with = "flex::de_u32")]
    pub seconds: u32,
    pub open: Time,
}

/// A filled order as recorded by the market history plugin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHistory {
    pub id: ObjectId,
    pub key: OrderHistoryKey,
    pub time: Time,
    pub op: FillOrder,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderHistoryKey {
    pub base: ObjectId,
    pub quote: ObjectId,
    pub sequence: i64,
}

/// Body of the virtual `fill_order` operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FillOrder {
    pub fee: AssetAmount,
    pub order_id: ObjectId,
    pub account_id: ObjectId,
    pub pays: AssetAmount,
    pub receives: AssetAmount,
    #[serde(default)]
    pub fill_price: Option<Price>,
    #[serde(default)]
    pub is_maker: bool,
}

/// One entry of an account's operation history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationHistory {
    pub id: ObjectId,
    pub op: Operation,
    /// `[tag, value]` result of the operation
    #[serde(default)]
    pub result: Value,
    pub block_num: u32,
    pub trx_in_block: u16,
    pub op_in_trx: u16,
    pub virtual_op: u32,
}
