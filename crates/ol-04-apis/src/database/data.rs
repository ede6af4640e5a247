//! Response types of `database_api`.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use shared_types::{flex, ObjectId, Price, Time, Transaction};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    pub id: ObjectId,
    pub symbol: String,
    pub precision: u8,
    pub issuer: ObjectId,
    pub dynamic_asset_data_id: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockHeader {
    pub previous: String,
    pub timestamp: Time,
    pub witness: ObjectId,
    pub transaction_merkle_root: String,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    #[serde(flatten)]
    pub header: BlockHeader,
    pub witness_signature: String,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

/// 24h market summary. Quantities are decimal strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketTicker {
    pub time: Time,
    pub base: ObjectId,
    pub quote: ObjectId,
    pub latest: String,
    pub lowest_ask: String,
    pub highest_bid: String,
    pub percent_change: String,
    pub base_volume: String,
    pub quote_volume: String,
}

/// An open order. For sell orders `sell_price.base` is the requested base
/// asset; for buy orders it is the quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitOrder {
    pub id: ObjectId,
    pub expiration: Time,
    pub seller: ObjectId,
    #[serde(deserialize_with = "flex::de_u64")]
    pub for_sale: u64,
    #[serde(default, deserialize_with = "flex::de_u64")]
    pub deferred_fee: u64,
    pub sell_price: Price,
}

/// `2.1.0`, the chain head state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicGlobalProperties {
    pub id: ObjectId,
    pub head_block_number: u32,
    pub head_block_id: String,
    pub time: Time,
    pub current_witness: ObjectId,
    pub next_maintenance_time: Time,
    pub last_budget_time: Time,
    #[serde(default)]
    pub accounts_registered_this_interval: u32,
    #[serde(default)]
    pub dynamic_flags: u32,
    #[serde(default)]
    pub recent_slots_filled: String,
    pub last_irreversible_block_num: u32,
    #[serde(default, deserialize_with = "flex::de_u64")]
    pub current_aslot: u64,
    #[serde(default)]
    pub witness_budget: i64,
    #[serde(default)]
    pub recently_missed_count: u32,
}

/// Compile-time constants of the node. Only the commonly used ones are
/// modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    #[serde(rename = "GRAPHENE_SYMBOL")]
    pub symbol: String,
    #[serde(rename = "GRAPHENE_ADDRESS_PREFIX")]
    pub address_prefix: String,
    #[serde(rename = "GRAPHENE_MIN_ACCOUNT_NAME_LENGTH")]
    pub min_account_name_length: u8,
    #[serde(rename = "GRAPHENE_MAX_ACCOUNT_NAME_LENGTH")]
    pub max_account_name_length: u8,
    #[serde(rename = "GRAPHENE_MIN_ASSET_SYMBOL_LENGTH")]
    pub min_asset_symbol_length: u8,
    #[serde(rename = "GRAPHENE_MAX_ASSET_SYMBOL_LENGTH")]
    pub max_asset_symbol_length: u8,
    #[serde(rename = "GRAPHENE_MAX_SHARE_SUPPLY", deserialize_with = "flex::de_u64")]
    pub max_share_supply: u64,
}

/// Account name → account id, decoded from the `[[name, id], ...]` pairs
/// `lookup_accounts` returns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccountsMap(pub BTreeMap<String, ObjectId>);

impl AccountsMap {
    pub fn get(&self, name: &str) -> Option<&ObjectId> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for AccountsMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let pairs = Vec::<(String, ObjectId)>::deserialize(deserializer)?;
        Ok(Self(pairs.into_iter().collect()))
    }
}
