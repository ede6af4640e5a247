//! `database_api`: read access to chain state, plus the block-applied
//! subscription.

mod data;

pub use data::{
    AccountsMap, Asset, Block, BlockHeader, ChainConfig, DynamicGlobalProperties, LimitOrder,
    MarketTicker,
};

use crate::ids_to_params;
use ol_03_transport::{ApiId, CallbackId, Caller, CallerExt, NoticeHandler, TransportError};
use serde_json::{json, Value};
use shared_types::{AssetAmount, ObjectId, Operation, Transaction};
use std::sync::Arc;
use tracing::warn;

pub struct DatabaseApi<C: ?Sized> {
    caller: Arc<C>,
    id: ApiId,
}

impl<C: Caller + ?Sized> DatabaseApi<C> {
    pub fn new(id: ApiId, caller: Arc<C>) -> Self {
        Self { caller, id }
    }

    pub fn api_id(&self) -> ApiId {
        self.id
    }

    async fn call<T>(&self, method: &str, args: Vec<Value>) -> Result<T, TransportError>
    where
        T: serde::de::DeserializeOwned + Send,
    {
        self.caller.call_as(self.id, method, args).await
    }

    /// Hex chain id; part of every signature digest.
    pub async fn get_chain_id(&self) -> Result<String, TransportError> {
        self.call("get_chain_id", vec![]).await
    }

    pub async fn get_config(&self) -> Result<ChainConfig, TransportError> {
        self.call("get_config", vec![]).await
    }

    /// Transaction `trx_in_block` of block `block_num`.
    pub async fn get_transaction(
        &self,
        block_num: u32,
        trx_in_block: u32,
    ) -> Result<Transaction, TransportError> {
        self.call("get_transaction", vec![json!(block_num), json!(trx_in_block)])
            .await
    }

    /// `None` once the transaction has expired from the node's recent set,
    /// which does not mean it was never included.
    pub async fn get_recent_transaction_by_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, TransportError> {
        self.call("get_recent_transaction_by_id", vec![json!(transaction_id)])
            .await
    }

    pub async fn get_dynamic_global_properties(
        &self,
    ) -> Result<DynamicGlobalProperties, TransportError> {
        self.call("get_dynamic_global_properties", vec![]).await
    }

    /// Assets by symbol or id, in request order. Unknown entries are `None`.
    pub async fn lookup_asset_symbols(
        &self,
        symbols: &[&str],
    ) -> Result<Vec<Option<Asset>>, TransportError> {
        self.call("lookup_asset_symbols", vec![json!(symbols)]).await
    }

    /// Buy and sell orders of one market.
    pub async fn get_limit_orders(
        &self,
        base: ObjectId,
        quote: ObjectId,
        limit: u32,
    ) -> Result<Vec<LimitOrder>, TransportError> {
        self.call(
            "get_limit_orders",
            vec![json!(base), json!(quote), json!(limit)],
        )
        .await
    }

    pub async fn get_block_header(
        &self,
        block_num: u32,
    ) -> Result<Option<BlockHeader>, TransportError> {
        self.call("get_block_header", vec![json!(block_num)]).await
    }

    pub async fn get_block(&self, block_num: u32) -> Result<Option<Block>, TransportError> {
        self.call("get_block", vec![json!(block_num)]).await
    }

    /// Raw objects; their shape depends on each id's space and type.
    pub async fn get_objects(&self, ids: &[ObjectId]) -> Result<Vec<Value>, TransportError> {
        self.call("get_objects", vec![ids_to_params(ids)]).await
    }

    pub async fn get_ticker(
        &self,
        base: ObjectId,
        quote: ObjectId,
    ) -> Result<MarketTicker, TransportError> {
        self.call("get_ticker", vec![json!(base), json!(quote)]).await
    }

    /// Balances of `account`. An empty `assets` list returns all of them.
    pub async fn get_account_balances(
        &self,
        account: ObjectId,
        assets: &[ObjectId],
    ) -> Result<Vec<AssetAmount>, TransportError> {
        self.call(
            "get_account_balances",
            vec![json!(account), ids_to_params(assets)],
        )
        .await
    }

    /// [`get_account_balances`](Self::get_account_balances) by account name.
    pub async fn get_named_account_balances(
        &self,
        name: &str,
        assets: &[ObjectId],
    ) -> Result<Vec<AssetAmount>, TransportError> {
        self.call(
            "get_named_account_balances",
            vec![json!(name), ids_to_params(assets)],
        )
        .await
    }

    /// Up to `limit` accounts (node maximum 1000) from `lower_bound_name`.
    pub async fn lookup_accounts(
        &self,
        lower_bound_name: &str,
        limit: u16,
    ) -> Result<AccountsMap, TransportError> {
        self.call("lookup_accounts", vec![json!(lower_bound_name), json!(limit)])
            .await
    }

    /// Subscribe to applied blocks. `handler` sees each block id in the
    /// notice, or the decoding error of a malformed one.
    pub async fn set_block_applied_callback<F>(
        &self,
        handler: F,
    ) -> Result<CallbackId, TransportError>
    where
        F: Fn(Result<String, serde_json::Error>) + Send + Sync + 'static,
    {
        let notice: NoticeHandler =
            Arc::new(move |payload: Value| match serde_json::from_value::<Vec<String>>(payload) {
                Ok(block_ids) => block_ids.into_iter().for_each(|id| handler(Ok(id))),
                Err(e) => {
                    warn!(error = %e, "Malformed block-applied notice");
                    handler(Err(e));
                }
            });
        self.caller
            .set_callback(self.id, "set_block_applied_callback", notice)
            .await
    }

    /// Ends every subscription on the node side. Local handlers stay
    /// registered until the connection closes.
    pub async fn cancel_all_subscriptions(&self) -> Result<(), TransportError> {
        self.caller
            .call(self.id, "cancel_all_subscriptions", vec![])
            .await
            .map(drop)
    }

    /// Fee of each operation, denominated in `fee_asset`.
    pub async fn get_required_fees(
        &self,
        operations: &[Operation],
        fee_asset: ObjectId,
    ) -> Result<Vec<AssetAmount>, TransportError> {
        let operations = serde_json::to_value(operations)?;
        self.call("get_required_fees", vec![operations, json!(fee_asset)])
            .await
    }
}
