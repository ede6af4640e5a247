//! `history_api`: market candles, fills and account history.

mod data;

pub use data::{Bucket, BucketKey, FillOrder, OperationHistory, OrderHistory, OrderHistoryKey};

use ol_03_transport::{ApiId, Caller, CallerExt, TransportError};
use serde_json::json;
use shared_types::{ObjectId, Time};
use std::sync::Arc;

pub struct HistoryApi<C: ?Sized> {
    caller: Arc<C>,
    id: ApiId,
}

impl<C: Caller + ?Sized> HistoryApi<C> {
    pub fn new(id: ApiId, caller: Arc<C>) -> Self {
        Self { caller, id }
    }

    pub fn api_id(&self) -> ApiId {
        self.id
    }

    /// Candles of `base`/`quote` between `start` and `end`. `bucket_seconds`
    /// must be one of [`get_market_history_buckets`](Self::get_market_history_buckets).
    pub async fn get_market_history(
        &self,
        base: ObjectId,
        quote: ObjectId,
        bucket_seconds: u32,
        start: Time,
        end: Time,
    ) -> Result<Vec<Bucket>, TransportError> {
        let args = vec![
            json!(base),
            json!(quote),
            json!(bucket_seconds),
            json!(start),
            json!(end),
        ];
        self.caller.call_as(self.id, "get_market_history", args).await
    }

    pub async fn get_market_history_buckets(&self) -> Result<Vec<u32>, TransportError> {
        self.caller
            .call_as(self.id, "get_market_history_buckets", vec![])
            .await
    }

    pub async fn get_fill_order_history(
        &self,
        base: ObjectId,
        quote: ObjectId,
        limit: u32,
    ) -> Result<Vec<OrderHistory>, TransportError> {
        self.caller
            .call_as(
                self.id,
                "get_fill_order_history",
                vec![json!(base), json!(quote), json!(limit)],
            )
            .await
    }

    /// Operations of `account` from `start` (most recent) back to `stop`,
    /// at most `limit` (node maximum 100). `1.11.0` as `start` means "latest".
    pub async fn get_account_history(
        &self,
        account: ObjectId,
        stop: ObjectId,
        limit: u32,
        start: ObjectId,
    ) -> Result<Vec<OperationHistory>, TransportError> {
        self.caller
            .call_as(
                self.id,
                "get_account_history",
                vec![json!(account), json!(stop), json!(limit), json!(start)],
            )
            .await
    }
}
