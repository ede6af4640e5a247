//! `network_broadcast_api`: submit signed transactions.

use ol_02_signing::SignedTransaction;
use ol_03_transport::{ApiId, Caller, CallerExt, TransportError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use shared_types::ObjectId;
use std::sync::Arc;
use tracing::{debug, info};

/// Outcome of a synchronous broadcast: where the transaction landed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BroadcastResponse {
    /// Transaction id (hex)
    pub id: String,
    pub block_num: u32,
    pub trx_num: u32,
    pub expired: bool,
    /// The processed transaction, including `operation_results`.
    pub trx: Value,
}

impl BroadcastResponse {
    /// Object id created by operation `index`, from its
    /// `[tag, "space.type.instance"]` result.
    pub fn created_object(&self, index: usize) -> Option<ObjectId> {
        self.trx
            .get("operation_results")?
            .get(index)?
            .get(1)?
            .as_str()?
            .parse()
            .ok()
    }
}

pub struct NetworkBroadcastApi<C: ?Sized> {
    caller: Arc<C>,
    id: ApiId,
}

impl<C: Caller + ?Sized> NetworkBroadcastApi<C> {
    pub fn new(id: ApiId, caller: Arc<C>) -> Self {
        Self { caller, id }
    }

    pub fn api_id(&self) -> ApiId {
        self.id
    }

    /// Submit and return once the node accepted the transaction into its
    /// pending set.
    pub async fn broadcast_transaction(
        &self,
        tx: &SignedTransaction,
    ) -> Result<(), TransportError> {
        debug!(
            operations = tx.transaction().operations.len(),
            signatures = tx.signatures().len(),
            "Broadcasting transaction"
        );
        self.caller
            .call(self.id, "broadcast_transaction", vec![json!(tx)])
            .await
            .map(drop)
    }

    /// Submit and wait until the transaction is included in a block.
    pub async fn broadcast_transaction_synchronous(
        &self,
        tx: &SignedTransaction,
    ) -> Result<BroadcastResponse, TransportError> {
        let response: BroadcastResponse = self
            .caller
            .call_as(self.id, "broadcast_transaction_synchronous", vec![json!(tx)])
            .await?;
        info!(
            trx_id = %response.id,
            block_num = response.block_num,
            trx_num = response.trx_num,
            "Transaction included"
        );
        Ok(response)
    }
}
