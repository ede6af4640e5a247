//! # Client Facade
//!
//! One connection, four API namespaces, and the build → sign → broadcast
//! flow for the supported operations.
//!
//! ## Operation Flow
//!
//! ```text
//! get_required_fees ──> fee filled into each operation
//! get_dynamic_global_properties ──> lib, head time
//! get_block(lib) ──> previous ──> ref_block_prefix
//!                                  │
//! Transaction { ref_block_num(lib - 1), prefix, head time + ttl, ops }
//!                                  │
//!                           sign(wifs, chain_id)
//!                                  │
//!                     broadcast_transaction[_synchronous]
//! ```
//!
//! Every step is a single attempt. The first failure ends the flow.

use crate::config::ClientConfig;
use crate::errors::ClientError;
use ol_02_signing::{ref_block_num, ref_block_prefix, SignedTransaction};
use ol_03_transport::{CallCloser, WsTransport};
use ol_04_apis::{DatabaseApi, HistoryApi, LoginApi, NetworkBroadcastApi};
use shared_types::{
    AssetAmount, LimitOrderCancelOperation, LimitOrderCreateOperation, ObjectId, Operation,
    Transaction, TransferOperation,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Connected client.
pub struct Client<C: ?Sized = WsTransport> {
    caller: Arc<C>,
    login: LoginApi<C>,
    database: DatabaseApi<C>,
    history: HistoryApi<C>,
    network_broadcast: NetworkBroadcastApi<C>,
    chain_id: String,
    /// Transaction lifetime past the head block time
    expiration: Duration,
}

impl Client<WsTransport> {
    /// Dial the configured node and resolve the API namespaces.
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let transport = WsTransport::connect(&config.node.url)
            .await?
            .with_request_timeout(config.request_timeout());
        Self::with_caller(Arc::new(transport), config.expiration()).await
    }
}

impl<C: CallCloser + ?Sized> Client<C> {
    /// Build a client over an existing connection.
    ///
    /// Resolves the database id, caches the chain id, then resolves the
    /// history and network_broadcast ids.
    pub async fn with_caller(caller: Arc<C>, expiration: Duration) -> Result<Self, ClientError> {
        let login = LoginApi::new(Arc::clone(&caller));

        let database = DatabaseApi::new(login.database().await?, Arc::clone(&caller));
        let chain_id = database.get_chain_id().await?;
        let history = HistoryApi::new(login.history().await?, Arc::clone(&caller));
        let network_broadcast =
            NetworkBroadcastApi::new(login.network_broadcast().await?, Arc::clone(&caller));

        info!(chain_id = %chain_id, "Client ready");
        Ok(Self {
            caller,
            login,
            database,
            history,
            network_broadcast,
            chain_id,
            expiration,
        })
    }

    pub fn login(&self) -> &LoginApi<C> {
        &self.login
    }

    pub fn database(&self) -> &DatabaseApi<C> {
        &self.database
    }

    pub fn history(&self) -> &HistoryApi<C> {
        &self.history
    }

    pub fn network_broadcast(&self) -> &NetworkBroadcastApi<C> {
        &self.network_broadcast
    }

    /// Chain id fetched at construction.
    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// Transfer `amount` from `from` to `to`. The fee amount is replaced by
    /// the node's required fee in `fee.asset_id`.
    pub async fn transfer(
        &self,
        wif: &str,
        from: ObjectId,
        to: ObjectId,
        amount: AssetAmount,
        fee: AssetAmount,
    ) -> Result<(), ClientError> {
        let mut operations: Vec<Operation> =
            vec![TransferOperation::new(from, to, amount, fee).into()];
        self.fill_fees(&mut operations, fee.asset_id).await?;

        let signed = self.sign(&[wif], operations).await?;
        self.network_broadcast
            .broadcast_transaction(&signed)
            .await?;
        Ok(())
    }

    /// Place a limit order expiring `ttl` after the head block time and
    /// wait for inclusion. Returns the new order's id.
    #[allow(clippy::too_many_arguments)]
    pub async fn limit_order_create(
        &self,
        wif: &str,
        seller: ObjectId,
        fee: AssetAmount,
        amount_to_sell: AssetAmount,
        min_to_receive: AssetAmount,
        ttl: Duration,
        fill_or_kill: bool,
    ) -> Result<ObjectId, ClientError> {
        let props = self.database.get_dynamic_global_properties().await?;
        let expiration = props
            .time
            .checked_add(ttl)
            .ok_or(ClientError::ExpirationOutOfRange)?;

        let mut operations = vec![Operation::LimitOrderCreate(LimitOrderCreateOperation {
            fee,
            seller,
            amount_to_sell,
            min_to_receive,
            expiration,
            fill_or_kill,
            extensions: Vec::new(),
        })];
        self.fill_fees(&mut operations, fee.asset_id).await?;

        let signed = self.sign(&[wif], operations).await?;
        let response = self
            .network_broadcast
            .broadcast_transaction_synchronous(&signed)
            .await?;

        response
            .created_object(0)
            .ok_or_else(|| ClientError::UnexpectedResponse {
                method: "broadcast_transaction_synchronous",
                reason: "no order id in operation_results".to_string(),
            })
    }

    pub async fn limit_order_cancel(
        &self,
        wif: &str,
        fee_paying_account: ObjectId,
        order: ObjectId,
        fee: AssetAmount,
    ) -> Result<(), ClientError> {
        let mut operations = vec![Operation::LimitOrderCancel(LimitOrderCancelOperation {
            fee,
            fee_paying_account,
            order,
            extensions: Vec::new(),
        })];
        self.fill_fees(&mut operations, fee.asset_id).await?;

        let signed = self.sign(&[wif], operations).await?;
        self.network_broadcast
            .broadcast_transaction(&signed)
            .await?;
        Ok(())
    }

    /// Build a transaction around `operations` against the last
    /// irreversible block and sign it with every key in `wifs`.
    pub async fn sign<S: AsRef<str> + Sync>(
        &self,
        wifs: &[S],
        operations: Vec<Operation>,
    ) -> Result<SignedTransaction, ClientError> {
        let props = self.database.get_dynamic_global_properties().await?;
        let lib = props.last_irreversible_block_num;

        // block(lib).previous is the id of block lib - 1
        let block = self
            .database
            .get_block(lib)
            .await?
            .ok_or(ClientError::BlockNotFound(lib))?;
        let prefix = ref_block_prefix(&block.header.previous)?;
        let number = ref_block_num(lib.saturating_sub(1));

        let expiration = props
            .time
            .checked_add(self.expiration)
            .ok_or(ClientError::ExpirationOutOfRange)?;

        let mut signed =
            SignedTransaction::new(Transaction::new(number, prefix, expiration, operations));
        signed.sign(wifs, &self.chain_id)?;

        debug!(
            ref_block_num = number,
            ref_block_prefix = prefix,
            expiration = %expiration,
            "Built transaction"
        );
        Ok(signed)
    }

    /// Close the underlying connection.
    pub async fn close(&self) -> Result<(), ClientError> {
        Ok(self.caller.close().await?)
    }

    /// Replace each operation's fee amount with the node's quote.
    async fn fill_fees(
        &self,
        operations: &mut [Operation],
        fee_asset: ObjectId,
    ) -> Result<(), ClientError> {
        let fees = self
            .database
            .get_required_fees(operations, fee_asset)
            .await?;
        if fees.len() != operations.len() {
            return Err(ClientError::UnexpectedResponse {
                method: "get_required_fees",
                reason: format!("{} fees for {} operations", fees.len(), operations.len()),
            });
        }

        for (operation, quote) in operations.iter_mut().zip(fees) {
            if let Some(fee) = operation.fee_mut() {
                fee.amount = quote.amount;
            }
        }
        Ok(())
    }
}
