//! # OL-04 APIs - Remote API Wrappers
//!
//! Thin typed pass-throughs over the [`Caller`](ol_03_transport::Caller)
//! port. A Graphene node exposes several API namespaces over one socket;
//! each wrapper holds the numeric id the node assigned to its namespace.
//!
//! ## Namespaces
//!
//! | Wrapper | Namespace | Id |
//! |---------|-----------|----|
//! | [`LoginApi`] | `login_api` | always 1 |
//! | [`DatabaseApi`] | `database_api` | from [`LoginApi::database`] |
//! | [`HistoryApi`] | `history_api` | from [`LoginApi::history`] |
//! | [`NetworkBroadcastApi`] | `network_broadcast_api` | from [`LoginApi::network_broadcast`] |
//!
//! Every method maps to one remote call. Failures are
//! [`TransportError`](ol_03_transport::TransportError)s; a result that does
//! not match the expected shape surfaces as its `Json` variant.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod database;
pub mod history;
pub mod login;
pub mod network_broadcast;

pub use database::{
    AccountsMap, Asset, Block, BlockHeader, ChainConfig, DatabaseApi, DynamicGlobalProperties,
    LimitOrder, MarketTicker,
};
pub use history::{
    Bucket, BucketKey, FillOrder, HistoryApi, OperationHistory, OrderHistory, OrderHistoryKey,
};
pub use login::{LoginApi, LOGIN_API};
pub use network_broadcast::{BroadcastResponse, NetworkBroadcastApi};

use serde_json::Value;
use shared_types::ObjectId;

/// Object ids in their canonical string form, as the node expects them.
pub(crate) fn ids_to_params(ids: &[ObjectId]) -> Value {
    Value::from(ids.iter().map(ObjectId::to_string).collect::<Vec<_>>())
}
