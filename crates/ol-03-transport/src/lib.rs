//! # OL-03 Transport - JSON-RPC Multiplexer
//!
//! Turns one WebSocket into many concurrent logical RPC calls plus a
//! server-push notice channel, speaking the Graphene `call`/`notice` dialect.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                    WsTransport                       │
//! │                                                      │
//! │  call() ──> [writer lock: id + send] ──> socket      │
//! │     │                                      │         │
//! │     └── await oneshot <── PendingCalls <───┤         │
//! │                                            │         │
//! │  handlers <──────── CallbackRegistry <── reader task │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Failure model
//!
//! Invalid JSON, a malformed notice, an unknown callback id or a socket
//! error stops the reader. Every pending call then resolves with
//! [`TransportError::Shutdown`], and so does every later call. There is no
//! reconnect.
//!
//! # Usage
//!
//! ```ignore
//! use ol_03_transport::{ApiId, WsTransport};
//!
//! let transport = WsTransport::connect("wss://node.example/ws").await?;
//! let chain_id = transport.call(ApiId(2), "get_chain_id", vec![]).await?;
//! transport.close().await?;
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod domain;
pub mod ports;
pub mod ws;

/// Requires feature: `test-utils`
#[cfg(feature = "test-utils")]
pub mod test_utils;

pub use domain::{
    ApiId, CallbackId, NoticeHandler, PendingStats, RpcError, TransportError,
};
pub use ports::{CallCloser, Caller, CallerExt};
pub use ws::{ConnectionState, WsTransport};
