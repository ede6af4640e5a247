//! Transport error types.
//!
//! Remote errors follow the fc exception shape a Graphene node returns:
//! a JSON-RPC `code`/`message` pair plus a structured `data` block with the
//! node-side stack.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tokio_tungstenite::tungstenite;

/// Errors returned by the transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection is closing or closed. Raised for calls issued after
    /// close and for every call pending when the connection went down.
    #[error("connection is shut down")]
    Shutdown,

    /// The node answered with an error.
    #[error(transparent)]
    Remote(#[from] RpcError),

    /// WebSocket I/O failure.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// JSON encode/decode failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The peer violated the notice protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// `call_with_timeout` expired.
    #[error("call timed out after {0:?}")]
    Timeout(Duration),
}

impl TransportError {
    /// True for the shutdown class of errors.
    pub fn is_shutdown(&self) -> bool {
        matches!(self, TransportError::Shutdown)
    }
}

/// Structured remote error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Error)]
#[error("{code}: {message}")]
pub struct RpcError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Option<RpcErrorData>,
}

/// fc exception payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcErrorData {
    pub code: i64,
    pub name: String,
    pub message: String,
    pub stack: Vec<StackFrame>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackFrame {
    pub context: StackContext,
    pub format: String,
    pub data: Value,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StackContext {
    pub level: String,
    pub file: String,
    pub line: i64,
    pub method: String,
    pub hostname: String,
    pub thread_name: String,
    pub timestamp: String,
}
