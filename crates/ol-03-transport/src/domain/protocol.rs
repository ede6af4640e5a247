//! Graphene JSON-RPC envelopes.
//!
//! ```text
//! request   {"method":"call","params":[api_id, method, args],"id":n}
//! response  {"id":n,"result":...}  |  {"id":n,"error":{...}}
//! notice    {"method":"notice","params":[callback_id, payload, ...]}
//! ```

use crate::domain::error::RpcError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Method name of every outgoing request.
pub const CALL_METHOD: &str = "call";

/// Method name of server-pushed notifications.
pub const NOTICE_METHOD: &str = "notice";

/// Numeric handle of a remote API namespace, as returned by login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApiId(pub u8);

impl fmt::Display for ApiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outgoing request.
#[derive(Debug, Serialize)]
pub struct RpcRequest<'a> {
    pub method: &'static str,
    pub params: (ApiId, &'a str, &'a [Value]),
    pub id: u64,
}

impl<'a> RpcRequest<'a> {
    /// `call` envelope for `api.method(args)`.
    pub fn call(id: u64, api: ApiId, method: &'a str, args: &'a [Value]) -> Self {
        Self {
            method: CALL_METHOD,
            params: (api, method, args),
            id,
        }
    }
}

/// Any incoming frame.
///
/// Responses and notices share one shape so a frame is parsed once and then
/// classified by the reader.
#[derive(Debug, Default, Deserialize)]
pub struct Incoming {
    #[serde(default)]
    pub id: Option<u64>,
    /// `null` when absent
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub error: Option<RpcError>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub params: Vec<Value>,
}

impl Incoming {
    pub fn is_notice(&self) -> bool {
        self.method.as_deref() == Some(NOTICE_METHOD)
    }

    /// Result or remote error carried by a response frame.
    pub fn into_result(self) -> Result<Value, RpcError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.result),
        }
    }
}
