//! Test utilities for code built on the [`Caller`] port.
//!
//! Enable with the `test-utils` feature flag.
//!
//! # Example
//!
//! ```rust
//! use ol_03_transport::test_utils::MockCaller;
//! use ol_03_transport::{ApiId, Caller};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let mock = MockCaller::new();
//! mock.respond("get_chain_id", json!("4018d784"));
//! let id = mock.call(ApiId(2), "get_chain_id", vec![]).await.unwrap();
//! assert_eq!(id, json!("4018d784"));
//! assert_eq!(mock.calls()[0].method, "get_chain_id");
//! # });
//! ```

use crate::domain::{ApiId, CallbackId, CallbackRegistry, NoticeHandler, RpcError, TransportError};
use crate::ports::{CallCloser, Caller};
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};

/// One call observed by a [`MockCaller`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    pub api: ApiId,
    pub method: String,
    pub args: Vec<Value>,
}

/// A [`CallCloser`] that answers from per-method scripts.
///
/// Responses for a method are consumed in the order they were scripted. A
/// call with no scripted response fails with a protocol error.
#[derive(Default)]
pub struct MockCaller {
    scripts: Mutex<HashMap<String, VecDeque<Result<Value, RpcError>>>>,
    calls: Mutex<Vec<RecordedCall>>,
    callbacks: CallbackRegistry,
    closed: AtomicBool,
}

impl MockCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful result for `method`.
    pub fn respond(&self, method: &str, result: Value) -> &Self {
        self.push(method, Ok(result))
    }

    /// Queue a remote error for `method`.
    pub fn fail(&self, method: &str, error: RpcError) -> &Self {
        self.push(method, Err(error))
    }

    fn push(&self, method: &str, response: Result<Value, RpcError>) -> &Self {
        self.scripts
            .lock()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
        self
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Calls to `method` only.
    pub fn calls_to(&self, method: &str) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .iter()
            .filter(|c| c.method == method)
            .cloned()
            .collect()
    }

    /// Deliver `payload` to a registered callback, as a notice would.
    pub fn notify(&self, id: CallbackId, payload: Value) -> bool {
        match self.callbacks.get(id.0) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Caller for MockCaller {
    async fn call(
        &self,
        api: ApiId,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, TransportError> {
        if self.is_closed() {
            return Err(TransportError::Shutdown);
        }
        self.calls.lock().push(RecordedCall {
            api,
            method: method.to_string(),
            args,
        });

        let scripted = self
            .scripts
            .lock()
            .get_mut(method)
            .and_then(VecDeque::pop_front);
        match scripted {
            Some(response) => response.map_err(TransportError::from),
            None => Err(TransportError::Protocol(format!(
                "no scripted response for {method}"
            ))),
        }
    }

    async fn set_callback(
        &self,
        api: ApiId,
        method: &str,
        handler: NoticeHandler,
    ) -> Result<CallbackId, TransportError> {
        let id = self.callbacks.register(handler);
        match self.call(api, method, vec![Value::from(id.0)]).await {
            Ok(_) => Ok(id),
            Err(e) => {
                self.callbacks.remove(id);
                Err(e)
            }
        }
    }
}

#[async_trait]
impl CallCloser for MockCaller {
    async fn close(&self) -> Result<(), TransportError> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Err(TransportError::Shutdown);
        }
        self.callbacks.clear();
        Ok(())
    }
}
