//! Outbound ports: what API wrappers need from a connection.

use crate::domain::{ApiId, CallbackId, NoticeHandler, TransportError};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Issue remote calls and subscribe to notices.
#[async_trait]
pub trait Caller: Send + Sync {
    /// Call `method` on API `api` and wait for its raw result.
    async fn call(&self, api: ApiId, method: &str, args: Vec<Value>)
        -> Result<Value, TransportError>;

    /// Register `handler` and subscribe it through `api.method([callback_id])`.
    async fn set_callback(
        &self,
        api: ApiId,
        method: &str,
        handler: NoticeHandler,
    ) -> Result<CallbackId, TransportError>;
}

/// A [`Caller`] that owns its connection.
#[async_trait]
pub trait CallCloser: Caller {
    /// Close the connection. A second close reports `Shutdown`.
    async fn close(&self) -> Result<(), TransportError>;
}

/// Typed decoding on top of [`Caller::call`].
#[async_trait]
pub trait CallerExt: Caller {
    async fn call_as<T: DeserializeOwned + Send>(
        &self,
        api: ApiId,
        method: &str,
        args: Vec<Value>,
    ) -> Result<T, TransportError> {
        let value = self.call(api, method, args).await?;
        Ok(serde_json::from_value(value)?)
    }
}

impl<C: Caller + ?Sized> CallerExt for C {}
