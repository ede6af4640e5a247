//! `login_api`: authentication and access to the other namespaces.

use ol_03_transport::{ApiId, Caller, CallerExt, TransportError};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::debug;

/// The login namespace is always reachable under id 1.
pub const LOGIN_API: ApiId = ApiId(1);

pub struct LoginApi<C: ?Sized> {
    caller: Arc<C>,
}

impl<C: Caller + ?Sized> LoginApi<C> {
    pub fn new(caller: Arc<C>) -> Self {
        Self { caller }
    }

    /// Public nodes accept empty credentials.
    pub async fn login(&self, username: &str, password: &str) -> Result<bool, TransportError> {
        self.caller
            .call_as(LOGIN_API, "login", vec![json!(username), json!(password)])
            .await
    }

    pub async fn get_api_by_name(&self, name: &str) -> Result<ApiId, TransportError> {
        self.caller
            .call_as(LOGIN_API, "get_api_by_name", vec![json!(name)])
            .await
    }

    pub async fn database(&self) -> Result<ApiId, TransportError> {
        self.api_id("database").await
    }

    pub async fn history(&self) -> Result<ApiId, TransportError> {
        self.api_id("history").await
    }

    pub async fn network_broadcast(&self) -> Result<ApiId, TransportError> {
        self.api_id("network_broadcast").await
    }

    async fn api_id(&self, method: &str) -> Result<ApiId, TransportError> {
        let id: ApiId = self.caller.call_as(LOGIN_API, method, Vec::<Value>::new()).await?;
        debug!(api = method, api_id = id.0, "Resolved API id");
        Ok(id)
    }
}
