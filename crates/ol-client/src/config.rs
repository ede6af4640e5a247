//! Client configuration with validation.
//!
//! ```toml
//! [node]
//! url = "wss://bitshares.openledger.info/ws"
//! request_timeout_secs = 30
//!
//! [transactions]
//! expiration_secs = 600
//!
//! [money]
//! default_precision = 5
//! precisions = { BTS = 5, "OPEN.BTC" = 8 }
//! ```

use ol_01_encoding::MoneyFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Main client configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Node connection
    pub node: NodeConfig,
    /// Transaction building
    pub transactions: TransactionConfig,
    /// Symbol precisions for text amounts (optional)
    pub money: Option<MoneyFormat>,
}

impl ClientConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let url = self.node.url.as_str();
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(ConfigError::InvalidUrl(self.node.url.clone()));
        }

        if self.node.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs cannot be 0".into(),
            ));
        }

        if self.transactions.expiration_secs == 0 {
            return Err(ConfigError::Invalid("expiration_secs cannot be 0".into()));
        }

        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.node.request_timeout_secs)
    }

    /// Lifetime of a built transaction past the head block time.
    pub fn expiration(&self) -> Duration {
        Duration::from_secs(self.transactions.expiration_secs)
    }

    /// Configured money table, or an empty one.
    pub fn money_format(&self) -> MoneyFormat {
        self.money.clone().unwrap_or_default()
    }
}

/// Node connection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeConfig {
    /// WebSocket endpoint (`ws://` or `wss://`)
    pub url: String,
    /// Upper bound on a single remote call (default: 30)
    pub request_timeout_secs: u64,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            url: "wss://bitshares.openledger.info/ws".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Transaction building configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionConfig {
    /// Expiration relative to the head block time (default: 600)
    pub expiration_secs: u64,
}

impl Default for TransactionConfig {
    fn default() -> Self {
        Self {
            expiration_secs: 600,
        }
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {path}: {error}")]
    Io { path: String, error: String },
    /// Not valid TOML or wrong field types
    #[error("cannot parse configuration: {0}")]
    Parse(String),
    /// Node URL is not a WebSocket URL
    #[error("invalid node url {0:?}: expected ws:// or wss://")]
    InvalidUrl(String),
    /// General configuration error
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
