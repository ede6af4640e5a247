//! Client error types.

use crate::config::ConfigError;
use ol_02_signing::SigningError;
use ol_03_transport::TransportError;
use thiserror::Error;

/// Errors from the client facade.
///
/// Each flow stops at its first failure; nothing is retried.
#[derive(Debug, Error)]
pub enum ClientError {
    /// A remote call failed or the connection is gone
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The transaction could not be serialized or signed
    #[error("signing failed: {0}")]
    Signing(#[from] SigningError),

    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The reference block is unknown to the node
    #[error("block {0} not found")]
    BlockNotFound(u32),

    /// Head time plus the configured lifetime does not fit a timestamp
    #[error("transaction expiration out of range")]
    ExpirationOutOfRange,

    /// The node answered with an unexpected shape
    #[error("unexpected response to {method}: {reason}")]
    UnexpectedResponse {
        method: &'static str,
        reason: String,
    },
}
