//! Signing error types.

use ol_01_encoding::EncodingError;
use thiserror::Error;

/// Errors raised while digesting or signing a transaction.
///
/// Every variant is reported before any signature is attached.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigningError {
    /// Chain id is not valid hex
    #[error("failed to decode chain ID {0:?}")]
    InvalidChainId(String),

    /// Chain id decoded to the wrong number of bytes
    #[error("chain ID must be {expected} bytes, got {actual}")]
    ChainIdLength {
        /// Required length
        expected: usize,
        /// Decoded length
        actual: usize,
    },

    /// Private key is not a valid WIF string
    #[error("invalid WIF key: {0}")]
    InvalidWif(&'static str),

    /// Block id is not hex or is shorter than 8 bytes
    #[error("invalid block ID {0:?}")]
    InvalidBlockId(String),

    /// No canonical signature was found within the retry budget
    #[error("no canonical signature after {0} attempts")]
    NonCanonical(u32),

    /// The transaction could not be serialized
    #[error("transaction encoding failed: {0}")]
    Encoding(#[from] EncodingError),
}
