//! # Error Types
//!
//! Errors raised while interpreting Graphene domain values.

use thiserror::Error;

/// Failure to parse the `space.type.instance` form of an object id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseObjectIdError {
    /// Input does not have exactly three dot-separated components.
    #[error("unable to parse ObjectId from {input:?}: expected space.type.instance")]
    ComponentCount { input: String },

    /// One component is not a plain unsigned decimal integer.
    #[error("unable to parse ObjectId [{component}] from {input:?}")]
    InvalidComponent {
        input: String,
        component: &'static str,
    },
}

/// Errors related to domain value conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    /// Numeric tag with no known operation type.
    #[error("unknown operation type {0}")]
    UnknownOpType(u16),

    /// Object id text is malformed.
    #[error(transparent)]
    ObjectId(#[from] ParseObjectIdError),

    /// Timestamp text is not `YYYY-MM-DDTHH:MM:SS`.
    #[error("invalid timestamp {0:?}")]
    InvalidTime(String),
}
