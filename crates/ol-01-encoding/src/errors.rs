//! Encoding error types.

use thiserror::Error;

/// Errors raised while producing consensus bytes.
///
/// Any of these aborts the whole encode; callers never see a partially
/// written buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodingError {
    /// Money text is not `<decimal> <SYMBOL>`
    #[error("invalid money value: {0:?}")]
    InvalidMoney(String),

    /// Scaled money amount does not fit the int64 amount field
    #[error("money value {0:?} overflows the amount field")]
    MoneyOverflow(String),

    /// Money carries more significant fractional digits than the symbol allows
    #[error("money value {value:?} has more than {precision} fractional digits")]
    PrecisionLoss {
        /// Rejected text
        value: String,
        /// Precision configured for the symbol
        precision: u8,
    },

    /// No precision configured for the symbol
    #[error("no precision configured for symbol {0:?}")]
    UnknownSymbol(String),

    /// Symbol does not fit the fixed-width symbol field
    #[error("symbol {symbol:?} is longer than {max} bytes")]
    SymbolTooLong {
        /// Offending symbol
        symbol: String,
        /// Width of the symbol field
        max: usize,
    },

    /// An amount does not fit the signed 64-bit consensus field
    #[error("amount {0} exceeds the int64 consensus range")]
    AmountOverflow(u64),

    /// A timestamp is outside the u32 seconds range
    #[error("timestamp {0} is outside the u32 seconds range")]
    TimestampOutOfRange(i64),

    /// Operation tag has no encodable variant
    #[error("operation type {0} cannot be encoded")]
    UnknownOperation(u16),

    /// A field value this client does not serialize
    #[error("unsupported value for consensus encoding: {0}")]
    Unsupported(&'static str),
}
