//! # Fixed-Point Money
//!
//! Legacy Graphene asset literals such as `"99.000 SCR"` are serialized as a
//! 16-byte record:
//!
//! ```text
//! 0..8    amount scaled by 10^precision (int64, little-endian)
//! 8       precision
//! 9..16   symbol, NUL padded
//! ```
//!
//! The precision for each symbol is chain data, so it is supplied through a
//! [`MoneyFormat`] table instead of being baked into the codec.

use crate::EncodingError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Total width of an encoded money value.
pub const MONEY_WIDTH: usize = 16;

/// Width of the NUL-padded symbol field.
pub const SYMBOL_WIDTH: usize = 7;

/// Precision table used by [`crate::Encoder::encode_money`].
///
/// ```toml
/// default_precision = 3
///
/// [precisions]
/// SCR = 9
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoneyFormat {
    /// Fractional digits per symbol
    pub precisions: BTreeMap<String, u8>,
    /// Precision for symbols missing from the table; `None` rejects them
    pub default_precision: Option<u8>,
}

impl MoneyFormat {
    /// Create an empty table that rejects every symbol.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the precision of one symbol.
    pub fn with_symbol(mut self, symbol: impl Into<String>, precision: u8) -> Self {
        self.precisions.insert(symbol.into(), precision);
        self
    }

    /// Set the fallback precision for unlisted symbols.
    pub fn with_default_precision(mut self, precision: u8) -> Self {
        self.default_precision = Some(precision);
        self
    }

    /// Precision for `symbol`, if known.
    pub fn precision(&self, symbol: &str) -> Option<u8> {
        self.precisions
            .get(symbol)
            .copied()
            .or(self.default_precision)
    }

    /// Encode a money literal into its fixed 16-byte record.
    pub fn to_bytes(&self, text: &str) -> Result<[u8; MONEY_WIDTH], EncodingError> {
        let literal = MoneyLiteral::parse(text)?;

        if literal.symbol.len() > SYMBOL_WIDTH {
            return Err(EncodingError::SymbolTooLong {
                symbol: literal.symbol.to_string(),
                max: SYMBOL_WIDTH,
            });
        }

        let precision = self
            .precision(literal.symbol)
            .ok_or_else(|| EncodingError::UnknownSymbol(literal.symbol.to_string()))?;
        let amount = literal.scaled(precision, text)?;

        let mut out = [0u8; MONEY_WIDTH];
        out[..8].copy_from_slice(&amount.to_le_bytes());
        out[8] = precision;
        out[9..9 + literal.symbol.len()].copy_from_slice(literal.symbol.as_bytes());
        Ok(out)
    }
}

/// A syntactically valid `<int>[.<frac>] <SYMBOL>` literal with insignificant
/// zeros already stripped.
#[derive(Debug, PartialEq, Eq)]
struct MoneyLiteral<'a> {
    integer: &'a str,
    fraction: &'a str,
    symbol: &'a str,
}

impl<'a> MoneyLiteral<'a> {
    fn parse(text: &'a str) -> Result<Self, EncodingError> {
        let invalid = || EncodingError::InvalidMoney(text.to_string());

        let (amount, symbol) = text.split_once(' ').ok_or_else(invalid)?;
        if symbol.is_empty()
            || !symbol
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'.')
        {
            return Err(invalid());
        }

        let (integer, fraction) = amount.split_once('.').unwrap_or((amount, ""));
        if integer.is_empty() || !is_digits(integer) || !is_digits(fraction) {
            return Err(invalid());
        }

        Ok(Self {
            integer: integer.trim_start_matches('0'),
            fraction: fraction.trim_end_matches('0'),
            symbol,
        })
    }

    /// Exact decimal scaling: no floating point is involved.
    fn scaled(&self, precision: u8, text: &str) -> Result<i64, EncodingError> {
        let precision = usize::from(precision);
        if self.fraction.len() > precision {
            return Err(EncodingError::PrecisionLoss {
                value: text.to_string(),
                precision: precision as u8,
            });
        }

        let padding = std::iter::repeat(b'0').take(precision - self.fraction.len());
        self.integer
            .bytes()
            .chain(self.fraction.bytes())
            .chain(padding)
            .try_fold(0i64, |acc, digit| {
                acc.checked_mul(10)?.checked_add(i64::from(digit - b'0'))
            })
            .ok_or_else(|| EncodingError::MoneyOverflow(text.to_string()))
    }
}

fn is_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scr() -> MoneyFormat {
        MoneyFormat::new().with_symbol("SCR", 9)
    }

    #[test]
    fn test_layout() {
        let bytes = scr().to_bytes("1.5 SCR").unwrap();
        assert_eq!(&bytes[..8], &1_500_000_000i64.to_le_bytes());
        assert_eq!(bytes[8], 9);
        assert_eq!(&bytes[9..], b"SCR\0\0\0\0");
    }

    #[test]
    fn test_zero_trimming() {
        let format = scr();
        let padded = format
            .to_bytes("00000000000000000000099.0000000000000000000000000 SCR")
            .unwrap();
        let plain = format.to_bytes("99.000 SCR").unwrap();
        assert_eq!(padded, plain);
        assert_eq!(format.to_bytes("99 SCR").unwrap(), plain);
        assert_eq!(format.to_bytes("99. SCR").unwrap(), plain);
    }

    #[test]
    fn test_overflow() {
        let result = scr().to_bytes("11111111111111111111111111111111111111 SCR");
        assert!(matches!(result, Err(EncodingError::MoneyOverflow(_))));
    }

    #[test]
    fn test_precision_loss() {
        let format = MoneyFormat::new().with_symbol("BTS", 5);
        assert!(format.to_bytes("1.00001 BTS").is_ok());
        assert!(format.to_bytes("1.0000100 BTS").is_ok());
        assert!(matches!(
            format.to_bytes("1.000001 BTS"),
            Err(EncodingError::PrecisionLoss { precision: 5, .. })
        ));
    }

    #[test]
    fn test_unknown_symbol_and_default() {
        assert!(matches!(
            scr().to_bytes("1 USD"),
            Err(EncodingError::UnknownSymbol(_))
        ));
        let bytes = scr().with_default_precision(4).to_bytes("1 USD").unwrap();
        assert_eq!(bytes[8], 4);
        assert_eq!(&bytes[..8], &10_000i64.to_le_bytes());
    }

    #[test]
    fn test_malformed() {
        let format = scr().with_default_precision(3);
        for text in ["", "SCR", "1.0", "1.0  SCR", ".5 SCR", "-1 SCR", "1e3 SCR", "1,5 SCR", "1.0 "] {
            assert!(
                matches!(format.to_bytes(text), Err(EncodingError::InvalidMoney(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_symbol_too_long() {
        let format = MoneyFormat::new().with_default_precision(3);
        assert!(matches!(
            format.to_bytes("1 ABCDEFGH"),
            Err(EncodingError::SymbolTooLong { max: SYMBOL_WIDTH, .. })
        ));
    }

    #[test]
    fn test_format_from_toml_shape() {
        let format: MoneyFormat =
            serde_json::from_str(r#"{"precisions":{"SCR":9},"default_precision":3}"#).unwrap();
        assert_eq!(format.precision("SCR"), Some(9));
        assert_eq!(format.precision("XYZ"), Some(3));
    }
}
