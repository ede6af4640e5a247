//! # Consensus Encoder
//!
//! Append-only writer for the Graphene binary serialization that transaction
//! signatures are computed over. There is no decode direction: the client
//! only ever produces these bytes.

use crate::money::MoneyFormat;
use crate::EncodingError;
use std::sync::Arc;

/// A value with a canonical consensus byte layout.
pub trait ConsensusEncode {
    /// Append this value to `encoder`.
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError>;
}

/// Growing byte buffer for consensus serialization.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    buf: Vec<u8>,
    money: Arc<MoneyFormat>,
}

impl Encoder {
    /// Create an encoder with an empty money table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder that resolves money precisions through `money`.
    pub fn with_money_format(money: Arc<MoneyFormat>) -> Self {
        Self {
            buf: Vec::new(),
            money,
        }
    }

    /// LEB128 unsigned varint: 7 data bits per byte, low group first.
    pub fn encode_uvarint(&mut self, mut value: u64) {
        while value >= 0x80 {
            self.buf.push((value as u8 & 0x7f) | 0x80);
            value >>= 7;
        }
        self.buf.push(value as u8);
    }

    /// Single byte.
    pub fn encode_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Little-endian `uint16`.
    pub fn encode_u16(&mut self, value: u16) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian `uint32`.
    pub fn encode_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian `uint64`.
    pub fn encode_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Little-endian `int64`.
    pub fn encode_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// `0x00` or `0x01`.
    pub fn encode_bool(&mut self, value: bool) {
        self.buf.push(u8::from(value));
    }

    /// Length-prefixed byte string.
    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        self.encode_uvarint(bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    /// Length-prefixed UTF-8 string.
    pub fn encode_str(&mut self, value: &str) {
        self.encode_bytes(value.as_bytes());
    }

    /// Fixed-point money literal, e.g. `"99.000 SCR"`.
    ///
    /// Writes nothing when the literal is rejected.
    pub fn encode_money(&mut self, text: &str) -> Result<(), EncodingError> {
        let record = self.money.to_bytes(text)?;
        self.buf.extend_from_slice(&record);
        Ok(())
    }

    /// Append any [`ConsensusEncode`] value.
    pub fn encode<T: ConsensusEncode + ?Sized>(&mut self, value: &T) -> Result<(), EncodingError> {
        value.encode(self)
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the encoder, returning its buffer.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

/// Encode `value` into a fresh buffer.
///
/// On error the partial buffer is dropped, so a caller either gets the whole
/// byte stream or nothing.
pub fn encode_to_vec<T: ConsensusEncode + ?Sized>(value: &T) -> Result<Vec<u8>, EncodingError> {
    let mut encoder = Encoder::new();
    encoder.encode(value)?;
    Ok(encoder.into_bytes())
}

// =============================================================================
// PRIMITIVE IMPLEMENTATIONS
// =============================================================================

impl ConsensusEncode for u8 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_u8(*self);
        Ok(())
    }
}

impl ConsensusEncode for u16 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_u16(*self);
        Ok(())
    }
}

impl ConsensusEncode for u32 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_u32(*self);
        Ok(())
    }
}

impl ConsensusEncode for u64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_u64(*self);
        Ok(())
    }
}

impl ConsensusEncode for i64 {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_i64(*self);
        Ok(())
    }
}

impl ConsensusEncode for bool {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_bool(*self);
        Ok(())
    }
}

impl ConsensusEncode for str {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_str(self);
        Ok(())
    }
}

impl ConsensusEncode for String {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_str(self);
        Ok(())
    }
}

/// `optional<T>`: presence byte, then the value.
impl<T: ConsensusEncode> ConsensusEncode for Option<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        match self {
            Some(value) => {
                encoder.encode_u8(1);
                value.encode(encoder)
            }
            None => {
                encoder.encode_u8(0);
                Ok(())
            }
        }
    }
}

/// `vector<T>`: varint count, then each element in order.
impl<T: ConsensusEncode> ConsensusEncode for [T] {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_uvarint(self.len() as u64);
        self.iter().try_for_each(|item| item.encode(encoder))
    }
}

impl<T: ConsensusEncode> ConsensusEncode for Vec<T> {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        self.as_slice().encode(encoder)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varint(value: u64) -> String {
        let mut encoder = Encoder::new();
        encoder.encode_uvarint(value);
        hex::encode(encoder.as_bytes())
    }

    #[test]
    fn test_uvarint() {
        assert_eq!(varint(0), "00");
        assert_eq!(varint(1), "01");
        assert_eq!(varint(127), "7f");
        assert_eq!(varint(128), "8001");
        assert_eq!(varint(300), "ac02");
        assert_eq!(varint(22805), "95b201");
        assert_eq!(varint(974337), "81bc3b");
        assert_eq!(varint(u64::MAX), "ffffffffffffffffff01");
    }

    #[test]
    fn test_fixed_width_little_endian() {
        let mut encoder = Encoder::new();
        encoder.encode_u16(47376);
        encoder.encode_u32(1434635172);
        encoder.encode_i64(10420);
        encoder.encode_bool(true);
        assert_eq!(
            hex::encode(encoder.as_bytes()),
            "10b9a4cb8255b42800000000000001"
        );
    }

    #[test]
    fn test_string_is_length_prefixed() {
        let mut encoder = Encoder::new();
        encoder.encode_str("1.2.3");
        assert_eq!(encoder.as_bytes(), b"\x051.2.3");
    }

    #[test]
    fn test_option_and_vec() {
        let mut encoder = Encoder::new();
        encoder.encode(&None::<u8>).unwrap();
        encoder.encode(&Some(7u8)).unwrap();
        encoder.encode(&vec![1u16, 2u16]).unwrap();
        assert_eq!(hex::encode(encoder.as_bytes()), "0001070201000200");
    }

    #[test]
    fn test_failed_money_writes_nothing() {
        let money = Arc::new(MoneyFormat::new().with_symbol("SCR", 9));
        let mut encoder = Encoder::with_money_format(money);
        encoder.encode_u8(0xaa);

        let result = encoder.encode_money("11111111111111111111111111111111111111 SCR");
        assert!(result.is_err());
        assert_eq!(encoder.as_bytes(), &[0xaa]);

        encoder.encode_money("99.000 SCR").unwrap();
        assert_eq!(encoder.len(), 1 + crate::MONEY_WIDTH);
    }

    struct Failing;

    impl ConsensusEncode for Failing {
        fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
            encoder.encode_u32(0xdead_beef);
            Err(EncodingError::Unsupported("test"))
        }
    }

    #[test]
    fn test_encode_to_vec_discards_partial_output() {
        assert_eq!(encode_to_vec(&5u8).unwrap(), vec![5]);
        assert_eq!(
            encode_to_vec(&vec![Failing]),
            Err(EncodingError::Unsupported("test"))
        );
    }
}
