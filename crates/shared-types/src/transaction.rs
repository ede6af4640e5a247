//! # Transaction
//!
//! An ordered list of operations bound to a reference block and an
//! expiration. The consensus encoding of this struct, prefixed by the chain
//! id, is what every signature commits to. Signatures themselves live on
//! `ol_02_signing::SignedTransaction`.

use crate::operations::{encode_empty_extensions, Operation};
use crate::time::Time;
use ol_01_encoding::{ConsensusEncode, Encoder, EncodingError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Low 16 bits of the reference block number.
    pub ref_block_num: u16,
    /// Bytes 4..8 of the reference block id, little-endian.
    pub ref_block_prefix: u32,
    pub expiration: Time,
    /// Executed, and signed, in this order.
    pub operations: Vec<Operation>,
    #[serde(default)]
    pub extensions: Vec<Value>,
}

impl Transaction {
    /// Unsigned transaction.
    pub fn new(
        ref_block_num: u16,
        ref_block_prefix: u32,
        expiration: Time,
        operations: Vec<Operation>,
    ) -> Self {
        Self {
            ref_block_num,
            ref_block_prefix,
            expiration,
            operations,
            extensions: Vec::new(),
        }
    }
}

impl ConsensusEncode for Transaction {
    fn encode(&self, encoder: &mut Encoder) -> Result<(), EncodingError> {
        encoder.encode_u16(self.ref_block_num);
        encoder.encode_u32(self.ref_block_prefix);
        encoder.encode(&self.expiration)?;
        encoder.encode(&self.operations)?;
        encode_empty_extensions(encoder, &self.extensions)
    }
}
