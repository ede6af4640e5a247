//! # OL-01 Encoding - Graphene Consensus Serialization
//!
//! Byte-exact writer for the binary form a Graphene node hashes when it
//! verifies a transaction signature. Every field is appended in declaration
//! order with no padding and no self-describing tags.
//!
//! ## Primitives
//!
//! | Value | Layout |
//! |-------|--------|
//! | `uint8` / `bool` | 1 byte |
//! | `uint16` / `uint32` / `uint64` / `int64` | little-endian, fixed width |
//! | varint | unsigned LEB128 |
//! | string / bytes | varint length, raw bytes |
//! | `optional<T>` | `0x00`, or `0x01` then `T` |
//! | `vector<T>` | varint count, then each `T` |
//! | legacy money | 16-byte fixed-point record, see [`money`] |

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod encoder;
pub mod errors;
pub mod money;

// Re-exports
pub use encoder::{encode_to_vec, ConsensusEncode, Encoder};
pub use errors::EncodingError;
pub use money::{MoneyFormat, MONEY_WIDTH, SYMBOL_WIDTH};
