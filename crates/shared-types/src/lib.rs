//! # Shared Types Crate
//!
//! Graphene domain values used by every client crate.
//!
//! ## Contents
//!
//! | Module | Types |
//! |--------|-------|
//! | `object_id` | `ObjectId` (`space.type.instance`) |
//! | `asset` | `AssetAmount`, `Price` |
//! | `time` | `Time` (UTC, second precision) |
//! | `operations` | `OpType`, `Operation` and its variants |
//! | `transaction` | `Transaction` |
//!
//! Each value has two external forms: the JSON a node speaks, and the
//! consensus encoding (via [`ol_01_encoding::ConsensusEncode`]) that
//! signatures are computed over.

pub mod asset;
pub mod errors;
pub mod flex;
pub mod object_id;
pub mod operations;
pub mod time;
pub mod transaction;

pub use asset::{AssetAmount, Price};
pub use errors::*;
pub use object_id::ObjectId;
pub use operations::{
    LimitOrderCancelOperation, LimitOrderCreateOperation, Memo, OpType, Operation,
    TransferOperation,
};
pub use time::{Time, TIME_FORMAT};
pub use transaction::Transaction;
