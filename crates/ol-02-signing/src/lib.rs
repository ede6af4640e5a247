//! # OL-02 Signing - Transaction Digest & Signer
//!
//! Binds a transaction to one chain and one set of keys.
//!
//! ## Security Properties
//!
//! - Digest commits to the chain id, so signatures do not replay across chains
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Only canonical compact signatures are emitted
//! - All keys are decoded before the first signature is produced

#![warn(clippy::all)]

pub mod errors;
pub mod ref_block;
pub mod signer;
pub mod wif;

// Re-exports
pub use errors::SigningError;
pub use ref_block::{ref_block_num, ref_block_prefix};
pub use signer::{is_canonical, sign_digest, SignedTransaction, CHAIN_ID_LEN, SIGNATURE_LEN};
pub use wif::PrivateKey;
