//! # Transaction Signer
//!
//! Serialize → digest → sign, each stage terminal on failure:
//!
//! 1. the transaction is consensus-encoded,
//! 2. `digest = sha256(chain_id ‖ bytes)`,
//! 3. every key produces a compact recoverable signature over `digest`.
//!
//! Nonces follow RFC 6979, so signing is a pure function of the transaction,
//! chain id and keys.

use crate::wif::PrivateKey;
use crate::SigningError;
use secp256k1::{ecdsa::RecoverableSignature, Message, Secp256k1, SignOnly};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::Transaction;
use tracing::debug;

/// Decoded chain id length.
pub const CHAIN_ID_LEN: usize = 32;

/// Compact signature length: header byte followed by `r ‖ s`.
pub const SIGNATURE_LEN: usize = 65;

/// Retry budget for finding a canonical signature.
const MAX_CANONICAL_ATTEMPTS: u32 = 256;

/// Header for a compressed-key compact signature.
const COMPACT_HEADER: u8 = 27 + 4;

/// A transaction together with the signatures over its digest.
///
/// Serializes to the node's flat JSON form: the transaction fields plus a
/// `signatures` array. Signatures are only ever appended by [`sign`].
///
/// [`sign`]: SignedTransaction::sign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedTransaction {
    #[serde(flatten)]
    transaction: Transaction,
    /// Hex compact signatures in signing-key order.
    #[serde(default)]
    signatures: Vec<String>,
}

impl SignedTransaction {
    /// Wrap an unsigned transaction.
    pub fn new(transaction: Transaction) -> Self {
        Self {
            transaction,
            signatures: Vec::new(),
        }
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    pub fn into_transaction(self) -> Transaction {
        self.transaction
    }

    /// Consensus bytes of the wrapped transaction.
    pub fn serialize(&self) -> Result<Vec<u8>, SigningError> {
        Ok(ol_01_encoding::encode_to_vec(&self.transaction)?)
    }

    /// SHA-256 over the raw chain id followed by the serialized transaction.
    pub fn digest(&self, chain_id: &str) -> Result<[u8; 32], SigningError> {
        let mut message = decode_chain_id(chain_id)?.to_vec();
        message.extend_from_slice(&self.serialize()?);
        debug!(message = %hex::encode(&message), "Digest pre-image");
        Ok(Sha256::digest(&message).into())
    }

    /// Sign with every key in `wifs`, appending one hex signature per key in
    /// the same order.
    ///
    /// Nothing is appended unless every key decodes and signs.
    pub fn sign<S: AsRef<str>>(&mut self, wifs: &[S], chain_id: &str) -> Result<(), SigningError> {
        let digest = self.digest(chain_id)?;

        let keys = wifs
            .iter()
            .map(|wif| PrivateKey::from_wif(wif.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let secp = Secp256k1::signing_only();
        let signatures = keys
            .iter()
            .map(|key| sign_digest(&secp, &digest, key).map(hex::encode))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            signatures = signatures.len(),
            operations = self.transaction.operations.len(),
            "Signed transaction"
        );
        self.signatures.extend(signatures);
        Ok(())
    }
}

fn decode_chain_id(chain_id: &str) -> Result<[u8; CHAIN_ID_LEN], SigningError> {
    let raw =
        hex::decode(chain_id).map_err(|_| SigningError::InvalidChainId(chain_id.to_string()))?;
    let actual = raw.len();
    raw.try_into().map_err(|_| SigningError::ChainIdLength {
        expected: CHAIN_ID_LEN,
        actual,
    })
}

/// Produce a canonical compact signature over `digest`.
///
/// The first attempt is plain RFC 6979. Later attempts feed
/// `sha256(digest ‖ attempt)` as RFC 6979 extra data, which picks a fresh
/// deterministic nonce each time.
pub fn sign_digest(
    secp: &Secp256k1<SignOnly>,
    digest: &[u8; 32],
    key: &PrivateKey,
) -> Result<[u8; SIGNATURE_LEN], SigningError> {
    let message = Message::from_digest(*digest);

    for attempt in 0..MAX_CANONICAL_ATTEMPTS {
        let signature = if attempt == 0 {
            secp.sign_ecdsa_recoverable(&message, key.secret())
        } else {
            let mut extra = Sha256::new();
            extra.update(digest);
            extra.update(attempt.to_le_bytes());
            let extra: [u8; 32] = extra.finalize().into();
            secp.sign_ecdsa_recoverable_with_noncedata(&message, key.secret(), &extra)
        };

        let compact = to_compact(&signature);
        if is_canonical(&compact) {
            return Ok(compact);
        }
        debug!(attempt, "Discarded non-canonical signature");
    }

    Err(SigningError::NonCanonical(MAX_CANONICAL_ATTEMPTS))
}

fn to_compact(signature: &RecoverableSignature) -> [u8; SIGNATURE_LEN] {
    let (recovery_id, rs) = signature.serialize_compact();
    let mut out = [0u8; SIGNATURE_LEN];
    // recovery ids are 0..=3
    out[0] = COMPACT_HEADER + recovery_id.to_i32() as u8;
    out[1..].copy_from_slice(&rs);
    out
}

/// Graphene's canonical form: neither `r` nor `s` is negative as a DER
/// integer, and neither carries a redundant leading zero byte.
pub fn is_canonical(signature: &[u8; SIGNATURE_LEN]) -> bool {
    let c = signature;
    c[1] & 0x80 == 0
        && !(c[1] == 0 && c[2] & 0x80 == 0)
        && c[33] & 0x80 == 0
        && !(c[33] == 0 && c[34] & 0x80 == 0)
}
