//! Wallet Import Format private keys.
//!
//! `base58(0x80 ‖ secret[32] ‖ [0x01] ‖ checksum[4])`, where the checksum is
//! the first four bytes of `sha256(sha256(payload))`.

use crate::SigningError;
use secp256k1::{PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const VERSION: u8 = 0x80;
const COMPRESSED_FLAG: u8 = 0x01;
const CHECKSUM_LEN: usize = 4;

/// A secp256k1 signing key decoded from WIF.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PrivateKey(SecretKey);

impl PrivateKey {
    /// Decode a WIF string.
    pub fn from_wif(wif: &str) -> Result<Self, SigningError> {
        let raw = bs58::decode(wif.trim())
            .into_vec()
            .map_err(|_| SigningError::InvalidWif("not base58"))?;
        if raw.len() < CHECKSUM_LEN {
            return Err(SigningError::InvalidWif("too short"));
        }

        let (payload, checksum) = raw.split_at(raw.len() - CHECKSUM_LEN);
        let hash = Sha256::digest(Sha256::digest(payload));
        if hash[..CHECKSUM_LEN] != *checksum {
            return Err(SigningError::InvalidWif("checksum mismatch"));
        }

        let secret = match payload {
            [VERSION, secret @ ..] if secret.len() == 32 => secret,
            [VERSION, secret @ .., COMPRESSED_FLAG] if secret.len() == 32 => secret,
            [VERSION, ..] => return Err(SigningError::InvalidWif("bad payload length")),
            _ => return Err(SigningError::InvalidWif("bad version byte")),
        };

        SecretKey::from_slice(secret)
            .map(Self)
            .map_err(|_| SigningError::InvalidWif("secret out of range"))
    }

    /// Matching public key.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_key(&Secp256k1::signing_only(), &self.0)
    }

    pub(crate) fn secret(&self) -> &SecretKey {
        &self.0
    }
}

impl FromStr for PrivateKey {
    type Err = SigningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wif(s)
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PrivateKey").field(&"..").finish()
    }
}
