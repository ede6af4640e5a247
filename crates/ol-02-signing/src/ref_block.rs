//! Reference-block fields.
//!
//! A transaction names a recent block by the low 16 bits of its number and
//! four bytes of its id. The node rejects the transaction if that block is
//! not in its recent history, which bounds replay to one fork.

use crate::SigningError;

/// Low 16 bits of a block number.
pub fn ref_block_num(block_num: u32) -> u16 {
    (block_num & 0xffff) as u16
}

/// Bytes `4..8` of a hex block id, read little-endian.
pub fn ref_block_prefix(block_id: &str) -> Result<u32, SigningError> {
    let raw = hex::decode(block_id).map_err(|_| SigningError::InvalidBlockId(block_id.to_string()))?;
    let prefix: [u8; 4] = raw
        .get(4..8)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| SigningError::InvalidBlockId(block_id.to_string()))?;
    Ok(u32::from_le_bytes(prefix))
}
