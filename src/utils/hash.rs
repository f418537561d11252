//! Content hashing and freshness checks.

use std::{fs, path::Path};

/// 64-bit digest of `bytes` (truncated blake3).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

/// True when `path` already holds exactly `bytes`.
pub fn is_unchanged(path: &Path, bytes: &[u8]) -> bool {
    fs::metadata(path).is_ok_and(|meta| meta.len() == bytes.len() as u64)
        && fs::read(path).is_ok_and(|existing| existing == bytes)
}
