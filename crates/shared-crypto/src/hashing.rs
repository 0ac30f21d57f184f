//! # Keccak-256 Hashing
//!
//! The hash behind addresses, EIP-712 type hashes and domain separators.

use sha3::{Digest, Keccak256};

/// Keccak-256 output (256-bit).
pub type Hash = [u8; 32];

/// Hash data with Keccak-256 (one-shot).
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Hash the concatenation of several inputs without an intermediate buffer.
#[must_use]
pub fn keccak256_concat(inputs: &[&[u8]]) -> Hash {
    let mut hasher = Keccak256::new();
    for input in inputs {
        hasher.update(input);
    }
    hasher.finalize().into()
}
