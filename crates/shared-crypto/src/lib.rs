//! # Shared Crypto - Signature Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | Keccak-256 | Type hashes, domain separators, addresses |
//! | `ecdsa` | secp256k1 | Signed approvals (sign + recover) |
//!
//! ## Security Properties
//!
//! - **secp256k1**: RFC 6979 deterministic, low-S normalization (EIP-2)
//! - **Recovery**: scalar range checks are constant-time

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ecdsa;
pub mod errors;
pub mod hashing;

// Re-exports
pub use ecdsa::{
    address_from_verifying_key, recover_address, EthAddress, RecoverableSignature,
    Secp256k1KeyPair,
};
pub use errors::CryptoError;
pub use hashing::{keccak256, keccak256_concat};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
