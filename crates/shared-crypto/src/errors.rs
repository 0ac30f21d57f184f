//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    /// Signature is not 65 bytes
    #[error("Invalid signature length: expected 65, got {0}")]
    InvalidSignatureLength(usize),

    /// R or S outside [1, n-1], or not a valid encoding
    #[error("Invalid signature")]
    InvalidSignature,

    /// S in the upper half of the curve order (EIP-2)
    #[error("Malleable signature (high S value)")]
    MalleableSignature,

    /// v is not 0, 1, 27 or 28
    #[error("Invalid recovery ID: {0}")]
    InvalidRecoveryId(u8),

    /// Public key recovery failed
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}
