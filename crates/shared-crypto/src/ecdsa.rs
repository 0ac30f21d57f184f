//! # ECDSA Signatures (secp256k1)
//!
//! Recoverable secp256k1 signatures as used by signed approvals.
//!
//! ## Security Properties
//!
//! - RFC 6979 deterministic nonces (no RNG dependency for signing)
//! - Low-S normalization on signing, low-S enforcement on recovery (EIP-2)
//! - Scalar range checks in constant time
//!
//! ## Use Cases
//!
//! - Recovering the signer of a permit digest
//! - Producing permit signatures off-chain (relayers, tests)

use crate::hashing::keccak256;
use crate::CryptoError;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use subtle::{Choice, ConstantTimeEq};

/// Ethereum-style address: last 20 bytes of keccak256(uncompressed pubkey).
pub type EthAddress = [u8; 20];

/// secp256k1 curve order n
/// n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_ORDER: [u8; 32] = [
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFE,
    0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36, 0x41, 0x41,
];

/// n/2, upper bound (inclusive) for canonical S values.
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Recoverable ECDSA signature (r, s, v), 65 bytes on the wire as `r || s || v`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecoverableSignature {
    /// R component (32 bytes)
    pub r: [u8; 32],
    /// S component (32 bytes)
    pub s: [u8; 32],
    /// Recovery ID (0, 1, 27, or 28)
    pub v: u8,
}

impl RecoverableSignature {
    /// Wire encoding `r || s || v`.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out[..32].copy_from_slice(&self.r);
        out[32..64].copy_from_slice(&self.s);
        out[64] = self.v;
        out
    }

    /// Parse the 65-byte wire encoding.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != 65 {
            return Err(CryptoError::InvalidSignatureLength(bytes.len()));
        }
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..64]);
        Ok(Self { r, s, v: bytes[64] })
    }
}

// =============================================================================
// RECOVERY
// =============================================================================

/// Recover the signer's address from a signature over a 32-byte prehash.
///
/// Rejects zero or out-of-range scalars, high S values and unknown recovery
/// ids before attempting recovery.
pub fn recover_address(
    prehash: &[u8; 32],
    signature: &RecoverableSignature,
) -> Result<EthAddress, CryptoError> {
    if !is_valid_scalar(&signature.r) || !is_valid_scalar(&signature.s) {
        return Err(CryptoError::InvalidSignature);
    }
    if !is_low_s(&signature.s) {
        return Err(CryptoError::MalleableSignature);
    }
    let recovery_id = parse_recovery_id(signature.v)?;

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let sig = Signature::from_slice(&sig_bytes).map_err(|_| CryptoError::InvalidSignature)?;

    let recovered = VerifyingKey::recover_from_prehash(prehash, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&recovered))
}

/// Derive the Ethereum address of a public key.
#[must_use]
pub fn address_from_verifying_key(key: &VerifyingKey) -> EthAddress {
    let encoded = key.to_encoded_point(false);
    // Skip the 0x04 uncompressed prefix
    let hash = keccak256(&encoded.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..]);
    address
}

// =============================================================================
// KEY PAIR
// =============================================================================

/// secp256k1 signing key pair. The inner `SigningKey` wipes its scalar on drop.
pub struct Secp256k1KeyPair {
    signing_key: SigningKey,
}

impl Secp256k1KeyPair {
    /// Generate random keypair.
    #[must_use]
    pub fn generate() -> Self {
        let signing_key = SigningKey::random(&mut rand::thread_rng());
        Self { signing_key }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32]) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self { signing_key })
    }

    /// Address controlled by this key.
    #[must_use]
    pub fn address(&self) -> EthAddress {
        address_from_verifying_key(self.signing_key.verifying_key())
    }

    /// Sign a 32-byte prehash (deterministic RFC 6979), normalized to low S.
    pub fn sign_prehash(&self, prehash: &[u8; 32]) -> Result<RecoverableSignature, CryptoError> {
        let (mut sig, mut recid) = self
            .signing_key
            .sign_prehash_recoverable(prehash)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

        if let Some(normalized) = sig.normalize_s() {
            sig = normalized;
            recid = RecoveryId::new(!recid.is_y_odd(), recid.is_x_reduced());
        }

        let bytes = sig.to_bytes();
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);

        Ok(RecoverableSignature {
            r,
            s,
            v: recid.to_byte() + 27,
        })
    }
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Parse recovery ID from v value. Valid: 0, 1, 27, 28.
fn parse_recovery_id(v: u8) -> Result<RecoveryId, CryptoError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(CryptoError::InvalidRecoveryId(v)),
    };
    RecoveryId::from_byte(id).ok_or(CryptoError::InvalidRecoveryId(v))
}

/// s <= n/2, compared in constant time.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s[i] < SECP256K1_HALF_ORDER[i]));
        let byte_greater = Choice::from(u8::from(s[i] > SECP256K1_HALF_ORDER[i]));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!greater).into()
}

/// Scalar in [1, n-1], checked in constant time.
fn is_valid_scalar(scalar: &[u8; 32]) -> bool {
    let mut is_zero = Choice::from(1u8);
    for &byte in scalar {
        is_zero &= byte.ct_eq(&0u8);
    }

    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);
    for i in 0..32 {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(scalar[i] < SECP256K1_ORDER[i]));
        let byte_greater = Choice::from(u8::from(scalar[i] > SECP256K1_ORDER[i]));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!is_zero & less).into()
}

/// s' = n - s
#[cfg(test)]
fn invert_s(s: &[u8; 32]) -> [u8; 32] {
    let mut result = [0u8; 32];
    let mut borrow: i32 = 0;

    for i in (0..32).rev() {
        let diff = i32::from(SECP256K1_ORDER[i]) - i32::from(s[i]) - borrow;
        if diff < 0 {
            result[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            result[i] = diff as u8;
            borrow = 0;
        }
    }

    result
}
