//! # Attribute Keys
//!
//! Attributes are identified by the Keccak-256 hash of their name.

use serde::{Deserialize, Serialize};
use shared_crypto::keccak256;
use shared_types::Hash;
use std::fmt;

/// Name of the attribute the accreditation rule requires by default.
pub const ACCREDITED_INVESTOR: &str = "ACCREDITED_INVESTOR";

/// Identifier of a holder attribute.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct AttributeKey(pub Hash);

impl AttributeKey {
    /// Key for the attribute called `name`.
    #[must_use]
    pub fn named(name: &str) -> Self {
        Self(Hash(keccak256(name.as_bytes())))
    }

    /// `keccak256("ACCREDITED_INVESTOR")`.
    #[must_use]
    pub fn accredited_investor() -> Self {
        Self::named(ACCREDITED_INVESTOR)
    }
}

impl fmt::Debug for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttributeKey({})", self.0)
    }
}
