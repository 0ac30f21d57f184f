//! # Permit (EIP-712 / EIP-2612)
//!
//! Typed-data encoding of signed approvals.
//!
//! ```text
//! domainSeparator = keccak256(DOMAIN_TYPEHASH ‖ keccak256(name) ‖ keccak256("1") ‖ chainId ‖ ledger)
//! structHash      = keccak256(PERMIT_TYPEHASH ‖ owner ‖ spender ‖ value ‖ nonce ‖ deadline)
//! digest          = keccak256(0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash)
//! ```
//!
//! Addresses are left-padded to 32-byte words, integers are big-endian words.

use serde::{Deserialize, Serialize};
use shared_crypto::{keccak256, keccak256_concat};
use shared_types::{u256_to_word, Address, Hash, U256};

/// EIP-712 domain type string.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Permit struct type string.
pub const PERMIT_TYPE: &str =
    "Permit(address owner,address spender,uint256 value,uint256 nonce,uint256 deadline)";

/// Domain version.
pub const PERMIT_VERSION: &str = "1";

/// `keccak256(DOMAIN_TYPE)`.
#[must_use]
pub fn domain_typehash() -> Hash {
    Hash(keccak256(DOMAIN_TYPE.as_bytes()))
}

/// `keccak256(PERMIT_TYPE)`.
#[must_use]
pub fn permit_typehash() -> Hash {
    Hash(keccak256(PERMIT_TYPE.as_bytes()))
}

/// Domain separator for a ledger called `name` at `verifying_contract` on
/// `chain_id`.
#[must_use]
pub fn domain_separator(name: &str, chain_id: u64, verifying_contract: Address) -> Hash {
    let typehash = domain_typehash();
    let name_hash = keccak256(name.as_bytes());
    let version_hash = keccak256(PERMIT_VERSION.as_bytes());
    let chain_word = u256_to_word(U256::from(chain_id));
    let contract_word = verifying_contract.to_word();
    Hash(keccak256_concat(&[
        typehash.as_bytes(),
        &name_hash,
        &version_hash,
        &chain_word,
        &contract_word,
    ]))
}

/// The signed content of a permit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitMessage {
    /// Token owner granting the allowance.
    pub owner: Address,
    /// Spender receiving the allowance.
    pub spender: Address,
    /// Allowance value (replaces any existing allowance).
    pub value: U256,
    /// Owner's nonce at signing time.
    pub nonce: U256,
    /// Last valid timestamp.
    pub deadline: u64,
}

impl PermitMessage {
    /// EIP-712 struct hash.
    #[must_use]
    pub fn struct_hash(&self) -> Hash {
        let typehash = permit_typehash();
        Hash(keccak256_concat(&[
            typehash.as_bytes(),
            &self.owner.to_word(),
            &self.spender.to_word(),
            &u256_to_word(self.value),
            &u256_to_word(self.nonce),
            &u256_to_word(U256::from(self.deadline)),
        ]))
    }

    /// Digest to sign under `domain_separator`.
    #[must_use]
    pub fn digest(&self, domain_separator: &Hash) -> Hash {
        Hash(keccak256_concat(&[
            &[0x19, 0x01],
            domain_separator.as_bytes(),
            self.struct_hash().as_bytes(),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permit_typehash_matches_eip2612() {
        assert_eq!(
            hex::encode(permit_typehash().as_bytes()),
            "6e71edae12b1b97f4d1f60370fef10105fa2faae0126114a169c64845d6126c9"
        );
    }

    #[test]
    fn test_domain_typehash_matches_eip712() {
        assert_eq!(
            hex::encode(domain_typehash().as_bytes()),
            "8b73c3c69bb8fe3d512ecc4cf759cc79239f7b179b0ffacaa9a75d522b39400f"
        );
    }

    #[test]
    fn test_domain_separator_depends_on_name_chain_and_contract() {
        let ledger = Address::from_low_u64(50);
        let base = domain_separator("Token", 1, ledger);
        assert_eq!(base, domain_separator("Token", 1, ledger));
        assert_ne!(base, domain_separator("Other", 1, ledger));
        assert_ne!(base, domain_separator("Token", 5, ledger));
        assert_ne!(base, domain_separator("Token", 1, Address::from_low_u64(51)));
    }

    #[test]
    fn test_digest_binds_every_field() {
        let sep = domain_separator("Token", 1, Address::from_low_u64(50));
        let msg = PermitMessage {
            owner: Address::from_low_u64(1),
            spender: Address::from_low_u64(2),
            value: U256::from(100),
            nonce: U256::zero(),
            deadline: 1_000,
        };
        let digest = msg.digest(&sep);

        let mut bumped = msg;
        bumped.nonce = U256::one();
        assert_ne!(digest, bumped.digest(&sep));

        let mut later = msg;
        later.deadline = 1_001;
        assert_ne!(digest, later.digest(&sep));

        let other_sep = domain_separator("Token", 2, Address::from_low_u64(50));
        assert_ne!(digest, msg.digest(&other_sep));
    }
}
