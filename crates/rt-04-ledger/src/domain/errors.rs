//! # Ledger Errors

use rt_02_compliance::domain::ComplianceError;
use shared_crypto::CryptoError;
use shared_types::{AccessError, Address, ErrorCategory, U256};
use thiserror::Error;

/// Errors from ledger operations. Every error leaves the ledger unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// Zero address supplied where an account is required.
    #[error("zero address not allowed")]
    ZeroAddress,

    /// Ledger is paused.
    #[error("ledger is paused")]
    Paused,

    /// Ledger is not paused.
    #[error("ledger is not paused")]
    NotPaused,

    /// Address is fully frozen.
    #[error("address is frozen: {0:?}")]
    AddressFrozen(Address),

    /// Unfrozen balance does not cover the amount.
    #[error("insufficient unfrozen balance for {holder:?}: available {available}, requested {requested}")]
    InsufficientUnfrozenBalance {
        /// Holder.
        holder: Address,
        /// Balance minus frozen amount.
        available: U256,
        /// Requested amount.
        requested: U256,
    },

    /// Full balance does not cover the amount.
    #[error("insufficient balance for {holder:?}: balance {balance}, requested {requested}")]
    InsufficientBalance {
        /// Holder.
        holder: Address,
        /// Full balance.
        balance: U256,
        /// Requested amount.
        requested: U256,
    },

    /// Allowance does not cover the amount.
    #[error("allowance of {spender:?} over {owner:?} is {allowance}, requested {requested}")]
    AllowanceExceeded {
        /// Token owner.
        owner: Address,
        /// Spender.
        spender: Address,
        /// Current allowance.
        allowance: U256,
        /// Requested amount.
        requested: U256,
    },

    /// Allowance increase overflows.
    #[error("allowance overflow")]
    AllowanceOverflow,

    /// Mint would overflow the total supply.
    #[error("total supply overflow")]
    SupplyOverflow,

    /// Freeze would exceed the balance.
    #[error("cannot freeze {requested} for {holder:?}: balance {balance}, already frozen {frozen}")]
    FreezeExceedsBalance {
        /// Holder.
        holder: Address,
        /// Full balance.
        balance: U256,
        /// Currently frozen.
        frozen: U256,
        /// Requested amount.
        requested: U256,
    },

    /// Unfreeze exceeds the frozen amount.
    #[error("cannot unfreeze {requested} for {holder:?}: only {frozen} frozen")]
    UnfreezeExceedsFrozen {
        /// Holder.
        holder: Address,
        /// Currently frozen.
        frozen: U256,
        /// Requested amount.
        requested: U256,
    },

    /// Token name or symbol empty.
    #[error("token metadata must be non-empty")]
    EmptyMetadata,

    /// Compliance verdict was false.
    #[error("transfer not permitted by compliance")]
    TransferNotPermitted,

    /// Permit deadline passed.
    #[error("permit expired: deadline {deadline}, now {now}")]
    PermitExpired {
        /// Signed deadline.
        deadline: u64,
        /// Block timestamp.
        now: u64,
    },

    /// Recovered signer is zero or not the owner.
    #[error("invalid permit signer")]
    InvalidSigner,

    /// Signature could not be decoded or recovered.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Coordinator or module failure.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),

    /// Role check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl LedgerError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TransferNotPermitted => ErrorCategory::AuthorizationDenied,
            Self::PermitExpired { .. } | Self::InvalidSigner | Self::Crypto(_) => {
                ErrorCategory::SignatureError
            }
            Self::Compliance(e) => e.category(),
            Self::Access(e) => e.category(),
            _ => ErrorCategory::InvariantViolation,
        }
    }
}
