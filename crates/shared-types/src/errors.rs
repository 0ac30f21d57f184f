//! # Error Types
//!
//! Error types and the error taxonomy shared across subsystems.

use crate::entities::Address;
use thiserror::Error;

/// Coarse classification every subsystem error maps onto.
///
/// Callers branch on the category; the concrete error carries the
/// caller-legible reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The compliance conjunction evaluated false.
    AuthorizationDenied,
    /// A local precondition failed (balance, freeze, pause, duplicates, ...).
    InvariantViolation,
    /// A module was consulted or (un)bound outside its binding contract.
    BindingError,
    /// Signed authorization was expired or did not verify.
    SignatureError,
    /// Caller lacks the required owner/agent role.
    AccessDenied,
}

/// Role check failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Caller is not the owner.
    #[error("caller {0:?} is not the owner")]
    NotOwner(Address),

    /// Caller is neither an agent nor the owner.
    #[error("caller {0:?} does not hold the agent role")]
    NotAgent(Address),

    /// Zero address supplied where an account is required.
    #[error("zero address is not a valid role holder")]
    ZeroAddress,

    /// Agent already registered.
    #[error("agent already registered: {0:?}")]
    AgentAlreadyExists(Address),

    /// Agent not registered.
    #[error("agent not registered: {0:?}")]
    AgentNotFound(Address),
}

impl AccessError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::NotOwner(_) | Self::NotAgent(_) => ErrorCategory::AccessDenied,
            _ => ErrorCategory::InvariantViolation,
        }
    }
}

/// Errors from parsing a hex address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseAddressError {
    /// Wrong number of hex digits.
    #[error("expected 40 hex digits, got {0}")]
    InvalidLength(usize),

    /// Non-hex characters.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
