//! # Insider Directory Errors

use shared_types::{AccessError, Address, ErrorCategory};
use thiserror::Error;

/// Errors from directory administration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InsiderError {
    /// Zero address supplied.
    #[error("zero address cannot be registered as insider")]
    ZeroAddress,

    /// Raw type outside the taxonomy, or `None` where a classification is required.
    #[error("invalid insider type: {0}")]
    InvalidInsiderType(u8),

    /// Address already registered.
    #[error("address already registered as insider: {0:?}")]
    AlreadyInsider(Address),

    /// Address not registered.
    #[error("address is not an insider: {0:?}")]
    NotInsider(Address),

    /// Role check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl InsiderError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Access(e) => e.category(),
            _ => ErrorCategory::InvariantViolation,
        }
    }
}
