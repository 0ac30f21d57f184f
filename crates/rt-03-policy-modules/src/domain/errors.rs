//! # Policy Module Errors
//!
//! Typed errors for each module's native API. At the coordinator boundary
//! they convert into `ComplianceError`, keeping their category.

use rt_02_compliance::domain::ComplianceError;
use shared_types::{AccessError, Address, ErrorCategory};
use thiserror::Error;

/// Attribute oracle failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OracleError {
    /// The oracle could not answer.
    #[error("attribute oracle unavailable: {0}")]
    Unavailable(String),
}

/// Accreditation rule errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccreditationError {
    /// Oracle lookup failed.
    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// Role check failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Binding or call failure.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}

impl AccreditationError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Oracle(_) => ErrorCategory::InvariantViolation,
            Self::Access(e) => e.category(),
            Self::Compliance(e) => e.category(),
        }
    }
}

impl From<AccreditationError> for ComplianceError {
    fn from(err: AccreditationError) -> Self {
        match err {
            AccreditationError::Compliance(e) => e,
            AccreditationError::Access(e) => ComplianceError::Access(e),
            other => ComplianceError::Policy {
                module: crate::accreditation::MODULE_NAME.to_string(),
                category: other.category(),
                reason: other.to_string(),
            },
        }
    }
}

/// Vesting lock rule errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VestingError {
    /// Zero holder.
    #[error("zero address cannot hold a vesting schedule")]
    ZeroAddress,

    /// Zero locked amount.
    #[error("vesting schedule amount must be non-zero")]
    ZeroAmount,

    /// Empty schedule name.
    #[error("vesting schedule name must be non-empty")]
    EmptyName,

    /// Name already used for the holder.
    #[error("vesting schedule {name:?} already exists for {holder:?}")]
    ScheduleExists {
        /// Holder.
        holder: Address,
        /// Schedule name.
        name: String,
    },

    /// No schedule with that name for the holder.
    #[error("vesting schedule {name:?} not found for {holder:?}")]
    ScheduleNotFound {
        /// Holder.
        holder: Address,
        /// Schedule name.
        name: String,
    },

    /// Role check failed.
    #[error(transparent)]
    Access(#[from] AccessError),

    /// Binding or call failure.
    #[error(transparent)]
    Compliance(#[from] ComplianceError),
}

impl VestingError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Access(e) => e.category(),
            Self::Compliance(e) => e.category(),
            _ => ErrorCategory::InvariantViolation,
        }
    }
}

impl From<VestingError> for ComplianceError {
    fn from(err: VestingError) -> Self {
        match err {
            VestingError::Compliance(e) => e,
            VestingError::Access(e) => ComplianceError::Access(e),
            other => ComplianceError::Policy {
                module: crate::vesting_lock::MODULE_NAME.to_string(),
                category: other.category(),
                reason: other.to_string(),
            },
        }
    }
}
