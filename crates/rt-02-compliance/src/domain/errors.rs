//! # Compliance Errors

use shared_types::{AccessError, Address, ErrorCategory};
use thiserror::Error;

/// Errors raised by the coordinator and by policy modules at the
/// coordinator boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComplianceError {
    /// Zero address supplied.
    #[error("zero address is not a valid module, coordinator or token")]
    ZeroAddress,

    /// Module is already in the coordinator's list.
    #[error("module already added: {0:?}")]
    ModuleAlreadyAdded(Address),

    /// Module is not bound to this coordinator.
    #[error("module not bound: {0:?}")]
    ModuleNotBound(Address),

    /// Module list is full.
    #[error("module limit reached: {limit}")]
    ModuleLimitReached {
        /// Configured maximum.
        limit: usize,
    },

    /// Non plug-and-play module refused to bind.
    #[error("module {0:?} refuses to bind to this coordinator")]
    CannotBind(Address),

    /// Module already bound to the coordinator.
    #[error("module already bound to coordinator {0:?}")]
    ComplianceAlreadyBound(Address),

    /// Module consulted on behalf of a coordinator it is not bound to.
    #[error("module not bound to coordinator {0:?}")]
    ComplianceNotBound(Address),

    /// Only the coordinator itself may bind or unbind itself.
    #[error("only coordinator {expected:?} may (un)bind itself, caller was {actual:?}")]
    BindingCallerMismatch {
        /// The coordinator being (un)bound.
        expected: Address,
        /// The actual caller.
        actual: Address,
    },

    /// Module has not been initialized for the coordinator.
    #[error("module not initialized for coordinator {0:?}")]
    NotInitialized(Address),

    /// Module already initialized for the coordinator.
    #[error("module already initialized for coordinator {0:?}")]
    AlreadyInitialized(Address),

    /// A token is already bound.
    #[error("token already bound: {0:?}")]
    TokenAlreadyBound(Address),

    /// The given token is not the bound token.
    #[error("token not bound: {0:?}")]
    TokenNotBound(Address),

    /// Caller may not bind or unbind the token.
    #[error("caller {0:?} may not (un)bind the token")]
    TokenBindingDenied(Address),

    /// Token-only hook called by someone else.
    #[error("only the bound token may call this hook, caller was {0:?}")]
    OnlyBoundToken(Address),

    /// Nested mutating entry into the coordinator.
    #[error("reentrant call into compliance coordinator")]
    Reentrancy,

    /// Module does not recognise the function.
    #[error("unknown module function: {0}")]
    UnknownFunction(String),

    /// Module call arguments failed to decode.
    #[error("invalid module call arguments: {0}")]
    InvalidArguments(String),

    /// Module-specific failure surfaced through the coordinator.
    #[error("policy module {module} failed: {reason}")]
    Policy {
        /// Module name.
        module: String,
        /// Category of the underlying failure.
        category: ErrorCategory,
        /// Human-readable reason.
        reason: String,
    },

    /// Role check failed.
    #[error(transparent)]
    Access(#[from] AccessError),
}

impl ComplianceError {
    /// Category of this error.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Access(e) => e.category(),
            Self::Policy { category, .. } => *category,
            Self::ZeroAddress
            | Self::ModuleAlreadyAdded(_)
            | Self::ModuleLimitReached { .. }
            | Self::AlreadyInitialized(_)
            | Self::UnknownFunction(_)
            | Self::InvalidArguments(_) => ErrorCategory::InvariantViolation,
            Self::ModuleNotBound(_)
            | Self::CannotBind(_)
            | Self::ComplianceAlreadyBound(_)
            | Self::ComplianceNotBound(_)
            | Self::BindingCallerMismatch { .. }
            | Self::NotInitialized(_)
            | Self::TokenAlreadyBound(_)
            | Self::TokenNotBound(_)
            | Self::TokenBindingDenied(_)
            | Self::OnlyBoundToken(_)
            | Self::Reentrancy => ErrorCategory::BindingError,
        }
    }
}
