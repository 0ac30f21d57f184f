//! # RT-04 Ledger - Restricted Balance State Machine
//!
//! **Subsystem ID:** 4
//!
//! ## Purpose
//!
//! Holds balances, allowances, freezes and permit nonces of one restricted
//! token. Every balance change is first put to the Compliance Coordinator;
//! completed changes are reported back to it afterwards.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Sum of balances equals total supply | `domain/entities.rs` - `LedgerState` |
//! | Frozen amount never exceeds balance | `domain/entities.rs` - `freeze_tokens()`, `release_shortfall()` |
//! | No balance change without a compliance verdict | `service.rs` - `ensure_compliant()` |
//! | Rejected operations change nothing | `service.rs` - validate before apply |
//! | Batches are all or nothing | `service.rs` - `run_batch()` |
//! | Each permit nonce is consumed once | `service.rs` - `authorize()` |
//!
//! ## Outbound Dependencies
//!
//! | Dependency | Purpose |
//! |------------|---------|
//! | `ComplianceCoordinator` | Verdicts and post-change notifications |
//! | `shared_crypto` | Keccak hashing and secp256k1 signer recovery |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rt_04_ledger::prelude::*;
//!
//! let mut ledger = RestrictedLedger::initialize(address, owner, LedgerConfig::from_env(), coordinator, &block)?;
//! ledger.add_agent(&owner_ctx, agent)?;
//! ledger.mint(&agent_ctx, investor, amount)?;
//! ledger.transfer(&investor_ctx, other, amount)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod config;
pub mod domain;
pub mod events;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{
        domain_separator, Account, LedgerError, LedgerState, PermitMessage, DOMAIN_TYPE,
        PERMIT_TYPE, PERMIT_VERSION,
    };

    // Config
    pub use crate::config::LedgerConfig;

    // Events
    pub use crate::events::LedgerEvent;

    // Service
    pub use crate::service::RestrictedLedger;
}

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 4;
