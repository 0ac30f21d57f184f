//! # RT-03 Policy Modules
//!
//! **Subsystem ID:** 3
//!
//! ## Purpose
//!
//! Concrete transfer rules plugged into the Compliance Coordinator:
//!
//! | Module | Location | Rule |
//! |--------|----------|------|
//! | Accreditation | `accreditation.rs` | Recipient carries the required attribute, or is an exempt insider |
//! | Vesting Lock | `vesting_lock.rs` | Sender keeps at least the still-locked amount after the transfer |
//!
//! ## Outbound Dependencies
//!
//! | Subsystem | Trait | Purpose |
//! |-----------|-------|---------|
//! | external | `AttributeOracle` | Holder attributes |
//! | 1 (Insider Directory) | `InsiderLookup` | Insider exemption |
//! | 2 (Compliance) | `LedgerView` | Balances during vesting checks |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rt_03_policy_modules::prelude::*;
//!
//! let accreditation = Arc::new(
//!     AccreditationModule::new(address, owner, oracle, AccreditationConfig::default())
//!         .with_directory(directory),
//! );
//! coordinator.add_module(&owner_ctx, accreditation)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod accreditation;
pub mod adapters;
pub mod domain;
pub mod ports;
pub mod vesting_lock;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::accreditation::{AccreditationConfig, AccreditationModule};
    pub use crate::adapters::InMemoryAttributeRegistry;
    pub use crate::domain::{
        AccreditationError, AttributeKey, OracleError, VestingBook, VestingError, VestingSchedule,
        ACCREDITED_INVESTOR,
    };
    pub use crate::ports::AttributeOracle;
    pub use crate::vesting_lock::{VestingConfig, VestingLockModule, DEFAULT_VESTING_DURATION_SECS};
}

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 3;
