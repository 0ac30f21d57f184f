//! # RT-02 Compliance - Transfer Policy Pipeline
//!
//! **Subsystem ID:** 2
//!
//! ## Purpose
//!
//! Aggregates pluggable policy modules into one verdict: a balance change is
//! allowed only if every bound module allows it. Also relays post-mutation
//! notifications from the bound ledger to the modules, and forwards
//! module-specific administration from the coordinator owner.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Module bound on both sides or neither | `service.rs` - `add_module()`, `remove_module()` |
//! | At most `max_modules` modules | `service.rs` - `add_module()` |
//! | Verdict is the conjunction of module verdicts | `service.rs` - `can_transfer()` |
//! | Only the bound token may notify | `service.rs` - `ensure_bound_token()` |
//! | Modules act only for bound coordinators | `domain/bindings.rs` - `ModuleBindings` |
//! | No nested mutating entry | `service.rs` - `ReentrancyGuard` |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `PolicyModule` | Verdicts, action hooks, module administration |
//! | `LedgerView` | Balances consulted by modules |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rt_02_compliance::prelude::*;
//!
//! let coordinator = ComplianceCoordinator::new(address, owner, CoordinatorConfig::default());
//! coordinator.add_module(&owner_ctx, module)?;
//! let allowed = coordinator.can_transfer(from, to, amount, &ledger, now)?;
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain
    pub use crate::domain::{ComplianceError, ModuleBindings, ModuleCall, INITIALIZE_MODULE};

    // Ports
    pub use crate::ports::{LedgerView, ModuleEnv, PolicyModule};

    // Adapters
    pub use crate::adapters::{FixedVerdictModule, InMemoryLedgerView};

    // Events
    pub use crate::events::ComplianceEvent;

    // Service
    pub use crate::service::{ComplianceCoordinator, CoordinatorConfig};
}

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 2;
