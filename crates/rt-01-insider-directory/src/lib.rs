//! # RT-01 Insider Directory
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Maintains the set of insider addresses (founders, executives, directors,
//! employees, agents) with their classification. Policy modules consult it
//! through the `InsiderLookup` port to grant insiders exemptions.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Zero address never registered | `domain/book.rs` - `InsiderBook::insert()` |
//! | `None` type never stored | `domain/book.rs` - `insert()`, `reclassify()` |
//! | Global list and per-type buckets mirror the primary map | `domain/book.rs` |
//! | Batch add is atomic | `service.rs` - `batch_add_insiders()` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use rt_01_insider_directory::prelude::*;
//!
//! let directory = InsiderDirectory::new(directory_address, owner);
//! directory.add_agent(&owner_ctx, agent)?;
//! directory.add_insider(&agent_ctx, founder, InsiderType::Founder)?;
//! assert!(directory.is_insider(founder));
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

// =============================================================================
// MODULES
// =============================================================================

pub mod domain;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::domain::{InsiderBook, InsiderEntry, InsiderError, InsiderType};
    pub use crate::ports::InsiderLookup;
    pub use crate::service::InsiderDirectory;
}

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 1;
