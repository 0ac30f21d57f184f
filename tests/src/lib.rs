//! # Restricted Ledger Test Suite
//!
//! Unified test crate for behavior that spans several subsystems.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Fully wired deployment (directory, oracle, modules, coordinator, ledger)
//! └── integration/
//!     ├── flows.rs      # End-to-end scenarios through the public APIs
//!     └── properties.rs # proptest sequences over the ledger invariants
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p rt-tests
//! cargo test -p rt-tests integration::properties
//! cargo bench -p rt-tests
//! ```

pub mod fixtures;
pub mod integration;
