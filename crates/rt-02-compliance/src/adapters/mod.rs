//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the outbound ports, used for wiring and tests.

pub mod fixed_verdict;
pub mod ledger_view;

pub use fixed_verdict::FixedVerdictModule;
pub use ledger_view::InMemoryLedgerView;
