//! # Shared Types Crate
//!
//! Value objects, call context, role sets and the error taxonomy shared by
//! every restricted-ledger subsystem.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: cross-subsystem types are defined here.
//! - **Explicit Capability**: identity travels in `CallContext::sender`;
//!   roles are checked against an `AccessControl` value, never global state.

pub mod access;
pub mod entities;
pub mod errors;

pub use access::AccessControl;
pub use entities::*;
pub use errors::*;
