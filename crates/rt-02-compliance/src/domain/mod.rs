//! # Domain Layer (Inner Hexagon)
//!
//! Binding bookkeeping, module calls and the compliance error taxonomy.
//! No locking and no calls into other components.

pub mod bindings;
pub mod calls;
pub mod errors;

pub use bindings::*;
pub use calls::*;
pub use errors::*;
