//! # Domain Layer (Inner Hexagon)
//!
//! Pure insider bookkeeping. NO I/O, NO locking, NO role checks.

pub mod book;
pub mod entities;
pub mod errors;

pub use book::*;
pub use entities::*;
pub use errors::*;
