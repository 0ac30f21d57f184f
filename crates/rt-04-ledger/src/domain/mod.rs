//! # Domain Layer (Inner Hexagon)
//!
//! Ledger state, permit encoding and errors. No compliance calls here.

pub mod entities;
pub mod errors;
pub mod permit;

pub use entities::*;
pub use errors::*;
pub use permit::*;
