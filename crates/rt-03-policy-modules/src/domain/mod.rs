//! # Domain Layer (Inner Hexagon)
//!
//! Attribute keys, vesting schedules and module errors. Pure logic only.

pub mod attributes;
pub mod errors;
pub mod vesting;

pub use attributes::*;
pub use errors::*;
pub use vesting::*;
