//! # Ports Layer (Middle Hexagon)
//!
//! - **Driven Ports (Outbound)**: `PolicyModule`, `LedgerView`
//! - No concrete implementations in this module

pub mod outbound;

pub use outbound::*;
