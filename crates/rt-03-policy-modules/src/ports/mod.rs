//! # Ports Layer (Middle Hexagon)
//!
//! - **Driven Ports (Outbound)**: `AttributeOracle`

pub mod outbound;

pub use outbound::*;
