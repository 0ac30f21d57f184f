//! # Ports Layer
//!
//! - **Inbound**: `InsiderLookup`, the read interface consumed by policy modules.

pub mod inbound;

pub use inbound::*;
