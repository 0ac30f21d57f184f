//! Cross-subsystem scenarios.

pub mod flows;
pub mod properties;
