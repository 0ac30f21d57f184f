//! # Adapters Layer (Outer Hexagon)

pub mod attribute_registry;

pub use attribute_registry::InMemoryAttributeRegistry;
