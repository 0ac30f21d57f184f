//! # Attribute Registry Adapter
//!
//! In-memory attribute oracle for wiring and testing.

use crate::domain::{AttributeKey, OracleError};
use crate::ports::AttributeOracle;
use parking_lot::RwLock;
use shared_types::Address;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory attribute oracle.
#[derive(Debug)]
pub struct InMemoryAttributeRegistry {
    attributes: RwLock<HashMap<Address, HashSet<AttributeKey>>>,
    available: AtomicBool,
}

impl Default for InMemoryAttributeRegistry {
    fn default() -> Self {
        Self {
            attributes: RwLock::new(HashMap::new()),
            available: AtomicBool::new(true),
        }
    }
}

impl InMemoryAttributeRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grants `key` to `holder`.
    pub fn grant(&self, holder: Address, key: AttributeKey) {
        self.attributes.write().entry(holder).or_default().insert(key);
    }

    /// Revokes `key` from `holder`. Returns false if it was not granted.
    pub fn revoke(&self, holder: Address, key: AttributeKey) -> bool {
        let mut attributes = self.attributes.write();
        let Some(keys) = attributes.get_mut(&holder) else {
            return false;
        };
        let removed = keys.remove(&key);
        if keys.is_empty() {
            attributes.remove(&holder);
        }
        removed
    }

    /// Simulates an outage: every lookup fails while unavailable.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }
}

impl AttributeOracle for InMemoryAttributeRegistry {
    fn has_attribute(&self, holder: Address, key: AttributeKey) -> Result<bool, OracleError> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(OracleError::Unavailable("registry offline".into()));
        }
        Ok(self
            .attributes
            .read()
            .get(&holder)
            .is_some_and(|keys| keys.contains(&key)))
    }
}
