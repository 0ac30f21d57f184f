//! # Insider Book
//!
//! The primary map plus its two projections (global list, per-type buckets).
//! Every mutation updates all three so they never disagree.

use super::entities::{InsiderEntry, InsiderType};
use super::errors::InsiderError;
use shared_types::Address;
use std::collections::HashMap;

/// Insider rows with global and per-type projections.
#[derive(Debug, Clone, Default)]
pub struct InsiderBook {
    types: HashMap<Address, InsiderType>,
    all: Vec<Address>,
    by_type: HashMap<InsiderType, Vec<Address>>,
}

impl InsiderBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `address` under `insider_type`.
    pub fn insert(
        &mut self,
        address: Address,
        insider_type: InsiderType,
    ) -> Result<(), InsiderError> {
        if address.is_zero() {
            return Err(InsiderError::ZeroAddress);
        }
        if !insider_type.is_insider() {
            return Err(InsiderError::InvalidInsiderType(insider_type as u8));
        }
        if self.types.contains_key(&address) {
            return Err(InsiderError::AlreadyInsider(address));
        }

        self.types.insert(address, insider_type);
        self.all.push(address);
        self.by_type.entry(insider_type).or_default().push(address);
        Ok(())
    }

    /// Removes `address`, returning its former classification.
    pub fn remove(&mut self, address: Address) -> Result<InsiderType, InsiderError> {
        let insider_type = self
            .types
            .remove(&address)
            .ok_or(InsiderError::NotInsider(address))?;

        swap_remove_address(&mut self.all, address);
        if let Some(bucket) = self.by_type.get_mut(&insider_type) {
            swap_remove_address(bucket, address);
        }
        Ok(insider_type)
    }

    /// Moves `address` to `new_type`. Returns the previous type, or `None`
    /// when the address already had `new_type` (nothing changes).
    pub fn reclassify(
        &mut self,
        address: Address,
        new_type: InsiderType,
    ) -> Result<Option<InsiderType>, InsiderError> {
        if !new_type.is_insider() {
            return Err(InsiderError::InvalidInsiderType(new_type as u8));
        }
        let current = self
            .types
            .get_mut(&address)
            .ok_or(InsiderError::NotInsider(address))?;
        if *current == new_type {
            return Ok(None);
        }

        let old_type = std::mem::replace(current, new_type);
        if let Some(bucket) = self.by_type.get_mut(&old_type) {
            swap_remove_address(bucket, address);
        }
        self.by_type.entry(new_type).or_default().push(address);
        Ok(Some(old_type))
    }

    /// Classification of `address`; `InsiderType::None` if absent.
    #[must_use]
    pub fn get(&self, address: Address) -> InsiderType {
        self.types.get(&address).copied().unwrap_or_default()
    }

    /// True if `address` is registered.
    #[must_use]
    pub fn contains(&self, address: Address) -> bool {
        self.types.contains_key(&address)
    }

    /// All insiders in registration order (modulo swap-removes).
    #[must_use]
    pub fn all(&self) -> &[Address] {
        &self.all
    }

    /// Insiders of one type.
    #[must_use]
    pub fn by_type(&self, insider_type: InsiderType) -> &[Address] {
        self.by_type
            .get(&insider_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Rows in global-list order.
    #[must_use]
    pub fn entries(&self) -> Vec<InsiderEntry> {
        self.all
            .iter()
            .map(|&address| InsiderEntry {
                address,
                insider_type: self.get(address),
            })
            .collect()
    }

    /// Number of insiders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// True if no insiders are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

fn swap_remove_address(list: &mut Vec<Address>, address: Address) {
    if let Some(pos) = list.iter().position(|a| *a == address) {
        list.swap_remove(pos);
    }
}
