//! # Ledger View Adapter
//!
//! In-memory balance table implementing `LedgerView` for module tests.

use crate::ports::LedgerView;
use parking_lot::RwLock;
use shared_types::{Address, U256};
use std::collections::HashMap;

/// In-memory ledger view for testing.
#[derive(Debug, Default)]
pub struct InMemoryLedgerView {
    address: Address,
    balances: RwLock<HashMap<Address, U256>>,
}

impl InMemoryLedgerView {
    /// Create an empty view for the ledger at `address`.
    #[must_use]
    pub fn new(address: Address) -> Self {
        Self {
            address,
            balances: RwLock::new(HashMap::new()),
        }
    }

    /// Builder-style balance setter.
    #[must_use]
    pub fn with_balance(self, holder: Address, balance: U256) -> Self {
        self.set_balance(holder, balance);
        self
    }

    /// Set balance for a holder.
    pub fn set_balance(&self, holder: Address, balance: U256) {
        self.balances.write().insert(holder, balance);
    }
}

impl LedgerView for InMemoryLedgerView {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, holder: Address) -> U256 {
        self.balances
            .read()
            .get(&holder)
            .copied()
            .unwrap_or_default()
    }

    fn total_supply(&self) -> U256 {
        self.balances
            .read()
            .values()
            .fold(U256::zero(), |acc, b| acc.saturating_add(*b))
    }
}
