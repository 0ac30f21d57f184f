//! # Ledger State
//!
//! Balances, partial freezes, address freezes, allowances, nonces and the
//! pause flag. Every mutator validates before writing, so a failed call
//! leaves the state as it was.
//!
//! ## Invariants
//!
//! - `total_supply == Σ balance`
//! - `frozen <= balance` for every account

use super::errors::LedgerError;
use shared_types::{Address, U256};
use std::collections::{HashMap, HashSet};

/// Balance and partially frozen amount of one holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Account {
    /// Full balance.
    pub balance: U256,
    /// Portion of the balance that cannot move through ordinary transfers.
    pub frozen: U256,
}

impl Account {
    /// Balance minus frozen amount.
    #[must_use]
    pub fn free_balance(&self) -> U256 {
        self.balance.saturating_sub(self.frozen)
    }
}

/// The whole mutable state of a ledger. Cloned as a snapshot by batch
/// operations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerState {
    accounts: HashMap<Address, Account>,
    allowances: HashMap<(Address, Address), U256>,
    frozen_addresses: HashSet<Address>,
    nonces: HashMap<Address, U256>,
    total_supply: U256,
    paused: bool,
}

impl LedgerState {
    /// Creates an empty, unpaused state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // READS
    // =========================================================================

    /// Account of `holder`; zeroed if unknown.
    #[must_use]
    pub fn account(&self, holder: Address) -> Account {
        self.accounts.get(&holder).copied().unwrap_or_default()
    }

    /// Full balance.
    #[must_use]
    pub fn balance_of(&self, holder: Address) -> U256 {
        self.account(holder).balance
    }

    /// Partially frozen amount.
    #[must_use]
    pub fn frozen_amount(&self, holder: Address) -> U256 {
        self.account(holder).frozen
    }

    /// Balance minus frozen amount.
    #[must_use]
    pub fn free_balance(&self, holder: Address) -> U256 {
        self.account(holder).free_balance()
    }

    /// Total supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.total_supply
    }

    /// True if paused.
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// True if `address` is fully frozen.
    #[must_use]
    pub fn is_frozen(&self, address: Address) -> bool {
        self.frozen_addresses.contains(&address)
    }

    /// Allowance of `spender` over `owner`'s tokens.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    /// Next permit nonce of `holder`.
    #[must_use]
    pub fn nonce(&self, holder: Address) -> U256 {
        self.nonces.get(&holder).copied().unwrap_or_default()
    }

    /// Every account with a non-zero balance or frozen amount.
    pub fn accounts(&self) -> impl Iterator<Item = (&Address, &Account)> {
        self.accounts
            .iter()
            .filter(|(_, a)| !a.balance.is_zero() || !a.frozen.is_zero())
    }

    /// True if both ledger invariants hold.
    #[must_use]
    pub fn invariants_hold(&self) -> bool {
        let mut sum = U256::zero();
        for account in self.accounts.values() {
            if account.frozen > account.balance {
                return false;
            }
            match sum.checked_add(account.balance) {
                Some(next) => sum = next,
                None => return false,
            }
        }
        sum == self.total_supply
    }

    // =========================================================================
    // CHECKS
    // =========================================================================

    /// Fails unless neither party is fully frozen.
    pub fn check_not_frozen(&self, from: Address, to: Address) -> Result<(), LedgerError> {
        if self.is_frozen(from) {
            return Err(LedgerError::AddressFrozen(from));
        }
        if self.is_frozen(to) {
            return Err(LedgerError::AddressFrozen(to));
        }
        Ok(())
    }

    /// Fails unless `holder`'s unfrozen balance covers `amount`.
    pub fn check_free_balance(&self, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let available = self.free_balance(holder);
        if amount > available {
            return Err(LedgerError::InsufficientUnfrozenBalance {
                holder,
                available,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Fails unless `holder`'s full balance covers `amount`.
    pub fn check_balance(&self, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let balance = self.balance_of(holder);
        if amount > balance {
            return Err(LedgerError::InsufficientBalance {
                holder,
                balance,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Fails unless `spender` may spend `amount` of `owner`'s tokens.
    pub fn check_allowance(
        &self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(owner, spender);
        if amount > allowance {
            return Err(LedgerError::AllowanceExceeded {
                owner,
                spender,
                allowance,
                requested: amount,
            });
        }
        Ok(())
    }

    /// Fails if minting `amount` would overflow the supply.
    pub fn check_mint(&self, amount: U256) -> Result<(), LedgerError> {
        self.total_supply
            .checked_add(amount)
            .map(|_| ())
            .ok_or(LedgerError::SupplyOverflow)
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// Moves `amount` from `from`'s unfrozen balance to `to`.
    pub fn move_tokens(&mut self, from: Address, to: Address, amount: U256) -> Result<(), LedgerError> {
        self.check_free_balance(from, amount)?;
        self.debit(from, amount);
        self.credit(to, amount);
        Ok(())
    }

    /// Creates `amount` tokens for `to`.
    pub fn mint(&mut self, to: Address, amount: U256) -> Result<(), LedgerError> {
        let supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow)?;
        self.credit(to, amount);
        self.total_supply = supply;
        Ok(())
    }

    /// Destroys `amount` of `from`'s unfrozen tokens.
    pub fn burn(&mut self, from: Address, amount: U256) -> Result<(), LedgerError> {
        self.check_free_balance(from, amount)?;
        self.debit(from, amount);
        self.total_supply -= amount;
        Ok(())
    }

    /// Unfreezes whatever part of `amount` the free balance of `holder` does
    /// not cover. Returns the amount unfrozen (zero if none was needed).
    pub fn release_shortfall(&mut self, holder: Address, amount: U256) -> Result<U256, LedgerError> {
        self.check_balance(holder, amount)?;
        let account = self.accounts.entry(holder).or_default();
        let free = account.free_balance();
        if amount <= free {
            return Ok(U256::zero());
        }
        let shortfall = amount - free;
        account.frozen -= shortfall;
        Ok(shortfall)
    }

    /// Freezes `amount` more of `holder`'s balance.
    pub fn freeze_tokens(&mut self, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let account = self.account(holder);
        let frozen = account
            .frozen
            .checked_add(amount)
            .filter(|total| *total <= account.balance)
            .ok_or(LedgerError::FreezeExceedsBalance {
                holder,
                balance: account.balance,
                frozen: account.frozen,
                requested: amount,
            })?;
        self.accounts.entry(holder).or_default().frozen = frozen;
        Ok(())
    }

    /// Unfreezes `amount` of `holder`'s frozen tokens.
    pub fn unfreeze_tokens(&mut self, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let frozen = self.frozen_amount(holder);
        if amount > frozen {
            return Err(LedgerError::UnfreezeExceedsFrozen {
                holder,
                frozen,
                requested: amount,
            });
        }
        self.accounts.entry(holder).or_default().frozen = frozen - amount;
        Ok(())
    }

    /// Sets or clears the full freeze of `address`.
    pub fn set_address_frozen(&mut self, address: Address, frozen: bool) {
        if frozen {
            self.frozen_addresses.insert(address);
        } else {
            self.frozen_addresses.remove(&address);
        }
    }

    /// Sets the pause flag.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Overwrites an allowance.
    pub fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        if value.is_zero() {
            self.allowances.remove(&(owner, spender));
        } else {
            self.allowances.insert((owner, spender), value);
        }
    }

    /// Decreases an allowance by `amount`. Returns the remaining allowance.
    pub fn spend_allowance(
        &mut self,
        owner: Address,
        spender: Address,
        amount: U256,
    ) -> Result<U256, LedgerError> {
        self.check_allowance(owner, spender, amount)?;
        let remaining = self.allowance(owner, spender) - amount;
        self.set_allowance(owner, spender, remaining);
        Ok(remaining)
    }

    /// Consumes the current nonce of `holder`, returning it.
    pub fn use_nonce(&mut self, holder: Address) -> U256 {
        let nonce = self.nonces.entry(holder).or_default();
        let current = *nonce;
        *nonce = current.saturating_add(U256::one());
        current
    }

    fn debit(&mut self, holder: Address, amount: U256) {
        let account = self.accounts.entry(holder).or_default();
        account.balance -= amount;
        if account.balance.is_zero() && account.frozen.is_zero() {
            self.accounts.remove(&holder);
        }
    }

    fn credit(&mut self, holder: Address, amount: U256) {
        let account = self.accounts.entry(holder).or_default();
        account.balance += amount;
    }
}
