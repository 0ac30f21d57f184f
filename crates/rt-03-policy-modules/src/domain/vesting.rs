//! # Vesting Schedules
//!
//! Cliff schedules: the whole locked amount is released at
//! `start_time + duration_secs` and nothing before.

use super::errors::VestingError;
use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};
use std::collections::HashMap;

/// One named lock on a holder's tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingSchedule {
    /// Holder whose tokens are locked.
    pub holder: Address,
    /// Name, unique per holder.
    pub name: String,
    /// Amount locked until the cliff.
    pub locked_amount: U256,
    /// Unix seconds at which the schedule was recorded.
    pub start_time: u64,
    /// Seconds from start to cliff.
    pub duration_secs: u64,
    /// Amount released before the cliff. Always zero for cliff schedules.
    pub unlocked_so_far: U256,
}

impl VestingSchedule {
    /// Cliff timestamp.
    #[must_use]
    pub fn unlock_time(&self) -> u64 {
        self.start_time.saturating_add(self.duration_secs)
    }

    /// Amount released at `now`.
    #[must_use]
    pub fn unlocked(&self, now: u64) -> U256 {
        if now >= self.unlock_time() {
            self.locked_amount
        } else {
            self.unlocked_so_far
        }
    }

    /// Amount still locked at `now`.
    #[must_use]
    pub fn locked(&self, now: u64) -> U256 {
        self.locked_amount.saturating_sub(self.unlocked(now))
    }
}

/// Schedules of one coordinator, keyed by `(holder, name)` with a by-holder index.
#[derive(Debug, Clone, Default)]
pub struct VestingBook {
    schedules: HashMap<(Address, String), VestingSchedule>,
    by_holder: HashMap<Address, Vec<String>>,
}

impl VestingBook {
    /// Creates an empty book.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `schedule`.
    pub fn insert(&mut self, schedule: VestingSchedule) -> Result<(), VestingError> {
        if schedule.holder.is_zero() {
            return Err(VestingError::ZeroAddress);
        }
        if schedule.locked_amount.is_zero() {
            return Err(VestingError::ZeroAmount);
        }
        if schedule.name.is_empty() {
            return Err(VestingError::EmptyName);
        }
        let key = (schedule.holder, schedule.name.clone());
        if self.schedules.contains_key(&key) {
            return Err(VestingError::ScheduleExists {
                holder: schedule.holder,
                name: schedule.name,
            });
        }

        self.by_holder
            .entry(schedule.holder)
            .or_default()
            .push(schedule.name.clone());
        self.schedules.insert(key, schedule);
        Ok(())
    }

    /// Deletes the schedule and its index entry.
    pub fn remove(&mut self, holder: Address, name: &str) -> Result<VestingSchedule, VestingError> {
        let schedule = self
            .schedules
            .remove(&(holder, name.to_string()))
            .ok_or_else(|| VestingError::ScheduleNotFound {
                holder,
                name: name.to_string(),
            })?;

        if let Some(names) = self.by_holder.get_mut(&holder) {
            if let Some(pos) = names.iter().position(|n| n == name) {
                names.swap_remove(pos);
            }
            if names.is_empty() {
                self.by_holder.remove(&holder);
            }
        }
        Ok(schedule)
    }

    /// The schedule `name` of `holder`.
    #[must_use]
    pub fn get(&self, holder: Address, name: &str) -> Option<&VestingSchedule> {
        self.schedules.get(&(holder, name.to_string()))
    }

    /// All schedules of `holder`.
    #[must_use]
    pub fn schedules_of(&self, holder: Address) -> Vec<&VestingSchedule> {
        self.by_holder
            .get(&holder)
            .map(|names| {
                names
                    .iter()
                    .filter_map(|name| self.schedules.get(&(holder, name.clone())))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum of still-locked amounts of `holder` at `now`.
    #[must_use]
    pub fn locked_balance(&self, holder: Address, now: u64) -> U256 {
        self.schedules_of(holder)
            .into_iter()
            .fold(U256::zero(), |acc, s| acc.saturating_add(s.locked(now)))
    }

    /// Number of schedules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    /// True if there are no schedules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}
