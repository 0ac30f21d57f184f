//! # Access Control
//!
//! Owner/agent role sets. Every component owns one `AccessControl` value and
//! checks `CallContext::sender` against it with the pure predicates below;
//! there is no global role registry.
//!
//! - **Owner** controls configuration.
//! - **Agents** run day-to-day administration (issuance, freezes, registry edits).
//!   The owner is not implicitly an agent unless a component opts in through
//!   `ensure_owner_or_agent`.

use crate::entities::Address;
use crate::errors::AccessError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Owner plus a set of agents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessControl {
    owner: Address,
    agents: BTreeSet<Address>,
}

impl AccessControl {
    /// Creates a role set owned by `owner` with no agents.
    #[must_use]
    pub fn new(owner: Address) -> Self {
        Self {
            owner,
            agents: BTreeSet::new(),
        }
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    /// True if `who` is the owner.
    #[must_use]
    pub fn is_owner(&self, who: Address) -> bool {
        !who.is_zero() && who == self.owner
    }

    /// True if `who` holds the agent role.
    #[must_use]
    pub fn is_agent(&self, who: Address) -> bool {
        self.agents.contains(&who)
    }

    /// Registered agents in address order.
    pub fn agents(&self) -> impl Iterator<Item = &Address> {
        self.agents.iter()
    }

    /// Fails unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: Address) -> Result<(), AccessError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(AccessError::NotOwner(caller))
        }
    }

    /// Fails unless `caller` is an agent.
    pub fn ensure_agent(&self, caller: Address) -> Result<(), AccessError> {
        if self.is_agent(caller) {
            Ok(())
        } else {
            Err(AccessError::NotAgent(caller))
        }
    }

    /// Fails unless `caller` is the owner or an agent.
    pub fn ensure_owner_or_agent(&self, caller: Address) -> Result<(), AccessError> {
        if self.is_owner(caller) || self.is_agent(caller) {
            Ok(())
        } else {
            Err(AccessError::NotAgent(caller))
        }
    }

    /// Grants the agent role. Owner only.
    pub fn add_agent(&mut self, caller: Address, agent: Address) -> Result<(), AccessError> {
        self.ensure_owner(caller)?;
        if agent.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        if !self.agents.insert(agent) {
            return Err(AccessError::AgentAlreadyExists(agent));
        }
        Ok(())
    }

    /// Revokes the agent role. Owner only.
    pub fn remove_agent(&mut self, caller: Address, agent: Address) -> Result<(), AccessError> {
        self.ensure_owner(caller)?;
        if !self.agents.remove(&agent) {
            return Err(AccessError::AgentNotFound(agent));
        }
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &mut self,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), AccessError> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(AccessError::ZeroAddress);
        }
        self.owner = new_owner;
        Ok(())
    }
}
