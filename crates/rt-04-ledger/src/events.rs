//! # Ledger Events
//!
//! Emitted in order by every successful state change. Mint and burn appear
//! as `Transfer` from and to the zero address.

use serde::{Deserialize, Serialize};
use shared_types::{Address, U256};

/// A ledger event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerEvent {
    /// Balance change.
    Transfer {
        /// Sender (zero for mint).
        from: Address,
        /// Recipient (zero for burn).
        to: Address,
        /// Amount moved.
        value: U256,
    },
    /// Allowance set.
    Approval {
        /// Token owner.
        owner: Address,
        /// Spender.
        spender: Address,
        /// New allowance.
        value: U256,
    },
    /// Full address freeze toggled.
    AddressFrozen {
        /// Address.
        address: Address,
        /// New freeze state.
        is_frozen: bool,
        /// Agent that toggled it.
        agent: Address,
    },
    /// Part of a balance frozen.
    TokensFrozen {
        /// Holder.
        address: Address,
        /// Amount frozen.
        amount: U256,
    },
    /// Part of a balance unfrozen.
    TokensUnfrozen {
        /// Holder.
        address: Address,
        /// Amount unfrozen.
        amount: U256,
    },
    /// Ledger paused.
    Paused {
        /// Agent that paused.
        agent: Address,
    },
    /// Ledger unpaused.
    Unpaused {
        /// Agent that unpaused.
        agent: Address,
    },
    /// Compliance coordinator attached.
    ComplianceAdded {
        /// Coordinator address.
        compliance: Address,
    },
    /// Attribute oracle attached.
    AttributeOracleAdded {
        /// Oracle address.
        oracle: Address,
    },
    /// Name or symbol changed.
    UpdatedTokenInformation {
        /// Current name.
        name: String,
        /// Current symbol.
        symbol: String,
        /// Decimals.
        decimals: u8,
    },
    /// Agent role granted.
    AgentAdded {
        /// Agent.
        agent: Address,
    },
    /// Agent role revoked.
    AgentRemoved {
        /// Agent.
        agent: Address,
    },
}
