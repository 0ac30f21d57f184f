//! # Coordinator Events
//!
//! Administrative events recorded by the coordinator, in emission order.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// An administrative event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceEvent {
    /// Module bound and appended.
    ModuleAdded {
        /// Module address.
        module: Address,
    },
    /// Module unbound and removed.
    ModuleRemoved {
        /// Module address.
        module: Address,
    },
    /// Module function called through the coordinator.
    ModuleInteraction {
        /// Module address.
        target: Address,
        /// Function name.
        function: String,
    },
    /// Ledger bound.
    TokenBound {
        /// Ledger address.
        token: Address,
    },
    /// Ledger unbound.
    TokenUnbound {
        /// Ledger address.
        token: Address,
    },
}
