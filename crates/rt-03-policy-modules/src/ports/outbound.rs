//! # Outbound Ports (Driven Side)

use crate::domain::{AttributeKey, OracleError};
use shared_types::Address;

/// Source of truth for holder attributes (accreditation and similar).
///
/// Storage of attributes lives outside this crate; the ledger only asks.
pub trait AttributeOracle: Send + Sync {
    /// True if `holder` currently carries `key`.
    fn has_attribute(&self, holder: Address, key: AttributeKey) -> Result<bool, OracleError>;
}
