//! # Inbound Ports (Driving Side)
//!
//! Read-only interface other subsystems use to consult the directory.

use crate::domain::InsiderType;
use shared_types::Address;

/// Read access to insider classifications.
///
/// Policy modules depend on this trait rather than on the concrete
/// `InsiderDirectory`, so tests can substitute a fixed lookup.
pub trait InsiderLookup: Send + Sync {
    /// Classification of `address`; `InsiderType::None` if not registered.
    fn get_insider_type(&self, address: Address) -> InsiderType;

    /// True if `address` is registered with any type.
    fn is_insider(&self, address: Address) -> bool {
        self.get_insider_type(address).is_insider()
    }
}
