//! # Domain Entities
//!
//! The insider taxonomy.

use super::errors::InsiderError;
use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::fmt;

/// Classification of an insider address.
///
/// `None` is the "not an insider" value returned for unknown addresses; it is
/// never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum InsiderType {
    /// Not an insider.
    #[default]
    None = 0,
    /// Company founder.
    Founder = 1,
    /// Executive officer.
    Executive = 2,
    /// Board director.
    Director = 3,
    /// Employee.
    Employee = 4,
    /// Agent acting for the issuer.
    Agent = 5,
}

impl InsiderType {
    /// Every storable classification, in discriminant order.
    pub const CLASSIFIED: [InsiderType; 5] = [
        InsiderType::Founder,
        InsiderType::Executive,
        InsiderType::Director,
        InsiderType::Employee,
        InsiderType::Agent,
    ];

    /// True for every type except `None`.
    #[must_use]
    pub fn is_insider(self) -> bool {
        self != InsiderType::None
    }
}

impl TryFrom<u8> for InsiderType {
    type Error = InsiderError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(InsiderType::None),
            1 => Ok(InsiderType::Founder),
            2 => Ok(InsiderType::Executive),
            3 => Ok(InsiderType::Director),
            4 => Ok(InsiderType::Employee),
            5 => Ok(InsiderType::Agent),
            other => Err(InsiderError::InvalidInsiderType(other)),
        }
    }
}

impl fmt::Display for InsiderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InsiderType::None => "none",
            InsiderType::Founder => "founder",
            InsiderType::Executive => "executive",
            InsiderType::Director => "director",
            InsiderType::Employee => "employee",
            InsiderType::Agent => "agent",
        };
        f.write_str(name)
    }
}

/// One row of the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsiderEntry {
    /// Insider address.
    pub address: Address,
    /// Current classification.
    pub insider_type: InsiderType,
}
