//! Ledger configuration from environment variables.

use std::env;

/// Token metadata fixed at initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Token name, part of the permit domain.
    pub name: String,
    /// Token symbol.
    pub symbol: String,
    /// Display decimals.
    pub decimals: u8,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            name: "Restricted Security Token".to_string(),
            symbol: "RST".to_string(),
            decimals: 18,
        }
    }
}

impl LedgerConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `RT_TOKEN_NAME`: Token name (default: Restricted Security Token)
    /// - `RT_TOKEN_SYMBOL`: Token symbol (default: RST)
    /// - `RT_TOKEN_DECIMALS`: Decimals (default: 18)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            name: env::var("RT_TOKEN_NAME").unwrap_or(defaults.name),
            symbol: env::var("RT_TOKEN_SYMBOL").unwrap_or(defaults.symbol),
            decimals: env::var("RT_TOKEN_DECIMALS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.decimals),
        }
    }

    /// Create configuration with explicit metadata.
    pub fn new(name: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            decimals,
        }
    }
}
