//! # Module Calls
//!
//! Module-specific administration is forwarded by the coordinator as a named
//! function with JSON arguments.

use super::errors::ComplianceError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Function name every module accepts to mark a coordinator initialized.
pub const INITIALIZE_MODULE: &str = "initialize_module";

/// A call forwarded to a module by `call_module_function`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleCall {
    /// Function name.
    pub function: String,
    /// Function arguments.
    #[serde(default)]
    pub args: Value,
}

impl ModuleCall {
    /// Creates a call with arguments.
    pub fn new(function: impl Into<String>, args: Value) -> Self {
        Self {
            function: function.into(),
            args,
        }
    }

    /// Creates a call without arguments.
    pub fn without_args(function: impl Into<String>) -> Self {
        Self::new(function, Value::Null)
    }

    /// The `initialize_module` call.
    #[must_use]
    pub fn initialize() -> Self {
        Self::without_args(INITIALIZE_MODULE)
    }

    /// Decodes the arguments into `T`.
    pub fn decode_args<T: DeserializeOwned>(&self) -> Result<T, ComplianceError> {
        serde_json::from_value(self.args.clone())
            .map_err(|e| ComplianceError::InvalidArguments(format!("{}: {e}", self.function)))
    }

    /// Fails with `UnknownFunction` for this call.
    pub fn unknown<T>(&self) -> Result<T, ComplianceError> {
        Err(ComplianceError::UnknownFunction(self.function.clone()))
    }
}
