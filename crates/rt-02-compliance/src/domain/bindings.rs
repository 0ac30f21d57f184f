//! # Module Bindings
//!
//! Per-module record of which coordinators it is bound to and whether it has
//! been initialized for each. Every `PolicyModule` implementation embeds one.

use super::errors::ComplianceError;
use shared_types::Address;
use std::collections::HashMap;

/// Coordinators a module is bound to, with their initialization flag.
#[derive(Debug, Clone, Default)]
pub struct ModuleBindings {
    bound: HashMap<Address, bool>,
}

impl ModuleBindings {
    /// Creates an empty binding set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `coordinator`. Only the coordinator itself may bind itself.
    pub fn bind(&mut self, caller: Address, coordinator: Address) -> Result<(), ComplianceError> {
        if coordinator.is_zero() {
            return Err(ComplianceError::ZeroAddress);
        }
        if caller != coordinator {
            return Err(ComplianceError::BindingCallerMismatch {
                expected: coordinator,
                actual: caller,
            });
        }
        if self.bound.contains_key(&coordinator) {
            return Err(ComplianceError::ComplianceAlreadyBound(coordinator));
        }
        self.bound.insert(coordinator, false);
        Ok(())
    }

    /// Unbinds `coordinator`, dropping its initialization flag.
    pub fn unbind(&mut self, caller: Address, coordinator: Address) -> Result<(), ComplianceError> {
        if caller != coordinator {
            return Err(ComplianceError::BindingCallerMismatch {
                expected: coordinator,
                actual: caller,
            });
        }
        self.bound
            .remove(&coordinator)
            .map(|_| ())
            .ok_or(ComplianceError::ComplianceNotBound(coordinator))
    }

    /// True if `coordinator` is bound.
    #[must_use]
    pub fn is_bound(&self, coordinator: Address) -> bool {
        self.bound.contains_key(&coordinator)
    }

    /// Fails unless `coordinator` is bound.
    pub fn ensure_bound(&self, coordinator: Address) -> Result<(), ComplianceError> {
        if self.is_bound(coordinator) {
            Ok(())
        } else {
            Err(ComplianceError::ComplianceNotBound(coordinator))
        }
    }

    /// Marks `coordinator` initialized. Fails if unbound or already initialized.
    pub fn initialize(&mut self, coordinator: Address) -> Result<(), ComplianceError> {
        match self.bound.get_mut(&coordinator) {
            None => Err(ComplianceError::ComplianceNotBound(coordinator)),
            Some(true) => Err(ComplianceError::AlreadyInitialized(coordinator)),
            Some(flag) => {
                *flag = true;
                Ok(())
            }
        }
    }

    /// True if `coordinator` is bound and initialized.
    #[must_use]
    pub fn is_initialized(&self, coordinator: Address) -> bool {
        self.bound.get(&coordinator).copied().unwrap_or(false)
    }

    /// Fails unless `coordinator` is bound and initialized.
    pub fn ensure_initialized(&self, coordinator: Address) -> Result<(), ComplianceError> {
        self.ensure_bound(coordinator)?;
        if self.is_initialized(coordinator) {
            Ok(())
        } else {
            Err(ComplianceError::NotInitialized(coordinator))
        }
    }

    /// Number of bound coordinators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bound.len()
    }

    /// True if no coordinator is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bound.is_empty()
    }
}
