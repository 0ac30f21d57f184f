//! # Accreditation Rule
//!
//! Allows a balance change only if the recipient carries the required
//! attribute, or, when insiders are exempt, is a registered insider.
//! The sender is never checked. Burns (`to == ZERO`) and zero amounts always
//! pass.

use crate::domain::{AccreditationError, AttributeKey};
use crate::ports::AttributeOracle;

use parking_lot::RwLock;
use rt_01_insider_directory::ports::InsiderLookup;
use rt_02_compliance::domain::{ComplianceError, ModuleBindings, ModuleCall, INITIALIZE_MODULE};
use rt_02_compliance::ports::{ModuleEnv, PolicyModule};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{AccessControl, Address, CallContext, U256};
use std::sync::Arc;
use tracing::{debug, info};

/// Module name reported to the coordinator.
pub const MODULE_NAME: &str = "accreditation";

/// Accreditation rule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccreditationConfig {
    /// Insiders pass without the attribute (needs a directory).
    pub insiders_exempt: bool,
    /// Attribute the recipient must carry.
    pub required_attribute: AttributeKey,
}

impl Default for AccreditationConfig {
    fn default() -> Self {
        Self {
            insiders_exempt: false,
            required_attribute: AttributeKey::accredited_investor(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SetInsidersExemptArgs {
    exempt: bool,
}

/// The accreditation policy module.
pub struct AccreditationModule {
    address: Address,
    roles: RwLock<AccessControl>,
    config: RwLock<AccreditationConfig>,
    oracle: RwLock<Arc<dyn AttributeOracle>>,
    directory: RwLock<Option<Arc<dyn InsiderLookup>>>,
    bindings: RwLock<ModuleBindings>,
}

impl std::fmt::Debug for AccreditationModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccreditationModule")
            .field("address", &self.address)
            .field("config", &*self.config.read())
            .field("has_directory", &self.directory.read().is_some())
            .finish_non_exhaustive()
    }
}

impl AccreditationModule {
    /// Creates the module consulting `oracle`, with no insider directory.
    pub fn new(
        address: Address,
        owner: Address,
        oracle: Arc<dyn AttributeOracle>,
        config: AccreditationConfig,
    ) -> Self {
        Self {
            address,
            roles: RwLock::new(AccessControl::new(owner)),
            config: RwLock::new(config),
            oracle: RwLock::new(oracle),
            directory: RwLock::new(None),
            bindings: RwLock::new(ModuleBindings::new()),
        }
    }

    /// Attaches an insider directory.
    #[must_use]
    pub fn with_directory(self, directory: Arc<dyn InsiderLookup>) -> Self {
        *self.directory.write() = Some(directory);
        self
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.read().owner()
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> AccreditationConfig {
        *self.config.read()
    }

    /// True if insiders are exempt.
    #[must_use]
    pub fn insiders_exempt(&self) -> bool {
        self.config.read().insiders_exempt
    }

    // =========================================================================
    // OWNER CONFIGURATION
    // =========================================================================

    /// Replaces the attribute oracle. Owner only.
    pub fn set_attribute_oracle(
        &self,
        ctx: &CallContext,
        oracle: Arc<dyn AttributeOracle>,
    ) -> Result<(), AccreditationError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        *self.oracle.write() = oracle;
        info!("Accreditation oracle replaced");
        Ok(())
    }

    /// Sets or clears the insider directory. Owner only.
    pub fn set_insider_directory(
        &self,
        ctx: &CallContext,
        directory: Option<Arc<dyn InsiderLookup>>,
    ) -> Result<(), AccreditationError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        let attached = directory.is_some();
        *self.directory.write() = directory;
        info!(attached, "Accreditation insider directory set");
        Ok(())
    }

    /// Toggles the insider exemption. Owner only.
    pub fn set_insiders_exempt(
        &self,
        ctx: &CallContext,
        exempt: bool,
    ) -> Result<(), AccreditationError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        self.apply_insiders_exempt(exempt);
        Ok(())
    }

    /// Changes the required attribute. Owner only.
    pub fn set_required_attribute(
        &self,
        ctx: &CallContext,
        key: AttributeKey,
    ) -> Result<(), AccreditationError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        self.config.write().required_attribute = key;
        info!(?key, "Accreditation attribute changed");
        Ok(())
    }

    fn apply_insiders_exempt(&self, exempt: bool) {
        self.config.write().insiders_exempt = exempt;
        info!(exempt, "Insider exemption set");
    }

    // =========================================================================
    // RULE
    // =========================================================================

    /// True if `recipient` may receive tokens.
    pub fn is_authorized_recipient(&self, recipient: Address) -> Result<bool, AccreditationError> {
        let config = self.config();
        let oracle = Arc::clone(&*self.oracle.read());
        if oracle.has_attribute(recipient, config.required_attribute)? {
            return Ok(true);
        }
        if !config.insiders_exempt {
            return Ok(false);
        }
        let directory = self.directory.read().clone();
        Ok(directory.is_some_and(|d| d.is_insider(recipient)))
    }
}

impl PolicyModule for AccreditationModule {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &str {
        MODULE_NAME
    }

    fn bind_compliance(&self, ctx: &CallContext, coordinator: Address) -> Result<(), ComplianceError> {
        self.bindings.write().bind(ctx.sender, coordinator)?;
        info!(%coordinator, module = MODULE_NAME, "Module bound");
        Ok(())
    }

    fn unbind_compliance(
        &self,
        ctx: &CallContext,
        coordinator: Address,
    ) -> Result<(), ComplianceError> {
        self.bindings.write().unbind(ctx.sender, coordinator)?;
        info!(%coordinator, module = MODULE_NAME, "Module unbound");
        Ok(())
    }

    fn is_compliance_bound(&self, coordinator: Address) -> bool {
        self.bindings.read().is_bound(coordinator)
    }

    fn initialize_module(&self, ctx: &CallContext) -> Result<(), ComplianceError> {
        self.bindings.write().initialize(ctx.sender)
    }

    fn is_initialized(&self, coordinator: Address) -> bool {
        self.bindings.read().is_initialized(coordinator)
    }

    fn check_transfer_compliance(
        &self,
        _from: Address,
        to: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<bool, ComplianceError> {
        self.bindings.read().ensure_bound(env.coordinator)?;
        if amount.is_zero() || to.is_zero() {
            return Ok(true);
        }
        let allowed = self.is_authorized_recipient(to)?;
        debug!(%to, allowed, "Accreditation verdict");
        Ok(allowed)
    }

    fn execute_call(&self, ctx: &CallContext, call: &ModuleCall) -> Result<Value, ComplianceError> {
        self.bindings.read().ensure_bound(ctx.sender)?;
        match call.function.as_str() {
            INITIALIZE_MODULE => {
                self.initialize_module(ctx)?;
                Ok(Value::Null)
            }
            "set_insiders_exempt" => {
                let args: SetInsidersExemptArgs = call.decode_args()?;
                self.apply_insiders_exempt(args.exempt);
                Ok(Value::Bool(args.exempt))
            }
            _ => call.unknown(),
        }
    }
}
