//! # Compliance Coordinator Service
//!
//! Aggregates policy modules into a single transfer verdict and relays
//! post-transfer notifications from the bound ledger.
//!
//! ## Locking
//!
//! Modules are always called on a snapshot of the module list taken under a
//! short read lock. No coordinator lock is held while a module runs.
//! Mutating entry points additionally hold the reentrancy guard for their
//! whole duration. Calls from different threads queue on the guard; only a
//! nested call from the thread holding it is rejected.
//!
//! ## Notifications
//!
//! Every bound module hears about every completed mutation. A failing hook
//! is logged and the relay carries on; the first error is returned once all
//! modules have run.

use crate::domain::{ComplianceError, ModuleCall};
use crate::events::ComplianceEvent;
use crate::ports::{LedgerView, ModuleEnv, PolicyModule};

use parking_lot::{Condvar, Mutex, RwLock};
use serde_json::Value;
use shared_types::{AccessControl, Address, CallContext, U256};
use std::sync::Arc;
use std::thread::{self, ThreadId};
use tracing::{debug, info, instrument, warn};

/// Coordinator configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Maximum number of bound modules.
    pub max_modules: usize,
    /// Verdict when no module is bound: `false` allows, `true` denies.
    pub deny_when_empty: bool,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            max_modules: 25,
            deny_when_empty: false,
        }
    }
}

// =============================================================================
// REENTRANCY GUARD
// =============================================================================

/// Serializes mutating entry points across threads and rejects nesting.
///
/// The owning thread is recorded: re-entering from that thread fails with
/// [`ComplianceError::Reentrancy`], while other threads wait for release.
#[derive(Debug, Default)]
struct ReentrancyGuard {
    owner: Mutex<Option<ThreadId>>,
    released: Condvar,
}

impl ReentrancyGuard {
    fn enter(&self) -> Result<GuardToken<'_>, ComplianceError> {
        let current = thread::current().id();
        let mut owner = self.owner.lock();
        if *owner == Some(current) {
            return Err(ComplianceError::Reentrancy);
        }
        while owner.is_some() {
            self.released.wait(&mut owner);
        }
        *owner = Some(current);
        Ok(GuardToken { guard: self })
    }
}

struct GuardToken<'a> {
    guard: &'a ReentrancyGuard,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        *self.guard.owner.lock() = None;
        self.guard.released.notify_one();
    }
}

// =============================================================================
// COORDINATOR
// =============================================================================

/// The Compliance Coordinator.
pub struct ComplianceCoordinator {
    address: Address,
    config: CoordinatorConfig,
    roles: RwLock<AccessControl>,
    token: RwLock<Option<Address>>,
    modules: RwLock<Vec<Arc<dyn PolicyModule>>>,
    guard: ReentrancyGuard,
    events: RwLock<Vec<ComplianceEvent>>,
}

impl std::fmt::Debug for ComplianceCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComplianceCoordinator")
            .field("address", &self.address)
            .field("config", &self.config)
            .field("token", &*self.token.read())
            .field("modules", &self.modules())
            .finish_non_exhaustive()
    }
}

impl ComplianceCoordinator {
    /// Creates a coordinator with no modules and no bound token.
    #[must_use]
    pub fn new(address: Address, owner: Address, config: CoordinatorConfig) -> Self {
        info!(%address, %owner, max_modules = config.max_modules, "Compliance coordinator created");
        Self {
            address,
            config,
            roles: RwLock::new(AccessControl::new(owner)),
            token: RwLock::new(None),
            modules: RwLock::new(Vec::new()),
            guard: ReentrancyGuard::default(),
            events: RwLock::new(Vec::new()),
        }
    }

    /// Address of this coordinator.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.read().owner()
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    /// Hands ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), ComplianceError> {
        self.roles.write().transfer_ownership(ctx.sender, new_owner)?;
        info!(%new_owner, "Coordinator ownership transferred");
        Ok(())
    }

    // =========================================================================
    // MODULE ADMINISTRATION
    // =========================================================================

    /// Binds `module` to this coordinator and appends it. Owner only.
    #[instrument(skip(self, ctx, module), fields(module = %module.address()))]
    pub fn add_module(
        &self,
        ctx: &CallContext,
        module: Arc<dyn PolicyModule>,
    ) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        self.roles.read().ensure_owner(ctx.sender)?;

        let module_address = module.address();
        if module_address.is_zero() {
            return Err(ComplianceError::ZeroAddress);
        }
        {
            let modules = self.modules.read();
            if modules.iter().any(|m| m.address() == module_address) {
                return Err(ComplianceError::ModuleAlreadyAdded(module_address));
            }
            if modules.len() >= self.config.max_modules {
                warn!(limit = self.config.max_modules, "Module limit reached");
                return Err(ComplianceError::ModuleLimitReached {
                    limit: self.config.max_modules,
                });
            }
        }
        if !module.is_plug_and_play() && !module.can_compliance_bind(self.address) {
            warn!("Module refused to bind");
            return Err(ComplianceError::CannotBind(module_address));
        }

        module.bind_compliance(&ctx.as_caller(self.address), self.address)?;
        self.modules.write().push(module);
        self.emit(ComplianceEvent::ModuleAdded {
            module: module_address,
        });
        info!("Module added");
        Ok(())
    }

    /// Unbinds `module` and removes it. Order of the remaining modules is not
    /// preserved. Owner only.
    #[instrument(skip(self, ctx))]
    pub fn remove_module(&self, ctx: &CallContext, module: Address) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        self.roles.read().ensure_owner(ctx.sender)?;

        let target = self
            .module(module)
            .ok_or(ComplianceError::ModuleNotBound(module))?;
        target.unbind_compliance(&ctx.as_caller(self.address), self.address)?;

        {
            let mut modules = self.modules.write();
            if let Some(pos) = modules.iter().position(|m| m.address() == module) {
                modules.swap_remove(pos);
            }
        }
        self.emit(ComplianceEvent::ModuleRemoved { module });
        info!("Module removed");
        Ok(())
    }

    /// Forwards `call` to a bound module. Owner only.
    #[instrument(skip(self, ctx, call), fields(function = %call.function))]
    pub fn call_module_function(
        &self,
        ctx: &CallContext,
        call: &ModuleCall,
        module: Address,
    ) -> Result<Value, ComplianceError> {
        let _entered = self.guard.enter()?;
        self.roles.read().ensure_owner(ctx.sender)?;

        let target = self
            .module(module)
            .ok_or(ComplianceError::ModuleNotBound(module))?;
        let result = target.execute_call(&ctx.as_caller(self.address), call)?;

        self.emit(ComplianceEvent::ModuleInteraction {
            target: module,
            function: call.function.clone(),
        });
        debug!("Module function executed");
        Ok(result)
    }

    /// True if `module` is in the module list.
    #[must_use]
    pub fn is_module_bound(&self, module: Address) -> bool {
        self.modules.read().iter().any(|m| m.address() == module)
    }

    /// Addresses of the bound modules, in list order.
    #[must_use]
    pub fn modules(&self) -> Vec<Address> {
        self.modules.read().iter().map(|m| m.address()).collect()
    }

    /// The bound module at `module`, if any.
    #[must_use]
    pub fn module(&self, module: Address) -> Option<Arc<dyn PolicyModule>> {
        self.modules
            .read()
            .iter()
            .find(|m| m.address() == module)
            .cloned()
    }

    fn snapshot(&self) -> Vec<Arc<dyn PolicyModule>> {
        self.modules.read().clone()
    }

    // =========================================================================
    // VERDICT
    // =========================================================================

    /// Conjunction of every module's verdict for `(from, to, amount)`.
    ///
    /// Short-circuits on the first `false`. With no modules bound the
    /// verdict is `!config.deny_when_empty`.
    #[instrument(skip(self, ledger), level = "debug")]
    pub fn can_transfer(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        ledger: &dyn LedgerView,
        now: u64,
    ) -> Result<bool, ComplianceError> {
        let modules = self.snapshot();
        if modules.is_empty() {
            return Ok(!self.config.deny_when_empty);
        }

        let env = ModuleEnv::new(self.address, ledger, now);
        for module in &modules {
            if !module.check_transfer_compliance(from, to, amount, &env)? {
                debug!(module = module.name(), "Transfer rejected by module");
                return Ok(false);
            }
        }
        debug!(modules = modules.len(), "Transfer approved");
        Ok(true)
    }

    // =========================================================================
    // TOKEN BINDING
    // =========================================================================

    /// Binds `token`. Allowed to the owner, or to the token itself when no
    /// token is bound.
    #[instrument(skip(self, ctx), fields(caller = %ctx.sender))]
    pub fn bind_token(&self, ctx: &CallContext, token: Address) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        if token.is_zero() {
            return Err(ComplianceError::ZeroAddress);
        }

        let mut bound = self.token.write();
        if let Some(current) = *bound {
            return Err(ComplianceError::TokenAlreadyBound(current));
        }
        if !self.roles.read().is_owner(ctx.sender) && ctx.sender != token {
            return Err(ComplianceError::TokenBindingDenied(ctx.sender));
        }
        *bound = Some(token);
        drop(bound);

        self.emit(ComplianceEvent::TokenBound { token });
        info!(%token, "Token bound");
        Ok(())
    }

    /// Unbinds `token`. Allowed to the owner or the bound token.
    #[instrument(skip(self, ctx), fields(caller = %ctx.sender))]
    pub fn unbind_token(&self, ctx: &CallContext, token: Address) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;

        let mut bound = self.token.write();
        if *bound != Some(token) {
            return Err(ComplianceError::TokenNotBound(token));
        }
        if !self.roles.read().is_owner(ctx.sender) && ctx.sender != token {
            return Err(ComplianceError::TokenBindingDenied(ctx.sender));
        }
        *bound = None;
        drop(bound);

        self.emit(ComplianceEvent::TokenUnbound { token });
        info!(%token, "Token unbound");
        Ok(())
    }

    /// The bound ledger, if any.
    #[must_use]
    pub fn token_bound(&self) -> Option<Address> {
        *self.token.read()
    }

    fn ensure_bound_token(&self, caller: Address) -> Result<(), ComplianceError> {
        if *self.token.read() == Some(caller) {
            Ok(())
        } else {
            Err(ComplianceError::OnlyBoundToken(caller))
        }
    }

    // =========================================================================
    // LEDGER NOTIFICATIONS
    // =========================================================================

    /// Relays a completed transfer to every module. Bound token only.
    #[instrument(skip(self, ctx, ledger), level = "debug")]
    pub fn transferred(
        &self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
        ledger: &dyn LedgerView,
    ) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        self.ensure_bound_token(ctx.sender)?;
        let env = ModuleEnv::new(self.address, ledger, ctx.now());
        self.relay("transfer", |module| module.module_transfer_action(from, to, amount, &env))
    }

    /// Relays a completed mint to every module. Bound token only.
    #[instrument(skip(self, ctx, ledger), level = "debug")]
    pub fn created(
        &self,
        ctx: &CallContext,
        to: Address,
        amount: U256,
        ledger: &dyn LedgerView,
    ) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        self.ensure_bound_token(ctx.sender)?;
        let env = ModuleEnv::new(self.address, ledger, ctx.now());
        self.relay("mint", |module| module.module_mint_action(to, amount, &env))
    }

    /// Relays a completed burn to every module. Bound token only.
    #[instrument(skip(self, ctx, ledger), level = "debug")]
    pub fn destroyed(
        &self,
        ctx: &CallContext,
        from: Address,
        amount: U256,
        ledger: &dyn LedgerView,
    ) -> Result<(), ComplianceError> {
        let _entered = self.guard.enter()?;
        self.ensure_bound_token(ctx.sender)?;
        let env = ModuleEnv::new(self.address, ledger, ctx.now());
        self.relay("burn", |module| module.module_burn_action(from, amount, &env))
    }

    fn relay<F>(&self, action: &'static str, mut hook: F) -> Result<(), ComplianceError>
    where
        F: FnMut(&dyn PolicyModule) -> Result<(), ComplianceError>,
    {
        let mut first_error = None;
        for module in self.snapshot() {
            if let Err(error) = hook(module.as_ref()) {
                warn!(module = module.name(), action, %error, "Module hook failed");
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    fn emit(&self, event: ComplianceEvent) {
        self.events.write().push(event);
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<ComplianceEvent> {
        self.events.read().clone()
    }

    /// Takes and clears the recorded events.
    pub fn drain_events(&self) -> Vec<ComplianceEvent> {
        std::mem::take(&mut *self.events.write())
    }
}

// =============================================================================
// TESTS
// =============================================================================
