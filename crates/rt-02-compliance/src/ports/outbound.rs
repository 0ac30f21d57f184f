//! # Outbound Ports (Driven Side)
//!
//! What the coordinator calls out to: policy modules, and the read-only ledger
//! view modules consult while deciding.

use crate::domain::{ComplianceError, ModuleCall};
use serde_json::Value;
use shared_types::{Address, CallContext, U256};

// =============================================================================
// LEDGER VIEW
// =============================================================================

/// Read-only view of the ledger being checked.
pub trait LedgerView {
    /// Address of the ledger.
    fn address(&self) -> Address;

    /// Full balance of `holder` (frozen tokens included).
    fn balance_of(&self, holder: Address) -> U256;

    /// Total supply.
    fn total_supply(&self) -> U256;
}

/// Everything a module sees when asked for a verdict or notified of an action.
#[derive(Clone, Copy)]
pub struct ModuleEnv<'a> {
    /// The coordinator consulting the module.
    pub coordinator: Address,
    /// The ledger the operation runs against.
    pub ledger: &'a dyn LedgerView,
    /// Block timestamp.
    pub now: u64,
}

impl<'a> ModuleEnv<'a> {
    /// Creates an environment.
    #[must_use]
    pub fn new(coordinator: Address, ledger: &'a dyn LedgerView, now: u64) -> Self {
        Self {
            coordinator,
            ledger,
            now,
        }
    }
}

impl std::fmt::Debug for ModuleEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEnv")
            .field("coordinator", &self.coordinator)
            .field("ledger", &self.ledger.address())
            .field("now", &self.now)
            .finish()
    }
}

// =============================================================================
// POLICY MODULE
// =============================================================================

/// A pluggable transfer rule.
///
/// Modules are shared as `Arc<dyn PolicyModule>` and may be bound to several
/// coordinators; every method that acts on behalf of a coordinator receives it
/// explicitly and must refuse coordinators it is not bound to.
pub trait PolicyModule: Send + Sync {
    /// Address identifying the module.
    fn address(&self) -> Address;

    /// Human-readable module name.
    fn name(&self) -> &str;

    /// True if the module can be bound to any coordinator without asking.
    fn is_plug_and_play(&self) -> bool {
        true
    }

    /// Consulted before binding a module that is not plug-and-play.
    fn can_compliance_bind(&self, coordinator: Address) -> bool {
        let _ = coordinator;
        true
    }

    /// Binds `coordinator`. `ctx.sender` must be the coordinator itself.
    fn bind_compliance(&self, ctx: &CallContext, coordinator: Address)
        -> Result<(), ComplianceError>;

    /// Unbinds `coordinator`. `ctx.sender` must be the coordinator itself.
    fn unbind_compliance(
        &self,
        ctx: &CallContext,
        coordinator: Address,
    ) -> Result<(), ComplianceError>;

    /// True if bound to `coordinator`.
    fn is_compliance_bound(&self, coordinator: Address) -> bool;

    /// Marks the calling coordinator initialized.
    fn initialize_module(&self, ctx: &CallContext) -> Result<(), ComplianceError>;

    /// True if initialized for `coordinator`.
    fn is_initialized(&self, coordinator: Address) -> bool;

    /// Verdict for moving `amount` from `from` to `to`.
    ///
    /// `from == ZERO` is a mint and `to == ZERO` a burn. Errors are hard
    /// failures, distinct from a `false` verdict.
    fn check_transfer_compliance(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<bool, ComplianceError>;

    /// Notified after a transfer.
    fn module_transfer_action(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        let _ = (from, to, amount, env);
        Ok(())
    }

    /// Notified after a mint.
    fn module_mint_action(
        &self,
        to: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        let _ = (to, amount, env);
        Ok(())
    }

    /// Notified after a burn.
    fn module_burn_action(
        &self,
        from: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        let _ = (from, amount, env);
        Ok(())
    }

    /// Runs module-specific administration forwarded by a coordinator.
    fn execute_call(&self, ctx: &CallContext, call: &ModuleCall) -> Result<Value, ComplianceError>;
}
