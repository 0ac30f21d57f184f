//! # Vesting Lock Rule
//!
//! Holds back tokens under cliff schedules. A holder may move tokens only
//! while their balance covers the amount plus everything still locked.
//! Schedules are kept per coordinator and are never touched by transfers.

use crate::domain::{VestingBook, VestingError, VestingSchedule};

use parking_lot::RwLock;
use rt_02_compliance::domain::{ComplianceError, ModuleBindings, ModuleCall, INITIALIZE_MODULE};
use rt_02_compliance::ports::{ModuleEnv, PolicyModule};
use serde::Deserialize;
use serde_json::Value;
use shared_types::{AccessControl, Address, CallContext, U256};
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Module name reported to the coordinator.
pub const MODULE_NAME: &str = "vesting-lock";

/// One year.
pub const DEFAULT_VESTING_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Vesting lock configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VestingConfig {
    /// Cliff distance applied to every new schedule.
    pub default_duration_secs: u64,
}

impl Default for VestingConfig {
    fn default() -> Self {
        Self {
            default_duration_secs: DEFAULT_VESTING_DURATION_SECS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AddScheduleArgs {
    holder: Address,
    amount: U256,
    name: String,
}

#[derive(Debug, Deserialize)]
struct RemoveScheduleArgs {
    holder: Address,
    name: String,
}

/// The vesting lock policy module.
#[derive(Debug)]
pub struct VestingLockModule {
    address: Address,
    config: VestingConfig,
    roles: RwLock<AccessControl>,
    bindings: RwLock<ModuleBindings>,
    books: RwLock<HashMap<Address, VestingBook>>,
}

impl VestingLockModule {
    /// Creates the module.
    #[must_use]
    pub fn new(address: Address, owner: Address, config: VestingConfig) -> Self {
        Self {
            address,
            config,
            roles: RwLock::new(AccessControl::new(owner)),
            bindings: RwLock::new(ModuleBindings::new()),
            books: RwLock::new(HashMap::new()),
        }
    }

    /// Configuration.
    #[must_use]
    pub fn config(&self) -> VestingConfig {
        self.config
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.read().owner()
    }

    // =========================================================================
    // SCHEDULE ADMINISTRATION
    // =========================================================================

    /// Locks `amount` of `holder`'s tokens under `name` for `coordinator`,
    /// starting now. Module owner only.
    pub fn add_schedule(
        &self,
        ctx: &CallContext,
        coordinator: Address,
        holder: Address,
        amount: U256,
        name: &str,
    ) -> Result<(), VestingError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        self.record_schedule(coordinator, holder, amount, name, ctx.now())
    }

    /// Deletes a schedule. Module owner only.
    pub fn remove_schedule(
        &self,
        ctx: &CallContext,
        coordinator: Address,
        holder: Address,
        name: &str,
    ) -> Result<(), VestingError> {
        self.roles.read().ensure_owner(ctx.sender)?;
        self.delete_schedule(coordinator, holder, name)
    }

    #[instrument(skip(self, amount), fields(amount = %amount))]
    fn record_schedule(
        &self,
        coordinator: Address,
        holder: Address,
        amount: U256,
        name: &str,
        now: u64,
    ) -> Result<(), VestingError> {
        self.bindings.read().ensure_initialized(coordinator)?;

        let schedule = VestingSchedule {
            holder,
            name: name.to_string(),
            locked_amount: amount,
            start_time: now,
            duration_secs: self.config.default_duration_secs,
            unlocked_so_far: U256::zero(),
        };
        let unlock_time = schedule.unlock_time();
        self.books
            .write()
            .entry(coordinator)
            .or_default()
            .insert(schedule)?;

        info!(unlock_time, "Vesting schedule added");
        Ok(())
    }

    fn delete_schedule(
        &self,
        coordinator: Address,
        holder: Address,
        name: &str,
    ) -> Result<(), VestingError> {
        self.bindings.read().ensure_bound(coordinator)?;
        let mut books = self.books.write();
        let book = books
            .get_mut(&coordinator)
            .ok_or_else(|| VestingError::ScheduleNotFound {
                holder,
                name: name.to_string(),
            })?;
        book.remove(holder, name)?;
        info!(%coordinator, %holder, name, "Vesting schedule removed");
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Amount of `holder`'s tokens still locked at `now` under `coordinator`.
    #[must_use]
    pub fn locked_balance(&self, coordinator: Address, holder: Address, now: u64) -> U256 {
        self.books
            .read()
            .get(&coordinator)
            .map(|book| book.locked_balance(holder, now))
            .unwrap_or_default()
    }

    /// A single schedule.
    #[must_use]
    pub fn schedule(
        &self,
        coordinator: Address,
        holder: Address,
        name: &str,
    ) -> Option<VestingSchedule> {
        self.books
            .read()
            .get(&coordinator)
            .and_then(|book| book.get(holder, name).cloned())
    }

    /// All schedules of `holder` under `coordinator`.
    #[must_use]
    pub fn schedules_of(&self, coordinator: Address, holder: Address) -> Vec<VestingSchedule> {
        self.books
            .read()
            .get(&coordinator)
            .map(|book| book.schedules_of(holder).into_iter().cloned().collect())
            .unwrap_or_default()
    }
}

impl PolicyModule for VestingLockModule {
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
        self.bindings.write().initialize(ctx.sender)?;
        info!(coordinator = %ctx.sender, module = MODULE_NAME, "Module initialized");
        Ok(())
    }

    fn is_initialized(&self, coordinator: Address) -> bool {
        self.bindings.read().is_initialized(coordinator)
    }

    fn check_transfer_compliance(
        &self,
        from: Address,
        _to: Address,
        amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<bool, ComplianceError> {
        self.bindings.read().ensure_bound(env.coordinator)?;
        if from.is_zero() {
            return Ok(true);
        }

        let locked = self.locked_balance(env.coordinator, from, env.now);
        let allowed = amount
            .checked_add(locked)
            .is_some_and(|needed| env.ledger.balance_of(from) >= needed);
        debug!(%from, %locked, allowed, "Vesting verdict");
        Ok(allowed)
    }

    fn execute_call(&self, ctx: &CallContext, call: &ModuleCall) -> Result<Value, ComplianceError> {
        self.bindings.read().ensure_bound(ctx.sender)?;
        match call.function.as_str() {
            INITIALIZE_MODULE => {
                self.initialize_module(ctx)?;
                Ok(Value::Null)
            }
            "add_schedule" => {
                let args: AddScheduleArgs = call.decode_args()?;
                self.record_schedule(ctx.sender, args.holder, args.amount, &args.name, ctx.now())?;
                Ok(Value::Null)
            }
            "remove_schedule" => {
                let args: RemoveScheduleArgs = call.decode_args()?;
                self.delete_schedule(ctx.sender, args.holder, &args.name)?;
                Ok(Value::Null)
            }
            _ => call.unknown(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rt_02_compliance::adapters::InMemoryLedgerView;
    use serde_json::json;
    use shared_types::{AccessError, BlockContext};

    const OWNER: u64 = 1;
    const HOLDER: u64 = 7;
    const COORDINATOR: u64 = 60;
    const START: u64 = 1_000_000;
    const DAY: u64 = 86_400;

    fn addr(n: u64) -> Address {
        Address::from_low_u64(n)
    }

    fn ctx_at(sender: u64, timestamp: u64) -> CallContext {
        CallContext::new(addr(sender), BlockContext::at(timestamp, 1))
    }

    fn bound_module(duration: u64) -> VestingLockModule {
        let module = VestingLockModule::new(
            addr(501),
            addr(OWNER),
            VestingConfig {
                default_duration_secs: duration,
            },
        );
        let coordinator = ctx_at(COORDINATOR, START);
        module.bind_compliance(&coordinator, addr(COORDINATOR)).unwrap();
        module.initialize_module(&coordinator).unwrap();
        module
    }

    fn verdict(module: &VestingLockModule, view: &InMemoryLedgerView, amount: u64, now: u64) -> bool {
        let env = ModuleEnv::new(addr(COORDINATOR), view, now);
        module
            .check_transfer_compliance(addr(HOLDER), addr(8), U256::from(amount), &env)
            .unwrap()
    }

    #[test]
    fn test_default_duration_is_one_year() {
        assert_eq!(VestingConfig::default().default_duration_secs, 31_536_000);
    }

    #[test]
    fn test_cliff_blocks_until_unlock() {
        let module = bound_module(30 * DAY);
        module
            .add_schedule(&ctx_at(OWNER, START), addr(COORDINATOR), addr(HOLDER), U256::from(100), "seed")
            .unwrap();
        let view = InMemoryLedgerView::new(addr(50)).with_balance(addr(HOLDER), U256::from(100));

        assert!(!verdict(&module, &view, 1, START));
        assert!(!verdict(&module, &view, 1, START + 30 * DAY - 1));
        assert!(verdict(&module, &view, 100, START + 30 * DAY));
        assert!(verdict(&module, &view, 0, START));
    }

    #[test]
    fn test_unlocked_surplus_is_transferable() {
        let module = bound_module(DAY);
        module
            .add_schedule(&ctx_at(OWNER, START), addr(COORDINATOR), addr(HOLDER), U256::from(60), "a")
            .unwrap();
        let view = InMemoryLedgerView::new(addr(50)).with_balance(addr(HOLDER), U256::from(100));

        assert!(verdict(&module, &view, 40, START));
        assert!(!verdict(&module, &view, 41, START));
    }

    #[test]
    fn test_mint_always_passes() {
        let module = bound_module(DAY);
        let view = InMemoryLedgerView::new(addr(50));
        let env = ModuleEnv::new(addr(COORDINATOR), &view, START);
        assert!(module
            .check_transfer_compliance(Address::ZERO, addr(HOLDER), U256::MAX, &env)
            .unwrap());
    }

    #[test]
    fn test_overflow_denies() {
        let module = bound_module(DAY);
        module
            .add_schedule(&ctx_at(OWNER, START), addr(COORDINATOR), addr(HOLDER), U256::from(1), "a")
            .unwrap();
        let view = InMemoryLedgerView::new(addr(50)).with_balance(addr(HOLDER), U256::MAX);
        let env = ModuleEnv::new(addr(COORDINATOR), &view, START);
        assert!(!module
            .check_transfer_compliance(addr(HOLDER), addr(8), U256::MAX, &env)
            .unwrap());
    }

    #[test]
    fn test_add_schedule_requires_initialized_coordinator() {
        let module = VestingLockModule::new(addr(501), addr(OWNER), VestingConfig::default());
        let owner = ctx_at(OWNER, START);
        assert_eq!(
            module.add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), "a"),
            Err(VestingError::Compliance(ComplianceError::ComplianceNotBound(addr(COORDINATOR))))
        );

        let coordinator = ctx_at(COORDINATOR, START);
        module.bind_compliance(&coordinator, addr(COORDINATOR)).unwrap();
        assert_eq!(
            module.add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), "a"),
            Err(VestingError::Compliance(ComplianceError::NotInitialized(addr(COORDINATOR))))
        );

        module.initialize_module(&coordinator).unwrap();
        module
            .add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), "a")
            .unwrap();
    }

    #[test]
    fn test_add_schedule_validation_and_roles() {
        let module = bound_module(DAY);
        let owner = ctx_at(OWNER, START);
        assert_eq!(
            module.add_schedule(&ctx_at(99, START), addr(COORDINATOR), addr(HOLDER), U256::one(), "a"),
            Err(VestingError::Access(AccessError::NotOwner(addr(99))))
        );
        assert_eq!(
            module.add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::zero(), "a"),
            Err(VestingError::ZeroAmount)
        );
        assert_eq!(
            module.add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), ""),
            Err(VestingError::EmptyName)
        );
        assert_eq!(
            module.add_schedule(&owner, addr(COORDINATOR), Address::ZERO, U256::one(), "a"),
            Err(VestingError::ZeroAddress)
        );
        module
            .add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), "a")
            .unwrap();
        assert!(matches!(
            module.add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::one(), "a"),
            Err(VestingError::ScheduleExists { .. })
        ));
    }

    #[test]
    fn test_schedule_queries_and_removal() {
        let module = bound_module(DAY);
        let owner = ctx_at(OWNER, START);
        module
            .add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::from(10), "a")
            .unwrap();
        module
            .add_schedule(&owner, addr(COORDINATOR), addr(HOLDER), U256::from(20), "b")
            .unwrap();

        let a = module.schedule(addr(COORDINATOR), addr(HOLDER), "a").unwrap();
        assert_eq!(a.start_time, START);
        assert_eq!(a.unlock_time(), START + DAY);
        assert_eq!(module.schedules_of(addr(COORDINATOR), addr(HOLDER)).len(), 2);
        assert_eq!(
            module.locked_balance(addr(COORDINATOR), addr(HOLDER), START),
            U256::from(30)
        );

        module
            .remove_schedule(&owner, addr(COORDINATOR), addr(HOLDER), "a")
            .unwrap();
        assert_eq!(
            module.locked_balance(addr(COORDINATOR), addr(HOLDER), START),
            U256::from(20)
        );
        assert!(matches!(
            module.remove_schedule(&owner, addr(COORDINATOR), addr(HOLDER), "a"),
            Err(VestingError::ScheduleNotFound { .. })
        ));
    }

    #[test]
    fn test_schedules_are_scoped_per_coordinator() {
        let module = bound_module(DAY);
        module
            .add_schedule(&ctx_at(OWNER, START), addr(COORDINATOR), addr(HOLDER), U256::from(10), "a")
            .unwrap();
        assert_eq!(module.locked_balance(addr(61), addr(HOLDER), START), U256::zero());
    }

    #[test]
    fn test_module_calls() {
        let module = bound_module(DAY);
        let coordinator = ctx_at(COORDINATOR, START + 5);
        let add = ModuleCall::new(
            "add_schedule",
            json!({ "holder": addr(HOLDER), "amount": U256::from(10), "name": "grant" }),
        );
        module.execute_call(&coordinator, &add).unwrap();
        let s = module.schedule(addr(COORDINATOR), addr(HOLDER), "grant").unwrap();
        assert_eq!(s.start_time, START + 5);

        let dup = module.execute_call(&coordinator, &add).unwrap_err();
        assert!(matches!(dup, ComplianceError::Policy { .. }));

        let remove = ModuleCall::new("remove_schedule", json!({ "holder": addr(HOLDER), "name": "grant" }));
        module.execute_call(&coordinator, &remove).unwrap();
        assert!(module.schedules_of(addr(COORDINATOR), addr(HOLDER)).is_empty());

        assert!(matches!(
            module.execute_call(&coordinator, &ModuleCall::new("add_schedule", json!({}))),
            Err(ComplianceError::InvalidArguments(_))
        ));
    }
}
