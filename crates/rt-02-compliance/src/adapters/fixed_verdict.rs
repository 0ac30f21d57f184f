//! # Fixed Verdict Module
//!
//! A policy module that answers every check with a configurable verdict and
//! counts the action hooks it receives. Used to exercise the coordinator.

use crate::domain::{ComplianceError, ModuleBindings, ModuleCall, INITIALIZE_MODULE};
use crate::ports::{ModuleEnv, PolicyModule};
use parking_lot::RwLock;
use serde_json::Value;
use shared_types::{Address, CallContext, ErrorCategory, U256};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Policy module with a settable verdict.
#[derive(Debug)]
pub struct FixedVerdictModule {
    address: Address,
    name: String,
    plug_and_play: bool,
    verdict: AtomicBool,
    fail_actions: AtomicBool,
    bindings: RwLock<ModuleBindings>,
    checks: AtomicUsize,
    transfers: AtomicUsize,
    mints: AtomicUsize,
    burns: AtomicUsize,
}

impl FixedVerdictModule {
    /// Creates a plug-and-play module answering `verdict`.
    pub fn new(address: Address, name: impl Into<String>, verdict: bool) -> Self {
        Self {
            address,
            name: name.into(),
            plug_and_play: true,
            verdict: AtomicBool::new(verdict),
            fail_actions: AtomicBool::new(false),
            bindings: RwLock::new(ModuleBindings::new()),
            checks: AtomicUsize::new(0),
            transfers: AtomicUsize::new(0),
            mints: AtomicUsize::new(0),
            burns: AtomicUsize::new(0),
        }
    }

    /// Makes the module not plug-and-play; it then refuses every bind.
    #[must_use]
    pub fn not_plug_and_play(mut self) -> Self {
        self.plug_and_play = false;
        self
    }

    /// Changes the verdict.
    pub fn set_verdict(&self, verdict: bool) {
        self.verdict.store(verdict, Ordering::SeqCst);
    }

    /// Makes every action hook fail.
    pub fn set_fail_actions(&self, fail: bool) {
        self.fail_actions.store(fail, Ordering::SeqCst);
    }

    /// Number of verdicts given.
    pub fn checks(&self) -> usize {
        self.checks.load(Ordering::SeqCst)
    }

    /// Number of transfer notifications received.
    pub fn transfers(&self) -> usize {
        self.transfers.load(Ordering::SeqCst)
    }

    /// Number of mint notifications received.
    pub fn mints(&self) -> usize {
        self.mints.load(Ordering::SeqCst)
    }

    /// Number of burn notifications received.
    pub fn burns(&self) -> usize {
        self.burns.load(Ordering::SeqCst)
    }

    fn record(&self, counter: &AtomicUsize, env: &ModuleEnv<'_>) -> Result<(), ComplianceError> {
        self.bindings.read().ensure_bound(env.coordinator)?;
        if self.fail_actions.load(Ordering::SeqCst) {
            return Err(ComplianceError::Policy {
                module: self.name.clone(),
                category: ErrorCategory::InvariantViolation,
                reason: "action hook failure".into(),
            });
        }
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

impl PolicyModule for FixedVerdictModule {
    fn address(&self) -> Address {
        self.address
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_plug_and_play(&self) -> bool {
        self.plug_and_play
    }

    fn can_compliance_bind(&self, _coordinator: Address) -> bool {
        self.plug_and_play
    }

    fn bind_compliance(&self, ctx: &CallContext, coordinator: Address) -> Result<(), ComplianceError> {
        self.bindings.write().bind(ctx.sender, coordinator)
    }

    fn unbind_compliance(
        &self,
        ctx: &CallContext,
        coordinator: Address,
    ) -> Result<(), ComplianceError> {
        self.bindings.write().unbind(ctx.sender, coordinator)
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
        _to: Address,
        _amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<bool, ComplianceError> {
        self.bindings.read().ensure_bound(env.coordinator)?;
        self.checks.fetch_add(1, Ordering::SeqCst);
        Ok(self.verdict.load(Ordering::SeqCst))
    }

    fn module_transfer_action(
        &self,
        _from: Address,
        _to: Address,
        _amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        self.record(&self.transfers, env)
    }

    fn module_mint_action(
        &self,
        _to: Address,
        _amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        self.record(&self.mints, env)
    }

    fn module_burn_action(
        &self,
        _from: Address,
        _amount: U256,
        env: &ModuleEnv<'_>,
    ) -> Result<(), ComplianceError> {
        self.record(&self.burns, env)
    }

    fn execute_call(&self, ctx: &CallContext, call: &ModuleCall) -> Result<Value, ComplianceError> {
        self.bindings.read().ensure_bound(ctx.sender)?;
        match call.function.as_str() {
            INITIALIZE_MODULE => {
                self.initialize_module(ctx)?;
                Ok(Value::Null)
            }
            "set_verdict" => {
                let verdict: bool = call.decode_args()?;
                self.set_verdict(verdict);
                Ok(Value::Bool(verdict))
            }
            _ => call.unknown(),
        }
    }
}
