//! # Deployment Fixture
//!
//! Wires every subsystem the way an operator would:
//!
//! 1. Coordinator created by `OWNER`.
//! 2. Accreditation (with the insider directory) and vesting lock added and
//!    initialized through `call_module_function`.
//! 3. Ledger initialized against the coordinator, `AGENT` granted the agent
//!    role on the ledger and the directory.

use std::sync::Arc;

use rt_01_insider_directory::prelude::{InsiderDirectory, InsiderError};
use rt_02_compliance::prelude::{
    ComplianceCoordinator, ComplianceError, CoordinatorConfig, ModuleCall, PolicyModule,
};
use rt_03_policy_modules::prelude::{
    AccreditationConfig, AccreditationModule, AttributeKey, InMemoryAttributeRegistry,
    VestingConfig, VestingLockModule,
};
use rt_04_ledger::prelude::{LedgerConfig, LedgerError, RestrictedLedger};
use shared_types::{Address, BlockContext, CallContext};
use thiserror::Error;

/// Chain every fixture runs on.
pub const CHAIN_ID: u64 = 31_337;
/// Deployment timestamp.
pub const GENESIS: u64 = 1_700_000_000;
/// One day in seconds.
pub const DAY: u64 = 86_400;

/// Owner of every component.
pub const OWNER: Address = Address::new([0x01; 20]);
/// Agent on the ledger and the directory.
pub const AGENT: Address = Address::new([0x02; 20]);
/// Coordinator address.
pub const COORDINATOR: Address = Address::new([0xC0; 20]);
/// Ledger address.
pub const LEDGER: Address = Address::new([0x1E; 20]);
/// Accreditation module address.
pub const ACCREDITATION: Address = Address::new([0xAC; 20]);
/// Vesting lock module address.
pub const VESTING: Address = Address::new([0x7E; 20]);
/// Insider directory address.
pub const DIRECTORY: Address = Address::new([0xD1; 20]);

/// Failure while wiring a deployment.
#[derive(Debug, Error)]
pub enum DeployError {
    /// Coordinator or module wiring failed.
    #[error("compliance wiring failed: {0}")]
    Compliance(#[from] ComplianceError),
    /// Ledger initialization failed.
    #[error("ledger wiring failed: {0}")]
    Ledger(#[from] LedgerError),
    /// Directory wiring failed.
    #[error("directory wiring failed: {0}")]
    Directory(#[from] InsiderError),
}

/// Call context for `sender` at `now`.
#[must_use]
pub fn ctx_at(sender: Address, now: u64) -> CallContext {
    CallContext::new(sender, BlockContext::at(now, CHAIN_ID))
}

/// Call context for `sender` at [`GENESIS`].
#[must_use]
pub fn ctx(sender: Address) -> CallContext {
    ctx_at(sender, GENESIS)
}

/// Investor address `n`.
#[must_use]
pub fn investor(n: u64) -> Address {
    Address::from_low_u64(0x1000 + n)
}

/// Every component of a wired deployment.
pub struct Deployment {
    /// The ledger.
    pub ledger: RestrictedLedger,
    /// The coordinator.
    pub coordinator: Arc<ComplianceCoordinator>,
    /// Insider directory consulted by the accreditation rule.
    pub directory: Arc<InsiderDirectory>,
    /// Attribute oracle.
    pub registry: Arc<InMemoryAttributeRegistry>,
    /// Accreditation rule.
    pub accreditation: Arc<AccreditationModule>,
    /// Vesting lock rule.
    pub vesting: Arc<VestingLockModule>,
}

impl Deployment {
    /// Deploys with default vesting duration and the insider exemption off.
    pub fn new() -> Result<Self, DeployError> {
        Self::with_config(VestingConfig::default(), AccreditationConfig::default())
    }

    /// Deploys with explicit module configuration.
    pub fn with_config(
        vesting: VestingConfig,
        accreditation: AccreditationConfig,
    ) -> Result<Self, DeployError> {
        let owner = ctx(OWNER);

        let directory = Arc::new(InsiderDirectory::new(DIRECTORY, OWNER));
        directory.add_agent(&owner, AGENT)?;

        let registry = Arc::new(InMemoryAttributeRegistry::new());
        let accreditation = Arc::new(
            AccreditationModule::new(ACCREDITATION, OWNER, registry.clone(), accreditation)
                .with_directory(directory.clone()),
        );
        let vesting = Arc::new(VestingLockModule::new(VESTING, OWNER, vesting));

        let coordinator = Arc::new(ComplianceCoordinator::new(
            COORDINATOR,
            OWNER,
            CoordinatorConfig::default(),
        ));
        let modules: [Arc<dyn PolicyModule>; 2] = [accreditation.clone(), vesting.clone()];
        for module in modules {
            let address = module.address();
            coordinator.add_module(&owner, module)?;
            coordinator.call_module_function(&owner, &ModuleCall::initialize(), address)?;
        }

        let mut ledger = RestrictedLedger::initialize(
            LEDGER,
            OWNER,
            LedgerConfig::new("Acme Series A", "ACMA", 0),
            coordinator.clone(),
            &BlockContext::at(GENESIS, CHAIN_ID),
        )?;
        ledger.add_agent(&owner, AGENT)?;
        ledger.drain_events();

        Ok(Self {
            ledger,
            coordinator,
            directory,
            registry,
            accreditation,
            vesting,
        })
    }

    /// Grants the accredited-investor attribute to `holder`.
    pub fn accredit(&self, holder: Address) {
        self.registry
            .grant(holder, AttributeKey::accredited_investor());
    }
}
