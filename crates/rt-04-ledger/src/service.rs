//! # Restricted Ledger Service
//!
//! Balance state machine gated by the Compliance Coordinator.
//!
//! ## Call Discipline
//!
//! Every mutating operation runs in three phases:
//!
//! 1. **Validate**: roles, pause, freezes, balances, allowances, then the
//!    coordinator verdict. Nothing is written yet.
//! 2. **Apply**: state mutation and event emission.
//! 3. **Notify**: the coordinator is told about the completed change. A
//!    failed notification is logged and never undoes the mutation.
//!
//! ## Roles
//!
//! - **Agent**: mint, burn, forced transfer, freezes, pause.
//! - **Owner**: coordinator, attribute oracle, token metadata, agents.

use crate::config::LedgerConfig;
use crate::domain::{domain_separator, LedgerError, LedgerState, PermitMessage};
use crate::events::LedgerEvent;

use rt_02_compliance::ports::LedgerView;
use rt_02_compliance::service::ComplianceCoordinator;
use shared_crypto::{recover_address, RecoverableSignature};
use shared_types::{AccessControl, Address, BlockContext, CallContext, Hash, U256};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Notification owed to the coordinator after a successful mutation.
#[derive(Debug, Clone, Copy)]
enum Notification {
    Transferred {
        from: Address,
        to: Address,
        amount: U256,
    },
    Created {
        to: Address,
        amount: U256,
    },
    Destroyed {
        from: Address,
        amount: U256,
    },
}

/// The Restricted Ledger.
#[derive(Debug)]
pub struct RestrictedLedger {
    address: Address,
    metadata: LedgerConfig,
    roles: AccessControl,
    state: LedgerState,
    compliance: Arc<ComplianceCoordinator>,
    attribute_oracle: Option<Address>,
    /// `(chain_id, separator)` for the current name.
    domain_cache: (u64, Hash),
    events: Vec<LedgerEvent>,
}

impl RestrictedLedger {
    /// Creates the ledger at `address` and binds it to `compliance`.
    ///
    /// The coordinator must have no bound token, since the ledger binds
    /// itself.
    #[instrument(skip(config, compliance, block), fields(name = %config.name))]
    pub fn initialize(
        address: Address,
        owner: Address,
        config: LedgerConfig,
        compliance: Arc<ComplianceCoordinator>,
        block: &BlockContext,
    ) -> Result<Self, LedgerError> {
        if address.is_zero() || owner.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        if config.name.is_empty() || config.symbol.is_empty() {
            return Err(LedgerError::EmptyMetadata);
        }
        compliance.bind_token(&CallContext::new(address, *block), address)?;

        let domain_cache = (
            block.chain_id,
            domain_separator(&config.name, block.chain_id, address),
        );
        let mut ledger = Self {
            address,
            metadata: config,
            roles: AccessControl::new(owner),
            state: LedgerState::new(),
            compliance,
            attribute_oracle: None,
            domain_cache,
            events: Vec::new(),
        };
        ledger.emit_token_information();
        ledger.emit(LedgerEvent::ComplianceAdded {
            compliance: ledger.compliance.address(),
        });
        info!(%address, %owner, "Ledger initialized");
        Ok(ledger)
    }

    // =========================================================================
    // METADATA & QUERIES
    // =========================================================================

    /// Ledger address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Token name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Token symbol.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.metadata.symbol
    }

    /// Display decimals.
    #[must_use]
    pub fn decimals(&self) -> u8 {
        self.metadata.decimals
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.owner()
    }

    /// True if `who` holds the agent role.
    #[must_use]
    pub fn is_agent(&self, who: Address) -> bool {
        self.roles.is_agent(who)
    }

    /// The attached coordinator.
    #[must_use]
    pub fn compliance(&self) -> &Arc<ComplianceCoordinator> {
        &self.compliance
    }

    /// The attribute oracle address, if set.
    #[must_use]
    pub fn attribute_oracle(&self) -> Option<Address> {
        self.attribute_oracle
    }

    /// Full balance of `holder`.
    #[must_use]
    pub fn balance_of(&self, holder: Address) -> U256 {
        self.state.balance_of(holder)
    }

    /// Total supply.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.state.total_supply()
    }

    /// True if `address` is fully frozen.
    #[must_use]
    pub fn is_frozen(&self, address: Address) -> bool {
        self.state.is_frozen(address)
    }

    /// Partially frozen amount of `holder`.
    #[must_use]
    pub fn frozen_amount(&self, holder: Address) -> U256 {
        self.state.frozen_amount(holder)
    }

    /// Allowance of `spender` over `owner`'s tokens.
    #[must_use]
    pub fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state.allowance(owner, spender)
    }

    /// True if paused.
    #[must_use]
    pub fn paused(&self) -> bool {
        self.state.is_paused()
    }

    /// Next permit nonce of `holder`.
    #[must_use]
    pub fn nonce_of(&self, holder: Address) -> U256 {
        self.state.nonce(holder)
    }

    /// Read-only view of the whole state.
    #[must_use]
    pub fn state(&self) -> &LedgerState {
        &self.state
    }

    /// Permit domain separator on `chain_id`.
    #[must_use]
    pub fn domain_separator(&self, chain_id: u64) -> Hash {
        if self.domain_cache.0 == chain_id {
            self.domain_cache.1
        } else {
            domain_separator(&self.metadata.name, chain_id, self.address)
        }
    }

    fn refresh_domain_separator(&mut self, chain_id: u64) -> Hash {
        if self.domain_cache.0 != chain_id {
            debug!(chain_id, "Recomputing domain separator");
            self.domain_cache = (
                chain_id,
                domain_separator(&self.metadata.name, chain_id, self.address),
            );
        }
        self.domain_cache.1
    }

    // =========================================================================
    // TRANSFERS
    // =========================================================================

    /// Moves `amount` from the caller to `to`.
    #[instrument(skip(self, ctx), fields(from = %ctx.sender))]
    pub fn transfer(&mut self, ctx: &CallContext, to: Address, amount: U256) -> Result<(), LedgerError> {
        let note = self.transfer_inner(ctx, ctx.sender, to, amount)?;
        self.notify(ctx, note);
        Ok(())
    }

    /// Moves `amount` from `from` to `to` using the caller's allowance.
    #[instrument(skip(self, ctx), fields(spender = %ctx.sender))]
    pub fn transfer_from(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        self.ensure_not_paused()?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let spender = ctx.sender;
        self.state.check_not_frozen(from, to)?;
        self.state.check_free_balance(from, amount)?;
        self.state.check_allowance(from, spender, amount)?;
        self.ensure_compliant(from, to, amount, ctx.now())?;

        let remaining = self.state.spend_allowance(from, spender, amount)?;
        self.state.move_tokens(from, to, amount)?;
        self.emit(LedgerEvent::Approval {
            owner: from,
            spender,
            value: remaining,
        });
        self.emit(LedgerEvent::Transfer {
            from,
            to,
            value: amount,
        });
        info!(%from, %to, %amount, "Transfer via allowance");

        self.notify(ctx, Notification::Transferred { from, to, amount });
        Ok(())
    }

    /// Agent transfer that ignores the pause and may draw on frozen tokens.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn forced_transfer(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let note = self.forced_transfer_inner(ctx, from, to, amount)?;
        self.notify(ctx, note);
        Ok(())
    }

    /// Transfers to several recipients, all or nothing.
    #[instrument(skip(self, ctx, transfers), fields(from = %ctx.sender, count = transfers.len()))]
    pub fn batch_transfer(
        &mut self,
        ctx: &CallContext,
        transfers: &[(Address, U256)],
    ) -> Result<(), LedgerError> {
        self.run_batch(ctx, transfers, |ledger, ctx, to, amount| {
            ledger.transfer_inner(ctx, ctx.sender, to, amount)
        })
    }

    fn transfer_inner(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Notification, LedgerError> {
        self.ensure_not_paused()?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.state.check_not_frozen(from, to)?;
        self.state.check_free_balance(from, amount)?;
        self.ensure_compliant(from, to, amount, ctx.now())?;

        self.state.move_tokens(from, to, amount)?;
        self.emit(LedgerEvent::Transfer {
            from,
            to,
            value: amount,
        });
        info!(%from, %to, %amount, "Transfer");
        Ok(Notification::Transferred { from, to, amount })
    }

    fn forced_transfer_inner(
        &mut self,
        ctx: &CallContext,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<Notification, LedgerError> {
        self.ensure_agent(ctx)?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.state.check_not_frozen(from, to)?;
        self.state.check_balance(from, amount)?;
        self.ensure_compliant(from, to, amount, ctx.now())?;

        self.release_shortfall(from, amount)?;
        self.state.move_tokens(from, to, amount)?;
        self.emit(LedgerEvent::Transfer {
            from,
            to,
            value: amount,
        });
        info!(%from, %to, %amount, "Forced transfer");
        Ok(Notification::Transferred { from, to, amount })
    }

    // =========================================================================
    // SUPPLY
    // =========================================================================

    /// Creates `amount` tokens for `to`. Agent only.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn mint(&mut self, ctx: &CallContext, to: Address, amount: U256) -> Result<(), LedgerError> {
        let note = self.mint_inner(ctx, to, amount)?;
        self.notify(ctx, note);
        Ok(())
    }

    /// Destroys `amount` of `from`'s tokens, unfreezing as needed. Agent only.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn burn(&mut self, ctx: &CallContext, from: Address, amount: U256) -> Result<(), LedgerError> {
        let note = self.burn_inner(ctx, from, amount)?;
        self.notify(ctx, note);
        Ok(())
    }

    /// Mints to several recipients, all or nothing.
    #[instrument(skip(self, ctx, mints), fields(agent = %ctx.sender, count = mints.len()))]
    pub fn batch_mint(&mut self, ctx: &CallContext, mints: &[(Address, U256)]) -> Result<(), LedgerError> {
        self.run_batch(ctx, mints, Self::mint_inner)
    }

    /// Burns from several holders, all or nothing.
    #[instrument(skip(self, ctx, burns), fields(agent = %ctx.sender, count = burns.len()))]
    pub fn batch_burn(&mut self, ctx: &CallContext, burns: &[(Address, U256)]) -> Result<(), LedgerError> {
        self.run_batch(ctx, burns, Self::burn_inner)
    }

    fn mint_inner(
        &mut self,
        ctx: &CallContext,
        to: Address,
        amount: U256,
    ) -> Result<Notification, LedgerError> {
        self.ensure_agent(ctx)?;
        if to.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.state.check_mint(amount)?;
        self.ensure_compliant(Address::ZERO, to, amount, ctx.now())?;

        self.state.mint(to, amount)?;
        self.emit(LedgerEvent::Transfer {
            from: Address::ZERO,
            to,
            value: amount,
        });
        info!(%to, %amount, "Minted");
        Ok(Notification::Created { to, amount })
    }

    fn burn_inner(
        &mut self,
        ctx: &CallContext,
        from: Address,
        amount: U256,
    ) -> Result<Notification, LedgerError> {
        self.ensure_agent(ctx)?;
        self.state.check_balance(from, amount)?;
        self.ensure_compliant(from, Address::ZERO, amount, ctx.now())?;

        self.release_shortfall(from, amount)?;
        self.state.burn(from, amount)?;
        self.emit(LedgerEvent::Transfer {
            from,
            to: Address::ZERO,
            value: amount,
        });
        info!(%from, %amount, "Burned");
        Ok(Notification::Destroyed { from, amount })
    }

    fn release_shortfall(&mut self, holder: Address, amount: U256) -> Result<(), LedgerError> {
        let released = self.state.release_shortfall(holder, amount)?;
        if !released.is_zero() {
            self.emit(LedgerEvent::TokensUnfrozen {
                address: holder,
                amount: released,
            });
            debug!(%holder, %released, "Frozen tokens released");
        }
        Ok(())
    }

    /// Runs `op` for every item on the live state; the first failure restores
    /// the snapshot. Notifications are sent only once every item succeeded.
    fn run_batch<F>(
        &mut self,
        ctx: &CallContext,
        items: &[(Address, U256)],
        mut op: F,
    ) -> Result<(), LedgerError>
    where
        F: FnMut(&mut Self, &CallContext, Address, U256) -> Result<Notification, LedgerError>,
    {
        let snapshot = self.state.clone();
        let event_mark = self.events.len();
        let mut notes = Vec::with_capacity(items.len());

        for (index, &(account, amount)) in items.iter().enumerate() {
            match op(&mut *self, ctx, account, amount) {
                Ok(note) => notes.push(note),
                Err(error) => {
                    self.state = snapshot;
                    self.events.truncate(event_mark);
                    warn!(index, %error, "Batch rolled back");
                    return Err(error);
                }
            }
        }

        for note in notes {
            self.notify(ctx, note);
        }
        Ok(())
    }

    // =========================================================================
    // ALLOWANCES & PERMIT
    // =========================================================================

    /// Sets the caller's allowance for `spender`.
    pub fn approve(&mut self, ctx: &CallContext, spender: Address, value: U256) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.set_allowance(ctx.sender, spender, value);
        Ok(())
    }

    /// Raises the caller's allowance for `spender` by `added`.
    pub fn increase_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        added: U256,
    ) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        let value = self
            .state
            .allowance(ctx.sender, spender)
            .checked_add(added)
            .ok_or(LedgerError::AllowanceOverflow)?;
        self.set_allowance(ctx.sender, spender, value);
        Ok(())
    }

    /// Lowers the caller's allowance for `spender` by `subtracted`.
    pub fn decrease_allowance(
        &mut self,
        ctx: &CallContext,
        spender: Address,
        subtracted: U256,
    ) -> Result<(), LedgerError> {
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.state.check_allowance(ctx.sender, spender, subtracted)?;
        let value = self.state.allowance(ctx.sender, spender) - subtracted;
        self.set_allowance(ctx.sender, spender, value);
        Ok(())
    }

    /// Sets `owner`'s allowance for `spender` from a signed permit.
    ///
    /// `signature` is the 65-byte `r ‖ s ‖ v` encoding over
    /// `PermitMessage::digest`. Compliance is not consulted.
    #[instrument(skip(self, ctx, signature))]
    pub fn authorize(
        &mut self,
        ctx: &CallContext,
        owner: Address,
        spender: Address,
        value: U256,
        deadline: u64,
        signature: &[u8],
    ) -> Result<(), LedgerError> {
        let now = ctx.now();
        if deadline < now {
            warn!(deadline, now, "Permit expired");
            return Err(LedgerError::PermitExpired { deadline, now });
        }
        if spender.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }

        let separator = self.refresh_domain_separator(ctx.block.chain_id);
        let message = PermitMessage {
            owner,
            spender,
            value,
            nonce: self.state.nonce(owner),
            deadline,
        };
        let digest = message.digest(&separator);

        let signature = RecoverableSignature::from_bytes(signature)?;
        let signer = Address::new(recover_address(digest.as_bytes(), &signature)?);
        if signer.is_zero() || signer != owner {
            warn!(%signer, %owner, "Permit signer mismatch");
            return Err(LedgerError::InvalidSigner);
        }

        let nonce = self.state.use_nonce(owner);
        self.set_allowance(owner, spender, value);
        info!(%owner, %spender, %nonce, "Permit accepted");
        Ok(())
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        self.state.set_allowance(owner, spender, value);
        self.emit(LedgerEvent::Approval {
            owner,
            spender,
            value,
        });
    }

    // =========================================================================
    // FREEZES & PAUSE
    // =========================================================================

    /// Fully freezes or unfreezes `address`. Agent only.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn set_frozen(&mut self, ctx: &CallContext, address: Address, frozen: bool) -> Result<(), LedgerError> {
        self.ensure_agent(ctx)?;
        self.state.set_address_frozen(address, frozen);
        self.emit(LedgerEvent::AddressFrozen {
            address,
            is_frozen: frozen,
            agent: ctx.sender,
        });
        info!(%address, frozen, "Address freeze set");
        Ok(())
    }

    /// Freezes `amount` more of `address`'s balance. Agent only.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn freeze_partial(&mut self, ctx: &CallContext, address: Address, amount: U256) -> Result<(), LedgerError> {
        self.ensure_agent(ctx)?;
        self.state.freeze_tokens(address, amount)?;
        self.emit(LedgerEvent::TokensFrozen { address, amount });
        info!(%address, %amount, "Tokens frozen");
        Ok(())
    }

    /// Unfreezes `amount` of `address`'s frozen tokens. Agent only.
    #[instrument(skip(self, ctx), fields(agent = %ctx.sender))]
    pub fn unfreeze_partial(&mut self, ctx: &CallContext, address: Address, amount: U256) -> Result<(), LedgerError> {
        self.ensure_agent(ctx)?;
        self.state.unfreeze_tokens(address, amount)?;
        self.emit(LedgerEvent::TokensUnfrozen { address, amount });
        info!(%address, %amount, "Tokens unfrozen");
        Ok(())
    }

    /// Halts ordinary transfers. Agent only.
    pub fn pause(&mut self, ctx: &CallContext) -> Result<(), LedgerError> {
        self.ensure_agent(ctx)?;
        self.ensure_not_paused()?;
        self.state.set_paused(true);
        self.emit(LedgerEvent::Paused { agent: ctx.sender });
        info!(agent = %ctx.sender, "Ledger paused");
        Ok(())
    }

    /// Resumes ordinary transfers. Agent only.
    pub fn unpause(&mut self, ctx: &CallContext) -> Result<(), LedgerError> {
        self.ensure_agent(ctx)?;
        if !self.state.is_paused() {
            return Err(LedgerError::NotPaused);
        }
        self.state.set_paused(false);
        self.emit(LedgerEvent::Unpaused { agent: ctx.sender });
        info!(agent = %ctx.sender, "Ledger unpaused");
        Ok(())
    }

    // =========================================================================
    // OWNER CONFIGURATION
    // =========================================================================

    /// Replaces the coordinator: binds the new one, then unbinds the old one.
    /// Owner only.
    #[instrument(skip(self, ctx, compliance), fields(compliance = %compliance.address()))]
    pub fn set_compliance(
        &mut self,
        ctx: &CallContext,
        compliance: Arc<ComplianceCoordinator>,
    ) -> Result<(), LedgerError> {
        self.roles.ensure_owner(ctx.sender)?;
        let token_ctx = ctx.as_caller(self.address);

        compliance.bind_token(&token_ctx, self.address)?;
        if let Err(error) = self.compliance.unbind_token(&token_ctx, self.address) {
            if let Err(rollback) = compliance.unbind_token(&token_ctx, self.address) {
                warn!(%rollback, "Failed to roll back new coordinator binding");
            }
            return Err(error.into());
        }

        self.compliance = compliance;
        self.emit(LedgerEvent::ComplianceAdded {
            compliance: self.compliance.address(),
        });
        info!("Compliance coordinator replaced");
        Ok(())
    }

    /// Records the attribute oracle address. Owner only.
    ///
    /// The value is published through [`Self::attribute_oracle`] and an
    /// event; it does not change verdicts. The accreditation module keeps
    /// querying the oracle it was constructed with.
    pub fn set_attribute_oracle(&mut self, ctx: &CallContext, oracle: Address) -> Result<(), LedgerError> {
        self.roles.ensure_owner(ctx.sender)?;
        if oracle.is_zero() {
            return Err(LedgerError::ZeroAddress);
        }
        self.attribute_oracle = Some(oracle);
        self.emit(LedgerEvent::AttributeOracleAdded { oracle });
        info!(%oracle, "Attribute oracle set");
        Ok(())
    }

    /// Renames the token; the permit domain separator follows. Owner only.
    pub fn set_name(&mut self, ctx: &CallContext, name: &str) -> Result<(), LedgerError> {
        self.roles.ensure_owner(ctx.sender)?;
        if name.is_empty() {
            return Err(LedgerError::EmptyMetadata);
        }
        self.metadata.name = name.to_string();
        let chain_id = self.domain_cache.0;
        self.domain_cache = (chain_id, domain_separator(name, chain_id, self.address));
        self.emit_token_information();
        info!(name, "Token renamed");
        Ok(())
    }

    /// Changes the token symbol. Owner only.
    pub fn set_symbol(&mut self, ctx: &CallContext, symbol: &str) -> Result<(), LedgerError> {
        self.roles.ensure_owner(ctx.sender)?;
        if symbol.is_empty() {
            return Err(LedgerError::EmptyMetadata);
        }
        self.metadata.symbol = symbol.to_string();
        self.emit_token_information();
        info!(symbol, "Token symbol changed");
        Ok(())
    }

    /// Grants the agent role. Owner only.
    pub fn add_agent(&mut self, ctx: &CallContext, agent: Address) -> Result<(), LedgerError> {
        self.roles.add_agent(ctx.sender, agent)?;
        self.emit(LedgerEvent::AgentAdded { agent });
        info!(%agent, "Ledger agent added");
        Ok(())
    }

    /// Revokes the agent role. Owner only.
    pub fn remove_agent(&mut self, ctx: &CallContext, agent: Address) -> Result<(), LedgerError> {
        self.roles.remove_agent(ctx.sender, agent)?;
        self.emit(LedgerEvent::AgentRemoved { agent });
        info!(%agent, "Ledger agent removed");
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(&mut self, ctx: &CallContext, new_owner: Address) -> Result<(), LedgerError> {
        self.roles.transfer_ownership(ctx.sender, new_owner)?;
        info!(%new_owner, "Ledger ownership transferred");
        Ok(())
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    /// Emitted events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Takes and clears the emitted events.
    pub fn drain_events(&mut self) -> Vec<LedgerEvent> {
        std::mem::take(&mut self.events)
    }

    fn emit(&mut self, event: LedgerEvent) {
        self.events.push(event);
    }

    fn emit_token_information(&mut self) {
        self.emit(LedgerEvent::UpdatedTokenInformation {
            name: self.metadata.name.clone(),
            symbol: self.metadata.symbol.clone(),
            decimals: self.metadata.decimals,
        });
    }

    // =========================================================================
    // GUARDS & NOTIFICATIONS
    // =========================================================================

    fn ensure_agent(&self, ctx: &CallContext) -> Result<(), LedgerError> {
        self.roles.ensure_agent(ctx.sender)?;
        Ok(())
    }

    fn ensure_not_paused(&self) -> Result<(), LedgerError> {
        if self.state.is_paused() {
            return Err(LedgerError::Paused);
        }
        Ok(())
    }

    fn ensure_compliant(
        &self,
        from: Address,
        to: Address,
        amount: U256,
        now: u64,
    ) -> Result<(), LedgerError> {
        if self.compliance.can_transfer(from, to, amount, self, now)? {
            Ok(())
        } else {
            warn!(%from, %to, %amount, "Rejected by compliance");
            Err(LedgerError::TransferNotPermitted)
        }
    }

    fn notify(&self, ctx: &CallContext, note: Notification) {
        let token_ctx = ctx.as_caller(self.address);
        let result = match note {
            Notification::Transferred { from, to, amount } => {
                self.compliance.transferred(&token_ctx, from, to, amount, self)
            }
            Notification::Created { to, amount } => {
                self.compliance.created(&token_ctx, to, amount, self)
            }
            Notification::Destroyed { from, amount } => {
                self.compliance.destroyed(&token_ctx, from, amount, self)
            }
        };
        if let Err(error) = result {
            warn!(%error, ?note, "Compliance notification failed");
        }
    }
}

impl LedgerView for RestrictedLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, holder: Address) -> U256 {
        self.state.balance_of(holder)
    }

    fn total_supply(&self) -> U256 {
        self.state.total_supply()
    }
}

// =============================================================================
// TESTS
// =============================================================================
