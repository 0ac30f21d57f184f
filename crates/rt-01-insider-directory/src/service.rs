//! # Insider Directory Service
//!
//! Role-gated administration over an `InsiderBook`.
//!
//! ## Roles
//!
//! - **Owner**: manages agents; may also administer insiders.
//! - **Agent**: adds, removes and reclassifies insiders.
//!
//! Queries are open to everyone.

use crate::domain::{InsiderBook, InsiderEntry, InsiderError, InsiderType};
use crate::ports::InsiderLookup;

use parking_lot::RwLock;
use shared_types::{AccessControl, Address, CallContext};
use tracing::{debug, info, instrument};

/// The Insider Directory.
#[derive(Debug)]
pub struct InsiderDirectory {
    address: Address,
    roles: RwLock<AccessControl>,
    book: RwLock<InsiderBook>,
}

impl InsiderDirectory {
    /// Creates an empty directory owned by `owner`.
    #[must_use]
    pub fn new(address: Address, owner: Address) -> Self {
        info!(%address, %owner, "Insider directory created");
        Self {
            address,
            roles: RwLock::new(AccessControl::new(owner)),
            book: RwLock::new(InsiderBook::new()),
        }
    }

    /// Address of this directory.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    /// Current owner.
    #[must_use]
    pub fn owner(&self) -> Address {
        self.roles.read().owner()
    }

    /// True if `who` holds the agent role.
    #[must_use]
    pub fn is_agent(&self, who: Address) -> bool {
        self.roles.read().is_agent(who)
    }

    // =========================================================================
    // ROLE ADMINISTRATION
    // =========================================================================

    /// Grants the agent role. Owner only.
    pub fn add_agent(&self, ctx: &CallContext, agent: Address) -> Result<(), InsiderError> {
        self.roles.write().add_agent(ctx.sender, agent)?;
        info!(%agent, "Directory agent added");
        Ok(())
    }

    /// Revokes the agent role. Owner only.
    pub fn remove_agent(&self, ctx: &CallContext, agent: Address) -> Result<(), InsiderError> {
        self.roles.write().remove_agent(ctx.sender, agent)?;
        info!(%agent, "Directory agent removed");
        Ok(())
    }

    /// Hands ownership to `new_owner`. Owner only.
    pub fn transfer_ownership(
        &self,
        ctx: &CallContext,
        new_owner: Address,
    ) -> Result<(), InsiderError> {
        self.roles.write().transfer_ownership(ctx.sender, new_owner)?;
        info!(%new_owner, "Directory ownership transferred");
        Ok(())
    }

    // =========================================================================
    // INSIDER ADMINISTRATION
    // =========================================================================

    /// Registers `address` as an insider of `insider_type`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.sender))]
    pub fn add_insider(
        &self,
        ctx: &CallContext,
        address: Address,
        insider_type: InsiderType,
    ) -> Result<(), InsiderError> {
        self.roles.read().ensure_owner_or_agent(ctx.sender)?;
        self.book.write().insert(address, insider_type)?;
        info!(%address, %insider_type, "Insider added");
        Ok(())
    }

    /// Registers `address` from a raw type code.
    pub fn add_insider_raw(
        &self,
        ctx: &CallContext,
        address: Address,
        raw_type: u8,
    ) -> Result<(), InsiderError> {
        let insider_type = InsiderType::try_from(raw_type)?;
        self.add_insider(ctx, address, insider_type)
    }

    /// Registers every entry, or none of them.
    ///
    /// The batch is applied to a copy of the book which replaces the live
    /// book only if every entry succeeds.
    #[instrument(skip(self, ctx, entries), fields(caller = %ctx.sender, count = entries.len()))]
    pub fn batch_add_insiders(
        &self,
        ctx: &CallContext,
        entries: &[(Address, InsiderType)],
    ) -> Result<(), InsiderError> {
        self.roles.read().ensure_owner_or_agent(ctx.sender)?;

        let mut book = self.book.write();
        let mut staged = book.clone();
        for &(address, insider_type) in entries {
            staged.insert(address, insider_type)?;
        }
        *book = staged;

        info!(count = entries.len(), "Insider batch added");
        Ok(())
    }

    /// Unregisters `address`.
    #[instrument(skip(self, ctx), fields(caller = %ctx.sender))]
    pub fn remove_insider(&self, ctx: &CallContext, address: Address) -> Result<(), InsiderError> {
        self.roles.read().ensure_owner_or_agent(ctx.sender)?;
        let old_type = self.book.write().remove(address)?;
        info!(%address, %old_type, "Insider removed");
        Ok(())
    }

    /// Moves `address` to `new_type`. Updating to the current type succeeds
    /// without changing anything.
    #[instrument(skip(self, ctx), fields(caller = %ctx.sender))]
    pub fn update_insider_type(
        &self,
        ctx: &CallContext,
        address: Address,
        new_type: InsiderType,
    ) -> Result<(), InsiderError> {
        self.roles.read().ensure_owner_or_agent(ctx.sender)?;
        match self.book.write().reclassify(address, new_type)? {
            Some(old_type) => info!(%address, %old_type, %new_type, "Insider reclassified"),
            None => debug!(%address, %new_type, "Insider already has requested type"),
        }
        Ok(())
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// All insiders.
    #[must_use]
    pub fn list_all(&self) -> Vec<Address> {
        self.book.read().all().to_vec()
    }

    /// Insiders of one type.
    #[must_use]
    pub fn list_by_type(&self, insider_type: InsiderType) -> Vec<Address> {
        self.book.read().by_type(insider_type).to_vec()
    }

    /// Every row with its classification.
    #[must_use]
    pub fn entries(&self) -> Vec<InsiderEntry> {
        self.book.read().entries()
    }

    /// Number of insiders.
    #[must_use]
    pub fn len(&self) -> usize {
        self.book.read().len()
    }

    /// True if the directory is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.book.read().is_empty()
    }
}

impl InsiderLookup for InsiderDirectory {
    fn get_insider_type(&self, address: Address) -> InsiderType {
        self.book.read().get(address)
    }
}

// =============================================================================
// TESTS
// =============================================================================
