//! Load → mutate → save operations over the shared store.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shelftrack_core::{DomainError, DomainResult, InventoryDoc, ItemId, ItemPath, Outcome};
use shelftrack_store::{JsonStore, StoreError};
use thiserror::Error;

/// Result type for shelving operations.
pub type OpResult<T> = Result<T, OpError>;

/// Operation-level error: domain outcome or persistence failure.
#[derive(Debug, Error)]
pub enum OpError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl OpError {
    /// Whether this error is recoverable status text for the user, as
    /// opposed to a fatal condition (malformed store, missing target).
    pub fn is_user_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Domain(DomainError::AlreadyExists(_)) | Self::Domain(DomainError::NotFound(_))
        )
    }
}

/// Shared handle guarding the load→mutate→save critical section.
pub type SharedService = Arc<Mutex<ShelfService>>;

/// Lock the shared service, recovering the guard if a previous holder
/// panicked (the document on disk is always complete between operations).
pub fn lock_service(shared: &SharedService) -> MutexGuard<'_, ShelfService> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// All inventory operations over one [`JsonStore`].
#[derive(Debug)]
pub struct ShelfService {
    store: JsonStore,
}

impl ShelfService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    /// Wrap the service in the shared critical-section handle.
    pub fn into_shared(self) -> SharedService {
        Arc::new(Mutex::new(self))
    }

    pub fn store(&self) -> &JsonStore {
        &self.store
    }

    /// One full operation: load, apply the mutation, save once.
    ///
    /// A failed mutation saves nothing, so the file never holds a
    /// partially-applied change.
    fn mutate(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut InventoryDoc) -> DomainResult<Outcome>,
    ) -> OpResult<Outcome> {
        let mut doc = self.store.load()?;
        let outcome = apply(&mut doc)?;
        self.store.save(&doc)?;
        tracing::info!(op, status = %outcome, "inventory updated");
        Ok(outcome)
    }

    // ----- hierarchy editor -----

    pub fn add_location(&self, name: &str) -> OpResult<Outcome> {
        self.mutate("add_location", |doc| doc.add_location(name))
    }

    pub fn remove_location(&self, name: &str) -> OpResult<Outcome> {
        self.mutate("remove_location", |doc| doc.remove_location(name))
    }

    pub fn add_shelf(&self, location: &str, shelf: &str) -> OpResult<Outcome> {
        self.mutate("add_shelf", |doc| doc.add_shelf(location, shelf))
    }

    pub fn remove_shelf(&self, location: &str, shelf: &str) -> OpResult<Outcome> {
        self.mutate("remove_shelf", |doc| doc.remove_shelf(location, shelf))
    }

    pub fn add_nested_shelf(&self, location: &str, shelf: &str, nested: &str) -> OpResult<Outcome> {
        self.mutate("add_nested_shelf", |doc| {
            doc.add_nested_shelf(location, shelf, nested)
        })
    }

    pub fn remove_nested_shelf(
        &self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> OpResult<Outcome> {
        self.mutate("remove_nested_shelf", |doc| {
            doc.remove_nested_shelf(location, shelf, nested)
        })
    }

    pub fn clear_nested_shelf(
        &self,
        location: &str,
        shelf: &str,
        nested: &str,
    ) -> OpResult<Outcome> {
        self.mutate("clear_nested_shelf", |doc| {
            doc.clear_nested_shelf(location, shelf, nested)
        })
    }

    // ----- locator / relocator -----

    /// Relocate (or newly file) an item at the target nested shelf.
    pub fn locate_and_move(&self, item: ItemId, target: &ItemPath) -> OpResult<Outcome> {
        self.mutate("locate_and_move", move |doc| doc.file_item(item, target))
    }

    /// Read-only whole-hierarchy search.
    pub fn find(&self, item: &ItemId) -> OpResult<Option<ItemPath>> {
        Ok(self.store.load()?.find(item))
    }

    /// Read-only snapshot of the whole document, for display surfaces.
    pub fn snapshot(&self) -> OpResult<InventoryDoc> {
        Ok(self.store.load()?)
    }

    // ----- store administration -----

    /// Create the empty inventory file when none exists yet.
    pub fn init_store(&self) -> OpResult<bool> {
        Ok(self.store.create_if_absent()?)
    }

    /// Back the current file up and reset the inventory to empty.
    pub fn backup_then_reset(&self) -> OpResult<()> {
        Ok(self.store.backup_then_reset()?)
    }
}
