//! Unit-of-work surface.

use crate::{SharedStore, WriteRepository};
use mimicdb_core::{Entity, StoreResult};
use std::sync::Arc;
use tracing::debug;

/// Groups write operations under one transaction and audit owner.
///
/// Mirrors the store's single-ambient-transaction model: `begin` snapshots
/// the store and records the audit owner for every stamp taken until
/// `commit`; beginning again discards the previous snapshot. Repositories
/// handed out by [`UnitOfWork::repository`] write against the same shared
/// store, and therefore against the open snapshot.
pub struct UnitOfWork {
    store: SharedStore,
}

impl UnitOfWork {
    /// Creates a unit of work over the shared store.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Opens a transaction with `audit_owner` recorded on every stamp.
    pub fn begin(&self, audit_owner: &str) {
        debug!(owner = audit_owner, "unit of work begins");
        self.store.lock().start_transaction(audit_owner);
    }

    /// Returns a write repository for `T` bound to the same store.
    #[must_use]
    pub fn repository<T: Entity>(&self) -> WriteRepository<T> {
        WriteRepository::new(Arc::clone(&self.store))
    }

    /// Commits the open transaction into the live store.
    pub fn commit(&self) -> StoreResult<()> {
        self.store.lock().commit()
    }
}
