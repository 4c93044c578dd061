//! Transactional snapshotting.

use crate::error::{StoreError, StoreResult};
use crate::store::StoreMap;
use tracing::{debug, warn};

/// A pending transaction: the snapshot map plus the audit owner recorded
/// when it began.
///
/// The snapshot is a shallow copy of the live type→partition map. Entity
/// objects stay shared by reference with the live store, so in-place field
/// mutation of an already-stored object is visible through both views
/// regardless of commit.
pub struct Transaction {
    snapshot: StoreMap,
    audit_owner: String,
}

impl Transaction {
    /// The audit owner recorded when the transaction began.
    #[must_use]
    pub fn audit_owner(&self) -> &str {
        &self.audit_owner
    }
}

/// Snapshot/commit wrapper around the store's backing map.
///
/// At most one transaction is open at a time. Beginning while one is open
/// discards the previous snapshot. There is no rollback primitive:
/// abandoning the snapshot (or beginning again) is the only way to drop
/// pending writes.
#[derive(Default)]
pub struct TransactionManager {
    current: Option<Transaction>,
}

impl TransactionManager {
    /// Opens a transaction over `snapshot`, replacing any in-flight one.
    pub(crate) fn begin(&mut self, snapshot: StoreMap, audit_owner: String) {
        if self.current.is_some() {
            warn!("discarding in-flight transaction snapshot");
        }
        debug!(owner = %audit_owner, "transaction started");
        self.current = Some(Transaction {
            snapshot,
            audit_owner,
        });
    }

    /// Closes the transaction, handing back the snapshot map.
    pub(crate) fn commit(&mut self) -> StoreResult<StoreMap> {
        let transaction = self
            .current
            .take()
            .ok_or(StoreError::NoActiveTransaction)?;
        debug!(owner = %transaction.audit_owner, "transaction committed");
        Ok(transaction.snapshot)
    }

    /// Whether a transaction is open.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    /// The in-flight transaction, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Transaction> {
        self.current.as_ref()
    }

    pub(crate) fn snapshot(&self) -> Option<&StoreMap> {
        self.current.as_ref().map(|t| &t.snapshot)
    }

    pub(crate) fn snapshot_mut(&mut self) -> Option<&mut StoreMap> {
        self.current.as_mut().map(|t| &mut t.snapshot)
    }
}
