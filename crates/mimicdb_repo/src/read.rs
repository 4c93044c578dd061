//! Read-side repositories.

use crate::SharedStore;
use mimicdb_core::{Entity, GlobalId};
use std::marker::PhantomData;
use std::sync::Arc;

/// Read surface for a single entity type.
///
/// Reads scan the type partition linearly and return cloned values; the
/// store's shared handles are never handed out.
pub struct ReadRepository<T> {
    store: SharedStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity + Clone> ReadRepository<T> {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Reads the entity with the given internal id, if any.
    pub async fn read_by_id(&self, id: i64) -> Option<T> {
        self.store.lock().read_by_id::<T>(id)
    }

    /// Reads the entity with the given global id, if any.
    pub async fn read_by_global_id(&self, global_id: GlobalId) -> Option<T> {
        self.store.lock().read_by_global_id::<T>(global_id)
    }

    /// Reads the whole type partition in insertion order.
    pub async fn read_all(&self) -> Vec<T> {
        self.store.lock().read_all::<T>()
    }
}

impl<T> Clone for ReadRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}
