//! Write-side repositories.

use crate::SharedStore;
use mimicdb_core::{Entity, EntityCell, StoreResult};
use std::marker::PhantomData;
use std::sync::Arc;

/// Write surface for a single entity type.
///
/// Every operation locks the shared store, applies one store primitive and
/// returns; failures are precondition violations surfaced as
/// [`mimicdb_core::StoreError`] with nothing retried. Range operations
/// apply entities in order under a single lock and stop at the first
/// failure; entities already applied stay applied.
pub struct WriteRepository<T> {
    store: SharedStore,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> WriteRepository<T> {
    /// Creates a repository over the shared store.
    #[must_use]
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    /// Inserts one entity.
    pub async fn insert(&self, entity: &EntityCell<T>) -> StoreResult<()> {
        self.store.lock().insert(&entity.as_dyn())
    }

    /// Inserts a sequence of entities in order.
    pub async fn insert_range(&self, entities: &[EntityCell<T>]) -> StoreResult<()> {
        let mut store = self.store.lock();
        for entity in entities {
            store.insert(&entity.as_dyn())?;
        }
        Ok(())
    }

    /// Updates one entity.
    pub async fn update(&self, entity: &EntityCell<T>) -> StoreResult<()> {
        self.store.lock().update(&entity.as_dyn())
    }

    /// Updates a sequence of entities in order.
    pub async fn update_range(&self, entities: &[EntityCell<T>]) -> StoreResult<()> {
        let mut store = self.store.lock();
        for entity in entities {
            store.update(&entity.as_dyn())?;
        }
        Ok(())
    }

    /// Merges one root entity together with its reachable child graph.
    pub async fn merge(&self, entity: &EntityCell<T>) -> StoreResult<()> {
        self.store.lock().merge(&entity.as_dyn())
    }

    /// Merges a sequence of root entities in order.
    pub async fn merge_range(&self, entities: &[EntityCell<T>]) -> StoreResult<()> {
        let mut store = self.store.lock();
        for entity in entities {
            store.merge(&entity.as_dyn())?;
        }
        Ok(())
    }

    /// Deletes one entity.
    pub async fn delete(&self, entity: &EntityCell<T>) -> StoreResult<()> {
        self.store.lock().delete(&entity.as_dyn())
    }

    /// Deletes a sequence of entities in order.
    pub async fn delete_range(&self, entities: &[EntityCell<T>]) -> StoreResult<()> {
        let mut store = self.store.lock();
        for entity in entities {
            store.delete(&entity.as_dyn())?;
        }
        Ok(())
    }
}

impl<T> Clone for WriteRepository<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _marker: PhantomData,
        }
    }
}
