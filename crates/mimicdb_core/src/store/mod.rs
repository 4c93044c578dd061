//! The type-partitioned entity store.

mod merge;
mod partition;

pub(crate) use partition::{Partition, StoreMap};

use crate::entity::{AuditStamper, DynEntity, Entity, GlobalId};
use crate::error::{StoreError, StoreResult};
use crate::transaction::TransactionManager;
use std::any::TypeId;
use std::fmt;
use std::sync::Arc;

/// In-memory, type-partitioned entity store.
///
/// Each concrete entity type owns an ordered partition with its own identity
/// space: internal ids are assigned per type (next id = last entry's id + 1)
/// and global ids are unique per type. Lookups match on the full identity
/// pair (internal id, global id).
///
/// Every CRUD and merge call routes to the transaction snapshot while one is
/// open, otherwise to the live map. The store has a single logical owner and
/// no internal locking around its map; callers needing concurrent access
/// must serialize externally.
#[derive(Default)]
pub struct EntityStore {
    live: StoreMap,
    transactions: TransactionManager,
    stamper: AuditStamper,
}

impl EntityStore {
    /// Creates an empty store with an empty audit owner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the partition for `T` in insertion order, or an empty vector
    /// if the type has never been seen. Values are cloned out; the store's
    /// shared handles are never exposed.
    pub fn read_all<T: Entity + Clone>(&self) -> Vec<T> {
        self.active_map()
            .get(&TypeId::of::<T>())
            .map(|partition| {
                partition
                    .entries()
                    .iter()
                    .filter_map(|entity| entity.read().as_any().downcast_ref::<T>().cloned())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The first entity of type `T` with the given internal id, if any.
    pub fn read_by_id<T: Entity + Clone>(&self, id: i64) -> Option<T> {
        self.find(|entity: &T| entity.internal_id() == id)
    }

    /// The first entity of type `T` with the given global id, if any.
    pub fn read_by_global_id<T: Entity + Clone>(&self, global_id: GlobalId) -> Option<T> {
        self.find(|entity: &T| entity.global_id() == global_id)
    }

    /// Inserts an entity, assigning an internal id when it carries `0` and
    /// stamping both creation and modification audit fields.
    pub fn insert(&mut self, entity: &DynEntity) -> StoreResult<()> {
        let (map, stamper) = self.active_parts();
        insert_into(map, stamper, entity)
    }

    /// Updates the stored entity matching the incoming identity pair,
    /// replacing it in place and restamping the modification audit fields
    /// only.
    pub fn update(&mut self, entity: &DynEntity) -> StoreResult<()> {
        let (map, stamper) = self.active_parts();
        update_into(map, stamper, entity)
    }

    /// Merges a root entity together with every entity reachable from it;
    /// see the crate docs for the reconciliation rules.
    pub fn merge(&mut self, entity: &DynEntity) -> StoreResult<()> {
        let (map, stamper) = self.active_parts();
        merge::merge_into(map, stamper, entity)
    }

    /// Deletes the stored entity matching the incoming identity pair; the
    /// order of the remaining entries is preserved.
    pub fn delete(&mut self, entity: &DynEntity) -> StoreResult<()> {
        let (map, _) = self.active_parts();
        delete_from(map, entity)
    }

    /// Opens a transaction: snapshots the live map and records `audit_owner`
    /// for every stamp taken until commit. An in-flight snapshot is
    /// discarded. The owner persists after commit.
    pub fn start_transaction(&mut self, audit_owner: impl Into<String>) {
        let owner = audit_owner.into();
        self.stamper.set_owner(owner.clone());
        self.transactions.begin(self.live.clone(), owner);
    }

    /// Commits the open transaction: the snapshot map replaces the live map
    /// wholesale.
    pub fn commit(&mut self) -> StoreResult<()> {
        self.live = self.transactions.commit()?;
        Ok(())
    }

    /// Whether a transaction is open.
    #[must_use]
    pub fn in_transaction(&self) -> bool {
        self.transactions.is_active()
    }

    /// The current audit owner.
    #[must_use]
    pub fn audit_owner(&self) -> &str {
        self.stamper.owner()
    }

    fn find<T: Entity + Clone>(&self, predicate: impl Fn(&T) -> bool) -> Option<T> {
        self.active_map()
            .get(&TypeId::of::<T>())
            .and_then(|partition| {
                partition.entries().iter().find_map(|entity| {
                    entity
                        .read()
                        .as_any()
                        .downcast_ref::<T>()
                        .filter(|candidate| predicate(candidate))
                        .cloned()
                })
            })
    }

    fn active_map(&self) -> &StoreMap {
        self.transactions.snapshot().unwrap_or(&self.live)
    }

    fn active_parts(&mut self) -> (&mut StoreMap, &AuditStamper) {
        let map = match self.transactions.snapshot_mut() {
            Some(snapshot) => snapshot,
            None => &mut self.live,
        };
        (map, &self.stamper)
    }
}

impl fmt::Debug for EntityStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityStore")
            .field("partitions", &self.live.len())
            .field("in_transaction", &self.in_transaction())
            .finish_non_exhaustive()
    }
}

/// The identity triple of an entity plus its partition key, read in one
/// lock acquisition.
pub(crate) struct EntityKey {
    pub type_id: TypeId,
    pub type_name: &'static str,
    pub internal_id: i64,
    pub global_id: GlobalId,
}

pub(crate) fn entity_key(entity: &DynEntity) -> EntityKey {
    let guard = entity.read();
    EntityKey {
        type_id: guard.as_any().type_id(),
        type_name: guard.type_name(),
        internal_id: guard.internal_id(),
        global_id: guard.global_id(),
    }
}

/// Shared precondition of insert/update/delete/merge.
pub(crate) fn validate_keys(entity: &DynEntity) -> StoreResult<()> {
    let guard = entity.read();
    if guard.internal_id() < 0 {
        return Err(StoreError::NegativeInternalId {
            id: guard.internal_id(),
        });
    }
    if guard.global_id().is_nil() {
        return Err(StoreError::EmptyGlobalId);
    }
    Ok(())
}

pub(crate) fn insert_into(
    map: &mut StoreMap,
    stamper: &AuditStamper,
    entity: &DynEntity,
) -> StoreResult<()> {
    validate_keys(entity)?;
    let key = entity_key(entity);
    let partition = map
        .entry(key.type_id)
        .or_insert_with(|| Partition::new(key.type_name));

    let internal_id = if key.internal_id == 0 {
        partition.next_internal_id()
    } else {
        key.internal_id
    };
    if partition.contains_internal_id(internal_id) {
        return Err(StoreError::DuplicateInternalId {
            type_name: partition.type_name(),
            id: internal_id,
        });
    }
    if partition.contains_global_id(key.global_id) {
        return Err(StoreError::DuplicateGlobalId {
            type_name: partition.type_name(),
            global_id: key.global_id,
        });
    }

    {
        let mut guard = entity.write();
        guard.set_internal_id(internal_id);
        stamper.stamp_created(guard.audit_mut());
        stamper.stamp_modified(guard.audit_mut());
    }
    partition.push(Arc::clone(entity));
    Ok(())
}

pub(crate) fn update_into(
    map: &mut StoreMap,
    stamper: &AuditStamper,
    entity: &DynEntity,
) -> StoreResult<()> {
    validate_keys(entity)?;
    let key = entity_key(entity);
    let partition = map
        .entry(key.type_id)
        .or_insert_with(|| Partition::new(key.type_name));

    let not_found = || StoreError::NotFoundOnUpdate {
        type_name: key.type_name,
        id: key.internal_id,
        global_id: key.global_id,
    };
    if key.internal_id == 0 {
        return Err(not_found());
    }
    let index = partition
        .position_of(key.internal_id, key.global_id)
        .ok_or_else(not_found)?;

    stamper.stamp_modified(entity.write().audit_mut());
    partition.replace(index, Arc::clone(entity));
    Ok(())
}

pub(crate) fn delete_from(map: &mut StoreMap, entity: &DynEntity) -> StoreResult<()> {
    validate_keys(entity)?;
    let key = entity_key(entity);
    let partition = map
        .entry(key.type_id)
        .or_insert_with(|| Partition::new(key.type_name));

    if key.internal_id == 0 {
        return Err(StoreError::MissingInternalId);
    }
    let index = partition
        .position_of(key.internal_id, key.global_id)
        .ok_or(StoreError::NotFoundOnDelete {
            type_name: key.type_name,
            id: key.internal_id,
            global_id: key.global_id,
        })?;

    partition.remove(index);
    Ok(())
}
