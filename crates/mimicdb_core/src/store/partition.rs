//! Type partitions and the backing store map.

use crate::entity::{DynEntity, GlobalId};
use std::any::TypeId;
use std::collections::HashMap;

/// The backing map from concrete entity type to its partition.
pub(crate) type StoreMap = HashMap<TypeId, Partition>;

/// The ordered per-type collection inside the store.
///
/// Entry order reflects insertion order; internal id generation depends on
/// it. Cloning a partition clones the entry vector but shares every entity
/// object, which is what transaction snapshots rely on.
#[derive(Clone, Default)]
pub(crate) struct Partition {
    type_name: &'static str,
    entries: Vec<DynEntity>,
}

impl Partition {
    /// Creates an empty partition for the named type.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            entries: Vec::new(),
        }
    }

    /// The concrete type name this partition holds.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// The entries in insertion order.
    pub fn entries(&self) -> &[DynEntity] {
        &self.entries
    }

    /// The next internal id: one past the *last* entry's id, or 1 when
    /// empty. Not max+1 — the allocator assumes append-only growth.
    pub fn next_internal_id(&self) -> i64 {
        self.entries
            .last()
            .map_or(1, |entity| entity.read().internal_id() + 1)
    }

    /// Whether any entry carries this internal id.
    pub fn contains_internal_id(&self, id: i64) -> bool {
        self.entries
            .iter()
            .any(|entity| entity.read().internal_id() == id)
    }

    /// Whether any entry carries this global id.
    pub fn contains_global_id(&self, global_id: GlobalId) -> bool {
        self.entries
            .iter()
            .any(|entity| entity.read().global_id() == global_id)
    }

    /// Position of the entry matching both halves of the identity pair.
    pub fn position_of(&self, id: i64, global_id: GlobalId) -> Option<usize> {
        self.entries.iter().position(|entity| {
            let entity = entity.read();
            entity.internal_id() == id && entity.global_id() == global_id
        })
    }

    /// Appends an entry.
    pub fn push(&mut self, entity: DynEntity) {
        self.entries.push(entity);
    }

    /// Replaces the entry at `index`, keeping its position.
    pub fn replace(&mut self, index: usize, entity: DynEntity) {
        self.entries[index] = entity;
    }

    /// Removes the entry at `index`; the remaining order is preserved.
    pub fn remove(&mut self, index: usize) -> DynEntity {
        self.entries.remove(index)
    }
}
