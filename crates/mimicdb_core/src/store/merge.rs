//! Cascading graph merge.
//!
//! A merge upserts a root entity together with one level of reconciliation
//! of its reachable child set: children appearing in the new graph are
//! inserted or updated, children dropped from it are deleted. Children are
//! applied through the plain store primitives, never merged recursively, so
//! a child's own subtree is not diffed by this call.

use crate::entity::{AuditStamper, DynEntity, GlobalId};
use crate::error::StoreResult;
use crate::graph::reachable_children;
use crate::store::{
    delete_from, entity_key, insert_into, update_into, validate_keys, StoreMap,
};
use std::any::TypeId;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Child identity inside a reconciliation: concrete type plus global id.
type ChildKey = (TypeId, GlobalId);

pub(crate) fn merge_into(
    map: &mut StoreMap,
    stamper: &AuditStamper,
    entity: &DynEntity,
) -> StoreResult<()> {
    validate_keys(entity)?;
    let key = entity_key(entity);
    let stored = map.get(&key.type_id).and_then(|partition| {
        partition
            .position_of(key.internal_id, key.global_id)
            .map(|index| Arc::clone(&partition.entries()[index]))
    });

    match stored {
        None => merge_as_insert(map, stamper, entity),
        Some(stored) => merge_as_update(map, stamper, entity, &stored),
    }
}

/// No stored entity matches the incoming identity pair: persist the whole
/// graph, then the root. Children already present somewhere in the store
/// (matched by their own identity pair) are updated instead of inserted.
fn merge_as_insert(
    map: &mut StoreMap,
    stamper: &AuditStamper,
    entity: &DynEntity,
) -> StoreResult<()> {
    let children = reachable_children(entity);
    let (to_insert, to_update): (Vec<_>, Vec<_>) = children
        .into_iter()
        .partition(|child| !is_stored(map, child));

    debug!(
        root = entity_key(entity).type_name,
        inserts = to_insert.len(),
        updates = to_update.len(),
        "merging new root"
    );

    for child in &to_insert {
        insert_into(map, stamper, child)?;
    }
    for child in &to_update {
        update_into(map, stamper, child)?;
    }
    insert_into(map, stamper, entity)
}

/// A stored version of the root exists: reconcile the old reachable set
/// against the new one, then replace the root in place.
///
/// Reachability is computed from the old stored root versus the new
/// incoming root only; a removed child is deleted even if some unrelated
/// third entity still references it.
fn merge_as_update(
    map: &mut StoreMap,
    stamper: &AuditStamper,
    entity: &DynEntity,
    stored: &DynEntity,
) -> StoreResult<()> {
    let old_children = reachable_children(stored);
    let new_children = reachable_children(entity);

    let old_keys: HashSet<ChildKey> = old_children.iter().map(child_key).collect();
    let new_keys: HashSet<ChildKey> = new_children.iter().map(child_key).collect();

    let (to_update, to_insert): (Vec<_>, Vec<_>) = new_children
        .into_iter()
        .partition(|child| old_keys.contains(&child_key(child)));
    let to_remove: Vec<DynEntity> = old_children
        .into_iter()
        .filter(|child| !new_keys.contains(&child_key(child)))
        .collect();

    debug!(
        root = entity_key(entity).type_name,
        inserts = to_insert.len(),
        updates = to_update.len(),
        removals = to_remove.len(),
        "reconciling child graph"
    );

    for child in &to_insert {
        insert_into(map, stamper, child)?;
    }
    for child in &to_update {
        update_into(map, stamper, child)?;
    }
    for child in &to_remove {
        delete_from(map, child)?;
    }
    update_into(map, stamper, entity)
}

fn is_stored(map: &StoreMap, entity: &DynEntity) -> bool {
    let key = entity_key(entity);
    map.get(&key.type_id)
        .is_some_and(|partition| partition.position_of(key.internal_id, key.global_id).is_some())
}

fn child_key(child: &DynEntity) -> ChildKey {
    let guard = child.read();
    (guard.as_any().type_id(), guard.global_id())
}
