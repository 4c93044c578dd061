//! Reachable-child graph traversal.

use crate::entity::DynEntity;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Computes the entities reachable from `root` through reference and
/// collection fields.
///
/// Breadth-first over [`crate::Entity::children`], deduplicated by object
/// identity (two not-yet-persisted entities with identical field values stay
/// distinct), cycle-safe. The root itself is excluded; the result preserves
/// discovery order.
#[must_use]
pub fn reachable_children(root: &DynEntity) -> Vec<DynEntity> {
    let mut visited = HashSet::new();
    visited.insert(identity_token(root));

    let mut queue = VecDeque::from([Arc::clone(root)]);
    let mut reachable = Vec::new();

    while let Some(entity) = queue.pop_front() {
        let children = entity.read().children();
        for child in children {
            if visited.insert(identity_token(&child)) {
                reachable.push(Arc::clone(&child));
                queue.push_back(child);
            }
        }
    }

    reachable
}

/// Stable per-object token: the address of the shared allocation.
///
/// Identity, not value equality.
pub(crate) fn identity_token(entity: &DynEntity) -> usize {
    Arc::as_ptr(entity) as *const () as usize
}
