//! Entity capability contract and shared handles.

mod audit;
mod id;

pub use audit::{Audit, AuditStamper};
pub use id::GlobalId;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Capability contract required of every persisted type.
///
/// An entity exposes its identity pair (internal id + global id), its audit
/// block, and the child entities reachable through its reference or
/// collection fields. Child discovery is structural: each type enumerates
/// its own references through [`Entity::children`], there is no runtime
/// introspection.
pub trait Entity: Any + Send + Sync {
    /// Short type name used in log and error messages.
    fn type_name(&self) -> &'static str;

    /// Per-type numeric identity assigned by the store; `0` means
    /// unassigned.
    fn internal_id(&self) -> i64;

    /// Sets the internal id. Called by the store during insert.
    fn set_internal_id(&mut self, id: i64);

    /// Caller-supplied global id; must be non-nil before any store
    /// operation.
    fn global_id(&self) -> GlobalId;

    /// Audit metadata, read side.
    fn audit(&self) -> &Audit;

    /// Audit metadata, write side. The store stamps through this.
    fn audit_mut(&mut self) -> &mut Audit;

    /// Enumerates the entities referenced by this one, in field order.
    ///
    /// Leaf types keep the default empty implementation.
    fn children(&self) -> Vec<DynEntity> {
        Vec::new()
    }

    /// Upcast used for typed reads out of the store.
    fn as_any(&self) -> &dyn Any;
}

/// A shared, type-erased entity handle.
///
/// Entities live behind `Arc<RwLock<..>>` so the store, the caller and any
/// referencing parent all observe the same object. Merge deduplicates
/// children by the identity of this handle, and transaction snapshots share
/// it with the live store.
pub type DynEntity = Arc<RwLock<dyn Entity>>;

/// A shared, typed entity handle.
///
/// Cloning the cell clones the handle, not the entity; all clones point at
/// the same underlying object.
pub struct EntityCell<T: Entity>(Arc<RwLock<T>>);

impl<T: Entity> EntityCell<T> {
    /// Wraps an entity value in a shared cell.
    pub fn new(value: T) -> Self {
        Self(Arc::new(RwLock::new(value)))
    }

    /// Locks the entity for reading.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.0.read()
    }

    /// Locks the entity for writing.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.0.write()
    }

    /// Returns a type-erased handle sharing the same underlying object.
    #[must_use]
    pub fn as_dyn(&self) -> DynEntity {
        let erased: DynEntity = self.0.clone();
        erased
    }

    /// Returns `true` if both cells point at the same underlying object.
    #[must_use]
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<T: Entity> Clone for EntityCell<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T: Entity + fmt::Debug> fmt::Debug for EntityCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntityCell({:?})", &*self.0.read())
    }
}

impl<T: Entity + Default> Default for EntityCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}
