//! Test fixture entities.
//!
//! The Person/Vehicle pair models a root with one direct reference and one
//! ordered collection of references, enough to exercise insert cascades,
//! merge reconciliation and child deduplication.

use mimicdb_core::{Audit, DynEntity, Entity, EntityCell, GlobalId};
use std::any::Any;

/// A leaf entity with no child references.
#[derive(Debug, Clone, Default)]
pub struct Person {
    /// Store-assigned internal id; `0` until first insert.
    pub id: i64,
    /// Caller-supplied global id.
    pub global_id: GlobalId,
    /// Audit block, stamped by the store.
    pub audit: Audit,
    /// Display name.
    pub name: String,
    /// Age in years.
    pub age: i32,
}

impl Person {
    /// New person with a fresh global id and an unassigned internal id.
    #[must_use]
    pub fn new(name: &str, age: i32) -> Self {
        Self {
            global_id: GlobalId::new(),
            name: name.to_string(),
            age,
            ..Self::default()
        }
    }
}

impl Entity for Person {
    fn type_name(&self) -> &'static str {
        "Person"
    }

    fn internal_id(&self) -> i64 {
        self.id
    }

    fn set_internal_id(&mut self, id: i64) {
        self.id = id;
    }

    fn global_id(&self) -> GlobalId {
        self.global_id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// A root entity referencing people directly and through a collection.
#[derive(Debug, Clone, Default)]
pub struct Vehicle {
    /// Store-assigned internal id; `0` until first insert.
    pub id: i64,
    /// Caller-supplied global id.
    pub global_id: GlobalId,
    /// Audit block, stamped by the store.
    pub audit: Audit,
    /// Model name.
    pub model: String,
    /// Direct child reference.
    pub driver: Option<EntityCell<Person>>,
    /// Ordered collection of child references.
    pub passengers: Vec<EntityCell<Person>>,
}

impl Vehicle {
    /// New vehicle with a fresh global id and an unassigned internal id.
    #[must_use]
    pub fn new(model: &str) -> Self {
        Self {
            global_id: GlobalId::new(),
            model: model.to_string(),
            ..Self::default()
        }
    }
}

impl Entity for Vehicle {
    fn type_name(&self) -> &'static str {
        "Vehicle"
    }

    fn internal_id(&self) -> i64 {
        self.id
    }

    fn set_internal_id(&mut self, id: i64) {
        self.id = id;
    }

    fn global_id(&self) -> GlobalId {
        self.global_id
    }

    fn audit(&self) -> &Audit {
        &self.audit
    }

    fn audit_mut(&mut self) -> &mut Audit {
        &mut self.audit
    }

    fn children(&self) -> Vec<DynEntity> {
        let mut children: Vec<DynEntity> = self.driver.iter().map(EntityCell::as_dyn).collect();
        children.extend(self.passengers.iter().map(EntityCell::as_dyn));
        children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
