//! In-crate test fixtures.
//!
//! `Contact` is a leaf with an optional self-reference (for cycle tests);
//! `Team` is a root with one direct reference and one ordered collection.

use crate::entity::{Audit, DynEntity, Entity, EntityCell, GlobalId};
use std::any::Any;

#[derive(Debug, Clone, Default)]
pub(crate) struct Contact {
    pub id: i64,
    pub global_id: GlobalId,
    pub audit: Audit,
    pub name: String,
    pub buddy: Option<EntityCell<Contact>>,
}

impl Contact {
    pub fn new(name: &str) -> Self {
        Self {
            global_id: GlobalId::new(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Entity for Contact {
    fn type_name(&self) -> &'static str {
        "Contact"
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
        self.buddy.iter().map(EntityCell::as_dyn).collect()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Team {
    pub id: i64,
    pub global_id: GlobalId,
    pub audit: Audit,
    pub name: String,
    pub lead: Option<EntityCell<Contact>>,
    pub members: Vec<EntityCell<Contact>>,
}

impl Team {
    pub fn new(name: &str) -> Self {
        Self {
            global_id: GlobalId::new(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

impl Entity for Team {
    fn type_name(&self) -> &'static str {
        "Team"
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
        let mut children: Vec<DynEntity> = self.lead.iter().map(EntityCell::as_dyn).collect();
        children.extend(self.members.iter().map(EntityCell::as_dyn));
        children
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
