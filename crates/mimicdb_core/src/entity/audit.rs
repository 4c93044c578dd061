//! Audit metadata and stamping.

use std::time::SystemTime;

/// Audit metadata carried by every entity.
///
/// Timestamps are `None` until the store stamps them; callers never set
/// them directly. `created_*` is written once on first insert, `modified_*`
/// on every successful insert, update or merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Audit {
    /// Actor recorded at first insert.
    pub created_by: String,
    /// Actor recorded at the most recent write.
    pub modified_by: String,
    /// Set once, on first insert.
    pub created_at: Option<SystemTime>,
    /// Refreshed on every successful write.
    pub modified_at: Option<SystemTime>,
}

/// Stamps audit metadata on behalf of the store.
///
/// The owner is the actor recorded by every stamp. It starts out empty, is
/// replaced whenever a transaction begins, and persists after commit.
#[derive(Debug, Clone, Default)]
pub struct AuditStamper {
    owner: String,
}

impl AuditStamper {
    /// Creates a stamper for the given audit owner.
    pub fn new(owner: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
        }
    }

    /// The current audit owner.
    #[must_use]
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Replaces the audit owner.
    pub fn set_owner(&mut self, owner: impl Into<String>) {
        self.owner = owner.into();
    }

    /// Stamps creation actor and timestamp. Insert-time only.
    pub fn stamp_created(&self, audit: &mut Audit) {
        audit.created_by = self.owner.clone();
        audit.created_at = Some(SystemTime::now());
    }

    /// Stamps modification actor and timestamp.
    pub fn stamp_modified(&self, audit: &mut Audit) {
        audit.modified_by = self.owner.clone();
        audit.modified_at = Some(SystemTime::now());
    }
}
