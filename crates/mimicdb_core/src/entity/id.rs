//! Global entity identifier.

use std::fmt;
use uuid::Uuid;

/// Caller-supplied universally unique identity for an entity.
///
/// Global ids are scoped per concrete entity type: no two stored entities of
/// the same type may share one. The nil value means "unset" and is rejected
/// by every store operation, the same way internal id `0` marks an entity
/// that has not been assigned a store identity yet.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GlobalId(Uuid);

impl GlobalId {
    /// Creates a new random (v4) global id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// The nil id, used as the "unset" marker.
    #[must_use]
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the nil ("unset") id.
    #[must_use]
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn to_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Debug for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalId({})", self.0)
    }
}

impl fmt::Display for GlobalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for GlobalId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<GlobalId> for Uuid {
    fn from(id: GlobalId) -> Self {
        id.0
    }
}
