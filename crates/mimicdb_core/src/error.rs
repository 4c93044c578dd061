//! Error types for the MimicDB store.
//!
//! Every failure is a synchronous precondition violation surfaced directly
//! to the caller; the store never retries and never applies an operation
//! partially at the entity level.

use crate::entity::GlobalId;
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in MimicDB store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// Internal id was negative on insert/update/delete/merge.
    #[error("entity internal id cannot be negative (got {id})")]
    NegativeInternalId {
        /// The offending id.
        id: i64,
    },

    /// Global id was nil on insert/update/delete/merge.
    #[error("entity global id cannot be nil")]
    EmptyGlobalId,

    /// Insert with an internal id already present in the type partition.
    #[error("cannot insert duplicate {type_name} with internal id {id}")]
    DuplicateInternalId {
        /// Concrete entity type.
        type_name: &'static str,
        /// The duplicated internal id.
        id: i64,
    },

    /// Insert (or merge-as-insert) with a global id already present in the
    /// type partition.
    #[error("cannot insert duplicate {type_name} with global id {global_id}")]
    DuplicateGlobalId {
        /// Concrete entity type.
        type_name: &'static str,
        /// The duplicated global id.
        global_id: GlobalId,
    },

    /// Update (or merge-as-update) target has no matching identity pair in
    /// the store.
    #[error("cannot update a not yet inserted {type_name} (internal id {id}, global id {global_id})")]
    NotFoundOnUpdate {
        /// Concrete entity type.
        type_name: &'static str,
        /// Internal id of the missing target.
        id: i64,
        /// Global id of the missing target.
        global_id: GlobalId,
    },

    /// Delete called with an unassigned internal id.
    #[error("cannot delete an entity without an assigned internal id")]
    MissingInternalId,

    /// Delete target has no matching identity pair in the store.
    #[error("cannot delete unknown {type_name} with internal id {id} and global id {global_id}")]
    NotFoundOnDelete {
        /// Concrete entity type.
        type_name: &'static str,
        /// Internal id of the missing target.
        id: i64,
        /// Global id of the missing target.
        global_id: GlobalId,
    },

    /// Commit called while no transaction is open.
    #[error("cannot commit without an active transaction")]
    NoActiveTransaction,
}
