//! # MimicDB Core
//!
//! In-memory, type-partitioned entity store that emulates a transactional
//! persistence backend for testing or lightweight embedding.
//!
//! This crate provides:
//! - Type-partitioned CRUD with a per-type identity space
//! - Audit stamping (actor and timestamps) applied by the store
//! - Cascading graph merge: upsert of a root entity together with
//!   reconciliation of every entity reachable from it
//! - A single ambient transaction with snapshot/commit semantics
//!
//! The store holds entities behind shared handles ([`DynEntity`] /
//! [`EntityCell`]), so a caller, the store and any referencing parent all
//! observe the same object. That reference sharing is load-bearing: merge
//! deduplicates children by object identity, and in-place field mutation is
//! visible through both the live store and an open transaction snapshot.

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod entity;
pub mod error;
pub mod graph;
pub mod store;
pub mod transaction;

#[cfg(test)]
pub(crate) mod testutil;

pub use entity::{Audit, AuditStamper, DynEntity, Entity, EntityCell, GlobalId};
pub use error::{StoreError, StoreResult};
pub use graph::reachable_children;
pub use store::EntityStore;
pub use transaction::{Transaction, TransactionManager};
