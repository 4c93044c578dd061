//! # MimicDB Repositories
//!
//! Asynchronous repository and unit-of-work surface over [`mimicdb_core`].
//!
//! Operations are `async` for interface consistency with callers that
//! expect non-blocking persistence calls; each runs to completion
//! synchronously once entered, so cancellation can only take effect before
//! an operation begins, never mid-mutation. The store has a single logical
//! owner: every call locks the shared store for the duration of exactly one
//! logical operation.

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod read;
mod unit_of_work;
mod write;

pub use read::ReadRepository;
pub use unit_of_work::UnitOfWork;
pub use write::WriteRepository;

use mimicdb_core::EntityStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// A store handle shared between repositories and units of work.
pub type SharedStore = Arc<Mutex<EntityStore>>;

/// Creates a fresh shared store.
#[must_use]
pub fn shared_store() -> SharedStore {
    Arc::new(Mutex::new(EntityStore::new()))
}
