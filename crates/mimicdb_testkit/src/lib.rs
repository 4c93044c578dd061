//! # MimicDB Testkit
//!
//! Shared fixtures and helpers for MimicDB tests.
//!
//! This crate provides:
//! - The Person/Vehicle fixture pair exercising every merge branch
//! - A shared-store constructor re-exported from `mimicdb_repo`
//! - A once-per-process tracing subscriber for test output

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;

pub use mimicdb_repo::{shared_store, SharedStore};

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Initialises a tracing subscriber for tests, once per process.
///
/// Filtering follows `RUST_LOG` and defaults to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}
