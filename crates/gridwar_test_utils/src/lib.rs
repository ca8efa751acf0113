//! # Gridwar Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Snapshot builder for composing game states
//! - Pre-built fixture snapshots

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;

pub use fixtures::{standoff_16, SnapshotBuilder};
