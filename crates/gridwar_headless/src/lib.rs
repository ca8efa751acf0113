//! # Gridwar Headless
//!
//! Headless match harness: runs agents against each other without any
//! rendering, for benchmarking and CI.
//!
//! The binary's `match` subcommand mirrors the evaluation contract: one
//! match in, one single-line JSON record out on stdout, logs on stderr.
//!
//! ## Crate Structure
//!
//! - [`registry`] - Agent/ruleset/policy identifier resolution
//! - [`map`] - Built-in and RON-loaded map catalog
//! - [`sim`] - Minimal deterministic match engine
//! - [`match_runner`] - Single-match execution and the result record
//! - [`batch`] - Parallel multi-match benchmarking
//! - [`error`] - Typed setup errors

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod batch;
pub mod error;
pub mod map;
pub mod match_runner;
pub mod registry;
pub mod sim;
