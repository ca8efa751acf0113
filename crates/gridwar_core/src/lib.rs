//! # Gridwar Core
//!
//! Deterministic per-tick decision engine for a scripted RTS agent.
//!
//! This crate contains **only** deterministic logic:
//! - No IO
//! - No clocks
//! - No randomness
//! - No state carried across ticks
//!
//! Each tick the host hands an agent a [`snapshot::GameStateSnapshot`] and
//! receives an ordered batch of [`command::Command`]s. Everything the
//! policy needs is re-derived from the snapshot, so a call is a pure
//! function: the same snapshot always yields the same batch.
//!
//! ## Crate Structure
//!
//! - [`snapshot`] - Input data model
//! - [`command`] - Output sum type
//! - [`costs`] - Versioned unit cost/stat tables
//! - [`classify`] - Per-tick state classification
//! - [`economy`] - Harvester allocation
//! - [`production`] - Construction and training policy
//! - [`targeting`] - Combat-target scoring
//! - [`engagement`] - The attack-or-defend decision
//! - [`agent`] - The decision contract and its implementations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

// The in-crate unit tests build snapshots with the shared `SnapshotBuilder`
// from `gridwar_test_utils`. That crate depends on `gridwar_core`, so pulling
// it in as a dev-dependency here would compile `gridwar_core` twice (once for
// the unit-test harness, once for `gridwar_test_utils`) and the two copies'
// types would not unify. Instead the fixture source is compiled directly into
// this crate's test build. The `extern crate self` alias lets that shared
// source keep referring to types by the `gridwar_core::` path.
#[cfg(test)]
extern crate self as gridwar_core;
#[cfg(test)]
#[path = "../../gridwar_test_utils/src/fixtures.rs"]
mod test_fixtures;

pub mod agent;
pub mod classify;
pub mod command;
pub mod costs;
pub mod economy;
pub mod engagement;
pub mod production;
pub mod snapshot;
pub mod targeting;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::agent::{Agent, AgentError, HeuristicAgent, PassiveAgent};
    pub use crate::classify::ClassifiedState;
    pub use crate::command::{BuildingKind, Command, TrainableUnit};
    pub use crate::costs::{CostTable, RulesetVersion};
    pub use crate::snapshot::{GameStateSnapshot, Side, Terrain, UnitRole, UnitView};
}
