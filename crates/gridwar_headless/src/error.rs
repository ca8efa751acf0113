//! Setup errors for the match harness.
//!
//! Setup failures are fatal and reported before any result record is
//! emitted; they are distinct from in-match agent failures, which only
//! forfeit a single tick (see [`crate::match_runner`]).

use thiserror::Error;

use crate::map::MapError;

/// A match could not be set up.
#[derive(Debug, Error)]
pub enum SetupError {
    /// No agent registered under this identifier.
    #[error("Unknown agent id: {0}")]
    UnknownAgent(String),

    /// No ruleset registered under this identifier.
    #[error("Unknown ruleset id: {0}")]
    UnknownRuleset(String),

    /// No conflict-resolution policy registered under this identifier.
    #[error("Unknown conflict policy: {0}")]
    UnknownConflictPolicy(String),

    /// The map could not be resolved or loaded.
    #[error(transparent)]
    Map(#[from] MapError),
}
