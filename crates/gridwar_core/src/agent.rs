//! The decision contract and the agents that implement it.

use thiserror::Error;
use tracing::trace;

use crate::classify::ClassifiedState;
use crate::command::Command;
use crate::costs::CostTable;
use crate::snapshot::{GameStateSnapshot, Side};
use crate::{economy, engagement, production};

/// An agent failed to produce commands for a tick.
///
/// The host treats this as a forfeited batch for the tick, not a fatal
/// match error.
#[derive(Debug, Error)]
#[error("agent '{agent}' failed at turn {turn}: {message}")]
pub struct AgentError {
    /// Agent identifier.
    pub agent: String,
    /// Tick at which the failure occurred.
    pub turn: u64,
    /// What went wrong.
    pub message: String,
}

/// A per-tick decision function.
///
/// Implementations must be stateless across ticks: repeated calls on an
/// identical snapshot return identical command batches.
pub trait Agent: Send + Sync {
    /// Short identifier, used in logs and match records.
    fn name(&self) -> &'static str;

    /// Produce this tick's ordered command batch for `side`.
    fn plan(&self, snapshot: &GameStateSnapshot, side: Side) -> Result<Vec<Command>, AgentError>;
}

/// The scripted heuristic agent.
///
/// Classifies the snapshot, then assembles the batch in host priority
/// order: harvest allocation, construction, worker training, military
/// training, and exactly one attack-or-defend decision.
#[derive(Debug, Clone)]
pub struct HeuristicAgent {
    costs: CostTable,
}

impl Default for HeuristicAgent {
    fn default() -> Self {
        Self::new(CostTable::default())
    }
}

impl HeuristicAgent {
    /// Agent with the given cost table.
    #[must_use]
    pub fn new(costs: CostTable) -> Self {
        Self { costs }
    }
}

impl Agent for HeuristicAgent {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn plan(&self, snapshot: &GameStateSnapshot, side: Side) -> Result<Vec<Command>, AgentError> {
        let state = ClassifiedState::new(snapshot);
        let mut commands = Vec::with_capacity(5);

        let harvesters = economy::harvester_target(&state, side, &self.costs);
        if harvesters > 0 {
            commands.push(Command::Harvest { count: harvesters });
        }
        if let Some(build) = production::plan_construction(&state, side, &self.costs) {
            commands.push(build);
        }
        if let Some(train) = production::plan_worker_training(&state, side, &self.costs) {
            commands.push(train);
        }
        if let Some(train) = production::plan_military_training(&state, side, &self.costs) {
            commands.push(train);
        }
        commands.push(engagement::decide(&state, side, &self.costs));

        trace!(
            side = side.index(),
            turn = snapshot.turn,
            batch = commands.len(),
            "planned tick"
        );
        Ok(commands)
    }
}

/// A do-nothing benchmark opponent: holds position and never spends.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveAgent;

impl Agent for PassiveAgent {
    fn name(&self) -> &'static str {
        "passive"
    }

    fn plan(&self, _snapshot: &GameStateSnapshot, _side: Side) -> Result<Vec<Command>, AgentError> {
        Ok(vec![Command::Defend])
    }
}
