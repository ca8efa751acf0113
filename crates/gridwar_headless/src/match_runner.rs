//! Run one headless match to completion or the cycle limit.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use gridwar_core::agent::Agent;
use gridwar_core::costs::RulesetVersion;
use gridwar_core::snapshot::Side;

use crate::error::SetupError;
use crate::map::MapSpec;
use crate::registry;
use crate::sim::{ConflictPolicy, Simulation};

/// Winner value reported for a draw.
pub const DRAW: i32 = -1;

/// Configuration for a single match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Resolved map.
    pub map: MapSpec,
    /// Cycle limit; reaching it without elimination is a draw.
    pub max_cycles: u64,
    /// Stat table revision.
    pub ruleset: RulesetVersion,
    /// Movement conflict policy.
    pub conflict_policy: ConflictPolicy,
    /// Agent identifiers per side index.
    pub agents: [String; 2],
    /// Spawn-perturbation seed.
    pub seed: u64,
}

/// The single structured record a match produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Winning side index, or [`DRAW`].
    pub winner: i32,
    /// Cycles elapsed.
    pub cycles: u64,
    /// Whether the match ended by elimination rather than the limit.
    pub game_over: bool,
}

/// Construct both agents and run the match.
///
/// Agent construction failures are fatal setup errors; an agent error
/// during the match only forfeits that side's commands for the tick.
pub fn run_match(config: &MatchConfig) -> Result<MatchRecord, SetupError> {
    let costs = config.ruleset.table();
    let agents = [
        registry::build_agent(&config.agents[0], costs)?,
        registry::build_agent(&config.agents[1], costs)?,
    ];
    Ok(run_with_agents(config, agents))
}

/// Run a match with pre-built agents.
pub fn run_with_agents(config: &MatchConfig, agents: [Box<dyn Agent>; 2]) -> MatchRecord {
    let costs = config.ruleset.table();
    let mut sim = Simulation::new(&config.map, costs, config.conflict_policy, config.seed);

    info!(
        map = %config.map.name,
        max_cycles = config.max_cycles,
        agent1 = %agents[0].name(),
        agent2 = %agents[1].name(),
        seed = config.seed,
        "match started"
    );

    let mut game_over = false;
    while !game_over && sim.cycle() < config.max_cycles {
        let snapshot = sim.snapshot();
        for side in Side::BOTH {
            match agents[side.index()].plan(&snapshot, side) {
                Ok(commands) => sim.queue_commands(side, commands),
                // A failing agent forfeits the tick, not the match.
                Err(err) => {
                    warn!(side = side.index(), %err, "agent forfeited tick");
                    sim.queue_commands(side, Vec::new());
                }
            }
        }
        game_over = sim.step();
    }

    let record = MatchRecord {
        winner: sim.winner().map_or(DRAW, |side| side.index() as i32),
        cycles: sim.cycle(),
        game_over,
    };
    info!(
        winner = record.winner,
        cycles = record.cycles,
        game_over = record.game_over,
        "match finished"
    );
    record
}
