//! Agent, ruleset, and policy registries.
//!
//! Identifiers coming off the command line resolve through explicit
//! tables at startup; an unknown id is a typed setup error, never a
//! runtime lookup failure mid-match.

use gridwar_core::agent::{Agent, HeuristicAgent, PassiveAgent};
use gridwar_core::costs::{CostTable, RulesetVersion};

use crate::error::SetupError;
use crate::sim::ConflictPolicy;

/// Constructor signature for registered agents.
pub type AgentCtor = fn(CostTable) -> Box<dyn Agent>;

/// The agent factory table.
pub const AGENTS: &[(&str, AgentCtor)] = &[
    ("heuristic", |costs| Box::new(HeuristicAgent::new(costs))),
    ("passive", |_| Box::new(PassiveAgent)),
];

/// Identifiers of all registered agents.
pub fn agent_ids() -> impl Iterator<Item = &'static str> {
    AGENTS.iter().map(|(id, _)| *id)
}

/// Construct an agent by identifier.
pub fn build_agent(id: &str, costs: CostTable) -> Result<Box<dyn Agent>, SetupError> {
    AGENTS
        .iter()
        .find(|(name, _)| *name == id)
        .map(|(_, ctor)| ctor(costs))
        .ok_or_else(|| SetupError::UnknownAgent(id.to_string()))
}

/// Resolve a ruleset identifier.
pub fn parse_ruleset(id: &str) -> Result<RulesetVersion, SetupError> {
    match id {
        "1" | "v1" => Ok(RulesetVersion::V1),
        "2" | "v2" => Ok(RulesetVersion::V2),
        other => Err(SetupError::UnknownRuleset(other.to_string())),
    }
}

/// Resolve a conflict-resolution policy identifier.
pub fn parse_conflict_policy(id: &str) -> Result<ConflictPolicy, SetupError> {
    match id {
        "1" | "alternate" => Ok(ConflictPolicy::Alternate),
        "2" | "cancel" => Ok(ConflictPolicy::Cancel),
        other => Err(SetupError::UnknownConflictPolicy(other.to_string())),
    }
}
