//! Commands emitted by the decision engine.
//!
//! A closed sum type: every consumer matches it exhaustively, so adding a
//! command kind is a compile-time event, not a stringly-typed convention.

use serde::{Deserialize, Serialize};

/// Structures a worker can construct.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    /// Resource drop-off and worker production structure.
    Base,
    /// Military production structure.
    Barracks,
}

/// Units a structure can train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrainableUnit {
    /// Economy unit, trained at a base.
    Worker,
    /// Cheap melee unit, trained at a barracks.
    Light,
    /// Ranged unit, trained at a barracks.
    Ranged,
    /// Heavy melee unit, trained at a barracks.
    Heavy,
}

/// One high-level order for the host engine.
///
/// A tick's batch is ordered by host priority: resource policy first, then
/// construction, then production, then the single attack-or-defend decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Assign `count` workers to resource gathering.
    Harvest {
        /// Number of workers to assign; never exceeds the owned worker count.
        count: u32,
    },
    /// Start constructing a structure.
    Build {
        /// Structure to construct.
        building: BuildingKind,
    },
    /// Train `count` units of one kind.
    Train {
        /// Unit kind to train.
        unit: TrainableUnit,
        /// Batch size; never exceeds the available resource budget.
        count: u32,
    },
    /// Push the army (and fighting workers) toward a map point.
    Attack {
        /// Target x coordinate.
        x: i32,
        /// Target y coordinate.
        y: i32,
    },
    /// Rally at the home base.
    Defend,
}

impl Command {
    /// Whether this is the tick's engagement decision.
    #[must_use]
    pub fn is_engagement(&self) -> bool {
        matches!(self, Self::Attack { .. } | Self::Defend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engagement_commands_are_flagged() {
        assert!(Command::Attack { x: 1, y: 2 }.is_engagement());
        assert!(Command::Defend.is_engagement());
        assert!(!Command::Harvest { count: 3 }.is_engagement());
        assert!(!Command::Train {
            unit: TrainableUnit::Heavy,
            count: 1
        }
        .is_engagement());
    }
}
