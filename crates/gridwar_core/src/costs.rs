//! Unit cost and stat tables, versioned by ruleset.
//!
//! The decision engine only reads costs; the full stats drive the headless
//! match engine. Tables are plain serde data so a harness can override them
//! from a RON file the same way maps are loaded.

use serde::{Deserialize, Serialize};

use crate::command::TrainableUnit;

/// Ruleset revision selecting a stat table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RulesetVersion {
    /// Original table: heavies are cheap glass hammers.
    V1,
    /// Finetuned table: heavies cost more but survive longer.
    #[default]
    V2,
}

impl RulesetVersion {
    /// The stat table for this revision.
    #[must_use]
    pub fn table(self) -> CostTable {
        match self {
            Self::V1 => CostTable::v1(),
            Self::V2 => CostTable::v2(),
        }
    }
}

/// Stats for a mobile unit kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    /// Resource cost to train one.
    pub cost: u32,
    /// Starting hit points.
    pub hit_points: i32,
    /// Damage per attack.
    pub damage: u32,
    /// Attack reach in Manhattan distance.
    pub attack_range: i32,
    /// Ticks between grid steps.
    pub move_period: u32,
    /// Ticks between attacks.
    pub attack_period: u32,
    /// Ticks to train one.
    pub produce_time: u32,
}

/// Stats for a structure kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureStats {
    /// Resource cost to construct.
    pub cost: u32,
    /// Starting hit points.
    pub hit_points: i32,
    /// Ticks a worker spends constructing it.
    pub build_time: u32,
}

/// Complete per-kind stat table for one ruleset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    /// Worker stats.
    pub worker: UnitStats,
    /// Light stats.
    pub light: UnitStats,
    /// Ranged stats.
    pub ranged: UnitStats,
    /// Heavy stats.
    pub heavy: UnitStats,
    /// Base stats.
    pub base: StructureStats,
    /// Barracks stats.
    pub barracks: StructureStats,
}

impl Default for CostTable {
    fn default() -> Self {
        RulesetVersion::default().table()
    }
}

impl CostTable {
    /// Original ruleset table.
    #[must_use]
    pub fn v1() -> Self {
        Self {
            heavy: UnitStats {
                cost: 2,
                hit_points: 4,
                damage: 4,
                attack_range: 1,
                move_period: 12,
                attack_period: 5,
                produce_time: 120,
            },
            ..Self::common()
        }
    }

    /// Finetuned ruleset table.
    #[must_use]
    pub fn v2() -> Self {
        Self {
            heavy: UnitStats {
                cost: 3,
                hit_points: 8,
                damage: 4,
                attack_range: 1,
                move_period: 12,
                attack_period: 5,
                produce_time: 120,
            },
            ..Self::common()
        }
    }

    /// Stats shared by both revisions; the heavy row is overridden.
    fn common() -> Self {
        Self {
            worker: UnitStats {
                cost: 1,
                hit_points: 1,
                damage: 1,
                attack_range: 1,
                move_period: 10,
                attack_period: 5,
                produce_time: 50,
            },
            light: UnitStats {
                cost: 2,
                hit_points: 4,
                damage: 2,
                attack_range: 1,
                move_period: 8,
                attack_period: 5,
                produce_time: 80,
            },
            ranged: UnitStats {
                cost: 2,
                hit_points: 1,
                damage: 1,
                attack_range: 3,
                move_period: 10,
                attack_period: 5,
                produce_time: 100,
            },
            heavy: UnitStats {
                cost: 2,
                hit_points: 4,
                damage: 4,
                attack_range: 1,
                move_period: 12,
                attack_period: 5,
                produce_time: 120,
            },
            base: StructureStats {
                cost: 10,
                hit_points: 10,
                build_time: 250,
            },
            barracks: StructureStats {
                cost: 5,
                hit_points: 4,
                build_time: 200,
            },
        }
    }

    /// Stats for a trainable unit kind.
    #[must_use]
    pub fn stats(&self, unit: TrainableUnit) -> &UnitStats {
        match unit {
            TrainableUnit::Worker => &self.worker,
            TrainableUnit::Light => &self.light,
            TrainableUnit::Ranged => &self.ranged,
            TrainableUnit::Heavy => &self.heavy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_differ_only_in_heavies() {
        let v1 = CostTable::v1();
        let v2 = CostTable::v2();
        assert_eq!(v1.worker, v2.worker);
        assert_eq!(v1.light, v2.light);
        assert_eq!(v1.ranged, v2.ranged);
        assert_eq!(v1.barracks, v2.barracks);
        assert!(v2.heavy.cost > v1.heavy.cost);
        assert!(v2.heavy.hit_points > v1.heavy.hit_points);
    }

    #[test]
    fn stats_lookup_matches_fields() {
        let table = CostTable::v2();
        assert_eq!(table.stats(TrainableUnit::Worker).cost, table.worker.cost);
        assert_eq!(table.stats(TrainableUnit::Heavy).cost, table.heavy.cost);
    }

    #[test]
    fn default_is_finetuned() {
        assert_eq!(CostTable::default(), CostTable::v2());
        assert_eq!(RulesetVersion::default(), RulesetVersion::V2);
    }
}
