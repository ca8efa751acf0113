//! Visible game state handed to the decision engine each tick.
//!
//! The snapshot is the engine's only input: every aggregate the policy
//! modules use is re-derived from it on every tick, so the same snapshot
//! always produces the same decisions. Optional fields degrade to safe
//! defaults instead of erroring (see [`crate::classify`]).

use serde::{Deserialize, Serialize};

/// One of the two players in a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Player at index 0.
    One,
    /// Player at index 1.
    Two,
}

impl Side {
    /// Both sides, in index order.
    pub const BOTH: [Self; 2] = [Self::One, Self::Two];

    /// The other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }

    /// Numeric player index (0 or 1), as reported in match records.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::One => 0,
            Self::Two => 1,
        }
    }

    /// Side for a numeric player index.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::One),
            1 => Some(Self::Two),
            _ => None,
        }
    }
}

/// Functional category of a unit.
///
/// An explicit tag rather than a string so classification is an exhaustive
/// match, not a comparison scattered across call sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitRole {
    /// Resource drop-off and worker production structure.
    Base,
    /// Military production structure.
    Barracks,
    /// Economy unit; fights only when the skirmish policy says so.
    Worker,
    /// Cheap melee unit.
    Light,
    /// Fragile unit that attacks at range.
    Ranged,
    /// Slow, hard-hitting melee unit.
    Heavy,
    /// Anything the host could not tag.
    Unknown,
}

/// One terrain cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Terrain {
    /// Passable ground.
    #[default]
    Open,
    /// Impassable cell.
    Wall,
}

/// A single visible unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitView {
    /// Owning side.
    pub side: Side,
    /// Role tag.
    pub role: UnitRole,
    /// Grid x coordinate.
    pub x: i32,
    /// Grid y coordinate.
    pub y: i32,
    /// Remaining hit points, if reported.
    pub hit_points: Option<i32>,
    /// Whether this unit is a structure.
    pub is_building: bool,
    /// Damage rating used as a combat-power proxy, if reported.
    pub damage: Option<u32>,
}

impl UnitView {
    /// Hit points with the defensive default (0 when unreported).
    #[must_use]
    pub fn hp(&self) -> i32 {
        self.hit_points.unwrap_or(0)
    }

    /// Combat-power contribution (damage rating, 1 when unreported).
    #[must_use]
    pub fn power(&self) -> u64 {
        u64::from(self.damage.unwrap_or(1))
    }

    /// Manhattan distance to a grid point.
    #[must_use]
    pub fn manhattan_to(&self, x: i32, y: i32) -> i32 {
        (self.x - x).abs() + (self.y - y).abs()
    }
}

/// Read-only view of the game for one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    /// Current tick counter.
    pub turn: u64,
    /// Resources per side index. `None` when a side's stockpile is not
    /// observable to the receiving agent.
    pub resources: [Option<u32>; 2],
    /// Square map side length, when the host reports it.
    pub map_size: Option<u32>,
    /// Terrain grid in row-major order, when the host reports one.
    pub terrain: Option<Vec<Terrain>>,
    /// All visible units, in the host's stable iteration order.
    pub units: Vec<UnitView>,
}

impl GameStateSnapshot {
    /// Stated resources for a side, if observable.
    #[must_use]
    pub fn resources_for(&self, side: Side) -> Option<u32> {
        self.resources[side.index()]
    }
}
