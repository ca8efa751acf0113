//! Test fixtures and helpers.
//!
//! Pre-built snapshots and a builder for composing game states in tests
//! without spelling out every optional field.

use gridwar_core::costs::CostTable;
use gridwar_core::snapshot::{GameStateSnapshot, Side, Terrain, UnitRole, UnitView};

/// Fluent builder for [`GameStateSnapshot`].
///
/// Units added through the role helpers get full health and the v2
/// damage rating for their kind; `unit_with` takes everything raw.
#[derive(Debug, Clone, Default)]
pub struct SnapshotBuilder {
    snapshot: GameStateSnapshot,
}

impl SnapshotBuilder {
    /// Empty snapshot: turn 0, no map size, no terrain, hidden resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tick counter.
    #[must_use]
    pub fn turn(mut self, turn: u64) -> Self {
        self.snapshot.turn = turn;
        self
    }

    /// Set the explicit map side length.
    #[must_use]
    pub fn map_size(mut self, size: u32) -> Self {
        self.snapshot.map_size = Some(size);
        self
    }

    /// Attach an all-open terrain grid with the given cell count.
    #[must_use]
    pub fn terrain_cells(mut self, cells: usize) -> Self {
        self.snapshot.terrain = Some(vec![Terrain::Open; cells]);
        self
    }

    /// Make a side's resources observable.
    #[must_use]
    pub fn resources(mut self, side: Side, amount: u32) -> Self {
        self.snapshot.resources[side.index()] = Some(amount);
        self
    }

    /// Make a side's resources unobservable (the default).
    #[must_use]
    pub fn hidden_resources(mut self, side: Side) -> Self {
        self.snapshot.resources[side.index()] = None;
        self
    }

    /// Add a unit with every field spelled out.
    #[must_use]
    pub fn unit_with(
        mut self,
        side: Side,
        role: UnitRole,
        x: i32,
        y: i32,
        hit_points: Option<i32>,
        is_building: bool,
        damage: Option<u32>,
    ) -> Self {
        self.snapshot.units.push(UnitView {
            side,
            role,
            x,
            y,
            hit_points,
            is_building,
            damage,
        });
        self
    }

    /// Add a full-health base.
    #[must_use]
    pub fn base(self, side: Side, x: i32, y: i32) -> Self {
        let stats = CostTable::v2().base;
        self.unit_with(side, UnitRole::Base, x, y, Some(stats.hit_points), true, Some(0))
    }

    /// Add a full-health barracks.
    #[must_use]
    pub fn barracks(self, side: Side, x: i32, y: i32) -> Self {
        let stats = CostTable::v2().barracks;
        self.unit_with(
            side,
            UnitRole::Barracks,
            x,
            y,
            Some(stats.hit_points),
            true,
            Some(0),
        )
    }

    /// Add a full-health worker.
    #[must_use]
    pub fn worker(self, side: Side, x: i32, y: i32) -> Self {
        self.mobile(side, UnitRole::Worker, x, y)
    }

    /// Add a full-health light unit.
    #[must_use]
    pub fn light(self, side: Side, x: i32, y: i32) -> Self {
        self.mobile(side, UnitRole::Light, x, y)
    }

    /// Add a full-health ranged unit.
    #[must_use]
    pub fn ranged(self, side: Side, x: i32, y: i32) -> Self {
        self.mobile(side, UnitRole::Ranged, x, y)
    }

    /// Add a full-health heavy unit.
    #[must_use]
    pub fn heavy(self, side: Side, x: i32, y: i32) -> Self {
        self.mobile(side, UnitRole::Heavy, x, y)
    }

    fn mobile(self, side: Side, role: UnitRole, x: i32, y: i32) -> Self {
        let table = CostTable::v2();
        let stats = match role {
            UnitRole::Worker => table.worker,
            UnitRole::Light => table.light,
            UnitRole::Ranged => table.ranged,
            _ => table.heavy,
        };
        self.unit_with(
            side,
            role,
            x,
            y,
            Some(stats.hit_points),
            false,
            Some(stats.damage),
        )
    }

    /// Finish and return the snapshot.
    #[must_use]
    pub fn build(self) -> GameStateSnapshot {
        self.snapshot
    }
}

/// A mid-game standoff on a 16x16 map: both sides have a base, a
/// barracks, an economy, and a small mixed army.
#[must_use]
pub fn standoff_16() -> GameStateSnapshot {
    SnapshotBuilder::new()
        .map_size(16)
        .turn(800)
        .resources(Side::One, 12)
        .resources(Side::Two, 9)
        .base(Side::One, 2, 2)
        .barracks(Side::One, 3, 4)
        .worker(Side::One, 1, 2)
        .worker(Side::One, 2, 3)
        .worker(Side::One, 4, 2)
        .light(Side::One, 6, 6)
        .heavy(Side::One, 7, 6)
        .ranged(Side::One, 6, 7)
        .base(Side::Two, 13, 13)
        .barracks(Side::Two, 12, 11)
        .worker(Side::Two, 14, 13)
        .worker(Side::Two, 13, 14)
        .light(Side::Two, 9, 9)
        .heavy(Side::Two, 9, 10)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_are_empty() {
        let snapshot = SnapshotBuilder::new().build();
        assert_eq!(snapshot.turn, 0);
        assert_eq!(snapshot.resources, [None, None]);
        assert!(snapshot.map_size.is_none());
        assert!(snapshot.terrain.is_none());
        assert!(snapshot.units.is_empty());
    }

    #[test]
    fn standoff_has_both_sides_populated() {
        let snapshot = standoff_16();
        for side in Side::BOTH {
            assert!(snapshot.units.iter().any(|u| u.side == side));
        }
    }
}
