//! Per-tick state classification.
//!
//! Partitions the snapshot's flat unit list into role-tagged groups per
//! side and computes the aggregates every policy module consumes. All of
//! this is recomputed from scratch each tick; nothing is cached across
//! calls, so classification is a pure function of the snapshot.

use crate::snapshot::{GameStateSnapshot, Side, UnitRole, UnitView};

/// Map side length assumed when the snapshot carries neither an explicit
/// size nor a terrain grid.
pub const DEFAULT_MAP_SIDE: u32 = 16;

/// One side's units, partitioned by role.
///
/// All lists preserve the snapshot's iteration order, which downstream
/// tie-breaks rely on.
#[derive(Debug, Default)]
pub struct SideState<'a> {
    /// Every unit owned by this side, in snapshot order.
    pub units: Vec<&'a UnitView>,
    /// Owned bases.
    pub bases: Vec<&'a UnitView>,
    /// Owned barracks.
    pub barracks: Vec<&'a UnitView>,
    /// Owned workers.
    pub workers: Vec<&'a UnitView>,
    /// Owned light units.
    pub lights: Vec<&'a UnitView>,
    /// Owned ranged units.
    pub ranged: Vec<&'a UnitView>,
    /// Owned heavy units.
    pub heavies: Vec<&'a UnitView>,
    /// Owned units the host could not tag.
    pub unknown: Vec<&'a UnitView>,
    /// Non-building, non-worker units: the side's combat force.
    pub army: Vec<&'a UnitView>,
    /// Sum of army damage ratings (1 per unit when unreported).
    pub combat_power: u64,
}

impl SideState<'_> {
    /// Cells this side contributes to the congestion estimate: workers,
    /// army, bases, and barracks.
    #[must_use]
    pub fn occupancy(&self) -> usize {
        self.workers.len() + self.army.len() + self.bases.len() + self.barracks.len()
    }
}

/// Classified snapshot: everything the policy modules read.
#[derive(Debug)]
pub struct ClassifiedState<'a> {
    sides: [SideState<'a>; 2],
    /// Resolved square map side length.
    pub map_side: u32,
    /// Resolved map cell count.
    pub map_area: u32,
    /// Tick counter copied from the snapshot.
    pub turn: u64,
    resources: [Option<u32>; 2],
}

impl<'a> ClassifiedState<'a> {
    /// Classify a snapshot. Never fails: absent fields fall back to
    /// defaults rather than erroring.
    #[must_use]
    pub fn new(snapshot: &'a GameStateSnapshot) -> Self {
        let map_side = resolve_map_side(snapshot);
        let mut sides = [SideState::default(), SideState::default()];

        for unit in &snapshot.units {
            let side = &mut sides[unit.side.index()];
            side.units.push(unit);
            match unit.role {
                UnitRole::Base => side.bases.push(unit),
                UnitRole::Barracks => side.barracks.push(unit),
                UnitRole::Worker => side.workers.push(unit),
                UnitRole::Light => side.lights.push(unit),
                UnitRole::Ranged => side.ranged.push(unit),
                UnitRole::Heavy => side.heavies.push(unit),
                UnitRole::Unknown => side.unknown.push(unit),
            }
            if !unit.is_building && unit.role != UnitRole::Worker {
                side.army.push(unit);
            }
        }
        for side in &mut sides {
            side.combat_power = side.army.iter().map(|u| u.power()).sum();
        }

        Self {
            sides,
            map_side,
            map_area: map_side * map_side,
            turn: snapshot.turn,
            resources: snapshot.resources,
        }
    }

    /// One side's classified units.
    #[must_use]
    pub fn side(&self, side: Side) -> &SideState<'a> {
        &self.sides[side.index()]
    }

    /// Spendable funds for a side (0 when unobservable).
    #[must_use]
    pub fn funds(&self, side: Side) -> u32 {
        self.resources[side.index()].unwrap_or(0)
    }

    /// Stated resources for a side, if observable.
    #[must_use]
    pub fn stated_resources(&self, side: Side) -> Option<u32> {
        self.resources[side.index()]
    }

    /// Geometric center of the map, used as a last-resort reference point.
    #[must_use]
    pub fn map_center(&self) -> (f64, f64) {
        let half = f64::from(self.map_side) / 2.0;
        (half, half)
    }
}

/// Map size resolution: explicit field, then the floored square root of
/// the terrain cell count, then [`DEFAULT_MAP_SIDE`].
fn resolve_map_side(snapshot: &GameStateSnapshot) -> u32 {
    if let Some(size) = snapshot.map_size {
        return size;
    }
    if let Some(terrain) = &snapshot.terrain {
        return isqrt(terrain.len() as u32);
    }
    DEFAULT_MAP_SIDE
}

/// Floored integer square root.
fn isqrt(n: u32) -> u32 {
    let mut root = (f64::from(n)).sqrt() as u32;
    while root.checked_mul(root).map_or(true, |sq| sq > n) {
        root -= 1;
    }
    while (root + 1).checked_mul(root + 1).is_some_and(|sq| sq <= n) {
        root += 1;
    }
    root
}
