//! Minimal deterministic match engine.
//!
//! Executes the high-level command batches agents emit: production
//! timers, worker-driven construction, passive harvest income, stance
//! movement, and cooldown combat on a square grid. Iteration is always in
//! unit-id order and there is no randomness, so a match is a pure
//! function of (map, ruleset, policy, seed).
//!
//! This is a collaborator for the decision engine, not a faithful combat
//! simulation: movement ignores pathfinding beyond wall avoidance, and
//! harvesting is modeled as fixed passive income per assigned worker.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use gridwar_core::command::{BuildingKind, Command, TrainableUnit};
use gridwar_core::costs::{CostTable, UnitStats};
use gridwar_core::snapshot::{GameStateSnapshot, Side, Terrain, UnitRole, UnitView};

use crate::map::MapSpec;

/// Hard cap on live units; production stalls rather than exceed it.
pub const MAX_UNITS: usize = 1_000;

/// Ticks between income pulses; each assigned harvester contributes one
/// resource per pulse, approximating a harvest-and-return round trip.
pub const HARVEST_PERIOD: u64 = 40;

/// How simultaneous moves into the same cell are resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ConflictPolicy {
    /// Sides take priority on alternating cycles; within a side the
    /// lowest unit id wins.
    #[default]
    Alternate,
    /// Contested moves are all dropped.
    Cancel,
}

/// A side's standing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stance {
    Defend,
    Attack { x: i32, y: i32 },
}

#[derive(Clone, Debug)]
struct Production {
    unit: TrainableUnit,
    done_at: u64,
}

#[derive(Clone, Debug)]
struct BuildJob {
    builder: u32,
    building: BuildingKind,
    x: i32,
    y: i32,
    done_at: u64,
}

#[derive(Clone, Debug)]
struct SimUnit {
    id: u32,
    side: Side,
    role: UnitRole,
    x: i32,
    y: i32,
    hp: i32,
    /// Cycle from which the next step is allowed.
    move_ready: u64,
    /// Cycle from which the next attack is allowed.
    attack_ready: u64,
    harvesting: bool,
    /// Training in progress (structures only).
    production: Option<Production>,
}

impl SimUnit {
    fn is_building(&self) -> bool {
        matches!(self.role, UnitRole::Base | UnitRole::Barracks)
    }
}

/// One running match.
pub struct Simulation {
    size: i32,
    terrain: Vec<Terrain>,
    costs: CostTable,
    policy: ConflictPolicy,
    cycle: u64,
    next_id: u32,
    units: Vec<SimUnit>,
    resources: [u32; 2],
    stances: [Stance; 2],
    build_jobs: [Option<BuildJob>; 2],
    pending: [Vec<Command>; 2],
    winner: Option<Side>,
    game_over: bool,
}

impl Simulation {
    /// Set up a match from a map. The seed rotates each side's starting
    /// worker placement among its spawn cells, which perturbs unit-id
    /// assignment (and thus downstream tie-breaks) without any runtime
    /// randomness.
    #[must_use]
    pub fn new(map: &MapSpec, costs: CostTable, policy: ConflictPolicy, seed: u64) -> Self {
        let size = map.size as i32;
        let mut terrain = vec![Terrain::Open; (map.size * map.size) as usize];
        for &(x, y) in &map.walls {
            terrain[(y * size + x) as usize] = Terrain::Wall;
        }

        let mut sim = Self {
            size,
            terrain,
            costs,
            policy,
            cycle: 0,
            next_id: 0,
            units: Vec::new(),
            resources: [map.starting_resources, map.starting_resources],
            stances: [Stance::Defend, Stance::Defend],
            build_jobs: [None, None],
            pending: [Vec::new(), Vec::new()],
            winner: None,
            game_over: false,
        };

        for side in Side::BOTH {
            let spawn = &map.spawns[side.index()];
            sim.spawn(side, UnitRole::Base, spawn.base.0, spawn.base.1);
            let n = spawn.workers.len();
            for i in 0..n {
                let (x, y) = spawn.workers[(i + seed as usize) % n.max(1)];
                sim.spawn(side, UnitRole::Worker, x, y);
            }
        }
        sim
    }

    /// Current cycle counter.
    #[must_use]
    pub fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Winning side, once decided.
    #[must_use]
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Whether the match ended by elimination (as opposed to running out
    /// the cycle limit).
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Live unit count.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Resources on hand for a side.
    #[must_use]
    pub fn resources(&self, side: Side) -> u32 {
        self.resources[side.index()]
    }

    /// Build the read-only snapshot agents see this tick. Both sides
    /// receive the same fully-observable view.
    #[must_use]
    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            turn: self.cycle,
            resources: [Some(self.resources[0]), Some(self.resources[1])],
            map_size: Some(self.size as u32),
            terrain: Some(self.terrain.clone()),
            units: self
                .units
                .iter()
                .map(|u| UnitView {
                    side: u.side,
                    role: u.role,
                    x: u.x,
                    y: u.y,
                    hit_points: Some(u.hp),
                    is_building: u.is_building(),
                    damage: Some(self.mobile_stats(u.role).map_or(0, |s| s.damage)),
                })
                .collect(),
        }
    }

    /// Queue a side's command batch for the next step.
    pub fn queue_commands(&mut self, side: Side, commands: Vec<Command>) {
        self.pending[side.index()] = commands;
    }

    /// Advance one cycle. Returns true once the match is over.
    pub fn step(&mut self) -> bool {
        if self.game_over {
            return true;
        }

        for side in Side::BOTH {
            self.apply_commands(side);
        }
        self.advance_production();
        self.advance_build_jobs();
        self.combat_phase();
        self.remove_dead();
        self.movement_phase();
        self.harvest_income();

        self.cycle += 1;
        self.check_elimination();
        self.game_over
    }

    // ------------------------------------------------------------------
    // Command application
    // ------------------------------------------------------------------

    fn apply_commands(&mut self, side: Side) {
        let commands = std::mem::take(&mut self.pending[side.index()]);
        for command in commands {
            match command {
                Command::Harvest { count } => self.assign_harvesters(side, count),
                Command::Build { building } => self.start_build(side, building),
                Command::Train { unit, count } => self.start_training(side, unit, count),
                Command::Attack { x, y } => {
                    self.stances[side.index()] = Stance::Attack {
                        x: x.clamp(0, self.size - 1),
                        y: y.clamp(0, self.size - 1),
                    };
                }
                Command::Defend => self.stances[side.index()] = Stance::Defend,
            }
        }
    }

    fn assign_harvesters(&mut self, side: Side, count: u32) {
        // A worker tied to a construction site keeps building; the
        // allocation goes to the remaining workers in id order.
        let busy = self.active_builders();
        let mut remaining = count;
        for unit in &mut self.units {
            if unit.side != side || unit.role != UnitRole::Worker || busy.contains(&unit.id) {
                continue;
            }
            unit.harvesting = remaining > 0;
            remaining = remaining.saturating_sub(1);
        }
    }

    fn start_build(&mut self, side: Side, building: BuildingKind) {
        if self.build_jobs[side.index()].is_some() {
            return;
        }
        let stats = match building {
            BuildingKind::Base => self.costs.base,
            BuildingKind::Barracks => self.costs.barracks,
        };
        if self.resources[side.index()] < stats.cost {
            trace!(side = side.index(), ?building, "cannot afford construction");
            return;
        }
        // Prefer a worker not tied up harvesting.
        let builder_index = self
            .units
            .iter()
            .position(|u| u.side == side && u.role == UnitRole::Worker && !u.harvesting)
            .or_else(|| {
                self.units
                    .iter()
                    .position(|u| u.side == side && u.role == UnitRole::Worker)
            });
        let Some(builder_index) = builder_index else {
            return;
        };
        let (builder_id, bx, by) = {
            let builder = &self.units[builder_index];
            (builder.id, builder.x, builder.y)
        };
        let Some((x, y)) = self.free_adjacent(bx, by) else {
            return;
        };
        self.units[builder_index].harvesting = false;
        self.resources[side.index()] -= stats.cost;
        self.build_jobs[side.index()] = Some(BuildJob {
            builder: builder_id,
            building,
            x,
            y,
            done_at: self.cycle + u64::from(stats.build_time),
        });
        debug!(
            side = side.index(),
            builder = builder_id,
            x = bx,
            y = by,
            ?building,
            "construction started"
        );
    }

    fn start_training(&mut self, side: Side, unit: TrainableUnit, count: u32) {
        let producer_role = match unit {
            TrainableUnit::Worker => UnitRole::Base,
            _ => UnitRole::Barracks,
        };
        let Some(stats) = self.mobile_stats(trained_role(unit)) else {
            return;
        };
        let (cost, produce_time) = (stats.cost, stats.produce_time);

        let mut remaining = count;
        let cycle = self.cycle;
        let mut funds = self.resources[side.index()];
        for producer in self
            .units
            .iter_mut()
            .filter(|u| u.side == side && u.role == producer_role && u.production.is_none())
        {
            if remaining == 0 || funds < cost {
                break;
            }
            funds -= cost;
            remaining -= 1;
            producer.production = Some(Production {
                unit,
                done_at: cycle + u64::from(produce_time),
            });
            trace!(side = side.index(), producer = producer.id, ?unit, "training started");
        }
        self.resources[side.index()] = funds;
    }

    // ------------------------------------------------------------------
    // Production and construction
    // ------------------------------------------------------------------

    fn advance_production(&mut self) {
        let ready: Vec<usize> = self
            .units
            .iter()
            .enumerate()
            .filter(|(_, u)| {
                u.production
                    .as_ref()
                    .is_some_and(|p| p.done_at <= self.cycle)
            })
            .map(|(i, _)| i)
            .collect();

        for index in ready {
            let (px, py, side, unit) = {
                let producer = &self.units[index];
                let Some(production) = &producer.production else {
                    continue;
                };
                (producer.x, producer.y, producer.side, production.unit)
            };
            // Hold the finished unit until a neighboring cell frees up.
            let Some((x, y)) = self.free_adjacent(px, py) else {
                continue;
            };
            if self.units.len() >= MAX_UNITS {
                debug!(side = side.index(), "unit cap reached, production stalled");
                continue;
            }
            self.units[index].production = None;
            self.spawn(side, trained_role(unit), x, y);
        }
    }

    fn advance_build_jobs(&mut self) {
        for side in Side::BOTH {
            let Some(job) = &self.build_jobs[side.index()] else {
                continue;
            };
            if job.done_at > self.cycle {
                continue;
            }
            let (x, y, building) = (job.x, job.y, job.building);
            // The site may have been walked onto; wait for it to clear.
            if self.unit_at(x, y).is_some() {
                continue;
            }
            if self.units.len() >= MAX_UNITS {
                continue;
            }
            self.build_jobs[side.index()] = None;
            let role = match building {
                BuildingKind::Base => UnitRole::Base,
                BuildingKind::Barracks => UnitRole::Barracks,
            };
            self.spawn(side, role, x, y);
            debug!(side = side.index(), x, y, ?building, "construction finished");
        }
    }

    // ------------------------------------------------------------------
    // Combat
    // ------------------------------------------------------------------

    fn combat_phase(&mut self) {
        // Damage is collected first and applied after the scan, so all
        // attacks in a cycle resolve simultaneously.
        let mut damage: HashMap<u32, i32> = HashMap::new();
        let cycle = self.cycle;
        let busy_builders = self.active_builders();

        let mut attacks: Vec<(usize, u32, u64)> = Vec::new();
        for (index, unit) in self.units.iter().enumerate() {
            if unit.is_building() || unit.harvesting || busy_builders.contains(&unit.id) {
                continue;
            }
            if unit.attack_ready > cycle {
                continue;
            }
            let Some(stats) = self.mobile_stats(unit.role) else {
                continue;
            };
            if let Some(target) = self.nearest_enemy_in_range(unit, stats.attack_range) {
                attacks.push((index, target, u64::from(stats.attack_period)));
                *damage.entry(target).or_insert(0) += stats.damage as i32;
            }
        }
        for (index, target, period) in attacks {
            self.units[index].attack_ready = cycle + period;
            trace!(attacker = self.units[index].id, target, "attack");
        }
        for unit in &mut self.units {
            if let Some(dealt) = damage.get(&unit.id) {
                unit.hp -= dealt;
            }
        }
    }

    fn remove_dead(&mut self) {
        let dead: Vec<u32> = self
            .units
            .iter()
            .filter(|u| u.hp <= 0)
            .map(|u| u.id)
            .collect();
        if dead.is_empty() {
            return;
        }
        for side in Side::BOTH {
            if let Some(job) = &self.build_jobs[side.index()] {
                if dead.contains(&job.builder) {
                    debug!(side = side.index(), "builder died, construction cancelled");
                    self.build_jobs[side.index()] = None;
                }
            }
        }
        self.units.retain(|u| u.hp > 0);
        debug!(cycle = self.cycle, dead = dead.len(), "units destroyed");
    }

    // ------------------------------------------------------------------
    // Movement
    // ------------------------------------------------------------------

    fn movement_phase(&mut self) {
        let cycle = self.cycle;
        let busy_builders = self.active_builders();
        let occupied: std::collections::HashSet<(i32, i32)> =
            self.units.iter().map(|u| (u.x, u.y)).collect();

        // Proposal collection: every mobile, unengaged unit that is off
        // cooldown picks one candidate step toward its side's objective.
        let mut proposals: Vec<(usize, (i32, i32))> = Vec::new();
        for (index, unit) in self.units.iter().enumerate() {
            if unit.is_building() || unit.harvesting || busy_builders.contains(&unit.id) {
                continue;
            }
            if unit.move_ready > cycle {
                continue;
            }
            let range = self.mobile_stats(unit.role).map_or(1, |s| s.attack_range);
            if self.nearest_enemy_in_range(unit, range).is_some() {
                continue; // engaged units hold position
            }
            let Some(dest) = self.destination(unit) else {
                continue;
            };
            if dest == (unit.x, unit.y) {
                continue;
            }
            if let Some(to) = self.step_toward(unit, dest, &occupied) {
                proposals.push((index, to));
            }
        }

        // Conflict resolution between proposals for the same cell.
        let mut by_cell: HashMap<(i32, i32), Vec<usize>> = HashMap::new();
        for (slot, (_, to)) in proposals.iter().enumerate() {
            by_cell.entry(*to).or_default().push(slot);
        }
        let priority = priority_side(cycle);
        let mut approved: Vec<usize> = Vec::new();
        for contenders in by_cell.values() {
            if contenders.len() == 1 {
                approved.push(contenders[0]);
                continue;
            }
            match self.policy {
                ConflictPolicy::Cancel => {}
                ConflictPolicy::Alternate => {
                    let winner = contenders.iter().copied().min_by_key(|&slot| {
                        let unit = &self.units[proposals[slot].0];
                        (unit.side != priority, unit.id)
                    });
                    if let Some(winner) = winner {
                        approved.push(winner);
                    }
                }
            }
        }
        approved.sort_unstable();

        for slot in approved {
            let (index, (x, y)) = proposals[slot];
            let unit = &mut self.units[index];
            let period = match unit.role {
                UnitRole::Worker => self.costs.worker.move_period,
                UnitRole::Light => self.costs.light.move_period,
                UnitRole::Ranged => self.costs.ranged.move_period,
                UnitRole::Heavy => self.costs.heavy.move_period,
                _ => continue,
            };
            unit.x = x;
            unit.y = y;
            unit.move_ready = cycle + u64::from(period);
        }
    }

    /// Where a unit is headed under its side's stance.
    fn destination(&self, unit: &SimUnit) -> Option<(i32, i32)> {
        match self.stances[unit.side.index()] {
            Stance::Attack { x, y } => Some((x, y)),
            Stance::Defend => {
                let home = self
                    .units
                    .iter()
                    .find(|u| u.side == unit.side && u.role == UnitRole::Base)?;
                // Rally near the base, not onto it.
                if (unit.x - home.x).abs() + (unit.y - home.y).abs() <= 2 {
                    None
                } else {
                    Some((home.x, home.y))
                }
            }
        }
    }

    /// One grid step toward a destination: larger-delta axis first, the
    /// other as fallback, skipping walls and occupied cells.
    fn step_toward(
        &self,
        unit: &SimUnit,
        dest: (i32, i32),
        occupied: &std::collections::HashSet<(i32, i32)>,
    ) -> Option<(i32, i32)> {
        let dx = dest.0 - unit.x;
        let dy = dest.1 - unit.y;
        let step_x = (unit.x + dx.signum(), unit.y);
        let step_y = (unit.x, unit.y + dy.signum());
        let candidates = if dx.abs() >= dy.abs() {
            [step_x, step_y]
        } else {
            [step_y, step_x]
        };
        candidates
            .into_iter()
            .find(|&(x, y)| {
                (x, y) != (unit.x, unit.y) && self.is_open(x, y) && !occupied.contains(&(x, y))
            })
    }

    // ------------------------------------------------------------------
    // Economy and bookkeeping
    // ------------------------------------------------------------------

    fn harvest_income(&mut self) {
        if self.cycle % HARVEST_PERIOD != HARVEST_PERIOD - 1 {
            return;
        }
        for side in Side::BOTH {
            let harvesters = self
                .units
                .iter()
                .filter(|u| u.side == side && u.harvesting)
                .count() as u32;
            if harvesters > 0 {
                self.resources[side.index()] += harvesters;
                trace!(side = side.index(), harvesters, "harvest income");
            }
        }
    }

    fn check_elimination(&mut self) {
        let alive = [
            self.units.iter().any(|u| u.side == Side::One),
            self.units.iter().any(|u| u.side == Side::Two),
        ];
        match alive {
            [false, false] => {
                self.game_over = true;
                self.winner = None;
            }
            [true, false] => {
                self.game_over = true;
                self.winner = Some(Side::One);
            }
            [false, true] => {
                self.game_over = true;
                self.winner = Some(Side::Two);
            }
            [true, true] => {}
        }
    }

    fn spawn(&mut self, side: Side, role: UnitRole, x: i32, y: i32) {
        let hp = match role {
            UnitRole::Base => self.costs.base.hit_points,
            UnitRole::Barracks => self.costs.barracks.hit_points,
            other => self.mobile_stats(other).map_or(1, |s| s.hit_points),
        };
        let id = self.next_id;
        self.next_id += 1;
        self.units.push(SimUnit {
            id,
            side,
            role,
            x,
            y,
            hp,
            move_ready: self.cycle,
            attack_ready: self.cycle,
            harvesting: false,
            production: None,
        });
    }

    fn mobile_stats(&self, role: UnitRole) -> Option<&UnitStats> {
        match role {
            UnitRole::Worker => Some(&self.costs.worker),
            UnitRole::Light => Some(&self.costs.light),
            UnitRole::Ranged => Some(&self.costs.ranged),
            UnitRole::Heavy => Some(&self.costs.heavy),
            _ => None,
        }
    }

    fn nearest_enemy_in_range(&self, unit: &SimUnit, range: i32) -> Option<u32> {
        self.units
            .iter()
            .filter(|u| u.side != unit.side)
            .map(|u| (u.manhattan_to(unit), u.id))
            .filter(|&(d, _)| d <= range)
            .min()
            .map(|(_, id)| id)
    }

    fn unit_at(&self, x: i32, y: i32) -> Option<&SimUnit> {
        self.units.iter().find(|u| u.x == x && u.y == y)
    }

    fn free_adjacent(&self, x: i32, y: i32) -> Option<(i32, i32)> {
        const OFFSETS: [(i32, i32); 8] = [
            (1, 0),
            (0, 1),
            (-1, 0),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        OFFSETS
            .iter()
            .map(|&(dx, dy)| (x + dx, y + dy))
            .find(|&(nx, ny)| self.is_open(nx, ny) && self.unit_at(nx, ny).is_none())
    }

    fn is_open(&self, x: i32, y: i32) -> bool {
        x >= 0
            && y >= 0
            && x < self.size
            && y < self.size
            && self.terrain[(y * self.size + x) as usize] == Terrain::Open
    }

    fn active_builders(&self) -> Vec<u32> {
        self.build_jobs
            .iter()
            .flatten()
            .map(|job| job.builder)
            .collect()
    }
}

impl SimUnit {
    fn manhattan_to(&self, other: &SimUnit) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

fn trained_role(unit: TrainableUnit) -> UnitRole {
    match unit {
        TrainableUnit::Worker => UnitRole::Worker,
        TrainableUnit::Light => UnitRole::Light,
        TrainableUnit::Ranged => UnitRole::Ranged,
        TrainableUnit::Heavy => UnitRole::Heavy,
    }
}

fn priority_side(cycle: u64) -> Side {
    if cycle % 2 == 0 {
        Side::One
    } else {
        Side::Two
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::MapSpec;

    fn sim() -> Simulation {
        Simulation::new(
            &MapSpec::duel8(),
            CostTable::v2(),
            ConflictPolicy::Alternate,
            0,
        )
    }

    fn step_n(sim: &mut Simulation, n: u64) {
        for _ in 0..n {
            if sim.step() {
                break;
            }
        }
    }

    #[test]
    fn setup_spawns_bases_and_workers() {
        let sim = sim();
        assert_eq!(sim.unit_count(), 4);
        let snapshot = sim.snapshot();
        for side in Side::BOTH {
            assert_eq!(
                snapshot
                    .units
                    .iter()
                    .filter(|u| u.side == side && u.role == UnitRole::Base)
                    .count(),
                1
            );
            assert_eq!(
                snapshot
                    .units
                    .iter()
                    .filter(|u| u.side == side && u.role == UnitRole::Worker)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn harvesters_generate_income() {
        let mut sim = sim();
        let before = sim.resources(Side::One);
        sim.queue_commands(Side::One, vec![Command::Harvest { count: 1 }]);
        step_n(&mut sim, HARVEST_PERIOD);
        assert_eq!(sim.resources(Side::One), before + 1);
        // The idle opponent earned nothing.
        assert_eq!(sim.resources(Side::Two), before);
    }

    #[test]
    fn training_deducts_funds_and_spawns_after_timer() {
        let mut sim = sim();
        let before = sim.resources(Side::One);
        sim.queue_commands(
            Side::One,
            vec![Command::Train {
                unit: TrainableUnit::Worker,
                count: 1,
            }],
        );
        sim.step();
        assert_eq!(sim.resources(Side::One), before - 1);
        assert_eq!(sim.unit_count(), 4);

        step_n(&mut sim, u64::from(CostTable::v2().worker.produce_time) + 1);
        assert_eq!(sim.unit_count(), 5);
    }

    #[test]
    fn unaffordable_training_is_ignored() {
        let mut sim = sim();
        // No barracks exists yet, so the heavy order finds no producer
        // and spends nothing.
        sim.queue_commands(
            Side::One,
            vec![Command::Train {
                unit: TrainableUnit::Heavy,
                count: 4,
            }],
        );
        sim.step();
        assert_eq!(sim.resources(Side::One), 10);
    }

    #[test]
    fn construction_produces_a_barracks() {
        let mut sim = sim();
        sim.queue_commands(
            Side::One,
            vec![Command::Build {
                building: BuildingKind::Barracks,
            }],
        );
        sim.step();
        assert_eq!(
            sim.resources(Side::One),
            10 - CostTable::v2().barracks.cost
        );

        step_n(&mut sim, u64::from(CostTable::v2().barracks.build_time) + 1);
        let snapshot = sim.snapshot();
        assert!(snapshot
            .units
            .iter()
            .any(|u| u.side == Side::One && u.role == UnitRole::Barracks));
    }

    #[test]
    fn attack_stance_closes_distance_and_kills() {
        let mut sim = sim();
        // Side One's worker hunts the enemy worker at (5, 6); the enemy
        // holds position. Repeat the order every tick as an agent would.
        for _ in 0..600 {
            sim.queue_commands(Side::One, vec![Command::Attack { x: 5, y: 6 }]);
            sim.queue_commands(Side::Two, vec![Command::Defend]);
            if sim.step() {
                break;
            }
        }
        let snapshot = sim.snapshot();
        // The fight reached the enemy: something on side Two died.
        assert!(snapshot.units.iter().filter(|u| u.side == Side::Two).count() < 2);
    }

    #[test]
    fn elimination_declares_a_winner() {
        // Side One keeps training workers and throws them at the enemy
        // base; the lone defender cannot trade into the stream.
        let mut sim = sim();
        for _ in 0..5000 {
            sim.queue_commands(
                Side::One,
                vec![
                    Command::Train {
                        unit: TrainableUnit::Worker,
                        count: 1,
                    },
                    Command::Attack { x: 6, y: 6 },
                ],
            );
            if sim.step() {
                break;
            }
        }
        assert!(sim.is_game_over());
        assert_eq!(sim.winner(), Some(Side::One));
    }

    #[test]
    fn cancel_policy_drops_contested_moves() {
        // Two workers equidistant from the same destination cell collide;
        // under Cancel neither moves, under Alternate one does.
        let mut map = MapSpec::duel8();
        map.spawns[0].workers = vec![(3, 2)];
        map.spawns[1].workers = vec![(3, 4)];

        let mut cancel = Simulation::new(&map, CostTable::v2(), ConflictPolicy::Cancel, 0);
        cancel.queue_commands(Side::One, vec![Command::Attack { x: 3, y: 4 }]);
        cancel.queue_commands(Side::Two, vec![Command::Attack { x: 3, y: 2 }]);
        cancel.step();
        let snapshot = cancel.snapshot();
        let workers: Vec<_> = snapshot
            .units
            .iter()
            .filter(|u| u.role == UnitRole::Worker)
            .collect();
        assert!(workers.iter().any(|u| (u.x, u.y) == (3, 2)));
        assert!(workers.iter().any(|u| (u.x, u.y) == (3, 4)));

        let mut alternate = Simulation::new(&map, CostTable::v2(), ConflictPolicy::Alternate, 0);
        alternate.queue_commands(Side::One, vec![Command::Attack { x: 3, y: 4 }]);
        alternate.queue_commands(Side::Two, vec![Command::Attack { x: 3, y: 2 }]);
        alternate.step();
        let snapshot = alternate.snapshot();
        // Cycle 0 gives side One priority: its worker took (3, 3).
        assert!(snapshot
            .units
            .iter()
            .any(|u| u.side == Side::One && u.role == UnitRole::Worker && (u.x, u.y) == (3, 3)));
    }

    #[test]
    fn snapshots_are_fully_observable() {
        let sim = sim();
        let snapshot = sim.snapshot();
        assert!(snapshot.resources.iter().all(Option::is_some));
        assert_eq!(snapshot.map_size, Some(8));
        assert_eq!(snapshot.terrain.as_ref().map(Vec::len), Some(64));
    }
}
