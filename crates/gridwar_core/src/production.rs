//! Construction and training policy.
//!
//! Three independent decisions, each gated on available funds: pursue one
//! barracks per base, keep the worker count at a map- and turn-dependent
//! target, and pick which combat unit the barracks should turn funds into.

use tracing::trace;

use crate::classify::ClassifiedState;
use crate::command::{BuildingKind, Command, TrainableUnit};
use crate::costs::CostTable;
use crate::snapshot::Side;

/// Worker target on cramped maps (side length below 9).
const SMALL_MAP_WORKER_TARGET: u32 = 15;

/// Turn after which the economy stops chasing the opponent's worker count.
const LATE_GAME_TURN: u64 = 1000;

/// Hit points at or below which a lone enemy heavy counts as weak.
const WEAK_HEAVY_HP: i32 = 3;

/// Resource credit assumed per visible opponent worker when estimating
/// their funds.
const IDLE_WORKER_CREDIT: u32 = 2;

/// Emit a barracks construction order when the side can pursue one: a
/// worker to build it, a base to anchor it, funds to pay for it, and fewer
/// barracks than bases.
#[must_use]
pub fn plan_construction(
    state: &ClassifiedState<'_>,
    side: Side,
    costs: &CostTable,
) -> Option<Command> {
    let own = state.side(side);
    if own.workers.is_empty() || own.bases.is_empty() {
        return None;
    }
    if state.funds(side) < costs.barracks.cost {
        return None;
    }
    if own.barracks.len() >= own.bases.len() {
        return None;
    }
    Some(Command::Build {
        building: BuildingKind::Barracks,
    })
}

/// Worker-count target by map-size/turn tier.
#[must_use]
pub fn worker_target(state: &ClassifiedState<'_>, side: Side) -> u32 {
    let own_bases = (state.side(side).bases.len() as u32).max(1);
    if state.map_side < 9 {
        return SMALL_MAP_WORKER_TARGET;
    }
    if state.map_side > 16 || state.turn > LATE_GAME_TURN {
        return 2 * own_bases;
    }
    let opp = state.side(side.opponent());
    let opp_bases = (opp.bases.len() as u32).max(1);
    let per_base = (opp.workers.len() as u32 / opp_bases).max(2);
    per_base * own_bases
}

/// Emit a worker training order when below target and one worker is
/// affordable. The batch is sized to the base count and never exceeds the
/// deficit or the funds on hand.
#[must_use]
pub fn plan_worker_training(
    state: &ClassifiedState<'_>,
    side: Side,
    costs: &CostTable,
) -> Option<Command> {
    let own = state.side(side);
    let workers = own.workers.len() as u32;
    let target = worker_target(state, side);
    if workers >= target {
        return None;
    }
    let funds = state.funds(side);
    if funds < costs.worker.cost {
        return None;
    }
    let deficit = target - workers;
    let bases = (own.bases.len() as u32).max(1);
    let affordable = if costs.worker.cost == 0 {
        deficit
    } else {
        funds / costs.worker.cost
    };
    let count = bases.min(deficit).min(affordable).max(1);
    trace!(side = side.index(), target, workers, count, "worker training");
    Some(Command::Train {
        unit: TrainableUnit::Worker,
        count,
    })
}

/// Estimated funds available to a side: stated resources when observable,
/// plus a credit per visible worker.
///
/// The snapshot does not expose per-unit activity, so every visible worker
/// earns the idle credit; when the stockpile is unobservable the estimate
/// degrades to the credit term alone.
#[must_use]
pub fn estimated_funds(state: &ClassifiedState<'_>, side: Side) -> u32 {
    let stated = state.stated_resources(side).unwrap_or(0);
    let credit = IDLE_WORKER_CREDIT * state.side(side).workers.len() as u32;
    stated.saturating_add(credit)
}

/// Whether the opponent's heavy presence is weak enough to discount: at
/// most one heavy, any lone heavy already battered, and no funds for
/// another.
#[must_use]
pub fn opponent_heavies_weak(state: &ClassifiedState<'_>, side: Side, costs: &CostTable) -> bool {
    let opp = state.side(side.opponent());
    if opp.heavies.len() > 1 {
        return false;
    }
    if let Some(heavy) = opp.heavies.first() {
        if heavy.hp() > WEAK_HEAVY_HP {
            return false;
        }
    }
    estimated_funds(state, side.opponent()) < costs.heavy.cost
}

/// Emit a military training order. Skipped entirely without a barracks.
///
/// Ranged is preferred into a heavy-committed or heavy-starved opponent;
/// otherwise the best affordable of heavy, ranged, light. The batch is
/// clamped to twice the barracks count.
#[must_use]
pub fn plan_military_training(
    state: &ClassifiedState<'_>,
    side: Side,
    costs: &CostTable,
) -> Option<Command> {
    let own = state.side(side);
    let barracks = own.barracks.len() as u32;
    if barracks == 0 {
        return None;
    }
    let funds = state.funds(side);
    let opp = state.side(side.opponent());

    let prefer_ranged = opp.heavies.len() >= 2 || opponent_heavies_weak(state, side, costs);
    let unit = if prefer_ranged {
        TrainableUnit::Ranged
    } else if funds >= costs.heavy.cost {
        TrainableUnit::Heavy
    } else if funds >= costs.ranged.cost {
        TrainableUnit::Ranged
    } else {
        TrainableUnit::Light
    };

    let cost = costs.stats(unit).cost;
    if funds < cost || cost == 0 {
        return None;
    }
    let count = (funds / cost).clamp(1, 2 * barracks);
    trace!(side = side.index(), ?unit, count, "military training");
    Some(Command::Train { unit, count })
}
