//! Combat-target scoring and the worker-skirmish policy.

use tracing::trace;

use crate::classify::ClassifiedState;
use crate::costs::CostTable;
use crate::production::opponent_heavies_weak;
use crate::snapshot::{Side, UnitRole, UnitView};

/// Map side length at or below which workers always join the fight.
pub const SKIRMISH_MAP_SIDE: u32 = 12;

/// Map side length from which razing enemy barracks earns a bonus.
const RAZE_BONUS_MAP_SIDE: u32 = 16;

/// Map side length above which counter-sniping enemy ranged pays off.
const COUNTER_SNIPE_MAP_SIDE: u32 = 9;

/// Hit points at or below which a mobile unit is worth finishing off.
const FINISH_OFF_HP: i32 = 2;

/// Whether workers should fight instead of harvesting.
///
/// Always true on cramped maps. On larger maps an all-worker skirmish is
/// only viable while neither side has upgraded: the opponent's heavies must
/// be weak, the opponent must have no ranged units, and the own side must
/// have neither heavies nor ranged units.
#[must_use]
pub fn workers_should_fight(state: &ClassifiedState<'_>, side: Side, costs: &CostTable) -> bool {
    if state.map_side <= SKIRMISH_MAP_SIDE {
        return true;
    }
    let own = state.side(side);
    let opp = state.side(side.opponent());
    opponent_heavies_weak(state, side, costs)
        && opp.ranged.is_empty()
        && own.heavies.is_empty()
        && own.ranged.is_empty()
}

/// Pick the attack point for this tick, if any enemy is visible.
///
/// Candidates are scored by negated Manhattan distance from the side's
/// reference point plus situational bonuses; the first strict maximum in
/// snapshot order wins, which keeps the arbitrary-but-deterministic
/// tie-break of the observed behavior.
#[must_use]
pub fn select_target(state: &ClassifiedState<'_>, side: Side) -> Option<(i32, i32)> {
    let own = state.side(side);
    let opp = state.side(side.opponent());
    if opp.units.is_empty() {
        return None;
    }

    let (ref_x, ref_y) = reference_point(state, side);
    let own_upgraded = !own.heavies.is_empty() || !own.ranged.is_empty();
    let own_has_ranged = !own.ranged.is_empty();

    let mut best: Option<(&UnitView, f64)> = None;
    for candidate in &opp.units {
        let distance =
            (f64::from(candidate.x) - ref_x).abs() + (f64::from(candidate.y) - ref_y).abs();
        let mut score = -distance;
        if state.map_side >= RAZE_BONUS_MAP_SIDE
            && own_upgraded
            && candidate.role == UnitRole::Barracks
        {
            score += f64::from(state.map_side);
        }
        if own_has_ranged
            && candidate.role == UnitRole::Ranged
            && state.map_side > COUNTER_SNIPE_MAP_SIDE
        {
            score += 2.0;
        }
        if !candidate.is_building && candidate.hp() <= FINISH_OFF_HP {
            score += 2.0;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((candidate, score));
        }
    }

    let (target, score) = best?;
    trace!(
        side = side.index(),
        x = target.x,
        y = target.y,
        score,
        "selected attack target"
    );
    Some((target.x, target.y))
}

/// Reference point for distance scoring: own army centroid, else own
/// worker centroid, else the map center.
fn reference_point(state: &ClassifiedState<'_>, side: Side) -> (f64, f64) {
    let own = state.side(side);
    centroid(&own.army)
        .or_else(|| centroid(&own.workers))
        .unwrap_or_else(|| state.map_center())
}

/// Arithmetic mean position of a unit group; `None` when empty.
fn centroid(units: &[&UnitView]) -> Option<(f64, f64)> {
    if units.is_empty() {
        return None;
    }
    let n = units.len() as f64;
    let (sx, sy) = units.iter().fold((0.0, 0.0), |(sx, sy), u| {
        (sx + f64::from(u.x), sy + f64::from(u.y))
    });
    Some((sx / n, sy / n))
}
