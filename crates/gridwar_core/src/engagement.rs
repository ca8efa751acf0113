//! The per-tick attack-or-defend decision.
//!
//! Not a state machine: the decision is re-derived from the classified
//! snapshot every tick, so there is nothing to reset between matches.

use tracing::trace;

use crate::classify::ClassifiedState;
use crate::command::Command;
use crate::costs::CostTable;
use crate::snapshot::Side;
use crate::targeting::{select_target, workers_should_fight};

/// Combat-power ratio above which the side presses the attack.
const POWER_ADVANTAGE_RATIO: f64 = 1.2;

/// Manhattan radius around the home base inside which an enemy mobile
/// unit counts as an active threat.
const BASE_THREAT_RADIUS: i32 = 6;

/// Decide this tick's engagement command: exactly one of `Attack` or
/// `Defend`.
///
/// Attack requires visible enemies and any of: a decisive combat-power
/// advantage, a standing army, a viable worker skirmish, or a threat near
/// the home base. Without a target from [`select_target`] the decision
/// falls back to `Defend`.
#[must_use]
pub fn decide(state: &ClassifiedState<'_>, side: Side, costs: &CostTable) -> Command {
    let own = state.side(side);
    let opp = state.side(side.opponent());
    if opp.units.is_empty() {
        return Command::Defend;
    }

    let overpowering = own.combat_power as f64 > opp.combat_power as f64 * POWER_ADVANTAGE_RATIO;
    let has_army = !own.army.is_empty();
    let skirmish = !own.workers.is_empty() && workers_should_fight(state, side, costs);
    let threatened = own.bases.first().map_or(false, |base| {
        opp.units
            .iter()
            .any(|u| !u.is_building && u.manhattan_to(base.x, base.y) <= BASE_THREAT_RADIUS)
    });

    if overpowering || has_army || skirmish || threatened {
        if let Some((x, y)) = select_target(state, side) {
            trace!(
                side = side.index(),
                overpowering,
                has_army,
                skirmish,
                threatened,
                "attacking"
            );
            return Command::Attack { x, y };
        }
    }
    Command::Defend
}
