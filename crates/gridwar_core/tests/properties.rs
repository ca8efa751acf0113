//! Property-based checks over randomized valid snapshots.

use proptest::prelude::*;

use gridwar_core::classify::ClassifiedState;
use gridwar_core::command::{Command, TrainableUnit};
use gridwar_core::costs::CostTable;
use gridwar_core::production::{plan_worker_training, worker_target};
use gridwar_core::snapshot::{GameStateSnapshot, Side};
use gridwar_test_utils::SnapshotBuilder;

/// Build a snapshot with the given own economy and opponent economy.
fn economy_snapshot(
    map_size: u32,
    turn: u64,
    funds: u32,
    own_bases: u32,
    own_workers: u32,
    opp_bases: u32,
    opp_workers: u32,
) -> GameStateSnapshot {
    let mut builder = SnapshotBuilder::new()
        .map_size(map_size)
        .turn(turn)
        .resources(Side::One, funds);
    for i in 0..own_bases {
        builder = builder.base(Side::One, i as i32, 0);
    }
    for i in 0..own_workers {
        builder = builder.worker(Side::One, i as i32, 1);
    }
    for i in 0..opp_bases {
        builder = builder.base(Side::Two, i as i32, 6);
    }
    for i in 0..opp_workers {
        builder = builder.worker(Side::Two, i as i32, 7);
    }
    builder.build()
}

proptest! {
    /// The worker batch never exceeds the base count (floored at 1), the
    /// target deficit, or the funds on hand.
    #[test]
    fn worker_batch_stays_within_budgets(
        map_size in 4u32..32,
        turn in 0u64..2000,
        funds in 0u32..50,
        own_bases in 0u32..4,
        own_workers in 0u32..20,
        opp_bases in 0u32..4,
        opp_workers in 0u32..20,
    ) {
        let snapshot = economy_snapshot(
            map_size, turn, funds, own_bases, own_workers, opp_bases, opp_workers,
        );
        let state = ClassifiedState::new(&snapshot);
        let costs = CostTable::v2();

        if let Some(Command::Train { unit, count }) =
            plan_worker_training(&state, Side::One, &costs)
        {
            prop_assert_eq!(unit, TrainableUnit::Worker);
            let target = worker_target(&state, Side::One);
            prop_assert!(target > own_workers, "trained at or above target");
            let deficit = target - own_workers;
            prop_assert!(count >= 1);
            prop_assert!(count <= own_bases.max(1), "batch exceeds base count");
            prop_assert!(count <= deficit, "batch exceeds deficit");
            prop_assert!(count * costs.worker.cost <= funds, "batch exceeds funds");
        }
    }

    /// Planning is deterministic: the same snapshot always produces the
    /// same batch.
    #[test]
    fn planning_is_deterministic(
        map_size in 4u32..32,
        turn in 0u64..2000,
        funds in 0u32..50,
        own_bases in 0u32..4,
        own_workers in 0u32..20,
        opp_bases in 0u32..4,
        opp_workers in 0u32..20,
    ) {
        use gridwar_core::agent::{Agent, HeuristicAgent};

        let snapshot = economy_snapshot(
            map_size, turn, funds, own_bases, own_workers, opp_bases, opp_workers,
        );
        let agent = HeuristicAgent::default();
        let first = agent.plan(&snapshot, Side::One).unwrap();
        let second = agent.plan(&snapshot, Side::One).unwrap();
        prop_assert_eq!(first, second);
    }

    /// The harvest allocation never exceeds the owned worker count and is
    /// zero exactly when no workers exist.
    #[test]
    fn harvest_allocation_respects_worker_budget(
        map_size in 4u32..32,
        funds in 0u32..50,
        own_bases in 0u32..4,
        own_workers in 0u32..20,
        opp_workers in 0u32..20,
    ) {
        use gridwar_core::economy::harvester_target;

        let snapshot = economy_snapshot(
            map_size, 0, funds, own_bases, own_workers, 1, opp_workers,
        );
        let state = ClassifiedState::new(&snapshot);
        let count = harvester_target(&state, Side::One, &CostTable::v2());

        if own_workers == 0 {
            prop_assert_eq!(count, 0);
        } else {
            prop_assert!(count >= 1);
            prop_assert!(count <= own_workers);
        }
    }
}
