mod common;

use battle_core::{BattleEvent, BattleOutcome};
use battle_runtime::BattleResult;
use common::{Session, hero, play_out, request, rook};
use proptest::prelude::*;

/// Hero and the duelist share speed 5, so every round opens with tie-break
/// rolls.
fn duel(seed: u64) -> BattleResult {
    let mut session = Session::new(seed);
    let mut controller = session.start(&request(vec![hero(), rook()], "duelist", 1));
    play_out(&mut controller);
    controller.finish().expect("battle finished")
}

fn tie_breaks(log: &[BattleEvent]) -> usize {
    log.iter()
        .filter(|e| matches!(e, BattleEvent::TieBreakRolled { .. }))
        .count()
}

#[test]
fn same_seed_reproduces_the_log() {
    let first = duel(7);
    let second = duel(7);

    assert!(tie_breaks(&first.log) >= 2);
    assert_eq!(first.log, second.log);
    assert_eq!(
        first.digest(),
        second.digest(),
        "{} vs {}",
        first.digest_hex(),
        second.digest_hex()
    );
    assert_eq!(first.digest_hex().len(), 64);
}

#[test]
fn digest_changes_with_the_log() {
    let result = duel(7);
    let mut truncated = result.clone();
    truncated.log.pop();
    assert_ne!(result.digest(), truncated.digest());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn any_seed_is_reproducible(seed in any::<u64>()) {
        let first = duel(seed);
        let second = duel(seed);
        prop_assert_eq!(first.digest(), second.digest());
        prop_assert_eq!(first.outcome, BattleOutcome::Victory);
    }
}
