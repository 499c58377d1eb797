#[cfg(test)]
mod test {
    use std::collections::{BTreeMap, BTreeSet};

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::core::*;
    use crate::test::test_util::GameTestState;

    const LEVELS: &[&str] = &[
        r#"
#######
#     #
# $$. #
#@  . #
#######
"#,
        r#"
########
#@ $  .#
# $ $ .#
#   #  #
#.     #
########
"#,
        r#"
  ######
  #    #
###$## #
#  $ .@#
#   .  #
########
"#,
    ];

    /// Random walks over every level and policy, checking the rules after each step.
    fn for_each_walk<F>(mut check: F)
    where
        F: FnMut(&GridWorld, &PuzzleState, UserAction, &Result<(PuzzleState, GameChangeType), Rejected>),
    {
        let actions = UserAction::all_actions();
        for (level_index, level) in LEVELS.iter().enumerate() {
            for policy in [DestructionPolicy::Unconditional, DestructionPolicy::SpareOnGoal] {
                for budget in [1, 3] {
                    let game = GameTestState::with_rules(level, budget, policy);
                    let mut rng = StdRng::seed_from_u64(level_index as u64 * 31 + budget as u64);
                    let mut state = game.game_state.clone();
                    for _ in 0..400 {
                        let action = actions[rng.random_range(0..actions.len())];
                        let result = step(&game.world, &state, action);
                        check(&game.world, &state, action, &result);
                        if let Ok((next, _)) = result {
                            state = next;
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn reachable_states_keep_level_invariants() {
        for_each_walk(|world, _, _, result| {
            if let Ok((next, _)) = result {
                assert_eq!(next.validate(world), Ok(()));
            }
        });
    }

    #[test]
    fn step_is_deterministic() {
        for_each_walk(|world, state, action, result| {
            assert_eq!(&step(world, state, action), result);
        });
    }

    #[test]
    fn budgets_only_drop_by_one_on_push() {
        for_each_walk(|_, state, _, result| {
            let Ok((next, change)) = result else {
                return;
            };
            let pushed: Vec<CrateId> = state
                .crates
                .iter()
                .filter(|&(id, c)| match next.crates.get(id) {
                    Some(after) => after.position != c.position,
                    None => true,
                })
                .map(|(&id, _)| id)
                .collect();

            match change {
                GameChangeType::PlayerMove => assert!(pushed.is_empty()),
                GameChangeType::PlayerAndCrateMove => assert_eq!(pushed.len(), 1),
                GameChangeType::CrateDestroyed(id) => {
                    assert_eq!(pushed, vec![*id]);
                    assert_eq!(state.crates[id].pushes_remaining, 1);
                }
            }

            for (id, before) in &state.crates {
                if let Some(after) = next.crates.get(id) {
                    let expected = if pushed.contains(id) {
                        before.pushes_remaining - 1
                    } else {
                        before.pushes_remaining
                    };
                    assert_eq!(after.pushes_remaining, expected);
                }
            }
        });
    }

    #[test]
    fn destroyed_crates_never_return() {
        let actions = UserAction::all_actions();
        for level in LEVELS {
            let game = GameTestState::with_rules(level, 1, DestructionPolicy::Unconditional);
            let mut rng = StdRng::seed_from_u64(99);
            let mut state = game.game_state.clone();
            let mut ever_destroyed: BTreeMap<CrateId, Vec2> = BTreeMap::new();
            for _ in 0..600 {
                let action = actions[rng.random_range(0..actions.len())];
                if let Ok(next) = apply(&game.world, &state, action) {
                    state = next;
                }
                for (id, pos) in &state.destroyed {
                    ever_destroyed.entry(*id).or_insert(*pos);
                }
                let live: BTreeSet<CrateId> = state.crates.keys().copied().collect();
                assert!(ever_destroyed.keys().all(|id| !live.contains(id)));
                assert_eq!(state.destroyed, ever_destroyed);
                if state.live_count() < game.world.total_targets() {
                    assert!(!game.world.is_won(&state));
                }
            }
        }
    }
}
