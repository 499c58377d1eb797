use std::collections::{HashSet, VecDeque};

use log::debug;

use crate::core::{
    Direction, GridWorld, PuzzleState, StateKey, UserAction, WinnableState, apply, is_winnable,
};
use crate::planner::models::{Horizon, PlanVerdict, SearchConclusion};

struct FrontierNode {
    state: PuzzleState,
    first_action: Direction,
    depth: usize,
}

/// Breadth-first search from `game` for a won state, bounded by `horizon`.
///
/// Every state in the frontier carries the root action it descends from, so the first won
/// state dequeued names the opening move of a shortest plan. Actions are always tried in the
/// order of [`UserAction::all_actions`], which makes the verdict deterministic.
pub fn evaluate(game: &PuzzleState, world: &GridWorld, horizon: Horizon) -> PlanVerdict {
    if world.is_won(game) {
        return PlanVerdict::new(SearchConclusion::AlreadyWon, None, 0);
    }
    if is_winnable(world, game) == WinnableState::WinImpossible {
        debug!("root state is dead, skipping search");
        return PlanVerdict::new(SearchConclusion::Unsolvable, None, 0);
    }
    if horizon.max_depth == 0 {
        return PlanVerdict::new(SearchConclusion::HorizonReached, None, 0);
    }

    let mut visited: HashSet<StateKey> = HashSet::new();
    visited.insert(StateKey::new(game));

    let mut frontier: VecDeque<FrontierNode> = VecDeque::new();
    for action in UserAction::all_actions() {
        let Ok(next) = apply(world, game, action) else {
            continue;
        };
        if visited.insert(StateKey::new(&next)) {
            frontier.push_back(FrontierNode {
                state: next,
                first_action: action.direction(),
                depth: 1,
            });
        }
    }

    let mut expanded = 0;
    let mut horizon_reached = false;
    while let Some(node) = frontier.pop_front() {
        if world.is_won(&node.state) {
            debug!(
                "solution found at depth {} after {} expansions, first move {}",
                node.depth, expanded, node.first_action
            );
            return PlanVerdict::new(
                SearchConclusion::Solved { depth: node.depth },
                Some(node.first_action),
                expanded,
            );
        }
        if is_winnable(world, &node.state) == WinnableState::WinImpossible {
            continue;
        }
        if node.depth >= horizon.max_depth {
            horizon_reached = true;
            continue;
        }
        if expanded >= horizon.max_expanded {
            horizon_reached = true;
            break;
        }
        expanded += 1;

        for action in UserAction::all_actions() {
            let Ok(next) = apply(world, &node.state, action) else {
                continue;
            };
            if visited.insert(StateKey::new(&next)) {
                frontier.push_back(FrontierNode {
                    state: next,
                    first_action: node.first_action,
                    depth: node.depth + 1,
                });
            }
        }
    }

    let conclusion = if horizon_reached {
        SearchConclusion::HorizonReached
    } else {
        SearchConclusion::Unsolvable
    };
    debug!(
        "no solution: {:?} after {} expansions, {} states seen",
        conclusion,
        expanded,
        visited.len()
    );
    PlanVerdict::new(conclusion, None, expanded)
}

/// Asks for a hint with the default horizon.
pub fn request_hint(game: &PuzzleState, world: &GridWorld) -> PlanVerdict {
    evaluate(game, world, Horizon::default())
}
