use crate::core::{GridWorld, PuzzleState, Vec2};

#[derive(Eq, PartialEq, Debug)]
pub enum WinnableState {
    WinMaybePossible,
    WinImpossible,
}

const DIRECTIONS_AROUND: [Vec2; 4] = [
    Vec2 { x: 1, y: 0 },
    Vec2 { x: 0, y: 1 },
    Vec2 { x: -1, y: 0 },
    Vec2 { x: 0, y: -1 },
];

/// Cheap, sound check for states that can never be won.
///
/// Crates are never created, so once fewer live crates remain than there are goals the level
/// is lost. A live crate has to end on a goal or be broken by spending its pushes, so a crate
/// that can never move again while off a goal sinks the whole state.
pub fn is_winnable(world: &GridWorld, game: &PuzzleState) -> WinnableState {
    if game.live_count() < world.total_targets() {
        return WinnableState::WinImpossible;
    }

    let any_stuck = game.crates.values().any(|c| {
        !world.is_goal(&c.position) && (c.pushes_remaining == 0 || is_crate_cornered(world, c.position))
    });
    if any_stuck {
        WinnableState::WinImpossible
    } else {
        WinnableState::WinMaybePossible
    }
}

/// a crate is cornered if it sits against blockers on two consecutive sides, so no push can
/// ever move it
fn is_crate_cornered(world: &GridWorld, position: Vec2) -> bool {
    let blocked_directions = DIRECTIONS_AROUND.map(|dir| world.is_blocked(&(position + dir)));

    (0..4).any(|i| blocked_directions[i] && blocked_directions[(i + 1) % 4])
}
