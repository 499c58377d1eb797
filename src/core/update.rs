use log::trace;

use crate::core::{
    CrateState, DestructionPolicy, GameChangeType, GridWorld, PuzzleState, Rejected, UserAction,
};

/// Applies one action to `game`, producing the next state and what changed.
///
/// The input state is left untouched. A crate whose last push is spent is destroyed on that
/// push, subject to the world's [`DestructionPolicy`].
pub fn step(
    world: &GridWorld,
    game: &PuzzleState,
    action: UserAction,
) -> Result<(PuzzleState, GameChangeType), Rejected> {
    let dir = action.direction().delta();

    let target = game.player + dir;
    if !world.contains(&target) {
        return Err(Rejected::OutOfBounds);
    }
    if world.is_wall(&target) {
        return Err(Rejected::IntoWall);
    }

    let Some((crate_id, pushed)) = game.crate_at(&target) else {
        let mut next = game.clone();
        next.player = target;
        return Ok((next, GameChangeType::PlayerMove));
    };

    let beyond = target + dir;
    if !world.contains(&beyond) {
        return Err(Rejected::PushOutOfBounds);
    }
    if world.is_wall(&beyond) {
        return Err(Rejected::PushIntoWall);
    }
    if game.has_crate_at(&beyond) {
        return Err(Rejected::PushIntoCrate);
    }
    if pushed.pushes_remaining == 0 {
        return Err(Rejected::CrateExhausted);
    }

    let moved = CrateState {
        position: beyond,
        pushes_remaining: pushed.pushes_remaining - 1,
    };

    let mut next = game.clone();
    next.player = target;

    let spared = match world.policy() {
        DestructionPolicy::Unconditional => false,
        DestructionPolicy::SpareOnGoal => world.is_goal(&beyond),
    };
    if moved.pushes_remaining == 0 && !spared {
        next.crates.remove(&crate_id);
        next.destroyed.insert(crate_id, beyond);
        trace!("crate {:?} destroyed at {}", crate_id, beyond);
        return Ok((next, GameChangeType::CrateDestroyed(crate_id)));
    }

    next.crates.insert(crate_id, moved);
    Ok((next, GameChangeType::PlayerAndCrateMove))
}

/// Applies one action, keeping only the resulting state.
pub fn apply(
    world: &GridWorld,
    game: &PuzzleState,
    action: UserAction,
) -> Result<PuzzleState, Rejected> {
    step(world, game, action).map(|(next, _)| next)
}
