use crate::core::{CrateId, PuzzleState, Vec2};

/// Canonical encoding of a [`PuzzleState`] for deduplication.
///
/// Live crates are identified by position and remaining budget only, so two states that differ
/// just by which crate id sits where collapse into one node.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct StateKey {
    player: Vec2,
    crates: Vec<(Vec2, u32)>,
    destroyed: Vec<CrateId>,
}

impl StateKey {
    pub fn new(game: &PuzzleState) -> StateKey {
        let mut key = StateKey {
            player: game.player,
            crates: game
                .crates
                .values()
                .map(|c| (c.position, c.pushes_remaining))
                .collect(),
            destroyed: game.destroyed.keys().copied().collect(),
        };
        key.sort_entries();
        key
    }

    fn sort_entries(&mut self) {
        self.crates.sort_unstable();
        self.destroyed.sort_unstable();
    }
}
