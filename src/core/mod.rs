mod bounded_grid;
mod consts;
mod game_state_key;
mod heuristics;
mod model_helpers;
mod models;
mod update;

pub use consts::*;
pub use game_state_key::StateKey;
pub use heuristics::{WinnableState, is_winnable};
pub use model_helpers::ALL_DIRECTIONS;
pub use models::{
    Cell, CrateId, CrateState, DestructionPolicy, Direction, GameChangeType, GridWorld,
    InvariantError, PuzzleState, Rejected, UserAction, Vec2,
};
pub use update::{apply, step};
