use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::bounded_grid::BoundedGrid;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Wall,
    Floor,
    Target,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum UserAction {
    Move(Direction),
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct CrateId(pub usize);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CrateState {
    pub position: Vec2,
    pub pushes_remaining: u32,
}

/// What happens to a crate whose push budget reaches zero on the push that lands it on a goal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum DestructionPolicy {
    /// Budget zero always destroys the crate, goal or not.
    #[default]
    Unconditional,
    /// A crate landing on a goal with its last push stays in play, frozen in place.
    SpareOnGoal,
}

/// Immutable level geometry and rules, shared by every state of a level.
pub struct GridWorld {
    pub(crate) grid: BoundedGrid<Cell>,
    pub(crate) policy: DestructionPolicy,
    pub(crate) goal_count: usize,
}

/// One point in the state space of a level.
///
/// Crates are keyed by a stable id assigned at load time so that the presentation can follow
/// a single crate's countdown across moves. Destroyed crates remember where they broke.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct PuzzleState {
    pub player: Vec2,
    pub crates: BTreeMap<CrateId, CrateState>,
    pub destroyed: BTreeMap<CrateId, Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameChangeType {
    PlayerMove,
    PlayerAndCrateMove,
    CrateDestroyed(CrateId),
}

/// Why an action could not be applied. Never a fault: the caller just ignores the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    #[error("Cannot move out of bounds")]
    OutOfBounds,
    #[error("Cannot walk into a wall")]
    IntoWall,
    #[error("Cannot push crate out of bounds")]
    PushOutOfBounds,
    #[error("Cannot push crate into a wall")]
    PushIntoWall,
    #[error("Cannot push crate into another crate")]
    PushIntoCrate,
    #[error("Crate has no pushes left")]
    CrateExhausted,
}

/// A world or state that breaks the level invariants. Indicates a bug upstream of the rules.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("grid must have a positive size, got {width}x{height}")]
    EmptyGrid { width: i32, height: i32 },
    #[error("{what} at {pos} is out of bounds")]
    OutOfBounds { what: &'static str, pos: Vec2 },
    #[error("cell {0} is both a wall and a goal")]
    WallOnGoal(Vec2),
    #[error("{what} at {pos} is inside a wall")]
    InsideWall { what: &'static str, pos: Vec2 },
    #[error("two crates share cell {0}")]
    CratesOverlap(Vec2),
    #[error("player stands on crate {0:?}")]
    PlayerOnCrate(CrateId),
    #[error("crate {0:?} is both live and destroyed")]
    DestroyedCrateLive(CrateId),
}
