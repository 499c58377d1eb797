use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::ops::Add;

use crate::core::bounded_grid::BoundedGrid;
use crate::core::models::{
    Cell, CrateId, CrateState, DestructionPolicy, Direction, GridWorld, InvariantError,
    PuzzleState, UserAction, Vec2,
};

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Direction {
    pub fn delta(&self) -> Vec2 {
        match self {
            Direction::Up => Vec2 { x: 0, y: -1 },
            Direction::Down => Vec2 { x: 0, y: 1 },
            Direction::Left => Vec2 { x: -1, y: 0 },
            Direction::Right => Vec2 { x: 1, y: 0 },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "Up"),
            Direction::Down => write!(f, "Down"),
            Direction::Left => write!(f, "Left"),
            Direction::Right => write!(f, "Right"),
        }
    }
}

impl UserAction {
    /// All actions in priority order. Search ties are broken by this order.
    pub fn all_actions() -> [UserAction; 4] {
        ALL_DIRECTIONS.map(UserAction::Move)
    }

    pub fn direction(&self) -> Direction {
        match self {
            UserAction::Move(d) => *d,
        }
    }
}

impl GridWorld {
    pub fn new(
        width: i32,
        height: i32,
        walls: impl IntoIterator<Item = Vec2>,
        goals: impl IntoIterator<Item = Vec2>,
        policy: DestructionPolicy,
    ) -> Result<GridWorld, InvariantError> {
        if width <= 0 || height <= 0 {
            return Err(InvariantError::EmptyGrid { width, height });
        }
        let mut grid = BoundedGrid::new_with_size(width, height, Cell::Floor);
        for wall in walls {
            if !grid.contains(&wall) {
                return Err(InvariantError::OutOfBounds { what: "wall", pos: wall });
            }
            grid[&wall] = Cell::Wall;
        }
        let mut goal_count = 0;
        for goal in goals {
            match grid.get(&goal) {
                None => return Err(InvariantError::OutOfBounds { what: "goal", pos: goal }),
                Some(Cell::Wall) => return Err(InvariantError::WallOnGoal(goal)),
                Some(Cell::Target) => {}
                Some(Cell::Floor) => {
                    grid[&goal] = Cell::Target;
                    goal_count += 1;
                }
            }
        }

        Ok(GridWorld {
            grid,
            policy,
            goal_count,
        })
    }

    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    pub fn policy(&self) -> DestructionPolicy {
        self.policy
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        self.grid.contains(pos)
    }

    /// The cell at `pos`, or `None` outside the grid.
    pub fn cell(&self, pos: &Vec2) -> Option<Cell> {
        self.grid.get(pos).copied()
    }

    pub fn is_wall(&self, pos: &Vec2) -> bool {
        self.cell(pos) == Some(Cell::Wall)
    }

    pub fn is_goal(&self, pos: &Vec2) -> bool {
        self.cell(pos) == Some(Cell::Target)
    }

    /// Walls and the outside of the grid both stop movement.
    pub fn is_blocked(&self, pos: &Vec2) -> bool {
        !matches!(self.cell(pos), Some(Cell::Floor) | Some(Cell::Target))
    }

    pub fn walls(&self) -> impl Iterator<Item = Vec2> {
        self.positions_of(Cell::Wall)
    }

    pub fn goals(&self) -> impl Iterator<Item = Vec2> {
        self.positions_of(Cell::Target)
    }

    fn positions_of(&self, cell: Cell) -> impl Iterator<Item = Vec2> {
        self.grid
            .iter()
            .filter(move |&(_, &c)| c == cell)
            .map(|(pos, _)| pos)
    }

    pub fn total_targets(&self) -> usize {
        self.goal_count
    }

    /// A state is won when every goal holds a live crate and no live crate is left off a goal.
    pub fn is_won(&self, state: &PuzzleState) -> bool {
        state.crates.len() == self.goal_count
            && state.crates.values().all(|c| self.is_goal(&c.position))
    }

    pub fn count_crates_on_goals(&self, state: &PuzzleState) -> usize {
        state
            .crates
            .values()
            .filter(|c| self.is_goal(&c.position))
            .count()
    }
}

impl PuzzleState {
    /// Builds a fresh state, numbering crates in the order given.
    pub fn new(player: Vec2, crates: impl IntoIterator<Item = (Vec2, u32)>) -> PuzzleState {
        let crates = crates
            .into_iter()
            .enumerate()
            .map(|(i, (position, pushes_remaining))| {
                (
                    CrateId(i),
                    CrateState {
                        position,
                        pushes_remaining,
                    },
                )
            })
            .collect();
        PuzzleState {
            player,
            crates,
            destroyed: BTreeMap::new(),
        }
    }

    pub fn crate_at(&self, pos: &Vec2) -> Option<(CrateId, &CrateState)> {
        self.crates
            .iter()
            .find(|(_, c)| c.position == *pos)
            .map(|(&id, c)| (id, c))
    }

    pub fn has_crate_at(&self, pos: &Vec2) -> bool {
        self.crates.values().any(|c| c.position == *pos)
    }

    pub fn live_count(&self) -> usize {
        self.crates.len()
    }

    pub fn destroyed_count(&self) -> usize {
        self.destroyed.len()
    }

    /// Checks the level invariants against `world`.
    pub fn validate(&self, world: &GridWorld) -> Result<(), InvariantError> {
        check_placement(world, "player", self.player)?;

        let mut seen = HashSet::new();
        for (&id, c) in &self.crates {
            check_placement(world, "crate", c.position)?;
            if !seen.insert(c.position) {
                return Err(InvariantError::CratesOverlap(c.position));
            }
            if c.position == self.player {
                return Err(InvariantError::PlayerOnCrate(id));
            }
            if self.destroyed.contains_key(&id) {
                return Err(InvariantError::DestroyedCrateLive(id));
            }
        }
        Ok(())
    }
}

fn check_placement(world: &GridWorld, what: &'static str, pos: Vec2) -> Result<(), InvariantError> {
    match world.cell(&pos) {
        None => Err(InvariantError::OutOfBounds { what, pos }),
        Some(Cell::Wall) => Err(InvariantError::InsideWall { what, pos }),
        Some(_) => Ok(()),
    }
}
