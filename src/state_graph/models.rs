use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::{GameChangeType, PuzzleState, StateKey, UserAction};

#[derive(Clone)]
pub struct StateGraph {
    // map from canonical state to node id
    pub nodes: bimap::BiMap<StateKey, usize>,
    // the first concrete state seen for each node, used to expand it
    pub states: HashMap<usize, PuzzleState>,
    pub edges: HashSet<Edge>,
    pub unvisited: VecDeque<usize>,
    pub next_id: usize,
}

#[derive(Hash, Eq, PartialEq, Clone, Debug)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub action: UserAction,
    pub game_change_type: GameChangeType,
}

#[derive(Debug, PartialEq, Eq)]
pub enum PopulateResult {
    AllVisited,
    Populated,
    NodeLimitReached,
}
