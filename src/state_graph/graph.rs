use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::{PuzzleState, StateKey};
use crate::state_graph::models::{Edge, StateGraph};

impl StateGraph {
    pub fn new() -> Self {
        StateGraph {
            nodes: bimap::BiMap::new(),
            states: HashMap::new(),
            edges: HashSet::new(),
            unvisited: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn upsert_state(&mut self, state: PuzzleState) -> usize {
        let key = StateKey::new(&state);
        if let Some(&id) = self.nodes.get_by_left(&key) {
            return id;
        }
        let id = self.next_id;
        self.next_id += 1;

        // id is fresh and the key was just checked to be absent
        let _ = self.nodes.insert_no_overwrite(key, id);
        self.states.insert(id, state);
        self.unvisited.push_back(id);
        id
    }

    pub fn get_state(&self, id: usize) -> Option<&PuzzleState> {
        self.states.get(&id)
    }

    pub fn add_edge(&mut self, edge: Edge) {
        self.edges.insert(edge);
    }

    pub fn get_unvisited_node(&mut self) -> Option<usize> {
        self.unvisited.pop_front()
    }

    pub fn is_fully_visited(&self) -> bool {
        self.unvisited.is_empty()
    }

    pub fn retain_nodes(&mut self, keep: &HashSet<usize>) {
        self.nodes.retain(|_, id| keep.contains(id));
        self.states.retain(|id, _| keep.contains(id));
        self.edges
            .retain(|edge| keep.contains(&edge.from) && keep.contains(&edge.to));
        self.unvisited.retain(|id| keep.contains(id));
    }
}

impl Default for StateGraph {
    fn default() -> Self {
        StateGraph::new()
    }
}
