use std::collections::HashSet;

use petgraph::visit::{Dfs, Reversed};

use crate::core::GridWorld;
use crate::state_graph::StateGraph;
use crate::state_graph::petgraph_interface::convert_to_petgraph;

#[derive(Debug)]
pub struct TrimStats {
    pub nodes_before: usize,
    pub nodes_after: usize,
    pub edges_before: usize,
    pub edges_after: usize,
}

impl TrimStats {
    pub fn nodes_removed(&self) -> usize {
        self.nodes_before - self.nodes_after
    }

    pub fn nodes_removed_percentage(&self) -> f64 {
        if self.nodes_before == 0 {
            0.0
        } else {
            (self.nodes_removed() as f64 / self.nodes_before as f64) * 100.0
        }
    }

    pub fn edges_removed(&self) -> usize {
        self.edges_before - self.edges_after
    }

    pub fn edges_removed_percentage(&self) -> f64 {
        if self.edges_before == 0 {
            0.0
        } else {
            (self.edges_removed() as f64 / self.edges_before as f64) * 100.0
        }
    }
}

/// Drops every node from which no won state can be reached.
///
/// Walks the reversed graph from every won node; whatever the walk touches can still win.
pub fn trim_unwinnable(graph: &mut StateGraph, world: &GridWorld) -> TrimStats {
    let (petgraph, node_map) = convert_to_petgraph(graph);
    let reversed = Reversed(&petgraph);

    let mut won_ids: Vec<usize> = graph
        .states
        .iter()
        .filter(|(_, state)| world.is_won(state))
        .map(|(&id, _)| id)
        .collect();
    won_ids.sort_unstable();

    let mut dfs = Dfs::empty(reversed);
    let mut winning_states = HashSet::new();
    for id in won_ids {
        let Some(&start) = node_map.get(&id) else {
            continue;
        };
        if winning_states.contains(&id) {
            continue;
        }
        dfs.move_to(start);
        while let Some(index) = dfs.next(reversed) {
            winning_states.insert(petgraph[index]);
        }
    }

    let total_nodes = graph.nodes.len();
    let total_edges = graph.edges.len();
    graph.retain_nodes(&winning_states);

    TrimStats {
        nodes_before: total_nodes,
        nodes_after: graph.nodes.len(),
        edges_before: total_edges,
        edges_after: graph.edges.len(),
    }
}
