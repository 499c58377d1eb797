use log::trace;

use crate::core::{GridWorld, UserAction, step};
use crate::state_graph::models::{Edge, PopulateResult, StateGraph};

pub fn populate_node(graph: &mut StateGraph, world: &GridWorld, from_id: usize) {
    let Some(from_state) = graph.get_state(from_id) else {
        return;
    };
    let from_state = from_state.clone();

    for action in UserAction::all_actions() {
        if let Ok((new_state, change_type)) = step(world, &from_state, action) {
            let to_id = graph.upsert_state(new_state);
            graph.add_edge(Edge {
                from: from_id,
                to: to_id,
                action,
                game_change_type: change_type,
            });
        }
    }
}

pub fn populate_step(graph: &mut StateGraph, world: &GridWorld) -> PopulateResult {
    let Some(node_id) = graph.get_unvisited_node() else {
        return PopulateResult::AllVisited;
    };
    populate_node(graph, world, node_id);
    PopulateResult::Populated
}

/// Expands nodes until the graph is complete or holds `node_limit` nodes.
pub fn populate_until(graph: &mut StateGraph, world: &GridWorld, node_limit: usize) -> PopulateResult {
    loop {
        if graph.nodes.len() >= node_limit && !graph.is_fully_visited() {
            trace!("node limit {} reached", node_limit);
            return PopulateResult::NodeLimitReached;
        }
        if let PopulateResult::AllVisited = populate_step(graph, world) {
            return PopulateResult::AllVisited;
        }
    }
}
