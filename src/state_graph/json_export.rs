use serde::{Deserialize, Serialize};

use crate::core::{Direction, GridWorld};
use crate::state_graph::StateGraph;

#[derive(Serialize, Deserialize, Debug)]
struct JsonData {
    nodes: Vec<JsonNode>,
    links: Vec<JsonEdge>,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonNode {
    id: usize,
    on_targets: usize,
    live_crates: usize,
    destroyed_crates: usize,
    won: bool,
}

#[derive(Serialize, Deserialize, Debug)]
struct JsonEdge {
    source: usize,
    target: usize,
    action: Direction,
}

pub fn get_json_data(graph: &StateGraph, world: &GridWorld) -> Result<String, serde_json::Error> {
    let mut nodes: Vec<JsonNode> = graph
        .states
        .iter()
        .map(|(&id, state)| JsonNode {
            id,
            on_targets: world.count_crates_on_goals(state),
            live_crates: state.live_count(),
            destroyed_crates: state.destroyed_count(),
            won: world.is_won(state),
        })
        .collect();
    nodes.sort_by_key(|node| node.id);

    let mut links: Vec<JsonEdge> = graph
        .edges
        .iter()
        .map(|edge| JsonEdge {
            source: edge.from,
            target: edge.to,
            action: edge.action.direction(),
        })
        .collect();
    links.sort_by_key(|link| (link.source, link.target, link.action));

    serde_json::to_string_pretty(&JsonData { nodes, links })
}
