use std::collections::HashMap;

use petgraph::Directed;
use petgraph::graph::NodeIndex;

use crate::core::UserAction;
use crate::state_graph::StateGraph;

pub type StatePetgraph = petgraph::Graph<usize, UserAction, Directed>;

/// Builds a petgraph copy of `graph`, weighting each node with its state id.
pub fn convert_to_petgraph(graph: &StateGraph) -> (StatePetgraph, HashMap<usize, NodeIndex>) {
    let mut petgraph = petgraph::Graph::new();

    let node_map: HashMap<usize, NodeIndex> = graph
        .nodes
        .iter()
        .map(|(_, &node_id)| (node_id, petgraph.add_node(node_id)))
        .collect();

    for edge in &graph.edges {
        if let (Some(&from_index), Some(&to_index)) =
            (node_map.get(&edge.from), node_map.get(&edge.to))
        {
            petgraph.add_edge(from_index, to_index, edge.action);
        }
    }

    (petgraph, node_map)
}
