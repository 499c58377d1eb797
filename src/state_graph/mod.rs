mod console_interface;
mod graph;
mod graph_trim;
mod json_export;
mod models;
mod petgraph_interface;
mod populate;

pub use console_interface::*;
pub use graph_trim::{TrimStats, trim_unwinnable};
pub use json_export::get_json_data;
pub use models::{Edge, PopulateResult, StateGraph};
pub use petgraph_interface::{StatePetgraph, convert_to_petgraph};
pub use populate::{populate_node, populate_step, populate_until};
