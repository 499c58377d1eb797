pub mod config;
pub mod console_interface;
pub mod core;
pub mod level;
pub mod logging;
pub mod models;
pub mod planner;
pub mod session;
pub mod state_graph;

#[cfg(test)]
mod test;
