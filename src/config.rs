use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use crate::core::{
    DEFAULT_GRAPH_NODE_LIMIT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANDED, DEFAULT_PUSH_BUDGET,
    DestructionPolicy,
};
use crate::level::LevelRules;
use crate::planner::Horizon;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Policy {
    /// Crates break on their last push, even onto a goal
    Unconditional,
    /// Crates landing on a goal with their last push stay there
    SpareOnGoal,
}

impl From<Policy> for DestructionPolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Unconditional => DestructionPolicy::Unconditional,
            Policy::SpareOnGoal => DestructionPolicy::SpareOnGoal,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Play interactively in the terminal
    Play,
    /// Ask the oracle about the starting position and print the verdict
    Hint {
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },
    /// Explore the state graph of the level
    Graph {
        /// Stop exploring after this many states
        #[arg(long, default_value_t = DEFAULT_GRAPH_NODE_LIMIT)]
        node_limit: usize,

        /// Keep states that can no longer be won
        #[arg(long)]
        no_trim: bool,

        /// Write the explored graph as JSON to this file
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
}

#[derive(Debug, Parser)]
#[command(name = "brittle-crates")]
#[command(about = "Sokoban where crates break after too many pushes", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// A level file, or a directory of `.txt` levels
    #[arg(short, long, global = true, default_value = "levels")]
    pub levels: PathBuf,

    /// Pushes every crate can take before it breaks
    #[arg(short, long, global = true, default_value_t = DEFAULT_PUSH_BUDGET)]
    pub budget: u32,

    /// What happens to a crate whose last push lands it on a goal
    #[arg(short, long, global = true, value_enum, default_value = "unconditional")]
    pub policy: Policy,

    /// Maximum number of states the oracle expands before giving up
    #[arg(short = 'n', long, global = true, default_value_t = DEFAULT_MAX_EXPANDED)]
    pub max_expanded: usize,

    /// Maximum plan length the oracle considers
    #[arg(short = 'd', long, global = true, default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Where log output goes
    #[arg(long, global = true, default_value = "exports/brittle_crates.log")]
    pub log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "info")]
    pub log_level: LevelFilter,
}

impl Args {
    pub fn rules(&self) -> LevelRules {
        LevelRules {
            push_budget: self.budget,
            policy: self.policy.into(),
        }
    }

    pub fn horizon(&self) -> Horizon {
        Horizon {
            max_expanded: self.max_expanded,
            max_depth: self.max_depth,
        }
    }
}
