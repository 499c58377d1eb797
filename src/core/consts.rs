pub const DEFAULT_PUSH_BUDGET: u32 = 5;

pub const DEFAULT_MAX_EXPANDED: usize = 200_000;
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub const DEFAULT_GRAPH_NODE_LIMIT: usize = 100_000;
