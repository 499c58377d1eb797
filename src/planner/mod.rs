mod models;
mod search;

pub use models::{Horizon, PlanVerdict, SearchConclusion};
pub use search::{evaluate, request_hint};
