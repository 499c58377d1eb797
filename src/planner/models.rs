use serde::{Deserialize, Serialize};

use crate::core::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_EXPANDED, Direction, UserAction};

/// How far the oracle may search before giving up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    /// Maximum number of states expanded.
    pub max_expanded: usize,
    /// Maximum number of moves in a plan.
    pub max_depth: usize,
}

impl Default for Horizon {
    fn default() -> Self {
        Horizon {
            max_expanded: DEFAULT_MAX_EXPANDED,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchConclusion {
    AlreadyWon,
    Solved { depth: usize },
    /// Every reachable state was explored without finding a win.
    Unsolvable,
    /// The horizon ran out first. Reported to callers as unsolvable.
    HorizonReached,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanVerdict {
    pub solvable: bool,
    pub suggested_action: Option<Direction>,
    pub conclusion: SearchConclusion,
    pub expanded: usize,
}

impl PlanVerdict {
    pub(crate) fn new(conclusion: SearchConclusion, suggested_action: Option<Direction>, expanded: usize) -> Self {
        let solvable = matches!(
            conclusion,
            SearchConclusion::AlreadyWon | SearchConclusion::Solved { .. }
        );
        PlanVerdict {
            solvable,
            suggested_action: suggested_action.filter(|_| solvable),
            conclusion,
            expanded,
        }
    }

    pub fn suggested_user_action(&self) -> Option<UserAction> {
        self.suggested_action.map(UserAction::Move)
    }

    pub fn to_human_string(&self) -> String {
        match (self.conclusion, self.suggested_action) {
            (SearchConclusion::AlreadyWon, _) => "Already solved".to_string(),
            (SearchConclusion::Solved { depth }, Some(dir)) => {
                format!("Solvable in {} moves, try {}", depth, dir)
            }
            (SearchConclusion::Solved { depth }, None) => format!("Solvable in {} moves", depth),
            (SearchConclusion::Unsolvable, _) => "No solution from here".to_string(),
            (SearchConclusion::HorizonReached, _) => {
                format!("No solution found within {} states", self.expanded)
            }
        }
    }
}
