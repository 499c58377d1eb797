use crate::core::GameChangeType;
use crate::planner::PlanVerdict;

pub struct GameRenderState {
    pub won: bool,
    pub error: Option<String>,
    pub last_change: Option<GameChangeType>,
    pub hint: Option<PlanVerdict>,
    pub hint_pending: bool,
    pub message: Option<String>,
}

impl GameRenderState {
    pub fn new() -> Self {
        GameRenderState {
            won: false,
            error: None,
            last_change: None,
            hint: None,
            hint_pending: false,
            message: None,
        }
    }
}

impl Default for GameRenderState {
    fn default() -> Self {
        GameRenderState::new()
    }
}
