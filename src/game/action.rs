//! Player and clock actions

use serde::{Deserialize, Serialize};

use super::power_up::PowerUp;
use super::state::GameState;
use crate::physics::Position;

/// Input to a state transition
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameAction {
    /// Fire a ball from `source` towards `target`
    Launch {
        source: Position,
        target: Position,
        delta_time: f64,
    },
    /// Advance the simulation by one tick
    Refresh { delta_time: f64 },
    /// Switch the active power-up
    ActivatePowerUp { power_up: PowerUp },
}

impl GameAction {
    pub fn execute(&self, state: &GameState) -> GameState {
        state.next(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::objects::Boundary;
    use crate::game::state::OngoingGameState;
    use crate::model::{BoardModel, EntityId};

    #[test]
    fn test_execute_matches_next() {
        let state = GameState::Ongoing(OngoingGameState::new(
            BoardModel::new(EntityId(1), None),
            Boundary::new(800.0, 1000.0),
        ));
        let action = GameAction::ActivatePowerUp {
            power_up: PowerUp::SpookyBall,
        };
        assert_eq!(action.execute(&state), state.next(&action));
    }

    #[test]
    fn test_action_json_shape() {
        let action = GameAction::Refresh { delta_time: 0.5 };
        let json = serde_json::to_string(&action).unwrap_or_default();
        assert_eq!(json, r#"{"Refresh":{"delta_time":0.5}}"#);
    }
}
