//! Engine façade
//!
//! Owns the current snapshot and the state to return to on reset. Hosts
//! drive it with `launch_ball` and `refresh` and read `snapshot` to draw.

use super::action::GameAction;
use super::objects::Boundary;
use super::power_up::PowerUp;
use super::state::{GameState, OngoingGameState};
use crate::model::BoardModel;
use crate::physics::Position;
use crate::settings::GameConfig;

#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    initial: OngoingGameState,
    state: GameState,
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new(BoardModel::default(), Boundary::default())
    }
}

impl GameEngine {
    pub fn new(board: BoardModel, boundary: Boundary) -> Self {
        Self::with_config(GameConfig::default(), board, boundary)
    }

    pub fn with_config(config: GameConfig, board: BoardModel, boundary: Boundary) -> Self {
        let initial = OngoingGameState::with_balls(board, boundary, config.starting_balls);
        Self {
            config,
            state: GameState::Ongoing(initial.clone()),
            initial,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Current state; reading it never advances the game
    pub fn snapshot(&self) -> &GameState {
        &self.state
    }

    /// Launch over one maximum-length step
    pub fn launch_ball(&mut self, source: Position, target: Position) -> &GameState {
        self.apply(GameAction::Launch {
            source,
            target,
            delta_time: self.config.max_delta_time,
        })
    }

    /// Advance by `delta_time`, capped at the configured maximum
    pub fn refresh(&mut self, delta_time: f64) -> &GameState {
        let delta_time = delta_time.min(self.config.max_delta_time).max(0.0);
        self.apply(GameAction::Refresh { delta_time })
    }

    pub fn activate_power_up(&mut self, power_up: PowerUp) -> &GameState {
        self.apply(GameAction::ActivatePowerUp { power_up })
    }

    /// Restart from the state the engine was built or last reset with
    pub fn reset(&mut self) {
        log::info!("Engine reset");
        self.state = GameState::Ongoing(self.initial.clone());
    }

    /// Restart on a new board, keeping the current play area unless one is given
    pub fn reset_with(&mut self, board: BoardModel, boundary: Option<Boundary>) {
        let boundary = boundary.unwrap_or(*self.state.boundary());
        log::info!(
            "Engine reset with {} pegs on a {}x{} board",
            board.peg_count(),
            boundary.width,
            boundary.height
        );

        self.initial = OngoingGameState::with_balls(board, boundary, self.config.starting_balls);
        self.state = GameState::Ongoing(self.initial.clone());
    }

    pub fn update_boundary(&mut self, width: f64, height: f64) {
        let boundary = Boundary::new(width, height);
        self.initial = self.initial.set_boundary(boundary);
        self.state = self.state.set_boundary(boundary);
    }

    fn apply(&mut self, action: GameAction) -> &GameState {
        self.state = self.state.next(&action);
        &self.state
    }
}
