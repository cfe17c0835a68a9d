//! Game module
//!
//! Rules layered on top of `physics` and `model`:
//! - Ball, bucket and wall objects
//! - Immutable game states and the actions that advance them
//! - KaBoom and SpookyBall power-ups
//! - `GameEngine`, the stateful façade hosts talk to

pub mod action;
pub mod engine;
pub mod objects;
pub mod power_up;
pub mod state;

pub use action::GameAction;
pub use engine::GameEngine;
pub use objects::{Ball, Boundary, Bucket, Wall};
pub use power_up::{KaBoomGameState, PowerUp, SpookyBallGameState};
pub use state::{ConcludedGameState, GameState, OngoingGameState};
