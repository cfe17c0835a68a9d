//! Peggle - ball physics and game-state machine for a peg board
//!
//! Core modules:
//! - `physics`: Kinematics, free bodies, shapes and collision resolution
//! - `model`: Immutable board, peg, block and level models
//! - `game`: Game objects, game states, actions and the engine façade
//! - `settings`: Data-driven engine configuration

pub mod error;
pub mod game;
pub mod model;
pub mod physics;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use game::{GameAction, GameEngine, GameState, PowerUp};
pub use settings::GameConfig;

/// Game configuration constants
pub mod consts {
    /// Largest simulation step the engine will integrate (seconds)
    pub const MAX_DELTA_TIME: f64 = 1.0 / 60.0;
    /// Downward gravitational acceleration (units/s²)
    pub const GRAVITATIONAL_ACCELERATION: f64 = 754.0;
    /// Numerator of the inverse-square explosion force
    pub const EXPLOSION_FORCE_SCALE: f64 = 10_000_000.0;

    /// Launch force = (target - source) * scale
    pub const LAUNCH_FORCE_SCALE: f64 = 3_000.0;
    pub const MAX_LAUNCH_FORCE: f64 = 1_000_000.0;
    pub const STARTING_BALLS: u32 = 10;

    /// Ball defaults
    pub const BALL_MASS: f64 = 10.0;
    pub const BALL_RADIUS: f64 = 32.0;
    pub const BALL_RESTITUTION: f64 = 1.0;
    /// Number of trailing velocity samples used for stuck detection
    pub const BALL_VELOCITY_WINDOW: usize = 5;
    /// Below this speed on every sample the ball counts as stuck
    pub const BALL_STUCK_SPEED: f64 = 20.0;

    /// Bucket defaults
    pub const BUCKET_WIDTH: f64 = 180.0;
    pub const BUCKET_HEIGHT: f64 = 200.0;
    pub const BUCKET_MASS: f64 = 100.0;
    pub const BUCKET_RESTITUTION: f64 = 1.0;
    pub const BUCKET_SPEED: f64 = 200.0;

    /// Walls are thick so a fast ball cannot tunnel through in one step
    pub const WALL_THICKNESS: f64 = 1_000.0;
    pub const WALL_RESTITUTION: f64 = 1.0;

    /// Peg defaults
    pub const PEG_MIN_RADIUS: f64 = 20.0;
    pub const PEG_MAX_RADIUS: f64 = 80.0;
    pub const PEG_DEFAULT_RADIUS: f64 = 40.0;
    pub const PEG_RESTITUTION: f64 = 0.95;

    /// Triangular block defaults
    pub const BLOCK_MAX_AREA: f64 = 150_000.0;
    pub const BLOCK_DEFAULT_VERTEX_DISTANCE: f64 = 88.0;
    pub const BLOCK_RESTITUTION: f64 = 0.95;

    /// KaBoom blast radius
    pub const BLAST_RADIUS: f64 = 150.0;

    /// Points sampled on a circle's perimeter for triangle overlap tests
    pub const CIRCLE_MESH_POINTS: usize = 20;
    /// Rewind budget when pushing a circle out of a triangle
    pub const TRIANGLE_REWIND_STEPS: usize = 100;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
