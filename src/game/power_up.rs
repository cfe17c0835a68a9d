//! Power-ups
//!
//! A power-up wraps an ongoing game and layers extra rules on top of every
//! refresh. Launching and boundary changes pass straight through to the
//! wrapped state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::GameAction;
use super::objects::{Ball, Boundary};
use super::state::{GameState, OngoingGameState, PHYSICS};
use crate::consts::BLAST_RADIUS;
use crate::model::{EntityId, PegModel};
use crate::physics::{CircularFreeBody, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUp {
    /// Power-up pegs explode, clearing pegs around them
    KaBoom,
    /// A ball that drops out after touching a power-up peg re-enters at the top
    SpookyBall,
}

fn within_blast(peg: &PegModel, points: &[Position]) -> bool {
    points
        .iter()
        .any(|point| point.distance_to(peg.center) <= BLAST_RADIUS)
}

/// Ongoing game with exploding power-up pegs.
///
/// Explosions run in two phases. A power-up peg the ball touches is marked
/// exploded; on the next refresh it is removed along with every non-power-up
/// peg within the blast radius, while power-up pegs caught in the blast are
/// marked and explode on the refresh after that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KaBoomGameState(OngoingGameState);

impl KaBoomGameState {
    pub fn new(state: OngoingGameState) -> Self {
        Self(state)
    }

    pub fn inner(&self) -> &OngoingGameState {
        &self.0
    }

    pub fn set_boundary(&self, boundary: Boundary) -> Self {
        Self(self.0.set_boundary(boundary))
    }

    pub fn next(&self, action: &GameAction) -> GameState {
        match *action {
            GameAction::Launch {
                source,
                target,
                delta_time,
            } => GameState::KaBoom(Self(self.0.launch_ball(source, target, delta_time))),
            GameAction::Refresh { delta_time } => self.refresh(delta_time),
            GameAction::ActivatePowerUp { power_up } => self.0.activate_power_up(power_up),
        }
    }

    pub fn refresh(&self, delta_time: f64) -> GameState {
        let refreshed = match self.0.refresh(delta_time) {
            GameState::Ongoing(state) => state,
            concluded => return concluded,
        };

        let ball_before = self
            .0
            .active_ball()
            .map(|ball| PHYSICS.move_body(ball.body(), delta_time, false));

        let state = Self(refreshed)
            .explode(delta_time)
            .check_for_power_up(ball_before.as_ref());

        GameState::KaBoom(state)
    }

    fn explode(self, delta_time: f64) -> Self {
        let exploded = self.0.exploded_pegs();
        if exploded.is_empty() {
            return self;
        }

        let points: Vec<Position> = exploded.values().map(|peg| peg.center).collect();
        let board = self.0.board();

        let removed: Vec<EntityId> = board
            .all_pegs()
            .into_iter()
            .filter(|peg| {
                exploded.contains_key(&peg.id)
                    || (!peg.is_power_up() && within_blast(peg, &points))
            })
            .map(|peg| peg.id)
            .collect();

        let next_exploded: BTreeMap<EntityId, PegModel> = board
            .power_up_pegs()
            .filter(|peg| within_blast(peg, &points) && !exploded.contains_key(&peg.id))
            .map(|peg| (peg.id, *peg))
            .collect();

        let ball = self.0.active_ball().map(|ball| {
            ball.set_circular_body(PHYSICS.handle_explosions(ball.body(), &points, delta_time))
        });

        log::debug!(
            "Explosion at {} points removed {} pegs, {} more primed",
            points.len(),
            removed.len(),
            next_exploded.len()
        );

        let board = board.remove_pegs(|peg| removed.contains(&peg.id));
        Self(
            self.0
                .with_board(board)
                .with_exploded_pegs(next_exploded)
                .with_active_ball(ball),
        )
    }

    /// Prime every power-up peg near the ball once the ball touches one
    fn check_for_power_up(self, ball_before: Option<&CircularFreeBody>) -> Self {
        let Some(ball_before) = ball_before else {
            return self;
        };

        let touched = self
            .0
            .board()
            .power_up_pegs()
            .any(|peg| peg.to_static_body().overlaps_circle(&ball_before.as_static()));
        if !touched {
            return self;
        }
        let Some(center) = self.0.active_ball().map(Ball::center) else {
            return self;
        };

        let mut exploded = self.0.exploded_pegs().clone();
        for peg in self.0.board().power_up_pegs() {
            if within_blast(peg, &[center]) {
                exploded.entry(peg.id).or_insert(*peg);
            }
        }

        Self(self.0.with_exploded_pegs(exploded))
    }
}

/// Ongoing game where the ball gets one free return through the top after
/// touching a power-up peg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpookyBallGameState(OngoingGameState);

impl SpookyBallGameState {
    pub fn new(state: OngoingGameState) -> Self {
        Self(state)
    }

    pub fn inner(&self) -> &OngoingGameState {
        &self.0
    }

    pub fn set_boundary(&self, boundary: Boundary) -> Self {
        Self(self.0.set_boundary(boundary))
    }

    pub fn next(&self, action: &GameAction) -> GameState {
        match *action {
            GameAction::Launch {
                source,
                target,
                delta_time,
            } => GameState::SpookyBall(Self(self.0.launch_ball(source, target, delta_time))),
            GameAction::Refresh { delta_time } => self.refresh(delta_time),
            GameAction::ActivatePowerUp { power_up } => self.0.activate_power_up(power_up),
        }
    }

    pub fn refresh(&self, delta_time: f64) -> GameState {
        let refreshed = match self.0.refresh(delta_time) {
            GameState::Ongoing(state) => state,
            concluded => return concluded,
        };

        let charged = refreshed
            .collided_pegs()
            .keys()
            .any(|id| self.0.board().power_up_pegs().any(|peg| peg.id == *id));

        let teleport = refreshed
            .active_ball()
            .filter(|ball| charged && refreshed.boundary().is_ball_below(ball))
            .map(|ball| ball.set_center(Position::new(ball.center().x, ball.radius())));

        let Some(ball) = teleport else {
            return GameState::SpookyBall(Self(refreshed));
        };

        log::debug!(
            "Spooky ball re-enters at x={:.1} after touching {} pegs",
            ball.center().x,
            refreshed.collided_pegs().len()
        );

        // The charge is single-use per turn: committing the touched pegs keeps
        // the same touch from teleporting the ball again
        let state = refreshed
            .with_active_ball(Some(ball))
            .remove_collided_pegs();
        GameState::SpookyBall(Self(state))
    }
}
