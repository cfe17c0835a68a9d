//! Game states
//!
//! `GameState` is a closed set of snapshots. Every transition takes the
//! current snapshot and an action and returns the next snapshot; nothing is
//! mutated in place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::action::GameAction;
use super::objects::{Ball, Boundary, Bucket};
use super::power_up::{KaBoomGameState, PowerUp, SpookyBallGameState};
use crate::consts::{LAUNCH_FORCE_SCALE, MAX_LAUNCH_FORCE, STARTING_BALLS};
use crate::model::{BoardModel, EntityId, PegModel, TriangularBlockModel};
use crate::physics::{CircularFreeBody, Collider, Force, PhysicsEngine, Position};

pub(crate) const PHYSICS: PhysicsEngine = PhysicsEngine;

/// Snapshot of the game at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameState {
    Ongoing(OngoingGameState),
    KaBoom(KaBoomGameState),
    SpookyBall(SpookyBallGameState),
    Won(ConcludedGameState),
    Lost(ConcludedGameState),
}

impl GameState {
    /// Apply `action` and return the resulting state
    pub fn next(&self, action: &GameAction) -> GameState {
        match self {
            GameState::Ongoing(state) => state.next(action),
            GameState::KaBoom(state) => state.next(action),
            GameState::SpookyBall(state) => state.next(action),
            GameState::Won(_) | GameState::Lost(_) => self.clone(),
        }
    }

    /// The underlying data every variant carries
    pub fn data(&self) -> &OngoingGameState {
        match self {
            GameState::Ongoing(state) => state,
            GameState::KaBoom(state) => state.inner(),
            GameState::SpookyBall(state) => state.inner(),
            GameState::Won(state) | GameState::Lost(state) => &state.0,
        }
    }

    pub fn is_ongoing(&self) -> bool {
        matches!(
            self,
            GameState::Ongoing(_) | GameState::KaBoom(_) | GameState::SpookyBall(_)
        )
    }

    pub fn is_won(&self) -> bool {
        matches!(self, GameState::Won(_))
    }

    pub fn is_lost(&self) -> bool {
        matches!(self, GameState::Lost(_))
    }

    pub fn is_ball_in_play(&self) -> bool {
        self.is_ongoing() && self.data().is_ball_in_play()
    }

    pub fn active_ball(&self) -> Option<&Ball> {
        self.data().active_ball()
    }

    /// Pegs still on the board, keyed by id
    pub fn pegs(&self) -> BTreeMap<EntityId, PegModel> {
        self.data().pegs()
    }

    pub fn collided_pegs(&self) -> &BTreeMap<EntityId, PegModel> {
        self.data().collided_pegs()
    }

    pub fn exploded_pegs(&self) -> &BTreeMap<EntityId, PegModel> {
        self.data().exploded_pegs()
    }

    pub fn triangular_blocks(&self) -> Vec<TriangularBlockModel> {
        self.data().board().triangular_blocks().copied().collect()
    }

    pub fn bucket(&self) -> &Bucket {
        self.data().bucket()
    }

    pub fn boundary(&self) -> &Boundary {
        self.data().boundary()
    }

    pub fn board(&self) -> &BoardModel {
        self.data().board()
    }

    pub fn remaining_balls(&self) -> u32 {
        self.data().remaining_balls()
    }

    /// Same state on a resized play area
    pub fn set_boundary(&self, boundary: Boundary) -> GameState {
        match self {
            GameState::Ongoing(state) => GameState::Ongoing(state.set_boundary(boundary)),
            GameState::KaBoom(state) => GameState::KaBoom(state.set_boundary(boundary)),
            GameState::SpookyBall(state) => GameState::SpookyBall(state.set_boundary(boundary)),
            GameState::Won(state) => GameState::Won(state.set_boundary(boundary)),
            GameState::Lost(state) => GameState::Lost(state.set_boundary(boundary)),
        }
    }
}

/// A game in progress with no power-up active
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OngoingGameState {
    board: BoardModel,
    boundary: Boundary,
    bucket: Bucket,
    active_ball: Option<Ball>,
    collided_pegs: BTreeMap<EntityId, PegModel>,
    exploded_pegs: BTreeMap<EntityId, PegModel>,
    remaining_balls: u32,
}

impl OngoingGameState {
    pub fn new(board: BoardModel, boundary: Boundary) -> Self {
        Self::with_balls(board, boundary, STARTING_BALLS)
    }

    pub fn with_balls(board: BoardModel, boundary: Boundary, remaining_balls: u32) -> Self {
        Self {
            board,
            boundary,
            bucket: Bucket::default().set_boundary(&boundary),
            active_ball: None,
            collided_pegs: BTreeMap::new(),
            exploded_pegs: BTreeMap::new(),
            remaining_balls,
        }
    }

    pub fn board(&self) -> &BoardModel {
        &self.board
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn bucket(&self) -> &Bucket {
        &self.bucket
    }

    pub fn active_ball(&self) -> Option<&Ball> {
        self.active_ball.as_ref()
    }

    pub fn collided_pegs(&self) -> &BTreeMap<EntityId, PegModel> {
        &self.collided_pegs
    }

    pub fn exploded_pegs(&self) -> &BTreeMap<EntityId, PegModel> {
        &self.exploded_pegs
    }

    pub fn remaining_balls(&self) -> u32 {
        self.remaining_balls
    }

    pub fn pegs(&self) -> BTreeMap<EntityId, PegModel> {
        self.board
            .all_pegs()
            .into_iter()
            .map(|peg| (peg.id, peg))
            .collect()
    }

    pub(crate) fn with_board(self, board: BoardModel) -> Self {
        Self { board, ..self }
    }

    pub(crate) fn with_active_ball(self, active_ball: Option<Ball>) -> Self {
        Self {
            active_ball,
            ..self
        }
    }

    pub(crate) fn with_collided_pegs(self, collided_pegs: BTreeMap<EntityId, PegModel>) -> Self {
        Self {
            collided_pegs,
            ..self
        }
    }

    pub(crate) fn with_exploded_pegs(self, exploded_pegs: BTreeMap<EntityId, PegModel>) -> Self {
        Self {
            exploded_pegs,
            ..self
        }
    }

    /// A ball is live: launched, still inside the play area and not caught
    pub fn is_ball_in_play(&self) -> bool {
        self.active_ball
            .as_ref()
            .is_some_and(|ball| !self.boundary.is_ball_out_of_bounds(ball))
            && !self.bucket.has_ball
    }

    pub fn set_boundary(&self, boundary: Boundary) -> Self {
        Self {
            boundary,
            bucket: self.bucket.set_boundary(&boundary),
            ..self.clone()
        }
    }

    pub fn next(&self, action: &GameAction) -> GameState {
        match *action {
            GameAction::Launch {
                source,
                target,
                delta_time,
            } => GameState::Ongoing(self.launch_ball(source, target, delta_time)),
            GameAction::Refresh { delta_time } => self.refresh(delta_time),
            GameAction::ActivatePowerUp { power_up } => self.activate_power_up(power_up),
        }
    }

    /// Spawn a ball at `source` pushed towards `target`. Ignored while a ball
    /// is in play or when no balls remain.
    pub fn launch_ball(&self, source: Position, target: Position, delta_time: f64) -> Self {
        if self.is_ball_in_play() || self.remaining_balls == 0 {
            log::debug!(
                "Launch rejected: in_play={} remaining={}",
                self.is_ball_in_play(),
                self.remaining_balls
            );
            return self.clone();
        }

        let ball = Ball::new(source);
        let force = launch_force(source, target);
        let body = PHYSICS.exert_forces(ball.body(), &[force], delta_time);

        log::debug!(
            "Launch from ({:.1}, {:.1}) with force {:.0}, {} balls left",
            source.x,
            source.y,
            force.magnitude(),
            self.remaining_balls - 1
        );

        Self {
            active_ball: Some(ball.set_circular_body(body)),
            remaining_balls: self.remaining_balls - 1,
            ..self.clone()
        }
    }

    /// Advance the simulation by `delta_time`
    pub fn refresh(&self, delta_time: f64) -> GameState {
        let in_play = self.is_ball_in_play();
        let moved_ball = self
            .active_ball
            .as_ref()
            .map(|ball| PHYSICS.move_body(ball.body(), delta_time, false));
        let moved_bucket = self.move_bucket(delta_time);

        let (true, Some(ball), Some(moved)) = (in_play, self.active_ball.as_ref(), moved_ball)
        else {
            return self
                .clone()
                .with_active_ball(None)
                .with_bucket(moved_bucket.observe(None))
                .remove_collided_pegs()
                .resolve_game();
        };

        let resolved = PHYSICS.handle_collisions(moved, &self.obstacles(), delta_time);
        let ball = ball.set_circular_body(resolved);

        let mut collided_pegs = self.collided_pegs.clone();
        collided_pegs.extend(
            self.pegs_touching(&moved)
                .into_iter()
                .map(|peg| (peg.id, peg)),
        );

        let state = self
            .clone()
            .with_active_ball(Some(ball))
            .with_collided_pegs(collided_pegs)
            .with_bucket(moved_bucket.observe(Some(&moved)));

        GameState::Ongoing(state.resolve_stuck_ball())
    }

    /// Wrap this state in `power_up`, rebuilding the board
    pub fn activate_power_up(&self, power_up: PowerUp) -> GameState {
        log::info!("Power-up activated: {:?}", power_up);

        let state = self.clone().with_board(self.board.rebuilt());
        match power_up {
            PowerUp::KaBoom => GameState::KaBoom(KaBoomGameState::new(state)),
            PowerUp::SpookyBall => GameState::SpookyBall(SpookyBallGameState::new(state)),
        }
    }

    /// Stage every collided peg for removal and clear the staging set
    pub(crate) fn remove_collided_pegs(self) -> Self {
        let board = self
            .board
            .remove_pegs(|peg| self.collided_pegs.contains_key(&peg.id));
        self.with_board(board).with_collided_pegs(BTreeMap::new())
    }

    /// Pegs whose bodies overlap `ball`
    pub(crate) fn pegs_touching(&self, ball: &CircularFreeBody) -> Vec<PegModel> {
        let body = ball.as_static();
        self.board
            .all_pegs()
            .into_iter()
            .filter(|peg| peg.to_static_body().overlaps_circle(&body))
            .collect()
    }

    fn with_bucket(self, bucket: Bucket) -> Self {
        Self { bucket, ..self }
    }

    fn move_bucket(&self, delta_time: f64) -> Bucket {
        let moved = PHYSICS.move_body(self.bucket.body(), delta_time, true);
        let resolved = PHYSICS.handle_collisions(moved, &self.boundary.colliders(), delta_time);
        self.bucket.set_body(resolved)
    }

    /// Pegs in id order, then blocks, then walls, then the bucket
    fn obstacles(&self) -> Vec<Collider> {
        let pegs = self
            .board
            .all_pegs()
            .into_iter()
            .map(|peg| Collider::Circle(peg.to_static_body()));
        let blocks = self
            .board
            .triangular_blocks()
            .map(|block| Collider::Triangle(block.to_static_body()));

        pegs.chain(blocks)
            .chain(self.boundary.colliders())
            .chain([Collider::from(self.bucket.body())])
            .collect()
    }

    fn resolve_stuck_ball(self) -> Self {
        match &self.active_ball {
            Some(ball) if ball.is_stuck() => {
                log::debug!(
                    "Ball stuck at ({:.1}, {:.1}), clearing {} pegs",
                    ball.center().x,
                    ball.center().y,
                    self.collided_pegs.len()
                );
                self.remove_collided_pegs()
            }
            _ => self,
        }
    }

    fn resolve_game(self) -> GameState {
        let no_ball = self.active_ball.is_none();

        if no_ball && self.board.point_peg_count() == 0 {
            log::info!("Game won with {} balls left", self.remaining_balls);
            return GameState::Won(ConcludedGameState(self));
        }
        if no_ball && self.remaining_balls == 0 {
            log::info!(
                "Game lost with {} point pegs left",
                self.board.point_peg_count()
            );
            return GameState::Lost(ConcludedGameState(self));
        }

        GameState::Ongoing(self)
    }
}

fn launch_force(source: Position, target: Position) -> Force {
    let force = Force::new(target.x - source.x, target.y - source.y).scale(LAUNCH_FORCE_SCALE);

    if force.magnitude() > MAX_LAUNCH_FORCE {
        return force.normalize().scale(MAX_LAUNCH_FORCE);
    }
    force
}

/// Frozen snapshot of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConcludedGameState(OngoingGameState);

impl ConcludedGameState {
    pub fn inner(&self) -> &OngoingGameState {
        &self.0
    }

    fn set_boundary(&self, boundary: Boundary) -> Self {
        Self(self.0.set_boundary(boundary))
    }
}
