//! Game objects: the ball, the moving bucket and the play-area walls

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BALL_MASS, BALL_RADIUS, BALL_RESTITUTION, BALL_STUCK_SPEED, BALL_VELOCITY_WINDOW,
    BUCKET_HEIGHT, BUCKET_MASS, BUCKET_RESTITUTION, BUCKET_SPEED, BUCKET_WIDTH, WALL_RESTITUTION,
    WALL_THICKNESS,
};
use crate::physics::{
    CircularFreeBody, Collider, Position, RectangularFreeBody, RectangularStaticBody, Velocity,
};

/// The launched ball plus a short history of its speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    body: CircularFreeBody,
    recent_velocities: VecDeque<Velocity>,
}

impl Ball {
    pub fn new(center: Position) -> Self {
        Self {
            body: CircularFreeBody::new(center, BALL_MASS, BALL_RADIUS, BALL_RESTITUTION),
            recent_velocities: VecDeque::with_capacity(BALL_VELOCITY_WINDOW),
        }
    }

    #[inline]
    pub fn body(&self) -> &CircularFreeBody {
        &self.body
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.body.center()
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.body.velocity()
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.body.radius
    }

    /// Replace the body and record its velocity in the window
    pub fn set_circular_body(&self, body: CircularFreeBody) -> Self {
        let mut recent_velocities = self.recent_velocities.clone();
        if recent_velocities.len() == BALL_VELOCITY_WINDOW {
            recent_velocities.pop_front();
        }
        recent_velocities.push_back(body.velocity());

        Self {
            body,
            recent_velocities,
        }
    }

    /// Move the ball, keeping its velocity
    pub fn set_center(&self, center: Position) -> Self {
        self.set_circular_body(self.body.with_position(center))
    }

    /// True once a full window of samples has stayed below the stuck speed
    pub fn is_stuck(&self) -> bool {
        self.recent_velocities.len() == BALL_VELOCITY_WINDOW
            && self
                .recent_velocities
                .iter()
                .all(|velocity| velocity.magnitude() < BALL_STUCK_SPEED)
    }
}

/// Catches the ball when it drops in from above
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    body: RectangularFreeBody,
    pub has_ball: bool,
}

impl Default for Bucket {
    /// Starts just off the left edge, sliding right
    fn default() -> Self {
        Self::new(Position::new(-BUCKET_WIDTH / 2.0, 0.0))
    }
}

impl Bucket {
    pub fn new(center: Position) -> Self {
        Self {
            body: RectangularFreeBody::new(
                center,
                BUCKET_MASS,
                BUCKET_WIDTH,
                BUCKET_HEIGHT,
                BUCKET_RESTITUTION,
                Velocity::new(BUCKET_SPEED, 0.0),
            ),
            has_ball: false,
        }
    }

    #[inline]
    pub fn body(&self) -> &RectangularFreeBody {
        &self.body
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.body.center()
    }

    pub fn set_body(&self, body: RectangularFreeBody) -> Self {
        Self { body, ..*self }
    }

    /// Rest the bucket on the bottom edge of `boundary`
    pub fn set_boundary(&self, boundary: &Boundary) -> Self {
        let y = boundary.height - self.body.height / 2.0;
        self.set_body(self.body.with_position(Position::new(self.center().x, y)))
    }

    /// Update `has_ball` from the ball's current position
    pub fn observe(&self, ball: Option<&CircularFreeBody>) -> Self {
        let has_ball = ball.is_some_and(|ball| self.contains(ball));
        Self { has_ball, ..*self }
    }

    fn contains(&self, ball: &CircularFreeBody) -> bool {
        let rect = self.body.as_static();
        let center = ball.center();

        center.y + ball.radius >= rect.top_edge()
            && center.x - ball.radius >= rect.left_edge()
            && center.x + ball.radius <= rect.right_edge()
    }
}

/// An immovable slab bounding the play area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    body: RectangularStaticBody,
}

impl Wall {
    pub fn new(center: Position, width: f64, height: f64) -> Self {
        Self {
            body: RectangularStaticBody::new(center, width, height, WALL_RESTITUTION),
        }
    }

    pub fn body(&self) -> &RectangularStaticBody {
        &self.body
    }
}

/// The play area. Left, right and top are walled; the bottom is open.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Boundary {
    pub width: f64,
    pub height: f64,
}

impl Boundary {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn walls(&self) -> [Wall; 3] {
        let (w, h, t) = (self.width, self.height, WALL_THICKNESS);
        [
            Wall::new(Position::new(-t / 2.0, h / 2.0), t, h),
            Wall::new(Position::new(w + t / 2.0, h / 2.0), t, h),
            Wall::new(Position::new(w / 2.0, -t / 2.0), w, t),
        ]
    }

    pub fn colliders(&self) -> [Collider; 3] {
        self.walls().map(|wall| Collider::Rectangle(*wall.body()))
    }

    /// Ball has fully left the play area through any edge
    pub fn is_ball_out_of_bounds(&self, ball: &Ball) -> bool {
        let (center, r) = (ball.center(), ball.radius());

        center.y >= self.height + r
            || center.y <= -r
            || center.x >= self.width + r
            || center.x <= -r
    }

    /// Ball has dropped past the bottom edge
    pub fn is_ball_below(&self, ball: &Ball) -> bool {
        ball.center().y >= self.height + ball.radius()
    }
}
