//! Peg models
//!
//! Normal, point and power-up pegs share one shape; they differ only in the
//! role they play in the game (point pegs must all be cleared to win,
//! power-up pegs trigger the active power-up).

use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use crate::consts::{PEG_DEFAULT_RADIUS, PEG_MAX_RADIUS, PEG_MIN_RADIUS, PEG_RESTITUTION};
use crate::normalize_angle;
use crate::physics::shape::circle_mesh;
use crate::physics::{CircularStaticBody, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PegKind {
    #[default]
    Normal,
    Point,
    PowerUp,
}

/// An immutable peg placed on a board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PegModel {
    pub id: EntityId,
    pub board_id: Option<EntityId>,
    pub kind: PegKind,
    pub center: Position,
    pub radius: f64,
    /// Rotation in radians, in [-π, π)
    pub heading: f64,
}

impl PegModel {
    pub fn new(
        id: EntityId,
        board_id: Option<EntityId>,
        kind: PegKind,
        center: Position,
        radius: f64,
        heading: f64,
    ) -> Self {
        Self {
            id,
            board_id,
            kind,
            center,
            radius,
            heading,
        }
    }

    /// Peg with the default radius and heading
    pub fn of_default(
        id: EntityId,
        board_id: Option<EntityId>,
        kind: PegKind,
        center: Position,
    ) -> Self {
        Self::new(id, board_id, kind, center, PEG_DEFAULT_RADIUS, 0.0)
    }

    pub fn is_point(&self) -> bool {
        self.kind == PegKind::Point
    }

    pub fn is_power_up(&self) -> bool {
        self.kind == PegKind::PowerUp
    }

    pub fn set_center(&self, center: Position) -> Self {
        Self { center, ..*self }
    }

    /// Scale the radius, clamped to the allowed range
    pub fn scale(&self, factor: f64) -> Self {
        let radius = (self.radius * factor).clamp(PEG_MIN_RADIUS, PEG_MAX_RADIUS);
        Self { radius, ..*self }
    }

    /// Rotate the heading. Non-finite angles leave the peg unchanged.
    pub fn rotate(&self, angle: f64) -> Self {
        if !angle.is_finite() {
            return *self;
        }

        Self {
            heading: normalize_angle(self.heading + angle),
            ..*self
        }
    }

    pub fn will_collide(&self, other: &PegModel) -> bool {
        self.center.distance_to(other.center) < self.radius + other.radius
    }

    /// Points on the perimeter used for triangle overlap tests
    pub fn mesh(&self) -> Vec<Position> {
        circle_mesh(self.center, self.radius)
    }

    pub fn to_static_body(&self) -> CircularStaticBody {
        CircularStaticBody::new(self.center, self.radius, PEG_RESTITUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn peg(x: f64, y: f64) -> PegModel {
        PegModel::of_default(EntityId(1), None, PegKind::Point, Position::new(x, y))
    }

    #[test]
    fn test_of_default() {
        let p = peg(1.0, 2.0);
        assert_eq!(p.radius, PEG_DEFAULT_RADIUS);
        assert_eq!(p.heading, 0.0);
        assert!(p.is_point());
        assert!(!p.is_power_up());
    }

    #[test]
    fn test_scale_is_clamped() {
        let p = peg(0.0, 0.0);
        assert_eq!(p.scale(1.5).radius, 60.0);
        assert_eq!(p.scale(10.0).radius, PEG_MAX_RADIUS);
        assert_eq!(p.scale(0.1).radius, PEG_MIN_RADIUS);
    }

    #[test]
    fn test_rotate_wraps_and_ignores_nan() {
        let p = peg(0.0, 0.0);
        assert!((p.rotate(PI / 2.0).heading - PI / 2.0).abs() < 1e-12);
        assert!((p.rotate(PI / 2.0).rotate(PI).heading + PI / 2.0).abs() < 1e-12);
        assert_eq!(p.rotate(f64::NAN), p);
        assert_eq!(p.rotate(f64::INFINITY), p);
    }

    #[test]
    fn test_will_collide() {
        let a = peg(0.0, 0.0);
        assert!(a.will_collide(&peg(79.0, 0.0)));
        assert!(!a.will_collide(&peg(80.0, 0.0)));
    }

    #[test]
    fn test_set_center_keeps_identity() {
        let a = peg(0.0, 0.0);
        let moved = a.set_center(Position::new(5.0, 5.0));
        assert_eq!(moved.id, a.id);
        assert_eq!(moved.center, Position::new(5.0, 5.0));
    }
}
