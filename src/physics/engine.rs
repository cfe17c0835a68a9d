//! Per-tick motion, collision folding and force application

use super::collision::{Collidable, Movable};
use super::kinematics::{Force, Position};
use super::shape::Collider;
use crate::consts::{EXPLOSION_FORCE_SCALE, GRAVITATIONAL_ACCELERATION};

/// Stateless physics driver. All methods return updated copies.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhysicsEngine;

impl PhysicsEngine {
    pub fn new() -> Self {
        Self
    }

    /// Advance a body by one step, under gravity unless `isolated`
    pub fn move_body<T: Movable>(&self, body: &T, delta_time: f64, isolated: bool) -> T {
        if isolated {
            return body.apply_forces(&[], delta_time);
        }

        let weight = body.weight(GRAVITATIONAL_ACCELERATION);
        body.apply_forces(&[weight], delta_time)
    }

    /// Integrate the given external forces only
    pub fn exert_forces<T: Movable>(&self, body: &T, forces: &[Force], delta_time: f64) -> T {
        body.apply_forces(forces, delta_time)
    }

    /// Fold the body through every obstacle in order
    pub fn handle_collisions<T: Collidable>(
        &self,
        body: T,
        obstacles: &[Collider],
        delta_time: f64,
    ) -> T {
        obstacles
            .iter()
            .fold(body, |body, obstacle| body.on_collision(obstacle, delta_time))
    }

    /// Push the body away from every explosion point with an inverse-square force
    pub fn handle_explosions<T: Movable>(
        &self,
        body: &T,
        explosion_points: &[Position],
        delta_time: f64,
    ) -> T {
        let center = body.center();
        let forces: Vec<Force> = explosion_points
            .iter()
            .map(|point| {
                let distance = center.distance_to(*point);
                if distance <= 0.0 {
                    return Force::ZERO;
                }

                Force::new(center.x - point.x, center.y - point.y)
                    .scale(EXPLOSION_FORCE_SCALE / distance.powi(2))
            })
            .collect();

        self.exert_forces(body, &forces, delta_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::kinematics::Velocity;
    use crate::physics::shape::{CircularFreeBody, CircularStaticBody, RectangularStaticBody};

    const DT: f64 = 1.0 / 60.0;

    fn ball() -> CircularFreeBody {
        CircularFreeBody::new(Position::new(100.0, 100.0), 10.0, 32.0, 1.0)
    }

    #[test]
    fn test_move_under_gravity() {
        let moved = PhysicsEngine::new().move_body(&ball(), DT, false);
        assert!((moved.velocity().vy - GRAVITATIONAL_ACCELERATION * DT).abs() < 1e-9);
        assert!(moved.center().y > 100.0);
        assert_eq!(moved.center().x, 100.0);
    }

    #[test]
    fn test_isolated_move_keeps_velocity() {
        let body = ball();
        let body = body.with_free_body(body.free_body.with_velocity(Velocity::new(60.0, 0.0)));
        let moved = PhysicsEngine::new().move_body(&body, 0.5, true);
        assert_eq!(moved.velocity(), Velocity::new(60.0, 0.0));
        assert_eq!(moved.center(), Position::new(130.0, 100.0));
    }

    #[test]
    fn test_handle_collisions_without_obstacles_is_identity() {
        let body = ball();
        assert_eq!(PhysicsEngine::new().handle_collisions(body, &[], DT), body);
    }

    #[test]
    fn test_handle_collisions_applies_in_order() {
        let body = ball();
        let body = body.with_free_body(body.free_body.with_velocity(Velocity::new(0.0, 100.0)));
        let obstacles = [
            Collider::Circle(CircularStaticBody::new(Position::new(500.0, 500.0), 10.0, 1.0)),
            Collider::Rectangle(RectangularStaticBody::new(
                Position::new(100.0, 150.0),
                400.0,
                40.0,
                1.0,
            )),
        ];
        let resolved = PhysicsEngine::new().handle_collisions(body, &obstacles, DT);
        assert!(resolved.velocity().vy < 0.0);
    }

    #[test]
    fn test_explosion_pushes_away() {
        let engine = PhysicsEngine::new();
        let pushed = engine.handle_explosions(&ball(), &[Position::new(0.0, 100.0)], DT);
        assert!(pushed.velocity().vx > 0.0);
        assert_eq!(pushed.velocity().vy, 0.0);
    }

    #[test]
    fn test_explosion_at_center_is_inert() {
        let engine = PhysicsEngine::new();
        let body = ball();
        let pushed = engine.handle_explosions(&body, &[body.center()], DT);
        assert_eq!(pushed.velocity(), Velocity::ZERO);
    }
}
