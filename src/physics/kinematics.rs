//! Kinematics and force primitives
//!
//! Immutable 2D vectors with distinct types for positions, velocities,
//! accelerations and forces. Screen convention: +y points down.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A point on the board
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Translate by `velocity * delta_time`
    pub fn update(&self, velocity: Velocity, delta_time: f64) -> Self {
        Self::new(
            self.x + velocity.vx * delta_time,
            self.y + velocity.vy * delta_time,
        )
    }

    pub fn distance_to(&self, other: Position) -> f64 {
        self.as_dvec2().distance(other.as_dvec2())
    }

    pub fn translate(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Velocity {
    pub vx: f64,
    pub vy: f64,
}

impl Velocity {
    pub const ZERO: Velocity = Velocity { vx: 0.0, vy: 0.0 };

    pub const fn new(vx: f64, vy: f64) -> Self {
        Self { vx, vy }
    }

    /// Vector from `from` to `to`
    pub fn between(from: Position, to: Position) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.vx, self.vy)
    }

    /// Apply `acceleration * delta_time`
    pub fn update(&self, acceleration: Acceleration, delta_time: f64) -> Self {
        Self::new(
            self.vx + acceleration.ax * delta_time,
            self.vy + acceleration.ay * delta_time,
        )
    }

    pub fn magnitude(&self) -> f64 {
        self.as_dvec2().length()
    }

    /// Unit vector in the same direction (zero stays zero)
    pub fn normalize(&self) -> Self {
        self.as_dvec2().normalize_or_zero().into()
    }

    pub fn scale(&self, scale: f64) -> Self {
        Self::new(self.vx * scale, self.vy * scale)
    }

    pub fn negate(&self) -> Self {
        self.scale(-1.0)
    }

    pub fn dot(&self, other: Velocity) -> f64 {
        self.as_dvec2().dot(other.as_dvec2())
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self::new(v.x, v.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Acceleration {
    pub ax: f64,
    pub ay: f64,
}

impl Acceleration {
    pub const fn new(ax: f64, ay: f64) -> Self {
        Self { ax, ay }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Force {
    pub fx: f64,
    pub fy: f64,
}

impl Force {
    pub const ZERO: Force = Force { fx: 0.0, fy: 0.0 };

    pub const fn new(fx: f64, fy: f64) -> Self {
        Self { fx, fy }
    }

    #[inline]
    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.fx, self.fy)
    }

    pub fn magnitude(&self) -> f64 {
        self.as_dvec2().length()
    }

    pub fn scale(&self, scalar: f64) -> Self {
        Self::new(self.fx * scalar, self.fy * scalar)
    }

    /// Unit vector in the same direction (zero stays zero)
    pub fn normalize(&self) -> Self {
        let v = self.as_dvec2().normalize_or_zero();
        Self::new(v.x, v.y)
    }

    /// Vector sum of all forces
    pub fn resultant(forces: &[Force]) -> Self {
        let sum = forces.iter().map(Force::as_dvec2).sum::<DVec2>();
        Self::new(sum.x, sum.y)
    }

    /// Acceleration produced on a body of `mass`
    pub fn acceleration(&self, mass: f64) -> Acceleration {
        Acceleration::new(self.fx / mass, self.fy / mass)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_update() {
        let p = Position::new(1.0, 2.0).update(Velocity::new(10.0, -4.0), 0.5);
        assert_eq!(p, Position::new(6.0, 0.0));
    }

    #[test]
    fn test_position_distance() {
        let d = Position::new(0.0, 0.0).distance_to(Position::new(3.0, 4.0));
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_velocity_normalize() {
        let v = Velocity::new(3.0, 4.0).normalize();
        assert!((v.vx - 0.6).abs() < 1e-12);
        assert!((v.vy - 0.8).abs() < 1e-12);
        assert_eq!(Velocity::ZERO.normalize(), Velocity::ZERO);
    }

    #[test]
    fn test_velocity_update_and_negate() {
        let v = Velocity::new(1.0, 1.0).update(Acceleration::new(2.0, -4.0), 0.5);
        assert_eq!(v, Velocity::new(2.0, -1.0));
        assert_eq!(v.negate(), Velocity::new(-2.0, 1.0));
    }

    #[test]
    fn test_force_magnitude_and_resultant() {
        assert_eq!(Force::new(3.0, 4.0).magnitude(), 5.0);
        let total = Force::resultant(&[Force::new(1.0, 2.0), Force::new(-3.0, 5.0)]);
        assert_eq!(total, Force::new(-2.0, 7.0));
        assert_eq!(Force::resultant(&[]), Force::ZERO);
        assert_eq!(Force::ZERO.normalize(), Force::ZERO);
    }

    proptest! {
        #[test]
        fn prop_force_scale_multiplies_magnitude(
            fx in -1e4f64..1e4,
            fy in -1e4f64..1e4,
            k in 0f64..100.0,
        ) {
            let f = Force::new(fx, fy);
            let scaled = f.scale(k).magnitude();
            prop_assert!((scaled - f.magnitude() * k).abs() <= 1e-6 * (1.0 + scaled));
        }

        #[test]
        fn prop_normalized_velocity_is_unit(vx in -1e4f64..1e4, vy in -1e4f64..1e4) {
            let v = Velocity::new(vx, vy);
            prop_assume!(v.magnitude() > 1e-6);
            prop_assert!((v.normalize().magnitude() - 1.0).abs() < 1e-9);
        }
    }
}
