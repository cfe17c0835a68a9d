//! Point-mass mechanics

use serde::{Deserialize, Serialize};

use super::kinematics::{Force, Position, Velocity};

/// A point mass with position and velocity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FreeBody {
    pub mass: f64,
    pub position: Position,
    pub velocity: Velocity,
}

impl FreeBody {
    pub fn new(mass: f64, position: Position, velocity: Velocity) -> Self {
        Self {
            mass,
            position,
            velocity,
        }
    }

    pub fn at_rest(mass: f64, position: Position) -> Self {
        Self::new(mass, position, Velocity::ZERO)
    }

    pub fn with_position(&self, position: Position) -> Self {
        Self { position, ..*self }
    }

    pub fn with_velocity(&self, velocity: Velocity) -> Self {
        Self { velocity, ..*self }
    }

    /// Translate by the current velocity without applying any force
    pub fn drift(&self, delta_time: f64) -> Self {
        self.with_position(self.position.update(self.velocity, delta_time))
    }

    /// Semi-implicit Euler step: velocity first, then position with the new velocity.
    /// Bodies without positive mass are immovable.
    pub fn apply_forces(&self, forces: &[Force], delta_time: f64) -> Self {
        if self.mass <= 0.0 {
            return *self;
        }

        let acceleration = Force::resultant(forces).acceleration(self.mass);
        let velocity = self.velocity.update(acceleration, delta_time);
        let position = self.position.update(velocity, delta_time);

        Self::new(self.mass, position, velocity)
    }

    /// Resolve a collision at `point` as an impulse spread over one step
    pub fn on_collision(&self, point: Position, delta_time: f64, restitution: f64) -> Self {
        let force = self.collision_force(point, delta_time, restitution);
        self.apply_forces(&[force], delta_time)
    }

    /// Force that cancels (and reflects by `restitution`) the velocity component
    /// pointing at the collision point
    fn collision_force(&self, point: Position, delta_time: f64, restitution: f64) -> Force {
        if delta_time <= 0.0 {
            return Force::ZERO;
        }

        let normal = Velocity::between(self.position, point).normalize();
        let normal_velocity = normal.scale(normal.dot(self.velocity));

        Force::new(normal_velocity.vx, normal_velocity.vy)
            .scale(-(1.0 + restitution) * self.mass / delta_time)
    }
}
