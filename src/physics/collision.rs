//! Collision detection and response
//!
//! Every body kind implements `Collidable` by matching on the obstacle's
//! `Collider` variant, so resolution is a (body kind × obstacle kind) table:
//!
//! | body \ obstacle      | circle   | rectangle | triangle |
//! |----------------------|----------|-----------|----------|
//! | circular free        | tangent  | edge push | rewind   |
//! | rectangular free     | -        | edge push | -        |
//! | any static           | -        | -         | -        |
//!
//! `-` means the body is returned unchanged.

use super::body::FreeBody;
use super::kinematics::{Force, Position};
use super::shape::{
    CircularFreeBody, CircularStaticBody, Collider, RectangularFreeBody, RectangularStaticBody,
    TriangularStaticBody,
};
use crate::consts::TRIANGLE_REWIND_STEPS;

/// A body that can be pushed out of an obstacle
pub trait Collidable: Sized {
    /// Resolve a collision against `obstacle`. Returns the body unchanged when
    /// the two do not overlap.
    fn on_collision(&self, obstacle: &Collider, delta_time: f64) -> Self;
}

/// A body that responds to forces
pub trait Movable: Sized {
    fn mass(&self) -> f64;

    fn center(&self) -> Position;

    fn apply_forces(&self, forces: &[Force], delta_time: f64) -> Self;

    fn weight(&self, gravitational_acceleration: f64) -> Force {
        Force::new(0.0, self.mass() * gravitational_acceleration)
    }
}

impl Collidable for CircularStaticBody {
    fn on_collision(&self, _obstacle: &Collider, _delta_time: f64) -> Self {
        *self
    }
}

impl Collidable for RectangularStaticBody {
    fn on_collision(&self, _obstacle: &Collider, _delta_time: f64) -> Self {
        *self
    }
}

impl Collidable for TriangularStaticBody {
    fn on_collision(&self, _obstacle: &Collider, _delta_time: f64) -> Self {
        *self
    }
}

/// Which side of a rectangle a body should be pushed out through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// Side of `rect` whose edge line is nearest to `point`.
/// Ties prefer right, then left, then bottom, then top.
fn nearest_side(point: Position, rect: &RectangularStaticBody) -> Side {
    let left = (point.x - rect.left_edge()).abs();
    let right = (point.x - rect.right_edge()).abs();
    let top = (point.y - rect.top_edge()).abs();
    let bottom = (point.y - rect.bottom_edge()).abs();

    let smallest = left.min(right).min(top).min(bottom);

    if smallest == right {
        Side::Right
    } else if smallest == left {
        Side::Left
    } else if smallest == bottom {
        Side::Bottom
    } else {
        Side::Top
    }
}

/// Closest position outside `rect` for a body with the given half extents
fn push_out_of(
    center: Position,
    half_width: f64,
    half_height: f64,
    rect: &RectangularStaticBody,
) -> Position {
    match nearest_side(center, rect) {
        Side::Right => Position::new(center.x.max(rect.right_edge() + half_width), center.y),
        Side::Left => Position::new(center.x.min(rect.left_edge() - half_width), center.y),
        Side::Bottom => Position::new(center.x, center.y.max(rect.bottom_edge() + half_height)),
        Side::Top => Position::new(center.x, center.y.min(rect.top_edge() - half_height)),
    }
}

/// Impulse target for a body overlapping `rect`: straight up/down when the
/// body sits within the rectangle's horizontal span, sideways otherwise
fn rectangle_contact_point(
    center: Position,
    left_edge: f64,
    right_edge: f64,
    rect: &RectangularStaticBody,
) -> Position {
    let within_span = left_edge >= rect.left_edge() && right_edge <= rect.right_edge();

    if within_span {
        Position::new(center.x, rect.center.y)
    } else {
        Position::new(rect.center.x, center.y)
    }
}

impl CircularFreeBody {
    fn collide_with_circle(&self, circle: &CircularStaticBody, delta_time: f64) -> Self {
        let body = self.as_static();
        if !body.overlaps_circle(circle) {
            return *self;
        }

        // Place the body exactly tangent, on the line from the obstacle's center
        let away = self.center().as_dvec2() - circle.center.as_dvec2();
        let angle = away.y.atan2(away.x);
        let distance = circle.radius + self.radius;
        let safe = circle
            .center
            .translate(distance * angle.cos(), distance * angle.sin());

        let free_body = self
            .free_body
            .with_position(safe)
            .on_collision(circle.center, delta_time, circle.restitution);

        self.with_free_body(free_body)
    }

    fn collide_with_rectangle(&self, rect: &RectangularStaticBody, delta_time: f64) -> Self {
        let body = self.as_static();
        if !body.overlaps_rectangle(rect) {
            return *self;
        }

        let contact = rectangle_contact_point(self.center(), body.left_edge(), body.right_edge(), rect);
        let safe = push_out_of(self.center(), self.radius, self.radius, rect);

        let free_body = self
            .free_body
            .with_position(safe)
            .on_collision(contact, delta_time, self.restitution);

        self.with_free_body(free_body)
    }

    fn collide_with_triangle(&self, triangle: &TriangularStaticBody, delta_time: f64) -> Self {
        let Some(contact) = self.as_static().collision_point_with(triangle) else {
            return *self;
        };

        let safe = self.rewind_out_of(triangle, delta_time);
        let free_body = self
            .free_body
            .with_position(safe)
            .on_collision(contact, delta_time, triangle.restitution);

        self.with_free_body(free_body)
    }

    /// Walk the trajectory backwards in small steps until the body no longer
    /// overlaps the triangle. Falls back to the last rewound sample when the
    /// step budget runs out.
    fn rewind_out_of(&self, triangle: &TriangularStaticBody, delta_time: f64) -> Position {
        let step = -delta_time / TRIANGLE_REWIND_STEPS as f64;
        let mut sample: FreeBody = self.free_body;

        for i in 0..TRIANGLE_REWIND_STEPS {
            if i > 0 {
                sample = sample.drift(step);
            }
            if !self.with_free_body(sample).as_static().overlaps_triangle(triangle) {
                return sample.position;
            }
        }

        sample.position
    }
}

impl Collidable for CircularFreeBody {
    fn on_collision(&self, obstacle: &Collider, delta_time: f64) -> Self {
        match obstacle {
            Collider::Circle(circle) => self.collide_with_circle(circle, delta_time),
            Collider::Rectangle(rect) => self.collide_with_rectangle(rect, delta_time),
            Collider::Triangle(triangle) => self.collide_with_triangle(triangle, delta_time),
        }
    }
}

impl RectangularFreeBody {
    fn collide_with_rectangle(&self, rect: &RectangularStaticBody, delta_time: f64) -> Self {
        let body = self.as_static();
        if !body.overlaps_rectangle(rect) {
            return *self;
        }

        let contact = rectangle_contact_point(self.center(), body.left_edge(), body.right_edge(), rect);
        let safe = push_out_of(self.center(), self.width / 2.0, self.height / 2.0, rect);

        let free_body = self
            .free_body
            .with_position(safe)
            .on_collision(contact, delta_time, self.restitution);

        self.with_free_body(free_body)
    }
}

impl Collidable for RectangularFreeBody {
    fn on_collision(&self, obstacle: &Collider, delta_time: f64) -> Self {
        match obstacle {
            Collider::Rectangle(rect) => self.collide_with_rectangle(rect, delta_time),
            // Circles and triangles do not push the rectangle
            Collider::Circle(_) | Collider::Triangle(_) => *self,
        }
    }
}

impl Movable for CircularFreeBody {
    fn mass(&self) -> f64 {
        self.free_body.mass
    }

    fn center(&self) -> Position {
        self.free_body.position
    }

    fn apply_forces(&self, forces: &[Force], delta_time: f64) -> Self {
        self.with_free_body(self.free_body.apply_forces(forces, delta_time))
    }
}

impl Movable for RectangularFreeBody {
    fn mass(&self) -> f64 {
        self.free_body.mass
    }

    fn center(&self) -> Position {
        self.free_body.position
    }

    fn apply_forces(&self, forces: &[Force], delta_time: f64) -> Self {
        self.with_free_body(self.free_body.apply_forces(forces, delta_time))
    }
}
