//! Shapes: static bodies, free bodies and their overlap predicates
//!
//! Three geometric kinds (circle, axis-aligned rectangle, triangle). Static
//! bodies are plain geometry plus restitution; free bodies wrap a `FreeBody`
//! and can be projected to a static snapshot for overlap tests.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

use super::body::FreeBody;
use super::kinematics::{Position, Velocity};
use crate::consts::CIRCLE_MESH_POINTS;

/// An immovable circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularStaticBody {
    pub center: Position,
    pub radius: f64,
    pub restitution: f64,
}

impl CircularStaticBody {
    pub fn new(center: Position, radius: f64, restitution: f64) -> Self {
        Self {
            center,
            radius,
            restitution,
        }
    }

    #[inline]
    pub fn left_edge(&self) -> f64 {
        self.center.x - self.radius
    }

    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.center.x + self.radius
    }

    #[inline]
    pub fn top_edge(&self) -> f64 {
        self.center.y - self.radius
    }

    #[inline]
    pub fn bottom_edge(&self) -> f64 {
        self.center.y + self.radius
    }

    pub fn overlaps_circle(&self, other: &CircularStaticBody) -> bool {
        self.center.distance_to(other.center) < self.radius + other.radius
    }

    /// Strict bounding-box overlap
    pub fn overlaps_rectangle(&self, rect: &RectangularStaticBody) -> bool {
        self.left_edge() < rect.right_edge()
            && self.right_edge() > rect.left_edge()
            && self.top_edge() < rect.bottom_edge()
            && self.bottom_edge() > rect.top_edge()
    }

    pub fn overlaps_triangle(&self, triangle: &TriangularStaticBody) -> bool {
        self.collision_point_with(triangle).is_some()
    }

    /// First perimeter mesh point lying inside the triangle
    pub fn collision_point_with(&self, triangle: &TriangularStaticBody) -> Option<Position> {
        circle_mesh(self.center, self.radius)
            .into_iter()
            .find(|point| triangle.contains_point(*point))
    }
}

/// Evenly spaced points on a circle's perimeter, starting at angle 0
pub fn circle_mesh(center: Position, radius: f64) -> Vec<Position> {
    (0..CIRCLE_MESH_POINTS)
        .map(|i| {
            let theta = TAU * i as f64 / CIRCLE_MESH_POINTS as f64;
            center.translate(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

/// An immovable axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularStaticBody {
    pub center: Position,
    pub width: f64,
    pub height: f64,
    pub restitution: f64,
}

impl RectangularStaticBody {
    pub fn new(center: Position, width: f64, height: f64, restitution: f64) -> Self {
        Self {
            center,
            width,
            height,
            restitution,
        }
    }

    #[inline]
    pub fn left_edge(&self) -> f64 {
        self.center.x - self.width / 2.0
    }

    #[inline]
    pub fn right_edge(&self) -> f64 {
        self.center.x + self.width / 2.0
    }

    #[inline]
    pub fn top_edge(&self) -> f64 {
        self.center.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom_edge(&self) -> f64 {
        self.center.y + self.height / 2.0
    }

    /// Inclusive bounding-box overlap (touching counts)
    pub fn overlaps_rectangle(&self, other: &RectangularStaticBody) -> bool {
        self.left_edge() <= other.right_edge()
            && self.right_edge() >= other.left_edge()
            && self.top_edge() <= other.bottom_edge()
            && self.bottom_edge() >= other.top_edge()
    }
}

/// An immovable triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularStaticBody {
    pub p1: Position,
    pub p2: Position,
    pub p3: Position,
    pub restitution: f64,
}

impl TriangularStaticBody {
    pub fn new(p1: Position, p2: Position, p3: Position, restitution: f64) -> Self {
        Self {
            p1,
            p2,
            p3,
            restitution,
        }
    }

    pub fn centroid(&self) -> Position {
        triangle_centroid(self.p1, self.p2, self.p3)
    }

    pub fn contains_point(&self, point: Position) -> bool {
        triangle_contains(self.p1, self.p2, self.p3, point)
    }
}

pub fn triangle_centroid(p1: Position, p2: Position, p3: Position) -> Position {
    Position::new((p1.x + p2.x + p3.x) / 3.0, (p1.y + p2.y + p3.y) / 3.0)
}

/// Point-in-triangle by the signs of the barycentric coefficients.
/// Points on an edge and degenerate triangles count as inside.
pub fn triangle_contains(p1: Position, p2: Position, p3: Position, point: Position) -> bool {
    let s = (p1.x - p3.x) * (point.y - p3.y) - (p1.y - p3.y) * (point.x - p3.x);
    let t = (p2.x - p1.x) * (point.y - p1.y) - (p2.y - p1.y) * (point.x - p1.x);

    if (s < 0.0) != (t < 0.0) && s != 0.0 && t != 0.0 {
        return false;
    }

    let d = (p3.x - p2.x) * (point.y - p2.y) - (p3.y - p2.y) * (point.x - p2.x);
    d == 0.0 || (d < 0.0) == (s + t <= 0.0)
}

/// A moving circle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularFreeBody {
    pub free_body: FreeBody,
    pub radius: f64,
    pub restitution: f64,
}

impl CircularFreeBody {
    pub fn new(center: Position, mass: f64, radius: f64, restitution: f64) -> Self {
        Self {
            free_body: FreeBody::at_rest(mass, center),
            radius,
            restitution,
        }
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.free_body.position
    }

    #[inline]
    pub fn velocity(&self) -> Velocity {
        self.free_body.velocity
    }

    pub fn with_free_body(&self, free_body: FreeBody) -> Self {
        Self { free_body, ..*self }
    }

    pub fn with_position(&self, position: Position) -> Self {
        self.with_free_body(self.free_body.with_position(position))
    }

    /// Geometry of this body at its current position
    pub fn as_static(&self) -> CircularStaticBody {
        CircularStaticBody::new(self.center(), self.radius, self.restitution)
    }
}

/// A moving axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularFreeBody {
    pub free_body: FreeBody,
    pub width: f64,
    pub height: f64,
    pub restitution: f64,
}

impl RectangularFreeBody {
    pub fn new(
        center: Position,
        mass: f64,
        width: f64,
        height: f64,
        restitution: f64,
        velocity: Velocity,
    ) -> Self {
        Self {
            free_body: FreeBody::new(mass, center, velocity),
            width,
            height,
            restitution,
        }
    }

    #[inline]
    pub fn center(&self) -> Position {
        self.free_body.position
    }

    pub fn with_free_body(&self, free_body: FreeBody) -> Self {
        Self { free_body, ..*self }
    }

    pub fn with_position(&self, position: Position) -> Self {
        self.with_free_body(self.free_body.with_position(position))
    }

    pub fn as_static(&self) -> RectangularStaticBody {
        RectangularStaticBody::new(self.center(), self.width, self.height, self.restitution)
    }
}

/// Obstacle geometry a moving body can be resolved against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Collider {
    Circle(CircularStaticBody),
    Rectangle(RectangularStaticBody),
    Triangle(TriangularStaticBody),
}

impl From<CircularStaticBody> for Collider {
    fn from(body: CircularStaticBody) -> Self {
        Collider::Circle(body)
    }
}

impl From<RectangularStaticBody> for Collider {
    fn from(body: RectangularStaticBody) -> Self {
        Collider::Rectangle(body)
    }
}

impl From<TriangularStaticBody> for Collider {
    fn from(body: TriangularStaticBody) -> Self {
        Collider::Triangle(body)
    }
}

impl From<&CircularFreeBody> for Collider {
    fn from(body: &CircularFreeBody) -> Self {
        Collider::Circle(body.as_static())
    }
}

impl From<&RectangularFreeBody> for Collider {
    fn from(body: &RectangularFreeBody) -> Self {
        Collider::Rectangle(body.as_static())
    }
}
