//! Triangular block model

use serde::{Deserialize, Serialize};

use super::ids::EntityId;
use super::peg::PegModel;
use crate::consts::{BLOCK_DEFAULT_VERTEX_DISTANCE, BLOCK_MAX_AREA, BLOCK_RESTITUTION};
use crate::physics::shape::{triangle_centroid, triangle_contains};
use crate::physics::{Position, TriangularStaticBody};

/// An immutable triangle placed on a board
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriangularBlockModel {
    pub id: EntityId,
    pub board_id: Option<EntityId>,
    pub p1: Position,
    pub p2: Position,
    pub p3: Position,
}

impl TriangularBlockModel {
    pub fn new(
        id: EntityId,
        board_id: Option<EntityId>,
        p1: Position,
        p2: Position,
        p3: Position,
    ) -> Self {
        Self {
            id,
            board_id,
            p1,
            p2,
            p3,
        }
    }

    /// Equilateral triangle pointing up, vertices a fixed distance from `centroid`
    pub fn of_default(id: EntityId, board_id: Option<EntityId>, centroid: Position) -> Self {
        let d = BLOCK_DEFAULT_VERTEX_DISTANCE;
        let half_base = 3.0_f64.sqrt() / 2.0 * d;

        Self::new(
            id,
            board_id,
            centroid.translate(0.0, -d),
            centroid.translate(-half_base, 0.5 * d),
            centroid.translate(half_base, 0.5 * d),
        )
    }

    pub fn centroid(&self) -> Position {
        triangle_centroid(self.p1, self.p2, self.p3)
    }

    pub fn area(&self) -> f64 {
        let (a, b, c) = (self.p1, self.p2, self.p3);
        0.5 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)).abs()
    }

    pub fn width(&self) -> f64 {
        let xs = [self.p1.x, self.p2.x, self.p3.x];
        xs.iter().cloned().fold(f64::MIN, f64::max) - xs.iter().cloned().fold(f64::MAX, f64::min)
    }

    pub fn height(&self) -> f64 {
        let ys = [self.p1.y, self.p2.y, self.p3.y];
        ys.iter().cloned().fold(f64::MIN, f64::max) - ys.iter().cloned().fold(f64::MAX, f64::min)
    }

    pub fn left_most_point(&self) -> Position {
        [self.p2, self.p3]
            .into_iter()
            .fold(self.p1, |best, p| if p.x < best.x { p } else { best })
    }

    pub fn top_most_point(&self) -> Position {
        [self.p2, self.p3]
            .into_iter()
            .fold(self.p1, |best, p| if p.y < best.y { p } else { best })
    }

    /// Replace a vertex unless the result would exceed the area cap
    fn with_vertices(&self, p1: Position, p2: Position, p3: Position) -> Self {
        let candidate = Self { p1, p2, p3, ..*self };
        if candidate.area() > BLOCK_MAX_AREA {
            return *self;
        }
        candidate
    }

    pub fn set_first_point(&self, point: Position) -> Self {
        self.with_vertices(point, self.p2, self.p3)
    }

    pub fn set_second_point(&self, point: Position) -> Self {
        self.with_vertices(self.p1, point, self.p3)
    }

    pub fn set_third_point(&self, point: Position) -> Self {
        self.with_vertices(self.p1, self.p2, point)
    }

    /// Same triangle translated so its centroid lands on `centroid`
    pub fn translate_to(&self, centroid: Position) -> Self {
        let current = self.centroid();
        let (dx, dy) = (centroid.x - current.x, centroid.y - current.y);
        Self {
            p1: self.p1.translate(dx, dy),
            p2: self.p2.translate(dx, dy),
            p3: self.p3.translate(dx, dy),
            ..*self
        }
    }

    /// Rotate about the centroid. Non-finite angles leave the block unchanged.
    pub fn rotate(&self, angle: f64) -> Self {
        if !angle.is_finite() {
            return *self;
        }

        let pivot = self.centroid();
        let (sin, cos) = angle.sin_cos();
        let rotate_point = |p: Position| {
            let (x, y) = (p.x - pivot.x, p.y - pivot.y);
            Position::new(x * cos - y * sin + pivot.x, x * sin + y * cos + pivot.y)
        };

        Self {
            p1: rotate_point(self.p1),
            p2: rotate_point(self.p2),
            p3: rotate_point(self.p3),
            ..*self
        }
    }

    pub fn contains_point(&self, point: Position) -> bool {
        triangle_contains(self.p1, self.p2, self.p3, point)
    }

    pub fn will_collide_with_peg(&self, peg: &PegModel) -> bool {
        peg.mesh().into_iter().any(|point| self.contains_point(point))
    }

    /// Overlap if any vertex of either triangle lies inside the other
    pub fn will_collide_with_block(&self, other: &TriangularBlockModel) -> bool {
        let other_inside_self = [other.p1, other.p2, other.p3]
            .into_iter()
            .any(|p| self.contains_point(p));
        let self_inside_other = [self.p1, self.p2, self.p3]
            .into_iter()
            .any(|p| other.contains_point(p));

        other_inside_self || self_inside_other
    }

    pub fn to_static_body(&self) -> TriangularStaticBody {
        TriangularStaticBody::new(self.p1, self.p2, self.p3, BLOCK_RESTITUTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::peg::PegKind;
    use std::f64::consts::PI;

    fn block() -> TriangularBlockModel {
        TriangularBlockModel::new(
            EntityId(1),
            None,
            Position::new(0.0, 0.0),
            Position::new(100.0, 0.0),
            Position::new(0.0, 100.0),
        )
    }

    #[test]
    fn test_area_and_extent() {
        let b = block();
        assert_eq!(b.area(), 5000.0);
        assert_eq!(b.width(), 100.0);
        assert_eq!(b.height(), 100.0);
        assert_eq!(b.left_most_point(), Position::new(0.0, 0.0));
        assert_eq!(b.top_most_point(), Position::new(0.0, 0.0));
    }

    #[test]
    fn test_vertex_edit_rejected_over_area_cap() {
        let b = block();
        // 0.5 * 1000 * 100 = 50,000: accepted
        let ok = b.set_second_point(Position::new(1000.0, 0.0));
        assert_eq!(ok.p2, Position::new(1000.0, 0.0));
        // 0.5 * 4000 * 100 = 200,000: rejected
        let rejected = b.set_second_point(Position::new(4000.0, 0.0));
        assert_eq!(rejected, b);
        let rejected = b.set_third_point(Position::new(0.0, 4000.0));
        assert_eq!(rejected, b);
    }

    #[test]
    fn test_set_first_point() {
        let b = block();
        // 0.5 * |100 * 150| = 7,500: accepted
        let moved = b.set_first_point(Position::new(0.0, -50.0));
        assert_eq!(moved.p1, Position::new(0.0, -50.0));
        assert_eq!(moved.area(), 7500.0);
        // 0.5 * (400,000 + 10,000) = 205,000: rejected
        assert_eq!(b.set_first_point(Position::new(-4000.0, 0.0)), b);
    }

    #[test]
    fn test_default_block_is_centered() {
        let c = Position::new(300.0, 400.0);
        let b = TriangularBlockModel::of_default(EntityId(2), None, c);
        assert!(b.centroid().distance_to(c) < 1e-9);
        assert!((b.p1.distance_to(c) - BLOCK_DEFAULT_VERTEX_DISTANCE).abs() < 1e-9);
        assert!(b.area() < BLOCK_MAX_AREA);
    }

    #[test]
    fn test_translate_and_rotate_keep_centroid() {
        let b = block();
        let moved = b.translate_to(Position::new(500.0, 500.0));
        assert!(moved.centroid().distance_to(Position::new(500.0, 500.0)) < 1e-9);

        let rotated = b.rotate(PI / 3.0);
        assert!(rotated.centroid().distance_to(b.centroid()) < 1e-9);
        assert!((rotated.area() - b.area()).abs() < 1e-6);
        assert_eq!(b.rotate(f64::NAN), b);
    }

    #[test]
    fn test_collision_with_peg_and_block() {
        let b = block();
        let inside = PegModel::of_default(EntityId(3), None, PegKind::Normal, Position::new(20.0, 20.0));
        let far = PegModel::of_default(EntityId(4), None, PegKind::Normal, Position::new(500.0, 500.0));
        assert!(b.will_collide_with_peg(&inside));
        assert!(!b.will_collide_with_peg(&far));

        let overlapping = b.translate_to(Position::new(50.0, 40.0));
        let apart = b.translate_to(Position::new(600.0, 600.0));
        assert!(b.will_collide_with_block(&overlapping));
        assert!(!b.will_collide_with_block(&apart));
    }
}
