//! Board model
//!
//! A board is an immutable collection of pegs and triangular blocks. Every
//! edit returns a new board; an edit that would make two objects overlap
//! returns the board unchanged.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::block::TriangularBlockModel;
use super::ids::EntityId;
use super::peg::{PegKind, PegModel};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BoardModel {
    pub id: EntityId,
    pub level_id: Option<EntityId>,
    normal_pegs: BTreeMap<EntityId, PegModel>,
    point_pegs: BTreeMap<EntityId, PegModel>,
    power_up_pegs: BTreeMap<EntityId, PegModel>,
    triangular_blocks: BTreeMap<EntityId, TriangularBlockModel>,
}

impl BoardModel {
    pub fn new(id: EntityId, level_id: Option<EntityId>) -> Self {
        Self {
            id,
            level_id,
            ..Default::default()
        }
    }

    /// Same board attached to another level
    pub fn with_level_id(&self, level_id: Option<EntityId>) -> Self {
        Self {
            level_id,
            ..self.clone()
        }
    }

    pub fn normal_pegs(&self) -> impl Iterator<Item = &PegModel> {
        self.normal_pegs.values()
    }

    pub fn point_pegs(&self) -> impl Iterator<Item = &PegModel> {
        self.point_pegs.values()
    }

    pub fn power_up_pegs(&self) -> impl Iterator<Item = &PegModel> {
        self.power_up_pegs.values()
    }

    pub fn triangular_blocks(&self) -> impl Iterator<Item = &TriangularBlockModel> {
        self.triangular_blocks.values()
    }

    pub fn point_peg_count(&self) -> usize {
        self.point_pegs.len()
    }

    pub fn peg_count(&self) -> usize {
        self.normal_pegs.len() + self.point_pegs.len() + self.power_up_pegs.len()
    }

    /// Every peg on the board, sorted by id
    pub fn all_pegs(&self) -> Vec<PegModel> {
        let mut pegs: Vec<PegModel> = self
            .normal_pegs
            .values()
            .chain(self.point_pegs.values())
            .chain(self.power_up_pegs.values())
            .copied()
            .collect();
        pegs.sort_by_key(|peg| peg.id);
        pegs
    }

    pub fn contains_peg(&self, id: EntityId) -> bool {
        self.normal_pegs.contains_key(&id)
            || self.point_pegs.contains_key(&id)
            || self.power_up_pegs.contains_key(&id)
    }

    pub fn contains_triangular_block(&self, id: EntityId) -> bool {
        self.triangular_blocks.contains_key(&id)
    }

    fn pegs_of_kind_mut(&mut self, kind: PegKind) -> &mut BTreeMap<EntityId, PegModel> {
        match kind {
            PegKind::Normal => &mut self.normal_pegs,
            PegKind::Point => &mut self.point_pegs,
            PegKind::PowerUp => &mut self.power_up_pegs,
        }
    }

    fn peg_fits(&self, peg: &PegModel, ignore_center_of: Option<&PegModel>) -> bool {
        let hits_peg = self.all_pegs().iter().any(|other| {
            if ignore_center_of.is_some_and(|original| original.center == other.center) {
                return false;
            }
            other.will_collide(peg)
        });
        let hits_block = self
            .triangular_blocks
            .values()
            .any(|block| block.will_collide_with_peg(peg));

        !hits_peg && !hits_block
    }

    fn block_fits(
        &self,
        block: &TriangularBlockModel,
        ignore_centroid_of: Option<&TriangularBlockModel>,
    ) -> bool {
        let hits_block = self.triangular_blocks.values().any(|other| {
            if ignore_centroid_of.is_some_and(|original| original.centroid() == other.centroid()) {
                return false;
            }
            other.will_collide_with_block(block)
        });
        let hits_peg = self
            .all_pegs()
            .iter()
            .any(|peg| block.will_collide_with_peg(peg));

        !hits_block && !hits_peg
    }

    /// Add a peg to the map for its kind. Rejected if its id is already on
    /// the board or it overlaps anything.
    pub fn add_peg(&self, peg: PegModel) -> Self {
        if self.contains_peg(peg.id) || !self.peg_fits(&peg, None) {
            return self.clone();
        }

        let mut board = self.clone();
        let peg = PegModel {
            board_id: Some(self.id),
            ..peg
        };
        board.pegs_of_kind_mut(peg.kind).insert(peg.id, peg);
        board
    }

    pub fn remove_peg(&self, peg: &PegModel) -> Self {
        let mut board = self.clone();
        board.normal_pegs.remove(&peg.id);
        board.point_pegs.remove(&peg.id);
        board.power_up_pegs.remove(&peg.id);
        board
    }

    /// Remove every peg for which `predicate` holds
    pub fn remove_pegs(&self, predicate: impl Fn(&PegModel) -> bool) -> Self {
        let mut board = self.clone();
        board.normal_pegs.retain(|_, peg| !predicate(peg));
        board.point_pegs.retain(|_, peg| !predicate(peg));
        board.power_up_pegs.retain(|_, peg| !predicate(peg));
        board
    }

    /// Replace `original` with `moved`. On conflict the board and the original
    /// peg are returned unchanged.
    pub fn move_peg(&self, original: &PegModel, moved: PegModel) -> (Self, PegModel) {
        if !self.contains_peg(original.id) {
            return (self.clone(), *original);
        }

        if !self.peg_fits(&moved, Some(original)) {
            return (self.clone(), *original);
        }

        let moved = PegModel {
            id: original.id,
            board_id: Some(self.id),
            ..moved
        };
        let mut board = self.remove_peg(original);
        board.pegs_of_kind_mut(moved.kind).insert(moved.id, moved);
        (board, moved)
    }

    pub fn rotate_peg(&self, peg: &PegModel, angle: f64) -> (Self, PegModel) {
        self.move_peg(peg, peg.rotate(angle))
    }

    pub fn scale_peg(&self, peg: &PegModel, factor: f64) -> (Self, PegModel) {
        self.move_peg(peg, peg.scale(factor))
    }

    pub fn add_triangular_block(&self, block: TriangularBlockModel) -> Self {
        if self.contains_triangular_block(block.id) || !self.block_fits(&block, None) {
            return self.clone();
        }

        let mut board = self.clone();
        let block = TriangularBlockModel {
            board_id: Some(self.id),
            ..block
        };
        board.triangular_blocks.insert(block.id, block);
        board
    }

    pub fn remove_triangular_block(&self, block: &TriangularBlockModel) -> Self {
        let mut board = self.clone();
        board.triangular_blocks.remove(&block.id);
        board
    }

    pub fn move_triangular_block(
        &self,
        original: &TriangularBlockModel,
        moved: TriangularBlockModel,
    ) -> (Self, TriangularBlockModel) {
        if !self.contains_triangular_block(original.id)
            || !self.block_fits(&moved, Some(original))
        {
            return (self.clone(), *original);
        }

        let moved = TriangularBlockModel {
            id: original.id,
            board_id: Some(self.id),
            ..moved
        };
        let mut board = self.clone();
        board.triangular_blocks.insert(moved.id, moved);
        (board, moved)
    }

    pub fn rotate_triangular_block(
        &self,
        block: &TriangularBlockModel,
        angle: f64,
    ) -> (Self, TriangularBlockModel) {
        if !angle.is_finite() {
            return (self.clone(), *block);
        }
        self.move_triangular_block(block, block.rotate(angle))
    }

    /// Empty board with the same ids
    pub fn reset(&self) -> Self {
        Self::new(self.id, self.level_id)
    }

    /// Same ids and blocks, with every peg re-added one at a time
    pub fn rebuilt(&self) -> Self {
        let empty = Self {
            normal_pegs: BTreeMap::new(),
            point_pegs: BTreeMap::new(),
            power_up_pegs: BTreeMap::new(),
            ..self.clone()
        };
        self.all_pegs()
            .into_iter()
            .fold(empty, |board, peg| board.add_peg(peg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Position;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn board() -> BoardModel {
        BoardModel::new(EntityId(100), None)
    }

    fn peg(id: u64, kind: PegKind, x: f64, y: f64) -> PegModel {
        PegModel::of_default(EntityId(id), None, kind, Position::new(x, y))
    }

    #[test]
    fn test_add_routes_by_kind() {
        let b = board()
            .add_peg(peg(1, PegKind::Normal, 0.0, 0.0))
            .add_peg(peg(2, PegKind::Point, 200.0, 0.0))
            .add_peg(peg(3, PegKind::PowerUp, 400.0, 0.0));
        assert_eq!(b.normal_pegs().count(), 1);
        assert_eq!(b.point_pegs().count(), 1);
        assert_eq!(b.power_up_pegs().count(), 1);
        assert!(b.all_pegs().iter().all(|p| p.board_id == Some(EntityId(100))));
    }

    #[test]
    fn test_overlapping_peg_is_rejected() {
        let b = board().add_peg(peg(1, PegKind::Normal, 0.0, 0.0));
        let rejected = b.add_peg(peg(2, PegKind::Point, 50.0, 0.0));
        assert_eq!(rejected, b);
    }

    #[test]
    fn test_peg_inside_block_is_rejected() {
        let block = TriangularBlockModel::of_default(EntityId(9), None, Position::new(500.0, 500.0));
        let b = board().add_triangular_block(block);
        assert_eq!(b.triangular_blocks().count(), 1);
        let rejected = b.add_peg(peg(1, PegKind::Normal, 500.0, 500.0));
        assert_eq!(rejected.peg_count(), 0);
    }

    #[test]
    fn test_move_peg() {
        let a = peg(1, PegKind::Normal, 0.0, 0.0);
        let b = board().add_peg(a).add_peg(peg(2, PegKind::Normal, 300.0, 0.0));
        let a = b.all_pegs()[0];

        let (moved_board, moved) = b.move_peg(&a, a.set_center(Position::new(0.0, 200.0)));
        assert_eq!(moved.center, Position::new(0.0, 200.0));
        assert_eq!(moved_board.peg_count(), 2);

        let (same_board, same) = b.move_peg(&a, a.set_center(Position::new(290.0, 0.0)));
        assert_eq!(same_board, b);
        assert_eq!(same, a);

        // Moving onto its own footprint is fine
        let (_, nudged) = b.move_peg(&a, a.set_center(Position::new(5.0, 0.0)));
        assert_eq!(nudged.center, Position::new(5.0, 0.0));
    }

    #[test]
    fn test_scale_and_rotate_peg() {
        let b = board()
            .add_peg(peg(1, PegKind::Normal, 0.0, 0.0))
            .add_peg(peg(2, PegKind::Normal, 110.0, 0.0));
        let a = b.all_pegs()[0];
        let (_, grown) = b.scale_peg(&a, 2.0);
        assert_eq!(grown, a);
        let (_, grown) = b.scale_peg(&a, 1.2);
        assert_eq!(grown.radius, 48.0);
        let (rotated_board, _) = b.rotate_peg(&a, f64::NAN);
        assert_eq!(rotated_board, b);
    }

    #[test]
    fn test_blocks_cannot_overlap() {
        let first = TriangularBlockModel::of_default(EntityId(1), None, Position::new(0.0, 0.0));
        let second = TriangularBlockModel::of_default(EntityId(2), None, Position::new(20.0, 10.0));
        let far = TriangularBlockModel::of_default(EntityId(3), None, Position::new(800.0, 0.0));
        let b = board().add_triangular_block(first);
        assert_eq!(b.add_triangular_block(second), b);
        assert_eq!(b.add_triangular_block(far).triangular_blocks().count(), 2);

        let (moved_board, moved) =
            b.move_triangular_block(&first, first.translate_to(Position::new(10.0, 0.0)));
        assert_eq!(moved_board.triangular_blocks().count(), 1);
        assert!(moved.centroid().distance_to(Position::new(10.0, 0.0)) < 1e-9);

        let removed = b.remove_triangular_block(&first);
        assert_eq!(removed.triangular_blocks().count(), 0);
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let b = board().add_peg(peg(5, PegKind::Normal, 0.0, 0.0));

        // Free spot, different kind: the id must not land in a second map
        let other_kind = b.add_peg(peg(5, PegKind::Point, 500.0, 0.0));
        assert_eq!(other_kind, b);
        assert_eq!(other_kind.peg_count(), 1);

        // Free spot, same kind: the original stays where it was
        let same_kind = b.add_peg(peg(5, PegKind::Normal, 500.0, 0.0));
        assert_eq!(same_kind, b);
        assert_eq!(same_kind.all_pegs()[0].center, Position::new(0.0, 0.0));

        let block = TriangularBlockModel::of_default(EntityId(9), None, Position::new(0.0, 500.0));
        let with_block = b.add_triangular_block(block);
        let again = TriangularBlockModel::of_default(EntityId(9), None, Position::new(600.0, 500.0));
        assert_eq!(with_block.add_triangular_block(again), with_block);
    }

    #[test]
    fn test_removing_absent_objects_is_a_no_op() {
        let block = TriangularBlockModel::of_default(EntityId(9), None, Position::new(0.0, 500.0));
        let b = board()
            .add_peg(peg(1, PegKind::Normal, 0.0, 0.0))
            .add_triangular_block(block);

        assert_eq!(b.remove_peg(&peg(2, PegKind::Normal, 0.0, 0.0)), b);
        let stranger = TriangularBlockModel::of_default(EntityId(10), None, Position::new(0.0, 500.0));
        assert_eq!(b.remove_triangular_block(&stranger), b);
    }

    #[test]
    fn test_move_triangular_block_conflicts() {
        let b = board()
            .add_triangular_block(TriangularBlockModel::of_default(
                EntityId(1),
                None,
                Position::new(0.0, 0.0),
            ))
            .add_triangular_block(TriangularBlockModel::of_default(
                EntityId(2),
                None,
                Position::new(800.0, 0.0),
            ))
            .add_peg(peg(3, PegKind::Normal, 400.0, 0.0));
        let first = *b.triangular_blocks().next().unwrap();
        assert_eq!(first.id, EntityId(1));

        let (same_board, same) =
            b.move_triangular_block(&first, first.translate_to(Position::new(780.0, 0.0)));
        assert_eq!(same_board, b);
        assert_eq!(same, first);

        let (same_board, same) =
            b.move_triangular_block(&first, first.translate_to(Position::new(400.0, 0.0)));
        assert_eq!(same_board, b);
        assert_eq!(same, first);

        let stranger = TriangularBlockModel::of_default(EntityId(7), None, Position::new(400.0, 600.0));
        let (same_board, same) =
            b.move_triangular_block(&stranger, stranger.translate_to(Position::new(400.0, 700.0)));
        assert_eq!(same_board, b);
        assert_eq!(same, stranger);
    }

    #[test]
    fn test_rotate_triangular_block() {
        let b = board().add_triangular_block(TriangularBlockModel::of_default(
            EntityId(1),
            None,
            Position::new(300.0, 300.0),
        ));
        let block = *b.triangular_blocks().next().unwrap();

        let (rotated_board, rotated) = b.rotate_triangular_block(&block, PI / 3.0);
        assert_ne!(rotated.p1, block.p1);
        assert!(rotated.centroid().distance_to(block.centroid()) < 1e-9);
        assert_eq!(rotated_board.triangular_blocks().next(), Some(&rotated));
        assert_eq!(rotated_board.triangular_blocks().count(), 1);

        let (same_board, same) = b.rotate_triangular_block(&block, f64::NAN);
        assert_eq!(same_board, b);
        assert_eq!(same, block);
        let (same_board, _) = b.rotate_triangular_block(&block, f64::INFINITY);
        assert_eq!(same_board, b);
    }

    #[test]
    fn test_with_level_id() {
        let b = board().add_peg(peg(1, PegKind::Point, 0.0, 0.0));
        let attached = b.with_level_id(Some(EntityId(42)));
        assert_eq!(attached.level_id, Some(EntityId(42)));
        assert_eq!(attached.id, b.id);
        assert_eq!(attached.all_pegs(), b.all_pegs());
    }

    #[test]
    fn test_remove_pegs_by_predicate_and_reset() {
        let b = board()
            .add_peg(peg(1, PegKind::Normal, 0.0, 0.0))
            .add_peg(peg(2, PegKind::Point, 200.0, 0.0))
            .add_peg(peg(3, PegKind::Point, 400.0, 0.0));
        let cleared = b.remove_pegs(|p| p.is_point());
        assert_eq!(cleared.point_peg_count(), 0);
        assert_eq!(cleared.peg_count(), 1);

        let reset = b.reset();
        assert_eq!(reset.peg_count(), 0);
        assert_eq!(reset.id, b.id);
    }

    #[test]
    fn test_rebuilt_keeps_contents() {
        let b = board()
            .add_peg(peg(1, PegKind::Normal, 0.0, 0.0))
            .add_peg(peg(2, PegKind::PowerUp, 200.0, 0.0));
        assert_eq!(b.rebuilt(), b);
    }

    proptest! {
        #[test]
        fn prop_add_then_remove_restores(ids in proptest::collection::btree_set(0u64..1_000, 1..12)) {
            // Spread pegs on a grid so none overlap
            let mut b = board();
            for (slot, id) in ids.iter().enumerate() {
                let x = (slot % 4) as f64 * 200.0;
                let y = (slot / 4) as f64 * 200.0;
                b = b.add_peg(peg(*id, PegKind::Normal, x, y));
            }
            prop_assert_eq!(b.peg_count(), ids.len());

            let sorted: Vec<EntityId> = b.all_pegs().iter().map(|p| p.id).collect();
            let mut expected = sorted.clone();
            expected.sort();
            prop_assert_eq!(&sorted, &expected);

            let emptied = b.all_pegs().iter().fold(b.clone(), |acc, p| acc.remove_peg(p));
            prop_assert_eq!(emptied, board());
        }

        #[test]
        fn prop_overlapping_add_is_rejected(dx in -79.0f64..79.0, dy in -79.0f64..79.0) {
            prop_assume!((dx * dx + dy * dy).sqrt() < 79.0);
            let b = board().add_peg(peg(1, PegKind::Normal, 0.0, 0.0));
            prop_assert_eq!(b.add_peg(peg(2, PegKind::Normal, dx, dy)), b);
        }
    }
}
