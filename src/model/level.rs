//! Levels and the built-in level set

use serde::{Deserialize, Serialize};

use super::block::TriangularBlockModel;
use super::board::BoardModel;
use super::ids::{EntityId, IdAllocator};
use super::peg::{PegKind, PegModel};
use crate::physics::Position;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelModel {
    pub id: EntityId,
    pub name: String,
    pub board: BoardModel,
}

impl LevelModel {
    /// Level with an empty board attached to it
    pub fn new(id: EntityId, board_id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            board: BoardModel::new(board_id, Some(id)),
        }
    }

    pub fn set_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    pub fn set_board(&self, board: BoardModel) -> Self {
        Self {
            board: board.with_level_id(Some(self.id)),
            ..self.clone()
        }
    }
}

/// Layout in unit coordinates, scaled to the play area when loaded
struct LevelLayout {
    name: &'static str,
    normal: [(f64, f64); 4],
    point: (f64, f64),
    power_up: (f64, f64),
    block: (f64, f64),
}

const LAYOUTS: [LevelLayout; 3] = [
    LevelLayout {
        name: "Alpha",
        normal: [(0.1, 0.1), (0.9, 0.1), (0.1, 0.9), (0.9, 0.9)],
        point: (0.5, 0.5),
        power_up: (0.5, 0.1),
        block: (0.5, 0.8),
    },
    LevelLayout {
        name: "Beta",
        normal: [(0.2, 0.2), (0.8, 0.2), (0.2, 0.8), (0.8, 0.8)],
        point: (0.5, 0.5),
        power_up: (0.5, 0.2),
        block: (0.5, 0.7),
    },
    LevelLayout {
        name: "Charlie",
        normal: [(0.3, 0.3), (0.7, 0.3), (0.3, 0.7), (0.7, 0.7)],
        point: (0.5, 0.5),
        power_up: (0.5, 0.3),
        block: (0.3, 0.5),
    },
];

/// The built-in levels laid out for a `width` x `height` play area.
///
/// Objects that would overlap on a small play area are dropped by the board's
/// collision checks.
pub fn preloaded_levels(width: f64, height: f64, ids: &mut IdAllocator) -> Vec<LevelModel> {
    let at = |(x, y): (f64, f64)| Position::new(x * width, y * height);

    LAYOUTS
        .iter()
        .map(|layout| {
            let level = LevelModel::new(ids.next_id(), ids.next_id(), layout.name);
            let board_id = Some(level.board.id);

            let pegs = layout
                .normal
                .iter()
                .map(|&p| (PegKind::Normal, p))
                .chain([
                    (PegKind::Point, layout.point),
                    (PegKind::PowerUp, layout.power_up),
                ])
                .map(|(kind, p)| PegModel::of_default(ids.next_id(), board_id, kind, at(p)))
                .collect::<Vec<_>>();

            let block = TriangularBlockModel::of_default(ids.next_id(), board_id, at(layout.block));
            let board = pegs
                .into_iter()
                .fold(level.board.clone(), |board, peg| board.add_peg(peg))
                .add_triangular_block(block);

            level.set_board(board)
        })
        .collect()
}
