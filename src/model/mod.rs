//! Board model
//!
//! Immutable value types describing what is on a board. Game rules live in
//! `game`; these types only know how to place, move and validate objects.

pub mod block;
pub mod board;
pub mod ids;
pub mod level;
pub mod peg;

pub use block::TriangularBlockModel;
pub use board::BoardModel;
pub use ids::{EntityId, IdAllocator};
pub use level::{LevelModel, preloaded_levels};
pub use peg::{PegKind, PegModel};
