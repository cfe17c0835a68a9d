//! Physics module
//!
//! Pure value-type mechanics. Nothing here knows about pegs, balls or game
//! rules:
//! - Kinematics primitives and point-mass integration
//! - Static and free shapes with overlap predicates
//! - Collision resolution dispatched over (body kind × obstacle kind)

pub mod body;
pub mod collision;
pub mod engine;
pub mod kinematics;
pub mod shape;

pub use body::FreeBody;
pub use collision::{Collidable, Movable};
pub use engine::PhysicsEngine;
pub use kinematics::{Acceleration, Force, Position, Velocity};
pub use shape::{
    CircularFreeBody, CircularStaticBody, Collider, RectangularFreeBody, RectangularStaticBody,
    TriangularStaticBody,
};
