mod collision;
mod geometry;
mod world;

pub use collision::{move_actor_x, move_actor_y, move_solid, SolidMoveOutcome, Squish};
pub use geometry::{clamp, overlaps, sign, Aabb, Axis};
pub use world::{Actor, ActorId, SceneWorld, Solid, SolidId};
