//! Result types shared by every shape query.

mod closest;
mod collision_point;
mod intersection;

pub use closest::{ClosestItem, ClosestPoint, ClosestSegment};
pub use collision_point::{CollisionPoint, CollisionPoints};
pub use intersection::{
    faces_away_from_reference, faces_velocity_direction, CollisionSurface, Intersection,
};
