//! Colliders, collidable objects and the broad phase that pairs them up.

mod collider;
mod event;
mod handler;
mod layer;
mod object;

pub use collider::Collider;
pub use event::{ColliderContact, CollisionEvent, CollisionInfo};
pub use handler::{CollisionBody, CollisionHandler, SweepAndPrune};
pub use layer::{matches_layer, Layer, LayerMask};
pub use object::CollisionObject;
