//! Errors for broken ownership between objects and their colliders.
//!
//! Geometry queries never fail, they return empty results instead, and
//! lifecycle calls on missing entries return `false`. Only a corrupted
//! object/collider graph is an error, it aborts the current tick.

use thiserror::Error;

use crate::object::{ColliderId, ObjectId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeodeError {
    /// A collider is stored in an object that it does not record as its parent.
    #[error("collider {collider} is held by object {object} but records {recorded:?} as its parent")]
    ColliderParentMismatch {
        object: ObjectId,
        collider: ColliderId,
        recorded: Option<ObjectId>,
    },

    /// A collider still attached to some object was added to another one.
    #[error("collider {collider} already belongs to object {owner}")]
    ColliderAlreadyOwned { collider: ColliderId, owner: ObjectId },

    #[error("object {object} has no collider {collider}")]
    UnknownCollider { object: ObjectId, collider: ColliderId },
}

pub type GeodeResult<T> = Result<T, GeodeError>;
