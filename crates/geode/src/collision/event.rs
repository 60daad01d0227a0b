use geode_macro_tools::Fields;

use crate::{
    object::{ColliderId, ObjectId},
    query::Intersection,
};

/// One pair of colliders found touching during a resolve.
#[derive(Clone, Debug, PartialEq, Fields)]
#[r]
pub struct ColliderContact {
    collider: ColliderId,
    other_collider: ColliderId,
    /// present when the collider computes intersections and the outlines cross
    intersection: Option<Intersection>,
}

impl ColliderContact {
    pub fn new(
        collider: ColliderId,
        other_collider: ColliderId,
        intersection: Option<Intersection>,
    ) -> Self {
        Self {
            collider,
            other_collider,
            intersection,
        }
    }

    pub fn has_valid_intersection(&self) -> bool {
        self.intersection
            .as_ref()
            .map_or(false, |intersection| intersection.is_valid())
    }
}

/// Everything `object` touched of `other` this tick.
#[derive(Clone, Debug, PartialEq, Fields)]
#[r]
pub struct CollisionInfo {
    object: ObjectId,
    other: ObjectId,
    contacts: Vec<ColliderContact>,
}

impl CollisionInfo {
    pub fn new(object: ObjectId, other: ObjectId, contacts: Vec<ColliderContact>) -> Self {
        Self {
            object,
            other,
            contacts,
        }
    }
}

/// Notifications produced by a collision handler, always addressed to
/// `object`, see [`CollisionEvent::object`].
#[derive(Clone, Debug, PartialEq)]
pub enum CollisionEvent {
    /// coarse per object pair event, sent on every tick the pair touches
    Collision(CollisionInfo),
    ColliderIntersected {
        object: ObjectId,
        collider: ColliderId,
        other: ObjectId,
        other_collider: ColliderId,
        intersection: Intersection,
    },
    ColliderOverlapped {
        object: ObjectId,
        collider: ColliderId,
        other: ObjectId,
        other_collider: ColliderId,
        first_contact: bool,
    },
    CollisionEnded {
        object: ObjectId,
        other: ObjectId,
    },
    ColliderContactEnded {
        object: ObjectId,
        collider: ColliderId,
        other: ObjectId,
        other_collider: ColliderId,
    },
}

impl CollisionEvent {
    /// the object the event is addressed to
    pub fn object(&self) -> ObjectId {
        match self {
            CollisionEvent::Collision(info) => info.object,
            CollisionEvent::ColliderIntersected { object, .. }
            | CollisionEvent::ColliderOverlapped { object, .. }
            | CollisionEvent::CollisionEnded { object, .. }
            | CollisionEvent::ColliderContactEnded { object, .. } => *object,
        }
    }

    pub fn other(&self) -> ObjectId {
        match self {
            CollisionEvent::Collision(info) => info.other,
            CollisionEvent::ColliderIntersected { other, .. }
            | CollisionEvent::ColliderOverlapped { other, .. }
            | CollisionEvent::CollisionEnded { other, .. }
            | CollisionEvent::ColliderContactEnded { other, .. } => *other,
        }
    }

    pub fn is_ended(&self) -> bool {
        matches!(
            self,
            CollisionEvent::CollisionEnded { .. } | CollisionEvent::ColliderContactEnded { .. }
        )
    }
}
