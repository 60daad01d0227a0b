use std::borrow::Cow;

use geode_macro_tools::Fields;
use log::trace;

use crate::{
    math::transform::Transform,
    object::{id::COLLIDER_IDS, ColliderId, ObjectId},
    query::CollisionPoints,
    shape::{BoundingBox, BoundingCircle, GeometryTransformer, Rect, Shape},
};

use super::layer::{Layer, LayerMask};

/// One shape taking part in collisions, owned by at most one
/// [`CollisionObject`](super::CollisionObject).
///
/// The shape is kept in local space, `world_shape` follows the parent
/// transform combined with `offset` and is refreshed by
/// [`Collider::sync_transform`].
#[derive(Debug, Fields)]
#[r]
pub struct Collider {
    id: ColliderId,
    #[r(copy)]
    parent: Option<ObjectId>,
    #[r(copy)]
    offset: Transform,
    local_shape: Shape,
    world_shape: Shape,
    #[r(skip)]
    parent_transform: Transform,
    #[w(set)]
    enabled: bool,
    #[w(set)]
    compute_collision: bool,
    #[w(set)]
    compute_intersections: bool,
    #[w(set)]
    simplify_collision: bool,
    #[w(set)]
    collision_layer: Layer,
    #[r(copy)]
    #[w(set)]
    collision_mask: LayerMask,
}

impl Collider {
    pub fn new(shape: impl Into<Shape>) -> Self {
        let shape: Shape = shape.into();
        Self {
            id: COLLIDER_IDS.gen_id(),
            parent: None,
            offset: Transform::IDENTITY,
            world_shape: shape.clone(),
            local_shape: shape,
            parent_transform: Transform::IDENTITY,
            enabled: true,
            compute_collision: true,
            compute_intersections: false,
            simplify_collision: false,
            collision_layer: 0,
            collision_mask: LayerMask::empty(),
        }
    }

    pub fn with_offset(mut self, offset: impl Into<Transform>) -> Self {
        self.set_offset(offset);
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.collision_layer = layer;
        self
    }

    pub fn with_mask(mut self, mask: impl Into<LayerMask>) -> Self {
        self.collision_mask = mask.into();
        self
    }

    pub fn with_intersections(mut self, compute_intersections: bool) -> Self {
        self.compute_intersections = compute_intersections;
        self
    }

    pub fn with_simplified_collision(mut self, simplify_collision: bool) -> Self {
        self.simplify_collision = simplify_collision;
        self
    }

    pub fn set_offset(&mut self, offset: impl Into<Transform>) -> &mut Self {
        self.offset = offset.into();
        self.refresh_world_shape();
        self
    }

    pub fn set_local_shape(&mut self, shape: impl Into<Shape>) -> &mut Self {
        self.local_shape = shape.into();
        self.refresh_world_shape();
        self
    }

    /// place the collider relative to its parent's transform
    pub fn sync_transform(&mut self, parent: &Transform) {
        self.parent_transform = *parent;
        self.refresh_world_shape();
    }

    fn refresh_world_shape(&mut self) {
        let transform = self.offset.combine(&self.parent_transform);
        self.world_shape = if transform.is_identity() {
            self.local_shape.clone()
        } else {
            self.local_shape.transform_by(&transform)
        };
    }

    pub(crate) fn attach(&mut self, parent: ObjectId) {
        trace!("collider {} attached to object {}", self.id, parent);
        self.parent = Some(parent);
    }

    pub(crate) fn detach(&mut self) {
        if let Some(parent) = self.parent.take() {
            trace!("collider {} detached from object {}", self.id, parent);
        }
    }

    /// enabled and computing collisions
    pub fn is_active(&self) -> bool {
        self.enabled && self.compute_collision
    }

    /// the world shape, or its bounding circle when collision is simplified
    pub fn collision_shape(&self) -> Cow<'_, Shape> {
        if self.simplify_collision {
            Cow::Owned(self.world_shape.bounding_circle().into())
        } else {
            Cow::Borrowed(&self.world_shape)
        }
    }

    pub fn bounding_box(&self) -> Rect {
        self.collision_shape().bounding_box()
    }

    /// both colliders active and `other` sits on a layer this collider's mask accepts
    pub fn can_collide_with(&self, other: &Collider) -> bool {
        self.is_active() && other.is_active() && self.collision_mask.matches_layer(other.collision_layer)
    }

    pub fn overlap(&self, other: &Collider) -> bool {
        self.collision_shape()
            .overlap_shape(&other.collision_shape())
    }

    /// crossing points, normals belong to `other`
    pub fn intersect(&self, other: &Collider) -> Option<CollisionPoints> {
        self.collision_shape()
            .intersect_shape(&other.collision_shape())
    }

    pub fn overlap_shape(&self, shape: &Shape) -> bool {
        self.collision_shape().overlap_shape(shape)
    }

    pub fn intersect_shape(&self, shape: &Shape) -> Option<CollisionPoints> {
        self.collision_shape().intersect_shape(shape)
    }
}
