use geode_macro_tools::Fields;
use log::{debug, error};

use crate::{
    errors::{GeodeError, GeodeResult},
    math::{point::Point, transform::Transform, vector::Vector},
    object::{id::OBJECT_IDS, ColliderId, ObjectId},
    query::{CollisionPoints, Intersection},
    shape::{Circle, Polygon, Polyline, Rect, Segment, Shape, Triangle},
};

use super::{
    collider::Collider,
    event::{ColliderContact, CollisionEvent, CollisionInfo},
};

/// A set of colliders moving together, the collidable part of a game object.
///
/// Every stored collider records this object as its parent, colliders move
/// between objects only through [`CollisionObject::transfer_collider`].
#[derive(Debug, Fields)]
#[r]
pub struct CollisionObject {
    id: ObjectId,
    #[r(skip)]
    colliders: Vec<Collider>,
    #[r(copy)]
    transform: Transform,
    /// a passive object sees contacts from the other object's side
    #[w(set)]
    passive: bool,
    /// also send per collider events
    #[w(set)]
    advanced_notification: bool,
    #[w(set)]
    enabled: bool,
}

impl Default for CollisionObject {
    fn default() -> Self {
        Self::new()
    }
}

macro_rules! impl_shape_queries {
    ($(($overlap:ident, $intersect:ident, $shape:ty)),* $(,)?) => {
        impl CollisionObject {
            $(
                pub fn $overlap(&self, shape: &$shape) -> bool {
                    self.overlap_shape(&Shape::from(shape))
                }

                pub fn $intersect(&self, shape: &$shape) -> Option<CollisionPoints> {
                    self.intersect_shape(&Shape::from(shape))
                }
            )*
        }
    };
}

impl_shape_queries!(
    (overlap_segment, intersect_segment, Segment),
    (overlap_circle, intersect_circle, Circle),
    (overlap_triangle, intersect_triangle, Triangle),
    (overlap_rect, intersect_rect, Rect),
    (overlap_polygon, intersect_polygon, Polygon),
    (overlap_polyline, intersect_polyline, Polyline),
);

impl CollisionObject {
    pub fn new() -> Self {
        Self::with_id(OBJECT_IDS.gen_id())
    }

    pub(crate) fn with_id(id: ObjectId) -> Self {
        Self {
            id,
            colliders: Vec::new(),
            transform: Transform::IDENTITY,
            passive: false,
            advanced_notification: false,
            enabled: true,
        }
    }

    /// take over `id`, colliders follow
    pub(crate) fn rebind_id(&mut self, id: ObjectId) {
        debug!("collision object {} rebound to id {}", self.id, id);
        self.id = id;
        for collider in self.colliders.iter_mut() {
            collider.attach(id);
        }
    }

    /// add a collider that has no parent yet
    pub fn add_collider(&mut self, mut collider: Collider) -> GeodeResult<ColliderId> {
        if let Some(owner) = collider.parent() {
            error!(
                "collider {} added to object {} while owned by {}",
                collider.id(),
                self.id,
                owner
            );
            return Err(GeodeError::ColliderAlreadyOwned {
                collider: collider.id(),
                owner,
            });
        }

        let id = collider.id();
        collider.attach(self.id);
        collider.sync_transform(&self.transform);
        self.colliders.push(collider);
        Ok(id)
    }

    pub fn with_collider(mut self, collider: Collider) -> GeodeResult<Self> {
        self.add_collider(collider)?;
        Ok(self)
    }

    /// detach and hand back the collider, None when it is not stored here
    pub fn remove_collider(&mut self, id: ColliderId) -> Option<Collider> {
        let index = self.colliders.iter().position(|c| c.id() == id)?;
        let mut collider = self.colliders.remove(index);
        collider.detach();
        Some(collider)
    }

    /// move a collider to `target`, it is detached from self first
    pub fn transfer_collider(
        &mut self,
        id: ColliderId,
        target: &mut CollisionObject,
    ) -> GeodeResult<ColliderId> {
        let collider = self
            .remove_collider(id)
            .ok_or(GeodeError::UnknownCollider {
                object: self.id,
                collider: id,
            })?;
        target.add_collider(collider)
    }

    pub fn collider(&self, id: ColliderId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.id() == id)
    }

    pub fn collider_mut(&mut self, id: ColliderId) -> Option<&mut Collider> {
        self.colliders.iter_mut().find(|c| c.id() == id)
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn colliders_mut(&mut self) -> &mut [Collider] {
        &mut self.colliders
    }

    pub fn active_colliders(&self) -> impl Iterator<Item = &Collider> {
        let enabled = self.enabled;
        self.colliders.iter().filter(move |c| enabled && c.is_active())
    }

    pub fn has_active_colliders(&self) -> bool {
        self.active_colliders().next().is_some()
    }

    /// every stored collider must record self as its parent
    pub fn check_consistency(&self) -> GeodeResult<()> {
        match self.colliders.iter().find(|c| c.parent() != Some(self.id)) {
            Some(collider) => {
                error!(
                    "object {} holds collider {} whose parent is {:?}",
                    self.id,
                    collider.id(),
                    collider.parent()
                );
                Err(GeodeError::ColliderParentMismatch {
                    object: self.id,
                    collider: collider.id(),
                    recorded: collider.parent(),
                })
            }
            None => Ok(()),
        }
    }

    pub fn sync_transform(&mut self, transform: &Transform) {
        self.transform = *transform;
        for collider in self.colliders.iter_mut() {
            collider.sync_transform(transform);
        }
    }

    /// union of the active colliders' boxes
    pub fn bounding_box(&self) -> Option<Rect> {
        self.active_colliders()
            .map(|c| c.bounding_box())
            .reduce(|a, b| a.union(&b))
    }

    pub fn overlap_shape(&self, shape: &Shape) -> bool {
        self.active_colliders().any(|c| c.overlap_shape(shape))
    }

    /// None without active colliders or crossings, normals belong to `shape`
    pub fn intersect_shape(&self, shape: &Shape) -> Option<CollisionPoints> {
        self.active_colliders()
            .filter_map(|c| c.intersect_shape(shape))
            .flatten()
            .collect::<CollisionPoints>()
            .into_option()
    }

    pub fn overlap_collider(&self, other: &Collider) -> bool {
        other.is_active() && self.active_colliders().any(|c| c.overlap(other))
    }

    pub fn intersect_collider(&self, other: &Collider) -> Option<CollisionPoints> {
        if !other.is_active() {
            return None;
        }
        self.active_colliders()
            .filter_map(|c| c.intersect(other))
            .flatten()
            .collect::<CollisionPoints>()
            .into_option()
    }

    pub fn overlap_object(&self, other: &CollisionObject) -> bool {
        other
            .active_colliders()
            .any(|collider| self.overlap_collider(collider))
    }

    /// crossings with every active collider of `other`
    pub fn intersect_object(&self, other: &CollisionObject) -> Option<CollisionPoints> {
        self.active_colliders()
            .flat_map(|collider| {
                other
                    .active_colliders()
                    .filter_map(move |other_collider| self.contact_points(collider, other, other_collider))
            })
            .flatten()
            .collect::<CollisionPoints>()
            .into_option()
    }

    /// Crossings of `collider` with `other_collider`. Normals belong to the
    /// other collider, unless self is passive and `other` is not: then the
    /// other side runs the query and its normals are reversed.
    fn contact_points(
        &self,
        collider: &Collider,
        other: &CollisionObject,
        other_collider: &Collider,
    ) -> Option<CollisionPoints> {
        if self.passive && !other.passive {
            other_collider.intersect(collider).map(CollisionPoints::flipped)
        } else {
            collider.intersect(other_collider)
        }
    }

    /// Touching collider pairs between self and `other`, filtered by the
    /// collider flags and layer masks. Intersections are built for colliders
    /// that compute them, with contacts facing along `velocity` or away
    /// from `reference` dropped.
    pub fn collide_with(
        &self,
        other: &CollisionObject,
        velocity: &Vector,
        reference: &Point,
    ) -> GeodeResult<Vec<ColliderContact>> {
        self.check_consistency()?;
        other.check_consistency()?;

        if !self.enabled || !other.enabled || self.id == other.id {
            return Ok(vec![]);
        }

        let mut contacts = vec![];
        for collider in self.active_colliders() {
            for other_collider in other.active_colliders() {
                if !collider.can_collide_with(other_collider) || !collider.overlap(other_collider) {
                    continue;
                }

                let intersection = if collider.compute_intersections() {
                    self.contact_points(collider, other, other_collider)
                        .map(|points| Intersection::new(points, velocity, reference))
                } else {
                    None
                };

                contacts.push(ColliderContact::new(
                    collider.id(),
                    other_collider.id(),
                    intersection,
                ));
            }
        }
        Ok(contacts)
    }

    /// Events for self touching `other`: one coarse `Collision` when any
    /// pair touches, plus per collider events for advanced notification.
    /// `is_first_contact` tells whether a collider pair was apart last tick.
    pub fn resolve(
        &self,
        other: &CollisionObject,
        velocity: &Vector,
        reference: &Point,
        is_first_contact: impl Fn(ColliderId, ColliderId) -> bool,
    ) -> GeodeResult<Vec<CollisionEvent>> {
        let contacts = self.collide_with(other, velocity, reference)?;
        if contacts.is_empty() {
            return Ok(vec![]);
        }

        let mut events = vec![];
        if self.advanced_notification {
            for contact in contacts.iter() {
                let event = match contact.intersection() {
                    Some(intersection) if intersection.is_valid() => {
                        CollisionEvent::ColliderIntersected {
                            object: self.id,
                            collider: contact.collider(),
                            other: other.id,
                            other_collider: contact.other_collider(),
                            intersection: intersection.clone(),
                        }
                    }
                    _ => CollisionEvent::ColliderOverlapped {
                        object: self.id,
                        collider: contact.collider(),
                        other: other.id,
                        other_collider: contact.other_collider(),
                        first_contact: is_first_contact(
                            contact.collider(),
                            contact.other_collider(),
                        ),
                    },
                };
                events.push(event);
            }
        }

        events.insert(
            0,
            CollisionEvent::Collision(CollisionInfo::new(self.id, other.id, contacts)),
        );
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        math::vector::Vector,
        shape::{Circle, Rect},
    };

    fn circle_object(center: (f32, f32)) -> CollisionObject {
        CollisionObject::new()
            .with_collider(Collider::new(Circle::new(center, 1.)).with_intersections(true))
            .unwrap()
    }

    #[test]
    fn test_add_and_remove_collider() {
        let mut object = CollisionObject::new();
        let id = object.add_collider(Collider::new(Circle::new((0., 0.), 1.))).unwrap();
        assert_eq!(object.collider(id).unwrap().parent(), Some(object.id()));
        assert!(object.check_consistency().is_ok());

        let collider = object.remove_collider(id).unwrap();
        assert_eq!(collider.parent(), None);
        assert!(object.colliders().is_empty());
        assert!(object.remove_collider(id).is_none());
    }

    #[test]
    fn test_transfer_detaches_first() {
        let mut a = circle_object((0., 0.));
        let mut b = CollisionObject::new();
        let id = a.colliders()[0].id();

        a.transfer_collider(id, &mut b).unwrap();
        assert!(a.colliders().is_empty());
        assert_eq!(b.collider(id).unwrap().parent(), Some(b.id()));

        assert_eq!(
            a.transfer_collider(id, &mut b),
            Err(GeodeError::UnknownCollider {
                object: a.id(),
                collider: id
            })
        );
    }

    #[test]
    fn test_owned_collider_is_rejected() {
        let mut a = circle_object((0., 0.));
        let mut b = CollisionObject::new();
        let owned = std::mem::replace(
            &mut a.colliders_mut()[0],
            Collider::new(Circle::new((0., 0.), 1.)),
        );
        let owned_id = owned.id();
        assert_eq!(
            b.add_collider(owned),
            Err(GeodeError::ColliderAlreadyOwned {
                collider: owned_id,
                owner: a.id()
            })
        );
        // the replacement was never attached
        assert!(matches!(
            a.check_consistency(),
            Err(GeodeError::ColliderParentMismatch { recorded: None, .. })
        ));
    }

    #[test]
    fn test_swapped_colliders_fail_resolve() {
        let mut a = circle_object((0., 0.));
        let mut b = circle_object((1., 0.));
        std::mem::swap(&mut a.colliders_mut()[0], &mut b.colliders_mut()[0]);

        let result = a.resolve(&b, &Vector::ZERO, &Point::ORIGIN, |_, _| true);
        assert!(matches!(
            result,
            Err(GeodeError::ColliderParentMismatch { .. })
        ));
    }

    #[test]
    fn test_queries_without_active_colliders() {
        let mut object = circle_object((0., 0.));
        let probe = Circle::new((0.5, 0.), 1.);
        assert!(object.overlap_circle(&probe));
        assert!(object.intersect_circle(&probe).is_some());

        object.set_enabled(false);
        assert!(!object.overlap_circle(&probe));
        assert!(object.intersect_circle(&probe).is_none());
        assert!(object.bounding_box().is_none());
    }

    #[test]
    fn test_shape_overloads() {
        let object = circle_object((0., 0.));
        assert!(object.overlap_rect(&Rect::new(0.5, -0.5, 2., 1.)));
        assert!(!object.overlap_rect(&Rect::new(5., 5., 1., 1.)));
        assert!(object.overlap_segment(&Segment::new((-2., 0.), (2., 0.))));
        let points = object
            .intersect_segment(&Segment::new((-2., 0.), (2., 0.)))
            .unwrap();
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_transform_moves_colliders() {
        let mut object = circle_object((0., 0.));
        object.sync_transform(&Transform::from_translation((10., 0.)));
        assert!(!object.overlap_circle(&Circle::new((0., 0.), 1.)));
        assert!(object.overlap_circle(&Circle::new((10., 0.), 1.)));
        assert_eq!(object.bounding_box(), Some(Rect::new(9., -1., 2., 2.)));
    }

    #[test]
    fn test_resolve_events() {
        let mut a = circle_object((0., 0.));
        let b = circle_object((1.5, 0.));

        let events = a
            .resolve(&b, &Vector::ZERO, &Point::ORIGIN, |_, _| true)
            .unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(&events[0], CollisionEvent::Collision(info) if info.other() == b.id()));

        a.set_advanced_notification(true);
        let events = a
            .resolve(&b, &Vector::ZERO, &Point::ORIGIN, |_, _| true)
            .unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(
            &events[1],
            CollisionEvent::ColliderIntersected { intersection, .. } if intersection.surface().normal().x() < 0.
        ));

        let far = circle_object((3., 0.));
        assert!(a
            .resolve(&far, &Vector::ZERO, &Point::ORIGIN, |_, _| true)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_passive_reverses_roles() {
        let mut a = circle_object((0., 0.));
        let b = circle_object((1.5, 0.));

        let reversed = b.intersect_object(&a).unwrap();
        a.set_passive(true);
        let passive = a.intersect_object(&b).unwrap();

        assert_eq!(passive.len(), reversed.len());
        for (p, q) in passive.iter().zip(reversed.iter()) {
            assert_eq!(p.point(), q.point());
            assert_eq!(p.normal(), -q.normal());
        }
    }
}
