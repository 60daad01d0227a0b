use std::{
    cmp::Ordering,
    collections::{BTreeMap, BTreeSet},
};

use log::{debug, trace};

use crate::{
    errors::GeodeResult,
    math::{point::Point, vector::Vector},
    object::{ColliderId, ObjectId},
    shape::Rect,
};

use super::{event::CollisionEvent, object::CollisionObject};

/// What a handler needs to know about one collidable for one tick.
#[derive(Clone, Copy, Debug)]
pub struct CollisionBody<'a> {
    pub object: &'a CollisionObject,
    pub velocity: Vector,
    /// reference point for dropping contacts that face away from the body
    pub position: Point,
}

impl<'a> CollisionBody<'a> {
    pub fn new(object: &'a CollisionObject, velocity: Vector, position: Point) -> Self {
        Self {
            object,
            velocity,
            position,
        }
    }

    pub fn id(&self) -> ObjectId {
        self.object.id()
    }
}

/// Broad phase. Objects are registered by id; every tick the caller hands
/// over the current state of all collidables and receives the events of
/// that tick.
pub trait CollisionHandler {
    /// false when `id` was already registered
    fn register(&mut self, id: ObjectId) -> bool;

    /// false when `id` was not registered
    fn deregister(&mut self, id: ObjectId) -> bool;

    fn is_registered(&self, id: ObjectId) -> bool;

    fn registered_count(&self) -> usize;

    /// bodies that are not registered are ignored
    fn update(&mut self, bodies: &[CollisionBody<'_>]) -> GeodeResult<Vec<CollisionEvent>>;

    fn clear(&mut self);
}

type ColliderPair = (ObjectId, ColliderId, ObjectId, ColliderId);

/// Sweep and prune on the x axis with a y overlap test, followed by exact
/// collider checks in both directions of every candidate pair.
///
/// Contacts of the previous tick are remembered so that pairs which came
/// apart get `CollisionEnded`, and `ColliderContactEnded` for objects asking
/// for advanced notification.
#[derive(Debug, Default)]
pub struct SweepAndPrune {
    registered: BTreeSet<ObjectId>,
    object_contacts: BTreeSet<(ObjectId, ObjectId)>,
    collider_contacts: BTreeSet<ColliderPair>,
}

impl SweepAndPrune {
    pub fn new() -> Self {
        Self::default()
    }

    /// whether `object` touched `other` during the last update
    pub fn is_touching(&self, object: ObjectId, other: ObjectId) -> bool {
        self.object_contacts.contains(&(object, other))
    }

    fn candidates<'b, 'a>(
        &self,
        bodies: &'b [CollisionBody<'a>],
    ) -> Vec<(Rect, &'b CollisionBody<'a>)> {
        let mut boxes: Vec<_> = bodies
            .iter()
            .filter(|body| self.registered.contains(&body.id()) && body.object.enabled())
            .filter_map(|body| body.object.bounding_box().map(|bbox| (bbox, body)))
            .collect();

        boxes.sort_by(|(a, _), (b, _)| {
            a.min()
                .x()
                .partial_cmp(&b.min().x())
                .unwrap_or(Ordering::Equal)
        });
        boxes
    }
}

impl CollisionHandler for SweepAndPrune {
    fn register(&mut self, id: ObjectId) -> bool {
        let inserted = self.registered.insert(id);
        if inserted {
            debug!("object {} registered for collisions", id);
        }
        inserted
    }

    fn deregister(&mut self, id: ObjectId) -> bool {
        let removed = self.registered.remove(&id);
        if removed {
            // pairs addressed to others stay so they receive their ended events
            self.object_contacts.retain(|(object, _)| *object != id);
            self.collider_contacts.retain(|(object, ..)| *object != id);
            debug!("object {} deregistered from collisions", id);
        }
        removed
    }

    fn is_registered(&self, id: ObjectId) -> bool {
        self.registered.contains(&id)
    }

    fn registered_count(&self) -> usize {
        self.registered.len()
    }

    fn update(&mut self, bodies: &[CollisionBody<'_>]) -> GeodeResult<Vec<CollisionEvent>> {
        for body in bodies.iter().filter(|body| self.registered.contains(&body.id())) {
            body.object.check_consistency()?;
        }

        let candidates = self.candidates(bodies);
        let mut events = vec![];
        let mut object_contacts = BTreeSet::new();
        let mut collider_contacts = BTreeSet::new();

        let len = candidates.len();
        for i in 0..len {
            let (a_box, a) = candidates[i];
            for &(b_box, b) in candidates[i + 1..].iter() {
                if b_box.min().x() > a_box.max().x() {
                    break;
                }
                if a_box.max().y() < b_box.min().y() || b_box.max().y() < a_box.min().y() {
                    continue;
                }

                for (body, other) in [(a, b), (b, a)] {
                    let (object, other_id) = (body.id(), other.id());
                    let resolved = body.object.resolve(
                        other.object,
                        &body.velocity,
                        &body.position,
                        |collider, other_collider| {
                            !self.collider_contacts.contains(&(
                                object,
                                collider,
                                other_id,
                                other_collider,
                            ))
                        },
                    )?;

                    for event in resolved {
                        if let CollisionEvent::Collision(info) = &event {
                            object_contacts.insert((object, other_id));
                            for contact in info.contacts() {
                                collider_contacts.insert((
                                    object,
                                    contact.collider(),
                                    other_id,
                                    contact.other_collider(),
                                ));
                            }
                        }
                        events.push(event);
                    }
                }
            }
        }

        let present: BTreeMap<ObjectId, &CollisionObject> =
            bodies.iter().map(|body| (body.id(), body.object)).collect();

        for &(object, other) in self.object_contacts.difference(&object_contacts) {
            if self.registered.contains(&object) && present.contains_key(&object) {
                events.push(CollisionEvent::CollisionEnded { object, other });
            }
        }

        for &(object, collider, other, other_collider) in
            self.collider_contacts.difference(&collider_contacts)
        {
            let advanced = present
                .get(&object)
                .map_or(false, |o| o.advanced_notification());
            if advanced && self.registered.contains(&object) {
                events.push(CollisionEvent::ColliderContactEnded {
                    object,
                    collider,
                    other,
                    other_collider,
                });
            }
        }

        trace!(
            "sweep and prune checked {} bodies, {} touching pairs, {} events",
            len,
            object_contacts.len(),
            events.len()
        );

        self.object_contacts = object_contacts;
        self.collider_contacts = collider_contacts;
        Ok(events)
    }

    fn clear(&mut self) {
        self.registered.clear();
        self.object_contacts.clear();
        self.collider_contacts.clear();
    }
}
