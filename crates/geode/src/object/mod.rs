//! Game objects: an entity record with optional movement, collision and
//! behaviour components.

pub(crate) mod id;
mod store;

use geode_macro_tools::Fields;
use log::trace;

use crate::{
    collision::{CollisionEvent, CollisionObject, Layer},
    math::{transform::Transform, vector::Vector, FloatNum},
    shape::{ContainsPoint, Rect},
    spawn::{GameTime, ScreenInfo},
};

pub use id::{ColliderId, ObjectId};
pub use store::ObjectStore;

/// Velocity with constant acceleration and linear drag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r(copy)]
#[w(set)]
pub struct Movable {
    velocity: Vector,
    acceleration: Vector,
    /// fraction of the velocity lost per second
    drag: FloatNum,
}

impl Movable {
    pub fn new(velocity: impl Into<Vector>) -> Self {
        Self {
            velocity: velocity.into(),
            ..Default::default()
        }
    }

    pub fn with_acceleration(mut self, acceleration: impl Into<Vector>) -> Self {
        self.acceleration = acceleration.into();
        self
    }

    pub fn with_drag(mut self, drag: FloatNum) -> Self {
        self.drag = drag;
        self
    }

    /// semi implicit euler step
    pub fn integrate(&mut self, transform: &mut Transform, delta: FloatNum) {
        self.velocity += self.acceleration * delta;
        if self.drag > 0. {
            self.velocity *= (1. - self.drag * delta).max(0.);
        }
        *transform.translation_mut() += self.velocity * delta;
    }
}

/// Game logic attached to a [`GameObject`]. Every method has a default so
/// implementors only write the hooks they need.
pub trait Behaviour<D> {
    fn update(&mut self, _object: &mut GameObject<D>, _time: &GameTime, _screen: &ScreenInfo) {}

    fn on_collision_event(&mut self, _object: &mut GameObject<D>, _event: &CollisionEvent) {}

    fn has_left_bounds(&self, object: &GameObject<D>, bounds: &Rect) -> bool {
        is_outside(object, bounds)
    }

    /// called once, right before the object is dropped by its spawn area
    fn on_despawned(&mut self, _object: &mut GameObject<D>) {}
}

/// the collision box misses `bounds`, or without one the position lies outside
pub fn is_outside<D>(object: &GameObject<D>, bounds: &Rect) -> bool {
    match object.bounding_box() {
        Some(bbox) => !bbox.overlap_rect(bounds),
        None => !bounds.contains_point(&object.transform.position()),
    }
}

#[derive(Fields)]
#[r]
pub struct GameObject<D = ()> {
    id: ObjectId,
    layer: Layer,
    #[r(copy)]
    transform: Transform,
    movable: Option<Movable>,
    collidable: Option<CollisionObject>,
    is_dead: bool,
    #[w(set)]
    draw_to_game: bool,
    #[w(set)]
    draw_to_ui: bool,
    /// 1 moves with the world, 0 sticks to the camera
    #[r(copy)]
    #[w(set)]
    parallax_factor: Vector,
    #[r(copy)]
    parallax_offset: Vector,
    #[w]
    data: D,
    #[r(skip)]
    behaviour: Option<Box<dyn Behaviour<D>>>,
}

impl<D: Default> Default for GameObject<D> {
    fn default() -> Self {
        Self::new(0, D::default())
    }
}

impl<D> GameObject<D> {
    pub fn new(layer: Layer, data: D) -> Self {
        Self {
            id: id::OBJECT_IDS.gen_id(),
            layer,
            transform: Transform::IDENTITY,
            movable: None,
            collidable: None,
            is_dead: false,
            draw_to_game: true,
            draw_to_ui: false,
            parallax_factor: Vector::new(1., 1.),
            parallax_offset: Vector::ZERO,
            data,
            behaviour: None,
        }
    }

    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Self {
        self.set_transform(transform);
        self
    }

    pub fn with_movable(mut self, movable: Movable) -> Self {
        self.movable = Some(movable);
        self
    }

    /// the collision object takes this object's id
    pub fn with_collidable(mut self, mut collidable: CollisionObject) -> Self {
        collidable.rebind_id(self.id);
        collidable.sync_transform(&self.transform);
        self.collidable = Some(collidable);
        self
    }

    pub fn with_behaviour(mut self, behaviour: impl Behaviour<D> + 'static) -> Self {
        self.behaviour = Some(Box::new(behaviour));
        self
    }

    pub(crate) fn set_layer(&mut self, layer: Layer) {
        self.layer = layer;
    }

    pub fn set_transform(&mut self, transform: impl Into<Transform>) -> &mut Self {
        self.transform = transform.into();
        self.sync_collidable();
        self
    }

    pub fn translate(&mut self, vector: &Vector) -> &mut Self {
        *self.transform.translation_mut() += vector;
        self.sync_collidable();
        self
    }

    pub fn movable_mut(&mut self) -> Option<&mut Movable> {
        self.movable.as_mut()
    }

    pub fn collidable_mut(&mut self) -> Option<&mut CollisionObject> {
        self.collidable.as_mut()
    }

    pub fn has_behaviour(&self) -> bool {
        self.behaviour.is_some()
    }

    pub fn velocity(&self) -> Vector {
        self.movable.map(|m| m.velocity()).unwrap_or(Vector::ZERO)
    }

    /// box of the active colliders
    pub fn bounding_box(&self) -> Option<Rect> {
        self.collidable.as_ref().and_then(|c| c.bounding_box())
    }

    /// mark for removal, the spawn area drops the object on its next tick
    pub fn kill(&mut self) {
        self.is_dead = true;
    }

    pub fn update_parallax(&mut self, screen: &ScreenInfo) {
        let camera = screen.camera_center().to_vector();
        self.parallax_offset = Vector::new(
            camera.x() * (1. - self.parallax_factor.x()),
            camera.y() * (1. - self.parallax_factor.y()),
        );
    }

    /// move, run the behaviour, then carry the new transform to the colliders
    pub fn update(&mut self, time: &GameTime, screen: &ScreenInfo) {
        if let Some(movable) = self.movable.as_mut() {
            movable.integrate(&mut self.transform, time.delta());
        }
        self.run_behaviour(|behaviour, object| behaviour.update(object, time, screen));
        self.sync_collidable();
    }

    pub fn handle_collision_event(&mut self, event: &CollisionEvent) {
        trace!("object {} received {:?}", self.id, event);
        self.run_behaviour(|behaviour, object| behaviour.on_collision_event(object, event));
    }

    pub fn has_left_bounds(&self, bounds: &Rect) -> bool {
        match self.behaviour.as_ref() {
            Some(behaviour) => behaviour.has_left_bounds(self, bounds),
            None => is_outside(self, bounds),
        }
    }

    pub(crate) fn despawn(&mut self) {
        self.run_behaviour(|behaviour, object| behaviour.on_despawned(object));
    }

    /// the behaviour is lent out while it runs, a replacement it installs wins
    fn run_behaviour(
        &mut self,
        f: impl FnOnce(&mut (dyn Behaviour<D> + 'static), &mut Self),
    ) {
        if let Some(mut behaviour) = self.behaviour.take() {
            f(behaviour.as_mut(), self);
            self.behaviour.get_or_insert(behaviour);
        }
    }

    fn sync_collidable(&mut self) {
        if let Some(collidable) = self.collidable.as_mut() {
            collidable.sync_transform(&self.transform);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collision::Collider, math::point::Point, shape::Circle};

    #[derive(Default)]
    struct Counter {
        updates: usize,
    }

    impl Behaviour<usize> for Counter {
        fn update(&mut self, object: &mut GameObject<usize>, _: &GameTime, _: &ScreenInfo) {
            self.updates += 1;
            *object.data_mut() = self.updates;
            if self.updates == 3 {
                object.kill();
            }
        }
    }

    #[test]
    fn test_movable_integrate() {
        let mut movable = Movable::new((2., 0.)).with_acceleration((0., 10.));
        let mut transform = Transform::IDENTITY;
        movable.integrate(&mut transform, 0.5);
        assert_eq!(movable.velocity(), Vector::new(2., 5.));
        assert_eq!(transform.position(), Point::new(1., 2.5));

        let mut movable = Movable::new((4., 0.)).with_drag(0.5);
        movable.integrate(&mut transform, 1.);
        assert_eq!(movable.velocity(), Vector::new(2., 0.));
    }

    #[test]
    fn test_behaviour_runs_on_update() {
        let mut object = GameObject::new(0, 0_usize).with_behaviour(Counter::default());
        let (time, screen) = (GameTime::default(), ScreenInfo::default());
        for _ in 0..3 {
            object.update(&time, &screen);
        }
        assert_eq!(*object.data(), 3);
        assert!(object.is_dead());
        assert!(object.has_behaviour());
    }

    #[test]
    fn test_collidable_follows_object() {
        let collidable = CollisionObject::new()
            .with_collider(Collider::new(Circle::new((0., 0.), 1.)))
            .unwrap();
        let mut object = GameObject::new(1, ())
            .with_collidable(collidable)
            .with_movable(Movable::new((10., 0.)));
        assert_eq!(object.collidable().as_ref().unwrap().id(), object.id());
        assert_eq!(
            object.collidable().as_ref().unwrap().colliders()[0].parent(),
            Some(object.id())
        );

        let time = GameTime::new(1.);
        object.update(&time, &ScreenInfo::default());
        assert_eq!(object.bounding_box(), Some(Rect::new(9., -1., 2., 2.)));
        assert!(object.collidable().as_ref().unwrap().overlap_circle(&Circle::new((10., 0.), 0.5)));
    }

    #[test]
    fn test_left_bounds_default() {
        let bounds = Rect::new(0., 0., 100., 100.);
        let mut object = GameObject::new(0, ()).with_transform(Vector::new(50., 50.));
        assert!(!object.has_left_bounds(&bounds));
        object.translate(&Vector::new(100., 0.));
        assert!(object.has_left_bounds(&bounds));
    }

    #[test]
    fn test_parallax() {
        let mut object = GameObject::new(0, ());
        object.set_parallax_factor(Vector::new(0.5, 1.));
        let screen = ScreenInfo::new(Rect::new(0., 0., 10., 10.)).with_camera_center((8., 4.));
        object.update_parallax(&screen);
        assert_eq!(object.parallax_offset(), Vector::new(4., 0.));
    }
}
