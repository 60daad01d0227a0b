use std::{cell::RefCell, rc::Rc};

use geode::prelude::*;

#[derive(Default)]
struct Tracker {
    despawned: Rc<RefCell<usize>>,
}

impl Behaviour<()> for Tracker {
    fn on_despawned(&mut self, _: &mut GameObject<()>) {
        *self.despawned.borrow_mut() += 1;
    }
}

fn ball(layer: Layer, x: FloatNum, y: FloatNum) -> GameObject<()> {
    let collidable = CollisionObject::new()
        .with_collider(Collider::new(Circle::new((0., 0.), 1.)))
        .unwrap();
    GameObject::new(layer, ())
        .with_transform(Vector::new(x, y))
        .with_collidable(collidable)
}

fn spawn_area() -> SpawnArea {
    SpawnArea::new(Rect::new(0., 0., 100., 100.)).with_handler(SweepAndPrune::new())
}

fn tick(area: &mut SpawnArea) {
    area.tick(&GameTime::new(1. / 60.), &ScreenInfo::default())
        .unwrap();
}

#[test]
fn dead_object_is_removed_once() {
    let despawned = Rc::new(RefCell::new(0));
    let hook_calls = Rc::new(RefCell::new(vec![]));

    let mut area = spawn_area();
    let sink = hook_calls.clone();
    area.register_despawn_callback(move |id| sink.borrow_mut().push(*id));

    let id = area.add_object(ball(3, 50., 50.).with_behaviour(Tracker {
        despawned: despawned.clone(),
    }));
    assert!(area.handler().unwrap().is_registered(id));

    area.object_mut(id).unwrap().kill();
    tick(&mut area);

    assert!(!area.has_object(id));
    assert!(area.objects_in_layer(3).is_empty());
    assert!(!area.handler().unwrap().is_registered(id));
    assert_eq!(*despawned.borrow(), 1);
    assert_eq!(*hook_calls.borrow(), vec![id]);

    tick(&mut area);
    assert!(!area.remove_object(id));
    assert_eq!(*despawned.borrow(), 1);
    assert_eq!(hook_calls.borrow().len(), 1);
}

#[test]
fn dead_objects_stay_when_removal_is_off() {
    let mut area = spawn_area().with_context(ContextBuilder::new().remove_dead_objects(false));
    let id = area.add_object(ball(0, 50., 50.));
    area.object_mut(id).unwrap().kill();
    tick(&mut area);
    assert!(area.has_object(id));
}

#[test]
fn clear_area_respects_layer_mask() {
    let mut area = spawn_area();
    let a = area.add_object(ball(1, 10., 10.));
    let b = area.add_object(ball(2, 12., 10.));
    let far = area.add_object(ball(1, 80., 80.));

    area.clear_area(Rect::new(0., 0., 20., 20.), Some(LayerMask::from_layers([2])));
    tick(&mut area);
    assert!(area.has_object(a));
    assert!(!area.has_object(b));
    assert!(area.has_object(far));

    // an empty mask matches every layer
    area.clear_area(Rect::new(0., 0., 20., 20.), Some(LayerMask::empty()));
    tick(&mut area);
    assert!(!area.has_object(a));
    assert!(area.has_object(far));

    // outside the bounds the request is dropped
    area.clear_area(Rect::new(500., 500., 1000., 1000.), None);
    tick(&mut area);
    assert_eq!(area.object_count(), 1);
}

#[test]
fn remove_objects_by_predicate_deregisters() {
    let mut area = spawn_area();
    for i in 0..5 {
        area.add_object(ball(i % 2, 10. + i as FloatNum * 10., 50.));
    }
    assert_eq!(area.handler().unwrap().registered_count(), 5);

    let removed = area.remove_objects(|o| o.layer() == 0);
    assert_eq!(removed, 3);
    assert_eq!(area.handler().unwrap().registered_count(), 2);

    area.clear();
    assert_eq!(area.object_count(), 0);
    assert_eq!(area.handler().unwrap().registered_count(), 0);
}

#[test]
fn broken_collider_ownership_halts_the_tick() {
    let mut area = spawn_area();
    let a = area.add_object(ball(0, 10., 10.));
    area.add_object(ball(0, 1., 1.));

    let collidable = area
        .object_mut(a)
        .unwrap()
        .collidable_mut()
        .unwrap();
    // the stand-in sits at the origin, touching the second ball
    let stolen = std::mem::replace(
        &mut collidable.colliders_mut()[0],
        Collider::new(Circle::new((0., 0.), 1.)),
    );

    let result = area.tick(&GameTime::new(0.1), &ScreenInfo::default());
    assert!(matches!(
        result,
        Err(GeodeError::ColliderParentMismatch { object, recorded: None, .. }) if object == a
    ));
    assert_eq!(area.frame_count(), 0);

    let mut other = CollisionObject::new();
    assert!(matches!(
        other.add_collider(stolen),
        Err(GeodeError::ColliderAlreadyOwned { owner, .. }) if owner == a
    ));
}

#[test]
fn lone_object_with_foreign_collider_halts_the_tick() {
    for with_handler in [true, false] {
        let mut area = if with_handler {
            spawn_area()
        } else {
            SpawnArea::new(Rect::new(0., 0., 100., 100.))
        };
        let lonely = area.add_object(ball(0, 50., 50.));

        let collidable = area
            .object_mut(lonely)
            .unwrap()
            .collidable_mut()
            .unwrap();
        collidable.colliders_mut()[0] = Collider::new(Circle::new((50., 50.), 1.));

        let result = area.tick(&GameTime::new(0.1), &ScreenInfo::default());
        assert!(
            matches!(
                result,
                Err(GeodeError::ColliderParentMismatch { object, recorded: None, .. }) if object == lonely
            ),
            "with handler: {with_handler}"
        );
        assert_eq!(area.frame_count(), 0);
        assert!(area.has_object(lonely));
    }
}

#[test]
fn objects_overlapping_shape() {
    let mut area = spawn_area();
    let a = area.add_object(ball(1, 10., 10.));
    let b = area.add_object(ball(2, 13., 10.));
    area.add_object(ball(1, 60., 60.));

    let probe: Shape = Rect::new(9., 9., 5., 2.).into();
    let mut hits = area.objects_overlapping(&probe, LayerMask::empty());
    hits.sort();
    assert_eq!(hits, vec![a, b]);
    assert_eq!(area.objects_overlapping(&probe, LayerMask::from_layers([2])), vec![b]);
}
