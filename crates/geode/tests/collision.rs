use geode::prelude::*;

fn object_with(shape: impl Into<Shape>) -> CollisionObject {
    CollisionObject::new()
        .with_collider(Collider::new(shape).with_intersections(true))
        .unwrap()
}

#[test]
fn passive_object_sees_reversed_normals() {
    let mut bullet = object_with(Circle::new((0., 0.), 1.));
    let wall = object_with(Rect::new(0.5, -3., 2., 6.));

    let reversed = wall.intersect_object(&bullet).unwrap();
    bullet.set_passive(true);
    let passive = bullet.intersect_object(&wall).unwrap();

    assert_eq!(passive.len(), reversed.len());
    for (p, q) in passive.iter().zip(reversed.iter()) {
        assert_eq!(p.point(), q.point());
        assert_eq!(p.normal(), -q.normal());
    }

    // two passive objects keep the default convention
    let mut passive_wall = object_with(Rect::new(0.5, -3., 2., 6.));
    passive_wall.set_passive(true);
    let plain = {
        let mut bullet = object_with(Circle::new((0., 0.), 1.));
        bullet.set_passive(false);
        bullet.intersect_object(&passive_wall).unwrap()
    };
    let both_passive = bullet.intersect_object(&passive_wall).unwrap();
    assert_eq!(plain.len(), both_passive.len());
    for (p, q) in plain.iter().zip(both_passive.iter()) {
        assert_eq!(p.normal(), q.normal());
    }
}

#[test]
fn handler_reports_intersections_through_spawn_area() {
    let events = std::rc::Rc::new(std::cell::RefCell::new(vec![]));
    let mut area: SpawnArea = SpawnArea::new(Rect::new(-50., -50., 100., 100.))
        .with_handler(SweepAndPrune::new());

    let mut mover = object_with(Circle::new((0., 0.), 1.));
    mover.set_advanced_notification(true);
    let mover = area.add_object(
        GameObject::new(0, ())
            .with_movable(Movable::new((1., 0.)))
            .with_collidable(mover),
    );
    // the wall's normal points back at the mover
    let wall = area.add_object(
        GameObject::new(0, ()).with_collidable(object_with(Segment::new((0.5, 5.), (0.5, -5.)))),
    );

    let sink = events.clone();
    area.register_collision_callback(move |event| sink.borrow_mut().push(event.clone()));
    area.tick(&GameTime::new(0.), &ScreenInfo::default()).unwrap();

    let events = events.borrow();
    let intersected = events
        .iter()
        .find_map(|event| match event {
            CollisionEvent::ColliderIntersected {
                object,
                other,
                intersection,
                ..
            } if *object == mover && *other == wall => Some(intersection.clone()),
            _ => None,
        })
        .unwrap();
    assert!(intersected.is_valid());
    assert_eq!(intersected.points().len(), 2);
    assert!(events
        .iter()
        .any(|e| matches!(e, CollisionEvent::Collision(info) if info.object() == wall)));
}

#[test]
fn layer_masks_filter_pairs() {
    let a = CollisionObject::new()
        .with_collider(Collider::new(Circle::new((0., 0.), 1.)).with_mask(LayerMask::from_layers([4])))
        .unwrap();
    let b = CollisionObject::new()
        .with_collider(Collider::new(Circle::new((1., 0.), 1.)).with_layer(3))
        .unwrap();

    let contacts = a
        .collide_with(&b, &Vector::ZERO, &Point::ORIGIN)
        .unwrap();
    assert!(contacts.is_empty());

    // b's empty mask accepts a's layer
    let contacts = b
        .collide_with(&a, &Vector::ZERO, &Point::ORIGIN)
        .unwrap();
    assert_eq!(contacts.len(), 1);
    assert!(contacts[0].intersection().is_none());
}
