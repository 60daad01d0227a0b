use geode::{math::num::approx_eq, prelude::*};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(rng: &mut StdRng, count: usize) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.gen_range(-50. ..50.), rng.gen_range(-50. ..50.)))
        .collect()
}

#[test]
fn fixed_winding_is_counterclockwise() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..50 {
        let polygon = Polygon::new(random_points(&mut rng, 6)).fixed_winding();
        assert!(polygon.signed_area() >= 0.);
    }

    let clockwise = Polygon::new(vec![
        Point::new(0., 0.),
        Point::new(0., 1.),
        Point::new(1., 1.),
        Point::new(1., 0.),
    ]);
    assert!(!clockwise.is_ccw());
    assert!(clockwise.fixed_winding().is_ccw());
}

#[test]
fn unit_square_contains() {
    let square = Polygon::new(vec![
        Point::new(0., 0.),
        Point::new(1., 0.),
        Point::new(1., 1.),
        Point::new(0., 1.),
    ]);
    assert!(square.contains_point(&(0.5, 0.5).into()));
    assert!(!square.contains_point(&(1.5, 0.5).into()));

    // bottom and left edges are inside, top and right are outside
    assert!(square.contains_point(&(0.5, 0.).into()));
    assert!(square.contains_point(&(0., 0.5).into()));
    assert!(!square.contains_point(&(0.5, 1.).into()));
    assert!(!square.contains_point(&(1., 0.5).into()));
}

#[test]
fn closest_point_on_circle() {
    let circle = Circle::new((2., 1.), 1.5);
    let p = Point::new(6., 4.);
    let closest = circle.closest_point(&p);

    assert!(approx_eq(closest.distance(), (p - closest.point()).abs()));
    assert!(approx_eq(closest.distance(), 3.5));

    let expected = (closest.point() - circle.center()).normalize();
    assert_eq!(closest.collision_point().normal(), expected);
    assert_eq!(expected, (p - circle.center()).normalize());
}

#[test]
fn two_circles_overlap_until_moved_apart() {
    let a: Shape = Circle::new((0., 0.), 1.).into();
    let b: Shape = Circle::new((1.5, 0.), 1.).into();
    assert!(a.overlap_shape(&b));
    assert!(b.overlap_shape(&a));

    let far: Shape = Circle::new((3., 0.), 1.).into();
    assert!(!a.overlap_shape(&far));
    assert!(a.intersect_shape(&far).is_none());
}

#[test]
fn mixed_shape_overlaps() {
    let rect: Shape = Rect::new(0., 0., 4., 2.).into();
    let triangle: Shape = Triangle::new((3., 1.), (6., 1.), (4., 4.)).into();
    let polyline: Shape = Polyline::new(vec![Point::new(-1., -1.), Point::new(5., 3.)]).into();
    let inner: Shape = Polygon::regular((2., 1.), 5, 0.5).into();

    assert!(rect.overlap_shape(&triangle));
    assert!(rect.overlap_shape(&polyline));
    // fully inside, no edges cross
    assert!(rect.overlap_shape(&inner));
    assert!(rect.intersect_shape(&inner).is_none());

    let points = rect.intersect_shape(&triangle).unwrap();
    assert!(!points.is_empty());
    assert!(points.iter().all(|p| p.is_valid()));
}

#[test]
fn intersection_drops_back_faces() {
    let wall: Shape = Segment::new((0., -5.), (0., 5.)).into();
    let mover: Shape = Circle::new((0.5, 0.), 1.).into();
    let points = mover.intersect_shape(&wall).unwrap();
    assert_eq!(points.len(), 2);

    // moving against the wall normal keeps the contacts
    let facing = Intersection::new(points.clone(), &Vector::new(-1., 0.), &Point::new(0.5, 0.));
    assert!(facing.is_valid());
    assert_eq!(facing.surface().count(), 2);

    // moving along the normal drops them
    let receding = Intersection::new(points, &Vector::new(1., 0.), &Point::new(0.5, 0.));
    assert!(!receding.is_valid());
}

#[test]
fn transformed_shapes() {
    let rect: Shape = Rect::new(0., 0., 2., 2.).into();
    let moved = rect.transform_by(&Transform::from_translation((5., 0.)));
    assert_eq!(moved.kind(), ShapeKind::Rect);
    assert_eq!(moved.center_point(), Point::new(6., 1.));

    let rotated = rect.transform_by(&Transform::new((0., 0.), geode::math::pi() / 4., 1.));
    assert_eq!(rotated.kind(), ShapeKind::Polygon);
    assert!(approx_eq(rotated.bounding_box().width(), 2. * 2_f32.sqrt()));
}

#[test]
fn random_points_stay_inside() {
    let mut rng = StdRng::seed_from_u64(9);
    let shapes: Vec<Shape> = vec![
        Circle::new((1., 1.), 2.).into(),
        Rect::new(-3., 2., 4., 1.).into(),
        Triangle::new((0., 0.), (4., 0.), (0., 3.)).into(),
        Polygon::new(vec![
            Point::new(0., 0.),
            Point::new(4., 0.),
            Point::new(4., 4.),
            Point::new(2., 1.),
            Point::new(0., 4.),
        ])
        .into(),
    ];
    for shape in shapes.iter() {
        let bbox = shape.bounding_box().expand(1e-3);
        for _ in 0..100 {
            let p = shape.random_point(&mut rng);
            assert!(bbox.contains_point(&p), "{:?} outside {:?}", p, shape.kind());
        }
    }
}
