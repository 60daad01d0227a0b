use geode::{
    algo::ear_clipping,
    math::{num::approx_eq, tau},
    prelude::*,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// star shaped and therefore simple, vertices counterclockwise around the origin
fn random_star(rng: &mut StdRng, count: usize) -> Polygon {
    let points: Vec<Point> = (0..count)
        .map(|i| {
            let angle = tau() * i as FloatNum / count as FloatNum;
            let radius = rng.gen_range(2. ..10.);
            Point::new(angle.cos() * radius, angle.sin() * radius)
        })
        .collect();
    Polygon::new(points)
}

fn relative_error(a: FloatNum, b: FloatNum) -> FloatNum {
    (a - b).abs() / b.abs().max(1.)
}

#[test]
fn ear_clipping_conserves_area() {
    let mut rng = StdRng::seed_from_u64(2024);
    for count in 3..24 {
        let polygon = random_star(&mut rng, count);

        let triangles = polygon.triangulate();
        assert_eq!(triangles.len(), count - 2);
        assert!(relative_error(triangles.area(), polygon.area()) < 1e-4);

        let triangles = polygon.triangulate_with_rng(&mut rng);
        assert!(relative_error(triangles.area(), polygon.area()) < 1e-4);
    }
}

#[test]
fn ear_clipping_is_deterministic() {
    let mut rng = StdRng::seed_from_u64(5);
    let polygon = random_star(&mut rng, 12);
    assert_eq!(polygon.triangulate(), polygon.triangulate());
}

#[test]
fn ear_clipping_terminates_on_malformed_input() {
    let mut rng = StdRng::seed_from_u64(77);
    for _ in 0..20 {
        // arbitrary order, usually self intersecting
        let points: Points = (0..12)
            .map(|_| Point::new(rng.gen_range(0. ..10.), rng.gen_range(0. ..10.)))
            .collect();
        let deterministic = ear_clipping::triangulate(&points);
        let random = ear_clipping::triangulate_with_rng(&points, &mut rng);
        assert!(deterministic.len() <= points.len());
        assert!(random.len() <= points.len());
    }

    let repeated: Points = [(0., 0.), (1., 0.), (1., 0.), (1., 1.), (0., 0.)].into();
    assert_eq!(ear_clipping::triangulate(&repeated).len(), 1);
}

#[test]
fn delaunay_quad_has_empty_circumcircles() {
    let points = vec![
        Point::new(0., 0.),
        Point::new(4., 0.),
        Point::new(5., 3.),
        Point::new(0.5, 2.),
    ];
    let triangles = delaunay_triangulation(&points, &DelaunayConfig::default());
    assert_eq!(triangles.len(), 2);

    for triangle in triangles.iter() {
        for p in points.iter().filter(|p| !triangle.has_vertex(p)) {
            assert!(!triangle.is_in_circumcircle(p));
        }
    }

    let hull = Polygon::new(points);
    assert!(relative_error(triangles.area(), hull.area()) < 1e-5);
}

#[test]
fn subdivided_polygon_keeps_its_area() {
    let mut rng = StdRng::seed_from_u64(8);
    let polygon = random_star(&mut rng, 9);
    let config: SubdivisionConfig = SubdivisionConfigBuilder::new()
        .min_area(0.5_f32)
        .max_area(4_f32)
        .keep_chance(-1_f32)
        .into();

    let pieces = polygon.triangulate().subdivide(&config, &mut rng);
    assert!(pieces.len() > polygon.len() - 2);
    assert!(relative_error(pieces.area(), polygon.area()) < 1e-3);
    assert!(pieces.iter().all(|t| t.area() <= 4. + 1e-3));
}

#[test]
fn fracture_with_cut_polygon() {
    let mut rng = StdRng::seed_from_u64(31);
    let target = Polygon::from_rect(&Rect::new(0., 0., 20., 10.));
    let cut = Polygon::regular((0., 0.), 6, 4.);
    let config: SubdivisionConfig = SubdivisionConfigBuilder::new().max_area(3_f32).into();

    let fracture = target.fracture(&cut, &ConvexClipper, &config, &mut rng);
    let remaining: FloatNum = fracture.remaining().iter().map(|p| p.area()).sum();
    assert!(relative_error(remaining + fracture.pieces().area(), 200.) < 1e-3);

    let left = target.cut(&cut, &ConvexClipper);
    let left_area: FloatNum = left.iter().map(|p| p.area()).sum();
    assert!(approx_eq(left_area / remaining, 1.));
    assert!(left.iter().all(|p| !p.contains_point(&(0.5, 0.5).into())));
}
