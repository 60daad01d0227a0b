//! Bowyer-Watson insertion. Every point is added to a triangulation that
//! starts as one large triangle around the input, triangles whose
//! circumcircle swallows the new point are replaced by a fan around it.

use std::collections::BTreeMap;

use geode_macro_tools::{Builder, Fields};
use log::debug;

use crate::{
    math::{point::Point, FloatNum},
    shape::{utils::bounding_box_of, Triangle},
};

use super::triangulation::Triangulation;

/// smallest enclosing triangle that keeps the hull triangles of the input
pub const MIN_MARGIN: FloatNum = 10.;

#[derive(Clone, Debug, Fields, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r]
pub struct DelaunayConfig {
    /// size of the enclosing triangle relative to the input extent,
    /// values below [`MIN_MARGIN`] are raised to it
    #[default = 10.]
    margin: FloatNum,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct IndexTriangle([usize; 3]);

impl IndexTriangle {
    fn edges(&self) -> [(usize, usize); 3] {
        let [a, b, c] = self.0;
        [(a, b), (b, c), (c, a)]
    }

    fn has_vertex(&self, index: usize) -> bool {
        self.0.contains(&index)
    }
}

fn orient(a: &Point, b: &Point, c: &Point) -> FloatNum {
    (*b - *a) ^ (*c - *a)
}

/// strict, expects a, b, c counterclockwise
fn in_circumcircle(p: &Point, a: &Point, b: &Point, c: &Point) -> bool {
    let a = *a - *p;
    let b = *b - *p;
    let c = *c - *p;

    let aa = a.abs_squared();
    let bb = b.abs_squared();
    let cc = c.abs_squared();

    let det = a.x() * (b.y() * cc - c.y() * bb) - a.y() * (b.x() * cc - c.x() * bb)
        + aa * (b.x() * c.y() - c.x() * b.y());

    det > 0.
}

/// triangulate a point cloud, coincident points are inserted once
pub fn delaunay_triangulation<'a>(
    points: impl IntoIterator<Item = &'a Point>,
    config: &DelaunayConfig,
) -> Triangulation {
    let mut vertices: Vec<Point> = Vec::new();
    for point in points {
        if !vertices.contains(point) {
            vertices.push(*point);
        }
    }

    if vertices.len() < 3 {
        return Triangulation::default();
    }

    let bounds = bounding_box_of(&vertices);
    let delta = bounds.width().max(bounds.height()).max(1.);
    let center = bounds.center();
    let reach = config.margin.max(MIN_MARGIN) * delta;

    let point_count = vertices.len();
    vertices.push(Point::new(center.x() - reach, center.y() - reach));
    vertices.push(Point::new(center.x() + reach, center.y() - reach));
    vertices.push(Point::new(center.x(), center.y() + reach));

    let mut triangles = vec![IndexTriangle([point_count, point_count + 1, point_count + 2])];

    for index in 0..point_count {
        let point = vertices[index];

        let (bad, good): (Vec<IndexTriangle>, Vec<IndexTriangle>) =
            triangles.into_iter().partition(|triangle| {
                let [a, b, c] = triangle.0;
                in_circumcircle(&point, &vertices[a], &vertices[b], &vertices[c])
            });
        triangles = good;

        let mut edge_count: BTreeMap<(usize, usize), usize> = BTreeMap::new();
        for (a, b) in bad.iter().flat_map(IndexTriangle::edges) {
            *edge_count.entry((a.min(b), a.max(b))).or_insert(0) += 1;
        }

        for ((a, b), _) in edge_count.into_iter().filter(|(_, count)| *count == 1) {
            if orient(&vertices[a], &vertices[b], &point) > 0. {
                triangles.push(IndexTriangle([a, b, index]));
            } else {
                triangles.push(IndexTriangle([b, a, index]));
            }
        }
    }

    triangles.retain(|triangle| (point_count..point_count + 3).all(|i| !triangle.has_vertex(i)));

    debug!(
        "delaunay triangulation of {} points produced {} triangles",
        point_count,
        triangles.len()
    );

    triangles
        .into_iter()
        .map(|IndexTriangle([a, b, c])| Triangle::new(vertices[a], vertices[b], vertices[c]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::num::approx_eq;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    #[test]
    fn test_config_default() {
        assert_eq!(DelaunayConfig::default().margin(), 10.);
        let config: DelaunayConfig = DelaunayConfigBuilder::new().margin(20_f32).into();
        assert_eq!(config.margin(), 20.);
    }

    #[test]
    fn test_square_with_center() {
        let points: Vec<Point> = [(0., 0.), (1., 0.), (1., 1.), (0., 1.), (0.5, 0.5)]
            .into_iter()
            .map(Point::from)
            .collect();
        let triangles = delaunay_triangulation(&points, &DelaunayConfig::default());
        assert_eq!(triangles.len(), 4);
        assert!(approx_eq(triangles.area(), 1.));
        assert!(triangles.iter().all(|t| t.is_ccw()));
    }

    #[test]
    fn test_small_margin_keeps_hull() {
        let points: Vec<Point> = [
            (0., 0.),
            (10., 0.),
            (10., 10.),
            (0., 10.),
            (3., 4.),
            (6., 2.),
            (5., 7.),
        ]
        .into_iter()
        .map(Point::from)
        .collect();

        for margin in [0.5, 1., 2., 10.] {
            let config: DelaunayConfig = DelaunayConfigBuilder::new().margin(margin as FloatNum).into();
            let triangles = delaunay_triangulation(&points, &config);
            assert!((triangles.area() - 100.).abs() < 1e-3, "margin {margin}");
            assert_eq!(triangles.len(), 8, "margin {margin}");
        }
    }

    #[test]
    fn test_too_few_points() {
        let points = [Point::new(0., 0.), Point::new(1., 0.), Point::new(1., 0.)];
        assert!(delaunay_triangulation(&points, &DelaunayConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_circumcircle() {
        let mut rng = StdRng::seed_from_u64(7);
        let points: Vec<Point> = (0..40)
            .map(|_| Point::new(rng.gen_range(0. ..100.), rng.gen_range(0. ..100.)))
            .collect();
        let triangles = delaunay_triangulation(&points, &DelaunayConfig::default());
        assert!(!triangles.is_empty());

        for triangle in triangles.iter() {
            let Some(circle) = triangle.circumcircle() else {
                continue;
            };
            let tolerance = circle.radius() * 1e-3;
            for p in points.iter().filter(|p| !triangle.has_vertex(p)) {
                assert!(circle.center().distance(p) >= circle.radius() - tolerance);
            }
        }
    }
}
