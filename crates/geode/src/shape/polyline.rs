use geode_macro_tools::{Deref, Fields, Shape};
use rand::Rng;

use crate::{
    math::{point::Point, transform::Transform, FloatNum},
    query::ClosestPoint,
};

use super::{
    circle::Circle, points::Points, rect::Rect, segments::Segments, utils, BoundingBox,
    BoundingCircle, CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable,
    GeometryTransformer, RandomPoint,
};

/// open chain of points, no closing edge and no area
#[derive(Clone, Debug, Default, PartialEq, Shape, Deref, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    #[deref]
    #[r]
    points: Points,
    #[r]
    #[w(set)]
    flipped_normals: bool,
}

impl From<Vec<Point>> for Polyline {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl Polyline {
    pub fn new(points: impl Into<Points>) -> Self {
        Self {
            points: points.into(),
            flipped_normals: false,
        }
    }

    pub fn with_flipped_normals(mut self, flipped_normals: bool) -> Self {
        self.flipped_normals = flipped_normals;
        self
    }

    pub fn length(&self) -> FloatNum {
        self.edges().iter().map(|edge| edge.length()).sum()
    }
}

impl CenterPoint for Polyline {
    /// length weighted mean of the edge midpoints
    fn center_point(&self) -> Point {
        let edges = self.edges();
        let total = self.length();
        if total <= 0. {
            return self.points.mean().unwrap_or_default();
        }
        let weighted = edges.iter().fold(Point::ORIGIN.to_vector(), |acc, edge| {
            acc + edge.start().mid(&edge.end()).to_vector() * edge.length()
        });
        (weighted / total).to_point()
    }
}

impl BoundingBox for Polyline {
    fn bounding_box(&self) -> Rect {
        utils::bounding_box_of(self.points.iter())
    }
}

impl BoundingCircle for Polyline {
    fn bounding_circle(&self) -> Circle {
        let center = self.center_point();
        let radius = self
            .points
            .iter()
            .map(|p| p.distance(&center))
            .fold(0., FloatNum::max);
        Circle::new(center, radius)
    }
}

impl ContainsPoint for Polyline {
    /// a point lying on one of the edges
    fn contains_point(&self, point: &Point) -> bool {
        self.edges().iter().any(|edge| edge.contains_point(point))
    }
}

impl ClosestPointQuery for Polyline {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        match utils::closest_point_on_edges(&self.points, false, self.flipped_normals, point) {
            Some((_, _, closest)) => closest,
            None => ClosestPoint::default(),
        }
    }
}

impl EdgeIterable for Polyline {
    fn edges(&self) -> Segments {
        utils::edges_of(&self.points, false, self.flipped_normals).collect()
    }
}

impl RandomPoint for Polyline {
    /// pick an edge weighted by length
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let edges = self.edges();
        let total = self.length();
        if total <= 0. {
            return self.points.first().copied().unwrap_or_default();
        }
        let mut remaining = rng.gen_range(0.0..total);
        for edge in edges.iter() {
            let length = edge.length();
            if remaining <= length {
                return edge.point_at(remaining / length);
            }
            remaining -= length;
        }
        self.points.last().copied().unwrap_or_default()
    }
}

impl GeometryTransformer for Polyline {
    fn transform_by(&self, transform: &Transform) -> Self {
        Polyline {
            points: self.points.transform_by(transform),
            flipped_normals: self.flipped_normals,
        }
    }
}
