use geode_macro_tools::{Deref, Fields, Shape};
use rand::Rng;

use crate::{
    algo::{
        clip::PolygonClipper,
        ear_clipping,
        fracture::{fracture, Fracture},
        subdivision::SubdivisionConfig,
        triangulation::Triangulation,
    },
    math::{point::Point, transform::Transform, vector::Vector, FloatNum},
    query::ClosestPoint,
};

use super::{
    circle::Circle, points::Points, rect::Rect, segments::Segments, utils, BoundingBox,
    BoundingCircle, CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable,
    GeometryTransformer, RandomPoint,
};

/// closed polygon, points are expected to wind counterclockwise so that
/// edge normals point outward; use [`Polygon::fix_winding`] for unknown input
#[derive(Clone, Debug, Default, PartialEq, Shape, Deref, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    #[deref]
    #[r]
    points: Points,
    #[r]
    #[w(set)]
    flipped_normals: bool,
}

impl From<Vec<Point>> for Polygon {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<Points> for Polygon {
    fn from(points: Points) -> Self {
        Self::new(points)
    }
}

impl Polygon {
    pub fn new(points: impl Into<Points>) -> Self {
        Self {
            points: points.into(),
            flipped_normals: false,
        }
    }

    pub fn from_rect(rect: &Rect) -> Self {
        Self::new(rect.corners())
    }

    /// counterclockwise regular polygon, first vertex on the +x axis
    pub fn regular(center: impl Into<Point>, edge_count: usize, radius: FloatNum) -> Self {
        Circle::new(center, radius).to_polygon(edge_count)
    }

    pub fn with_flipped_normals(mut self, flipped_normals: bool) -> Self {
        self.flipped_normals = flipped_normals;
        self
    }

    pub fn edge_count(&self) -> usize {
        match self.points.len() {
            0 | 1 => 0,
            2 => 1,
            len => len,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// positive for counterclockwise
    pub fn signed_area(&self) -> FloatNum {
        self.points.signed_area()
    }

    pub fn area(&self) -> FloatNum {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() >= 0.
    }

    /// reverse the point order when the polygon winds clockwise
    pub fn fix_winding(&mut self) -> &mut Self {
        if !self.is_ccw() {
            self.points.reverse();
        }
        self
    }

    pub fn fixed_winding(mut self) -> Self {
        self.fix_winding();
        self
    }

    pub fn is_convex(&self) -> bool {
        let len = self.points.len();
        if len < 3 {
            return false;
        }
        let orientation = if self.is_ccw() { 1. } else { -1. };
        (0..len).all(|i| {
            let prev = self.points[self.points.prev_index(i)];
            let current = self.points[i];
            let next = self.points[self.points.next_index(i)];
            ((current - prev) ^ (next - current)) * orientation >= 0.
        })
    }

    pub fn perimeter(&self) -> FloatNum {
        self.edges().iter().map(|edge| edge.length()).sum()
    }

    pub fn remove_collinear(&mut self) -> &mut Self {
        self.points.remove_collinear();
        self
    }

    pub fn translate(&mut self, vector: &Vector) {
        self.points.translate(vector)
    }

    pub fn rotate(&mut self, rad: FloatNum) {
        let center = self.center_point();
        self.points.rotate(&center, rad)
    }

    pub fn scale(&mut self, factor: FloatNum) {
        let center = self.center_point();
        self.points.scale(&center, factor)
    }

    /// deterministic ear clipping
    pub fn triangulate(&self) -> Triangulation {
        ear_clipping::triangulate(&self.points)
    }

    /// ear clipping with random candidate order
    pub fn triangulate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Triangulation {
        ear_clipping::triangulate_with_rng(&self.points, rng)
    }

    /// what is left of self once `cut` is removed
    pub fn cut<C: PolygonClipper + ?Sized>(&self, cut: &Polygon, clipper: &C) -> Vec<Polygon> {
        clipper.difference(self, cut)
    }

    /// remove `cut` from self and break the removed part into rubble triangles
    pub fn fracture<C, R>(
        &self,
        cut: &Polygon,
        clipper: &C,
        config: &SubdivisionConfig,
        rng: &mut R,
    ) -> Fracture
    where
        C: PolygonClipper + ?Sized,
        R: Rng + ?Sized,
    {
        fracture(self, cut, clipper, config, rng)
    }
}

impl CenterPoint for Polygon {
    fn center_point(&self) -> Point {
        utils::polygon_centroid(&self.points)
    }
}

impl BoundingBox for Polygon {
    fn bounding_box(&self) -> Rect {
        utils::bounding_box_of(self.points.iter())
    }
}

impl BoundingCircle for Polygon {
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

impl ContainsPoint for Polygon {
    fn contains_point(&self, point: &Point) -> bool {
        utils::is_point_inside_polygon(point, &self.points)
    }
}

impl ClosestPointQuery for Polygon {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        match utils::closest_point_on_edges(&self.points, true, self.flipped_normals, point) {
            Some((_, _, closest)) => closest,
            None => ClosestPoint::default(),
        }
    }
}

impl EdgeIterable for Polygon {
    fn edges(&self) -> Segments {
        utils::edges_of(&self.points, true, self.flipped_normals).collect()
    }
}

impl RandomPoint for Polygon {
    /// pick a triangle weighted by area, then sample inside it
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        self.triangulate().random_point(rng)
    }
}

impl GeometryTransformer for Polygon {
    fn transform_by(&self, transform: &Transform) -> Self {
        Polygon {
            points: self.points.transform_by(transform),
            flipped_normals: self.flipped_normals,
        }
    }
}
