use geode_macro_tools::{Fields, Shape};
use rand::Rng;

use crate::{
    math::{num::EPSILON, point::Point, transform::Transform, FloatNum},
    query::ClosestPoint,
};

use super::{
    circle::Circle, polygon::Polygon, rect::Rect, segment::Segment, segments::Segments, utils,
    BoundingBox, BoundingCircle, CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable,
    GeometryTransformer, RandomPoint,
};

/// three points expected in counterclockwise order
#[derive(Clone, Copy, Debug, Default, PartialEq, Shape, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r(copy)]
pub struct Triangle {
    a: Point,
    b: Point,
    c: Point,
    #[w(set)]
    flipped_normals: bool,
}

impl Triangle {
    pub fn new(a: impl Into<Point>, b: impl Into<Point>, c: impl Into<Point>) -> Self {
        Self {
            a: a.into(),
            b: b.into(),
            c: c.into(),
            flipped_normals: false,
        }
    }

    pub fn vertices(&self) -> [Point; 3] {
        [self.a, self.b, self.c]
    }

    pub fn segment_ab(&self) -> Segment {
        Segment::new(self.a, self.b).with_flipped_normals(self.flipped_normals)
    }

    pub fn segment_bc(&self) -> Segment {
        Segment::new(self.b, self.c).with_flipped_normals(self.flipped_normals)
    }

    pub fn segment_ca(&self) -> Segment {
        Segment::new(self.c, self.a).with_flipped_normals(self.flipped_normals)
    }

    pub fn signed_area(&self) -> FloatNum {
        ((self.b - self.a) ^ (self.c - self.a)) * 0.5
    }

    pub fn area(&self) -> FloatNum {
        self.signed_area().abs()
    }

    pub fn is_ccw(&self) -> bool {
        self.signed_area() >= 0.
    }

    pub fn is_degenerate(&self) -> bool {
        self.area() < EPSILON * EPSILON
    }

    /// reorder to counterclockwise
    pub fn fix_winding(&self) -> Triangle {
        if self.is_ccw() {
            *self
        } else {
            Triangle {
                a: self.a,
                b: self.c,
                c: self.b,
                flipped_normals: self.flipped_normals,
            }
        }
    }

    /// None for collinear vertices
    pub fn circumcircle(&self) -> Option<Circle> {
        let (a, b, c) = (self.a, self.b, self.c);
        let d = 2. * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
        if d.abs() < EPSILON * EPSILON {
            return None;
        }

        let a_sq = a.to_vector().abs_squared();
        let b_sq = b.to_vector().abs_squared();
        let c_sq = c.to_vector().abs_squared();
        let center: Point = (
            (a_sq * (b.y - c.y) + b_sq * (c.y - a.y) + c_sq * (a.y - b.y)) / d,
            (a_sq * (c.x - b.x) + b_sq * (a.x - c.x) + c_sq * (b.x - a.x)) / d,
        )
            .into();
        Some(Circle::new(center, center.distance(&a)))
    }

    /// strict containment, points on the circle are outside
    pub fn is_in_circumcircle(&self, point: &Point) -> bool {
        match self.circumcircle() {
            Some(circle) => {
                let radius = circle.radius();
                circle.center().distance_squared(point) < radius * radius - EPSILON
            }
            None => false,
        }
    }

    /// true when the sine of some interior angle is below `narrow_value`
    pub fn is_narrow(&self, narrow_value: FloatNum) -> bool {
        let [a, b, c] = self.vertices();
        [(a, b, c), (b, c, a), (c, a, b)]
            .into_iter()
            .any(|(corner, next, prev)| {
                let to_next = (next - corner).normalize();
                let to_prev = (prev - corner).normalize();
                (to_next ^ to_prev).abs() < narrow_value
            })
    }

    /// split into three triangles around `point`, keeping the winding
    pub fn subdivide(&self, point: &Point) -> [Triangle; 3] {
        let p = *point;
        [
            Triangle::new(self.a, self.b, p),
            Triangle::new(self.b, self.c, p),
            Triangle::new(self.c, self.a, p),
        ]
    }

    pub fn subdivide_at_centroid(&self) -> [Triangle; 3] {
        self.subdivide(&self.center_point())
    }

    pub fn has_vertex(&self, point: &Point) -> bool {
        self.vertices().contains(point)
    }

    pub fn shares_vertex(&self, other: &Triangle) -> bool {
        other.vertices().iter().any(|p| self.has_vertex(p))
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::new(self.vertices())
    }
}

impl CenterPoint for Triangle {
    fn center_point(&self) -> Point {
        ((self.a.to_vector() + self.b.to_vector() + self.c.to_vector()) / 3.).to_point()
    }
}

impl BoundingBox for Triangle {
    fn bounding_box(&self) -> Rect {
        utils::bounding_box_of(&self.vertices())
    }
}

impl BoundingCircle for Triangle {
    fn bounding_circle(&self) -> Circle {
        let center = self.center_point();
        let radius = self
            .vertices()
            .iter()
            .map(|p| p.distance(&center))
            .fold(0., FloatNum::max);
        Circle::new(center, radius)
    }
}

impl ContainsPoint for Triangle {
    fn contains_point(&self, point: &Point) -> bool {
        utils::is_point_inside_polygon(point, &self.vertices())
    }
}

impl ClosestPointQuery for Triangle {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        match utils::closest_point_on_edges(&self.vertices(), true, self.flipped_normals, point)
        {
            Some((_, _, closest)) => closest,
            None => ClosestPoint::default(),
        }
    }
}

impl EdgeIterable for Triangle {
    fn edges(&self) -> Segments {
        vec![self.segment_ab(), self.segment_bc(), self.segment_ca()].into()
    }
}

impl RandomPoint for Triangle {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let r1 = rng.gen::<FloatNum>().sqrt();
        let r2 = rng.gen::<FloatNum>();
        let a = self.a.to_vector() * (1. - r1);
        let b = self.b.to_vector() * (r1 * (1. - r2));
        let c = self.c.to_vector() * (r1 * r2);
        (a + b + c).to_point()
    }
}

impl GeometryTransformer for Triangle {
    fn transform_by(&self, transform: &Transform) -> Self {
        Triangle {
            a: transform.apply_to_point(&self.a),
            b: transform.apply_to_point(&self.b),
            c: transform.apply_to_point(&self.c),
            flipped_normals: self.flipped_normals,
        }
    }
}
