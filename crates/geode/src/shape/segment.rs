use geode_macro_tools::{Fields, Shape};
use rand::Rng;

use crate::{
    math::{num::EPSILON, point::Point, transform::Transform, vector::Vector, FloatNum},
    query::{ClosestPoint, CollisionPoint},
};

use super::{
    circle::Circle, rect::Rect, segments::Segments, BoundingBox, BoundingCircle,
    CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable, GeometryTransformer,
    RandomPoint,
};

/// the normal points to the right of travel from `start` to `end`
/// unless `flipped_normals` is set
#[derive(Clone, Copy, Debug, Default, PartialEq, Shape, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r(copy)]
pub struct Segment {
    start: Point,
    end: Point,
    #[w(set)]
    flipped_normals: bool,
}

#[inline]
fn orientation(a: &Point, b: &Point, c: &Point) -> FloatNum {
    (*b - *a) ^ (*c - *a)
}

#[inline]
fn is_within_box(a: &Point, b: &Point, p: &Point) -> bool {
    p.x >= a.x.min(b.x) - EPSILON
        && p.x <= a.x.max(b.x) + EPSILON
        && p.y >= a.y.min(b.y) - EPSILON
        && p.y <= a.y.max(b.y) + EPSILON
}

impl Segment {
    pub fn new(start: impl Into<Point>, end: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            flipped_normals: false,
        }
    }

    pub fn with_flipped_normals(mut self, flipped_normals: bool) -> Self {
        self.flipped_normals = flipped_normals;
        self
    }

    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
            flipped_normals: self.flipped_normals,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vector {
        self.end - self.start
    }

    #[inline]
    pub fn length(&self) -> FloatNum {
        self.direction().abs()
    }

    #[inline]
    pub fn length_squared(&self) -> FloatNum {
        self.direction().abs_squared()
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.length_squared() < EPSILON * EPSILON
    }

    /// unit normal, zero for a degenerate segment
    pub fn normal(&self) -> Vector {
        let normal = (!self.direction()).normalize();
        if self.flipped_normals {
            -normal
        } else {
            normal
        }
    }

    pub fn point_at(&self, t: FloatNum) -> Point {
        self.start.lerp(&self.end, t)
    }

    pub fn closest_point_on(&self, point: &Point) -> ClosestPoint {
        let direction = self.direction();
        let length_squared = direction.abs_squared();
        let t = if length_squared < EPSILON * EPSILON {
            0.
        } else {
            ((*point - self.start) * direction / length_squared).clamp(0., 1.)
        };
        let closest = self.point_at(t);
        ClosestPoint::new(CollisionPoint::new(closest, self.normal()), point)
    }

    /// crossing point of two segments, parallel and collinear pairs yield None
    pub fn intersection_point(&self, other: &Segment) -> Option<Point> {
        let r = self.direction();
        let s = other.direction();
        let denominator = r ^ s;
        if denominator.abs() < EPSILON * EPSILON {
            return None;
        }

        let qp = other.start - self.start;
        let t = (qp ^ s) / denominator;
        let u = (qp ^ r) / denominator;
        let range = -EPSILON..=1. + EPSILON;
        (range.contains(&t) && range.contains(&u)).then(|| self.point_at(t.clamp(0., 1.)))
    }

    /// crossing point carrying the normal of `other`
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoint> {
        self.intersection_point(other)
            .map(|p| CollisionPoint::new(p, other.normal()))
    }

    /// touching and collinear overlaps count
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        let (p1, q1, p2, q2) = (self.start, self.end, other.start, other.end);
        let o1 = orientation(&p1, &q1, &p2);
        let o2 = orientation(&p1, &q1, &q2);
        let o3 = orientation(&p2, &q2, &p1);
        let o4 = orientation(&p2, &q2, &q1);

        let side = |v: FloatNum| {
            if v > EPSILON {
                1
            } else if v < -EPSILON {
                -1
            } else {
                0
            }
        };
        let (s1, s2, s3, s4) = (side(o1), side(o2), side(o3), side(o4));

        if s1 * s2 < 0 && s3 * s4 < 0 {
            return true;
        }

        (s1 == 0 && is_within_box(&p1, &q1, &p2))
            || (s2 == 0 && is_within_box(&p1, &q1, &q2))
            || (s3 == 0 && is_within_box(&p2, &q2, &p1))
            || (s4 == 0 && is_within_box(&p2, &q2, &q1))
    }
}

impl CenterPoint for Segment {
    fn center_point(&self) -> Point {
        self.start.mid(&self.end)
    }
}

impl BoundingBox for Segment {
    fn bounding_box(&self) -> Rect {
        Rect::from_min_max(self.start, self.end)
    }
}

impl BoundingCircle for Segment {
    fn bounding_circle(&self) -> Circle {
        Circle::new(self.center_point(), self.length() * 0.5)
    }
}

impl ContainsPoint for Segment {
    fn contains_point(&self, point: &Point) -> bool {
        self.closest_point_on(point).distance_squared() <= EPSILON * EPSILON
    }
}

impl ClosestPointQuery for Segment {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        self.closest_point_on(point)
    }
}

impl EdgeIterable for Segment {
    fn edges(&self) -> Segments {
        vec![*self].into()
    }
}

impl RandomPoint for Segment {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        self.point_at(rng.gen_range(0.0..=1.0))
    }
}

impl GeometryTransformer for Segment {
    fn transform_by(&self, transform: &Transform) -> Self {
        Self {
            start: transform.apply_to_point(&self.start),
            end: transform.apply_to_point(&self.end),
            flipped_normals: self.flipped_normals,
        }
    }
}

impl From<(Point, Point)> for Segment {
    fn from((start, end): (Point, Point)) -> Self {
        Self::new(start, end)
    }
}

impl From<Segment> for Vector {
    fn from(segment: Segment) -> Self {
        segment.direction()
    }
}
