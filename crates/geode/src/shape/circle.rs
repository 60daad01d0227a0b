use geode_macro_tools::{Fields, Shape};
use rand::Rng;

use crate::{
    math::{num::EPSILON, point::Point, tau, transform::Transform, vector::Vector, FloatNum},
    query::{ClosestPoint, CollisionPoint, CollisionPoints},
};

use super::{
    polygon::Polygon, rect::Rect, segment::Segment, segments::Segments, BoundingBox,
    BoundingCircle, CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable,
    GeometryTransformer, RandomPoint,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Shape, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r(copy)]
pub struct Circle {
    #[w(set)]
    center: Point,
    #[w(set)]
    radius: FloatNum,
}

impl Circle {
    pub fn new(center: impl Into<Point>, radius: FloatNum) -> Self {
        Self {
            center: center.into(),
            radius: radius.abs(),
        }
    }

    pub fn area(&self) -> FloatNum {
        0.5 * tau() * self.radius * self.radius
    }

    pub fn perimeter(&self) -> FloatNum {
        tau() * self.radius
    }

    pub fn diameter(&self) -> FloatNum {
        self.radius * 2.
    }

    /// outward unit normal at `point`, points at the center use +x
    pub fn normal_at(&self, point: &Point) -> Vector {
        let normal = (*point - self.center).normalize();
        if normal.is_zero() {
            (1., 0.).into()
        } else {
            normal
        }
    }

    /// counterclockwise polygon with `edge_count` vertices on the circle
    pub fn to_polygon(&self, edge_count: usize) -> Polygon {
        let edge_count = edge_count.max(3);
        let step = tau() / edge_count as FloatNum;
        (0..edge_count)
            .map(|i| {
                self.center + Vector::new(self.radius, 0.).rotate(step * i as FloatNum)
            })
            .collect::<Vec<_>>()
            .into()
    }

    pub fn overlap_circle(&self, other: &Circle) -> bool {
        let radius = self.radius + other.radius;
        self.center.distance_squared(&other.center) <= radius * radius
    }

    pub fn overlap_segment(&self, segment: &Segment) -> bool {
        segment.closest_point_on(&self.center).distance_squared() <= self.radius * self.radius
    }

    /// points where `segment` crosses the circle outline, ordered along the segment
    pub fn intersection_points_with_segment(&self, segment: &Segment) -> Vec<Point> {
        let direction = segment.direction();
        let a = direction.abs_squared();
        if a < EPSILON * EPSILON {
            return vec![];
        }
        let offset = segment.start() - self.center;
        let b = 2. * (offset * direction);
        let c = offset.abs_squared() - self.radius * self.radius;
        let discriminant = b * b - 4. * a * c;
        if discriminant < 0. {
            return vec![];
        }

        let root = discriminant.sqrt();
        let range = -EPSILON..=1. + EPSILON;
        let t1 = (-b - root) / (2. * a);
        let t2 = (-b + root) / (2. * a);
        let mut result = Vec::with_capacity(2);
        if range.contains(&t1) {
            result.push(segment.point_at(t1.clamp(0., 1.)));
        }
        if range.contains(&t2) && (t2 - t1).abs() > EPSILON {
            result.push(segment.point_at(t2.clamp(0., 1.)));
        }
        result
    }

    /// points where both outlines cross, containment and concentric circles yield none
    pub fn intersection_points_with_circle(&self, other: &Circle) -> Vec<Point> {
        let between = other.center - self.center;
        let distance = between.abs();
        if distance < EPSILON
            || distance > self.radius + other.radius
            || distance < (self.radius - other.radius).abs()
        {
            return vec![];
        }

        let a = (self.radius * self.radius - other.radius * other.radius + distance * distance)
            / (2. * distance);
        let h = (self.radius * self.radius - a * a).max(0.).sqrt();
        let direction = between / distance;
        let base = self.center + direction * a;
        if h < EPSILON {
            return vec![base];
        }
        let offset = direction.perpendicular_left() * h;
        vec![base + offset, base - offset]
    }

    /// crossing points carrying the normals of `other`
    pub fn intersect_circle(&self, other: &Circle) -> CollisionPoints {
        self.intersection_points_with_circle(other)
            .into_iter()
            .map(|p| CollisionPoint::new(p, other.normal_at(&p)))
            .collect()
    }

    /// crossing points carrying the normal of `segment`
    pub fn intersect_segment(&self, segment: &Segment) -> CollisionPoints {
        self.intersection_points_with_segment(segment)
            .into_iter()
            .map(|p| CollisionPoint::new(p, segment.normal()))
            .collect()
    }
}

impl CenterPoint for Circle {
    fn center_point(&self) -> Point {
        self.center
    }
}

impl BoundingBox for Circle {
    fn bounding_box(&self) -> Rect {
        let half: Vector = (self.radius, self.radius).into();
        Rect::from_min_max(self.center - half, self.center + half)
    }
}

impl BoundingCircle for Circle {
    fn bounding_circle(&self) -> Circle {
        *self
    }
}

impl ContainsPoint for Circle {
    fn contains_point(&self, point: &Point) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }
}

impl ClosestPointQuery for Circle {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        let normal = self.normal_at(point);
        let on_outline = self.center + normal * self.radius;
        ClosestPoint::new(CollisionPoint::new(on_outline, normal), point)
    }
}

impl EdgeIterable for Circle {
    /// circles have no straight edges
    fn edges(&self) -> Segments {
        Segments::default()
    }
}

impl RandomPoint for Circle {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let angle: FloatNum = rng.gen_range(0.0..tau());
        let distance = self.radius * rng.gen::<FloatNum>().sqrt();
        self.center + Vector::new(distance, 0.).rotate(angle)
    }
}

impl GeometryTransformer for Circle {
    fn transform_by(&self, transform: &Transform) -> Self {
        Self {
            center: transform.apply_to_point(&self.center),
            radius: self.radius * transform.scale().abs(),
        }
    }
}
