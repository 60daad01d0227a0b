use rand::Rng;

use crate::{
    math::{num::EPSILON, point::Point, transform::Transform},
    query::{ClosestPoint, ClosestSegment, CollisionPoints},
};

pub mod circle;
mod intersect;
mod overlap;
pub mod points;
pub mod polygon;
pub mod polyline;
pub mod rect;
pub mod segment;
pub mod segments;
pub mod triangle;
pub mod utils;

pub use circle::Circle;
pub use points::Points;
pub use polygon::Polygon;
pub use polyline::Polyline;
pub use rect::Rect;
pub use segment::Segment;
pub use segments::Segments;
pub use triangle::Triangle;

/// centroid of the shape
pub trait CenterPoint {
    fn center_point(&self) -> Point;
}

pub trait BoundingBox {
    fn bounding_box(&self) -> Rect;
}

pub trait BoundingCircle {
    fn bounding_circle(&self) -> Circle;
}

pub trait ContainsPoint {
    fn contains_point(&self, point: &Point) -> bool;

    fn contains_points<'a>(&self, points: impl IntoIterator<Item = &'a Point>) -> bool {
        points.into_iter().all(|p| self.contains_point(p))
    }
}

pub trait ClosestPointQuery {
    fn closest_point(&self, point: &Point) -> ClosestPoint;
}

pub trait EdgeIterable {
    fn edges(&self) -> Segments;

    fn closest_segment(&self, point: &Point) -> Option<ClosestSegment> {
        self.edges().closest_segment(point)
    }
}

pub trait RandomPoint {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point;

    fn random_points<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Points {
        (0..count).map(|_| self.random_point(rng)).collect()
    }
}

/// map local geometry into the space described by `transform`
pub trait GeometryTransformer: Sized {
    fn transform_by(&self, transform: &Transform) -> Self;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Segment,
    Circle,
    Rect,
    Triangle,
    Polygon,
    Polyline,
}

/// every primitive behind one type, used wherever shapes of different kinds meet
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Segment(Segment),
    Circle(Circle),
    Rect(Rect),
    Triangle(Triangle),
    Polygon(Polygon),
    Polyline(Polyline),
}

macro_rules! dispatch {
    ($self:ident, $shape:ident => $expr:expr) => {
        match $self {
            Shape::Segment($shape) => $expr,
            Shape::Circle($shape) => $expr,
            Shape::Rect($shape) => $expr,
            Shape::Triangle($shape) => $expr,
            Shape::Polygon($shape) => $expr,
            Shape::Polyline($shape) => $expr,
        }
    };
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Segment(_) => ShapeKind::Segment,
            Shape::Circle(_) => ShapeKind::Circle,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Triangle(_) => ShapeKind::Triangle,
            Shape::Polygon(_) => ShapeKind::Polygon,
            Shape::Polyline(_) => ShapeKind::Polyline,
        }
    }

    /// shapes with an inside, polylines and segments are open
    pub fn is_closed(&self) -> bool {
        matches!(
            self,
            Shape::Circle(_) | Shape::Rect(_) | Shape::Triangle(_) | Shape::Polygon(_)
        )
    }

    /// corner points, empty for circles
    pub fn vertices(&self) -> Vec<Point> {
        match self {
            Shape::Segment(segment) => vec![segment.start(), segment.end()],
            Shape::Circle(_) => vec![],
            Shape::Rect(rect) => rect.corners().to_vec(),
            Shape::Triangle(triangle) => triangle.vertices().to_vec(),
            Shape::Polygon(polygon) => polygon.to_vec(),
            Shape::Polyline(polyline) => polyline.to_vec(),
        }
    }

    /// short circuits on the first contact found
    pub fn overlap_shape(&self, other: &Shape) -> bool {
        overlap::overlap(self, other)
    }

    /// every crossing of the two outlines, normals belong to `other`'s surface.
    /// None when the outlines do not cross
    pub fn intersect_shape(&self, other: &Shape) -> Option<CollisionPoints> {
        intersect::intersect(self, other).into_option()
    }

    pub fn overlap_point(&self, point: &Point) -> bool {
        self.contains_point(point)
    }
}

impl CenterPoint for Shape {
    fn center_point(&self) -> Point {
        dispatch!(self, shape => shape.center_point())
    }
}

impl BoundingBox for Shape {
    fn bounding_box(&self) -> Rect {
        dispatch!(self, shape => shape.bounding_box())
    }
}

impl BoundingCircle for Shape {
    fn bounding_circle(&self) -> Circle {
        dispatch!(self, shape => shape.bounding_circle())
    }
}

impl ContainsPoint for Shape {
    fn contains_point(&self, point: &Point) -> bool {
        dispatch!(self, shape => shape.contains_point(point))
    }
}

impl ClosestPointQuery for Shape {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        dispatch!(self, shape => shape.closest_point(point))
    }
}

impl EdgeIterable for Shape {
    fn edges(&self) -> Segments {
        dispatch!(self, shape => shape.edges())
    }
}

impl RandomPoint for Shape {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        dispatch!(self, shape => shape.random_point(rng))
    }
}

impl GeometryTransformer for Shape {
    /// a rotated rect turns into a polygon
    fn transform_by(&self, transform: &Transform) -> Self {
        match self {
            Shape::Rect(rect) if transform.rotation().abs() > EPSILON => {
                Polygon::from_rect(rect).transform_by(transform).into()
            }
            Shape::Rect(rect) => {
                let min = transform.apply_to_point(&rect.min());
                let max = transform.apply_to_point(&rect.max());
                Rect::from_min_max(min, max).into()
            }
            Shape::Segment(shape) => shape.transform_by(transform).into(),
            Shape::Circle(shape) => shape.transform_by(transform).into(),
            Shape::Triangle(shape) => shape.transform_by(transform).into(),
            Shape::Polygon(shape) => shape.transform_by(transform).into(),
            Shape::Polyline(shape) => shape.transform_by(transform).into(),
        }
    }
}
