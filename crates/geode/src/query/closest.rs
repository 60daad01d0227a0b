use crate::{
    math::{point::Point, FloatNum},
    shape::segment::Segment,
};

use super::CollisionPoint;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClosestPoint {
    point: CollisionPoint,
    distance_squared: FloatNum,
}

impl ClosestPoint {
    pub fn new(point: CollisionPoint, reference: &Point) -> Self {
        Self {
            distance_squared: point.distance_squared(reference),
            point,
        }
    }

    pub fn collision_point(&self) -> CollisionPoint {
        self.point
    }

    pub fn point(&self) -> Point {
        self.point.point()
    }

    pub fn distance_squared(&self) -> FloatNum {
        self.distance_squared
    }

    pub fn distance(&self) -> FloatNum {
        self.distance_squared.sqrt()
    }

    /// strictly closer, ties keep the existing one
    pub fn is_closer_than(&self, other: &ClosestPoint) -> bool {
        self.distance_squared < other.distance_squared
    }
}

/// closest edge of a shape and the closest point on it
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestSegment {
    pub segment: Segment,
    pub closest: ClosestPoint,
    pub index: usize,
}

/// closest candidate out of a collection, `item` identifies the candidate
#[derive(Clone, Debug, PartialEq)]
pub struct ClosestItem<T> {
    pub item: T,
    pub closest: ClosestPoint,
}

impl<T> ClosestItem<T> {
    pub fn new(item: T, closest: ClosestPoint) -> Self {
        Self { item, closest }
    }

    pub fn distance(&self) -> FloatNum {
        self.closest.distance()
    }
}
