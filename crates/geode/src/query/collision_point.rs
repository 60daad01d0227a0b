use std::cmp::Ordering;

use geode_macro_tools::{Deref, Fields};

use crate::math::{point::Point, vector::Vector, FloatNum};

use super::CollisionSurface;

/// a point on a shape surface with the surface normal there,
/// a zero normal marks the point as invalid
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r(copy)]
pub struct CollisionPoint {
    point: Point,
    normal: Vector,
}

impl CollisionPoint {
    pub fn new(point: impl Into<Point>, normal: impl Into<Vector>) -> Self {
        Self {
            point: point.into(),
            normal: normal.into(),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.normal.is_zero()
    }

    pub fn flip_normal(&self) -> Self {
        Self {
            point: self.point,
            normal: -self.normal,
        }
    }

    /// flip the normal when it points away from `reference`
    pub fn flip_normal_towards(&self, reference: &Point) -> Self {
        let to_reference: Vector = (self.point, *reference).into();
        if to_reference * self.normal < 0. {
            self.flip_normal()
        } else {
            *self
        }
    }

    pub fn distance_squared(&self, reference: &Point) -> FloatNum {
        self.point.distance_squared(reference)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Deref)]
pub struct CollisionPoints {
    #[deref]
    points: Vec<CollisionPoint>,
}

impl From<Vec<CollisionPoint>> for CollisionPoints {
    fn from(points: Vec<CollisionPoint>) -> Self {
        Self { points }
    }
}

impl FromIterator<CollisionPoint> for CollisionPoints {
    fn from_iter<T: IntoIterator<Item = CollisionPoint>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for CollisionPoints {
    type Item = CollisionPoint;
    type IntoIter = std::vec::IntoIter<CollisionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl Extend<CollisionPoint> for CollisionPoints {
    fn extend<T: IntoIterator<Item = CollisionPoint>>(&mut self, iter: T) {
        self.points.extend(iter)
    }
}

fn by_distance(reference: &Point) -> impl Fn(&CollisionPoint, &CollisionPoint) -> Ordering + '_ {
    move |a, b| {
        a.distance_squared(reference)
            .partial_cmp(&b.distance_squared(reference))
            .unwrap_or(Ordering::Equal)
    }
}

impl CollisionPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// None when the collection is empty
    pub fn into_option(self) -> Option<Self> {
        (!self.points.is_empty()).then_some(self)
    }

    pub fn closest(&self, reference: &Point) -> Option<CollisionPoint> {
        self.points.iter().copied().min_by(by_distance(reference))
    }

    pub fn furthest(&self, reference: &Point) -> Option<CollisionPoint> {
        self.points.iter().copied().max_by(by_distance(reference))
    }

    pub fn sort_by_distance(&mut self, reference: &Point) {
        self.points.sort_by(by_distance(reference));
    }

    /// drop points sharing a location with an earlier point
    pub fn unique(&mut self) {
        let mut kept: Vec<CollisionPoint> = Vec::with_capacity(self.points.len());
        for point in self.points.drain(..) {
            if !kept.iter().any(|p| p.point == point.point) {
                kept.push(point);
            }
        }
        self.points = kept;
    }

    pub fn orient_normals_towards(&mut self, reference: &Point) {
        self.points
            .iter_mut()
            .for_each(|p| *p = p.flip_normal_towards(reference));
    }

    pub fn flip_normals(&mut self) {
        self.points.iter_mut().for_each(|p| *p = p.flip_normal());
    }

    pub fn flipped(mut self) -> Self {
        self.flip_normals();
        self
    }

    /// mean location and normalized summed normal of the valid points
    pub fn average(&self) -> CollisionSurface {
        let mut count = 0;
        let mut location = Vector::ZERO;
        let mut normal = Vector::ZERO;
        for p in self.points.iter().filter(|p| p.is_valid()) {
            count += 1;
            location += p.point.to_vector();
            normal += p.normal;
        }
        if count == 0 {
            return CollisionSurface::default();
        }
        CollisionSurface::new(
            (location / count as FloatNum).to_point(),
            normal.normalize(),
            count,
        )
    }
}
