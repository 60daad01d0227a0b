use geode_macro_tools::Deref;

use crate::math::{num::EPSILON, point::Point, transform::Transform, vector::Vector, FloatNum};

use super::{utils, GeometryTransformer};

/// ordered point container shared by polygons and polylines
#[derive(Clone, Debug, Default, PartialEq, Deref)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Points {
    #[deref]
    points: Vec<Point>,
}

impl From<Vec<Point>> for Points {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl<const N: usize> From<[Point; N]> for Points {
    fn from(points: [Point; N]) -> Self {
        Self {
            points: points.into(),
        }
    }
}

impl<const N: usize> From<[(FloatNum, FloatNum); N]> for Points {
    fn from(points: [(FloatNum, FloatNum); N]) -> Self {
        points.into_iter().map(Point::from).collect()
    }
}

impl FromIterator<Point> for Points {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Points {
    type Item = Point;
    type IntoIter = std::vec::IntoIter<Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

impl From<Points> for Vec<Point> {
    fn from(value: Points) -> Self {
        value.points
    }
}

impl Points {
    pub fn new(points: impl Into<Vec<Point>>) -> Self {
        Self {
            points: points.into(),
        }
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.points.len().max(1)
    }

    #[inline]
    pub fn prev_index(&self, index: usize) -> usize {
        let len = self.points.len().max(1);
        (index + len - 1) % len
    }

    /// positive when the points wind counterclockwise
    pub fn signed_area(&self) -> FloatNum {
        utils::signed_area(&self.points)
    }

    pub fn mean(&self) -> Option<Point> {
        utils::mean_point(&self.points)
    }

    /// index and location of the vertex nearest to `point`
    pub fn closest_vertex(&self, point: &Point) -> Option<(usize, Point)> {
        self.points
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, Point)>, (index, p)| match best {
                Some((_, b)) if b.distance_squared(point) <= p.distance_squared(point) => best,
                _ => Some((index, p)),
            })
    }

    /// drop duplicated neighbours and vertices lying on the line through their neighbours
    pub fn remove_collinear(&mut self) {
        self.points.dedup();
        if self.points.len() > 1 && self.points.first() == self.points.last() {
            self.points.pop();
        }

        let mut index = 0;
        while self.points.len() > 3 && index < self.points.len() {
            let prev = self.points[self.prev_index(index)];
            let current = self.points[index];
            let next = self.points[self.next_index(index)];
            let cross = (current - prev) ^ (next - current);
            if cross.abs() < EPSILON {
                self.points.remove(index);
                // neighbours may have become collinear
                index = index.saturating_sub(1);
            } else {
                index += 1;
            }
        }
    }

    pub fn translate(&mut self, vector: &Vector) {
        self.points.iter_mut().for_each(|p| *p += vector);
    }

    /// counterclockwise rotation around `pivot`
    pub fn rotate(&mut self, pivot: &Point, rad: FloatNum) {
        self.points
            .iter_mut()
            .for_each(|p| *p = p.rotate_around(pivot, rad));
    }

    pub fn scale(&mut self, pivot: &Point, factor: FloatNum) {
        self.points
            .iter_mut()
            .for_each(|p| *p = p.scale_around(pivot, factor));
    }
}

impl GeometryTransformer for Points {
    fn transform_by(&self, transform: &Transform) -> Self {
        self.points
            .iter()
            .map(|p| transform.apply_to_point(p))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_collinear() {
        let mut points: Points = [
            (0., 0.),
            (1., 0.),
            (2., 0.),
            (2., 0.),
            (2., 2.),
            (0., 2.),
            (0., 1.),
            (0., 0.),
        ]
        .into();
        points.remove_collinear();
        assert_eq!(
            points,
            Points::from([(0., 0.), (2., 0.), (2., 2.), (0., 2.)])
        );
    }

    #[test]
    fn test_closest_vertex_first_wins() {
        let points: Points = [(0., 0.), (2., 0.), (2., 2.)].into();
        assert_eq!(
            points.closest_vertex(&(1., 0.).into()),
            Some((0, (0., 0.).into()))
        );
        assert_eq!(Points::default().closest_vertex(&Point::ORIGIN), None);
    }

    #[test]
    fn test_translate_rotate_scale() {
        let mut points: Points = [(1., 0.), (2., 0.)].into();
        points.translate(&(1., 1.).into());
        assert_eq!(points[0], (2., 1.).into());
        points.rotate(&(2., 1.).into(), crate::math::pi());
        assert_eq!(points[1], (1., 1.).into());
        points.scale(&(2., 1.).into(), 2.);
        assert_eq!(points[1], (0., 1.).into());
    }
}
