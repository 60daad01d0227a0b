use geode_macro_tools::{Fields, Shape};
use rand::Rng;

use crate::{
    math::{point::Point, vector::Vector, FloatNum},
    query::ClosestPoint,
};

use super::{
    circle::Circle, polygon::Polygon, segment::Segment, segments::Segments, utils, BoundingBox,
    BoundingCircle, CenterPoint, ClosestPointQuery, ContainsPoint, EdgeIterable, RandomPoint,
};

/// axis aligned rectangle, `min` is the bottom left corner with y pointing up
#[derive(Clone, Copy, Debug, Default, PartialEq, Shape, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r(copy)]
pub struct Rect {
    min: Point,
    max: Point,
}

impl Rect {
    pub fn new(x: FloatNum, y: FloatNum, width: FloatNum, height: FloatNum) -> Self {
        Self::from_min_max((x, y), (x + width, y + height))
    }

    /// any two opposite corners
    pub fn from_min_max(a: impl Into<Point>, b: impl Into<Point>) -> Self {
        let (a, b): (Point, Point) = (a.into(), b.into());
        Self {
            min: (a.x.min(b.x), a.y.min(b.y)).into(),
            max: (a.x.max(b.x), a.y.max(b.y)).into(),
        }
    }

    pub fn from_center(center: impl Into<Point>, size: impl Into<Vector>) -> Self {
        let center = center.into();
        let half = size.into() * 0.5;
        Self::from_min_max(center - half, center + half)
    }

    pub fn width(&self) -> FloatNum {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> FloatNum {
        self.max.y - self.min.y
    }

    pub fn size(&self) -> Vector {
        self.max - self.min
    }

    pub fn area(&self) -> FloatNum {
        self.width() * self.height()
    }

    pub fn center(&self) -> Point {
        self.min.mid(&self.max)
    }

    /// counterclockwise from `min`
    pub fn corners(&self) -> [Point; 4] {
        [
            self.min,
            (self.max.x, self.min.y).into(),
            self.max,
            (self.min.x, self.max.y).into(),
        ]
    }

    /// grow every side by `amount`, negative values shrink down to the center
    pub fn expand(&self, amount: FloatNum) -> Rect {
        let half_width = (self.width() * 0.5 + amount).max(0.);
        let half_height = (self.height() * 0.5 + amount).max(0.);
        Rect::from_center(self.center(), (half_width * 2., half_height * 2.))
    }

    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: (self.min.x.min(other.min.x), self.min.y.min(other.min.y)).into(),
            max: (self.max.x.max(other.max.x), self.max.y.max(other.max.y)).into(),
        }
    }

    /// closed intervals, touching rects overlap
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }

    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.min.x <= other.min.x
            && self.min.y <= other.min.y
            && other.max.x <= self.max.x
            && other.max.y <= self.max.y
    }

    pub fn clamp_point(&self, point: &Point) -> Point {
        (
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
            .into()
    }

    pub fn translate(&mut self, vector: &Vector) {
        self.min += vector;
        self.max += vector;
    }

    pub fn to_polygon(&self) -> Polygon {
        Polygon::from_rect(self)
    }
}

impl CenterPoint for Rect {
    fn center_point(&self) -> Point {
        self.center()
    }
}

impl BoundingBox for Rect {
    fn bounding_box(&self) -> Rect {
        *self
    }
}

impl BoundingCircle for Rect {
    fn bounding_circle(&self) -> Circle {
        Circle::new(self.center(), self.size().abs() * 0.5)
    }
}

impl ContainsPoint for Rect {
    /// half open, `min` edges are inside and `max` edges outside
    fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

impl ClosestPointQuery for Rect {
    fn closest_point(&self, point: &Point) -> ClosestPoint {
        let corners = self.corners();
        match utils::closest_point_on_edges(&corners, true, false, point) {
            Some((_, _, closest)) => closest,
            None => ClosestPoint::default(),
        }
    }
}

impl EdgeIterable for Rect {
    fn edges(&self) -> Segments {
        let corners = self.corners();
        utils::edges_of(&corners, true, false).collect()
    }
}

impl RandomPoint for Rect {
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        (
            self.min.x + self.width() * rng.gen::<FloatNum>(),
            self.min.y + self.height() * rng.gen::<FloatNum>(),
        )
            .into()
    }
}

impl From<Rect> for Segments {
    fn from(rect: Rect) -> Self {
        rect.edges()
    }
}

impl Rect {
    pub fn segment_bottom(&self) -> Segment {
        let [a, b, _, _] = self.corners();
        Segment::new(a, b)
    }

    pub fn segment_right(&self) -> Segment {
        let [_, b, c, _] = self.corners();
        Segment::new(b, c)
    }

    pub fn segment_top(&self) -> Segment {
        let [_, _, c, d] = self.corners();
        Segment::new(c, d)
    }

    pub fn segment_left(&self) -> Segment {
        let [a, _, _, d] = self.corners();
        Segment::new(d, a)
    }
}
