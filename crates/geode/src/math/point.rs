use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use super::{num::EPSILON, vector::Vector, FloatNum};

#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("({}, {})", self.x, self.y))
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Point {
    pub const ORIGIN: Point = Point::new(0., 0.);

    #[inline]
    pub const fn new(x: FloatNum, y: FloatNum) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> FloatNum {
        self.x
    }

    #[inline]
    pub fn set_x(&mut self, mut reducer: impl FnMut(FloatNum) -> FloatNum) {
        self.x = reducer(self.x);
    }

    #[inline]
    pub fn y(&self) -> FloatNum {
        self.y
    }

    #[inline]
    pub fn set_y(&mut self, mut reducer: impl FnMut(FloatNum) -> FloatNum) {
        self.y = reducer(self.y);
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        (self.x, self.y).into()
    }

    #[inline]
    pub fn distance_squared(&self, other: &Point) -> FloatNum {
        Vector::from((self, other)).abs_squared()
    }

    #[inline]
    pub fn distance(&self, other: &Point) -> FloatNum {
        Vector::from((self, other)).abs()
    }

    #[inline]
    pub fn lerp(&self, other: &Point, t: FloatNum) -> Point {
        *self + Vector::from((self, other)) * t
    }

    #[inline]
    pub fn mid(&self, other: &Point) -> Point {
        self.lerp(other, 0.5)
    }

    /// counterclockwise rotation around `pivot`
    pub fn rotate_around(&self, pivot: &Point, rad: FloatNum) -> Point {
        *pivot + Vector::from((pivot, self)).rotate(rad)
    }

    pub fn scale_around(&self, pivot: &Point, factor: FloatNum) -> Point {
        *pivot + Vector::from((pivot, self)) * factor
    }
}

impl From<(FloatNum, FloatNum)> for Point {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Self { x, y }
    }
}

impl From<[FloatNum; 2]> for Point {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point> for (FloatNum, FloatNum) {
    fn from(value: Point) -> Self {
        (value.x, value.y)
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Self::Output {
        (self.x + rhs.x, self.y + rhs.y).into()
    }
}

impl Add<&Vector> for Point {
    type Output = Point;
    fn add(self, rhs: &Vector) -> Self::Output {
        (self.x + rhs.x, self.y + rhs.y).into()
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl AddAssign<&Vector> for Point {
    fn add_assign(&mut self, rhs: &Vector) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

// vector from rhs to self
impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}

impl Sub<&Point> for &Point {
    type Output = Vector;
    fn sub(self, rhs: &Point) -> Self::Output {
        (self.x - rhs.x, self.y - rhs.y).into()
    }
}
