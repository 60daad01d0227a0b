use std::{
    fmt::Display,
    ops::{
        Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Shr, Sub, SubAssign,
    },
};

use super::{num::EPSILON, point::Point, FloatNum};

#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&format!("{{ x: {}, y: {} }}", self.x, self.y))
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < EPSILON && (self.y - other.y).abs() < EPSILON
    }
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0., 0.);

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
    pub fn to_point(&self) -> Point {
        (self.x, self.y).into()
    }

    #[inline]
    pub fn abs(&self) -> FloatNum {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn abs_squared(&self) -> FloatNum {
        self.x * self.x + self.y * self.y
    }

    /// unit vector, a zero vector stays zero
    pub fn normalize(&self) -> Vector {
        let length = self.abs();
        if length < EPSILON {
            return Vector::ZERO;
        }
        let shrink = length.recip();
        (self.x * shrink, self.y * shrink).into()
    }

    #[inline]
    pub fn dot(&self, other: &Vector) -> FloatNum {
        *self * *other
    }

    #[inline]
    pub fn cross(&self, other: &Vector) -> FloatNum {
        *self ^ *other
    }

    /// rotate 90 degree counterclockwise, `!v` is the clockwise one
    #[inline]
    pub fn perpendicular_left(&self) -> Vector {
        (-self.y, self.x).into()
    }

    #[inline]
    pub fn perpendicular_right(&self) -> Vector {
        !*self
    }

    /// counterclockwise rotation in radians
    #[inline]
    pub fn rotate(&self, rad: FloatNum) -> Vector {
        let (s, c) = rad.sin_cos();
        (self.x * c - self.y * s, self.x * s + self.y * c).into()
    }

    #[inline]
    pub fn rotate_self(&mut self, rad: FloatNum) {
        *self = self.rotate(rad);
    }

    #[inline]
    pub fn angle(&self) -> FloatNum {
        self.y.atan2(self.x)
    }

    /// signed angle from self to `other`, counterclockwise is positive
    #[inline]
    pub fn angle_between(&self, other: &Vector) -> FloatNum {
        (*self ^ *other).atan2(*self * *other)
    }

    #[inline]
    pub fn lerp(&self, other: &Vector, t: FloatNum) -> Vector {
        *self + (*other - *self) * t
    }

    /// reflect around a unit normal
    #[inline]
    pub fn reflect(&self, normal: &Vector) -> Vector {
        *self - *normal * (2. * (*self * *normal))
    }

    pub fn project_on(&self, other: &Vector) -> Vector {
        let length_squared = other.abs_squared();
        if length_squared < EPSILON {
            return Vector::ZERO;
        }
        *other * ((*self * *other) / length_squared)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x.abs() < EPSILON && self.y.abs() < EPSILON
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.x = 0.;
        self.y = 0.;
    }
}

impl From<(FloatNum, FloatNum)> for Vector {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Self { x, y }
    }
}

impl From<[FloatNum; 2]> for Vector {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Self { x, y }
    }
}

impl From<(Point, Point)> for Vector {
    fn from((p1, p2): (Point, Point)) -> Self {
        (p2.x - p1.x, p2.y - p1.y).into()
    }
}

impl From<(&Point, &Point)> for Vector {
    fn from((p1, p2): (&Point, &Point)) -> Self {
        (p2.x - p1.x, p2.y - p1.y).into()
    }
}

impl From<Vector> for (FloatNum, FloatNum) {
    fn from(value: Vector) -> Self {
        (value.x, value.y)
    }
}

macro_rules! impl_vector_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<Vector> for Vector {
            type Output = Vector;
            fn $method(self, rhs: Vector) -> Self::Output {
                (self.x $op rhs.x, self.y $op rhs.y).into()
            }
        }

        impl $trait<&Vector> for Vector {
            type Output = Vector;
            fn $method(self, rhs: &Vector) -> Self::Output {
                (self.x $op rhs.x, self.y $op rhs.y).into()
            }
        }
    };
}

macro_rules! impl_vector_assign_op {
    ($trait:ident, $method:ident, $op:tt) => {
        impl $trait<Vector> for Vector {
            fn $method(&mut self, rhs: Vector) {
                self.x $op rhs.x;
                self.y $op rhs.y;
            }
        }

        impl $trait<&Vector> for Vector {
            fn $method(&mut self, rhs: &Vector) {
                self.x $op rhs.x;
                self.y $op rhs.y;
            }
        }
    };
}

impl_vector_op!(Add, add, +);
impl_vector_op!(Sub, sub, -);
impl_vector_assign_op!(AddAssign, add_assign, +=);
impl_vector_assign_op!(SubAssign, sub_assign, -=);

// dot product
impl Mul<Vector> for Vector {
    type Output = FloatNum;
    fn mul(self, rhs: Vector) -> Self::Output {
        self.x * rhs.x + self.y * rhs.y
    }
}

// cross product
impl BitXor<Vector> for Vector {
    type Output = FloatNum;
    fn bitxor(self, rhs: Vector) -> Self::Output {
        self.x * rhs.y - self.y * rhs.x
    }
}

// projection size of self on rhs
impl Shr<Vector> for Vector {
    type Output = FloatNum;
    fn shr(self, rhs: Vector) -> Self::Output {
        let length = rhs.abs();
        if length < EPSILON {
            return 0.;
        }
        (self * rhs) / length
    }
}

impl Mul<FloatNum> for Vector {
    type Output = Vector;
    fn mul(self, rhs: FloatNum) -> Self::Output {
        (self.x * rhs, self.y * rhs).into()
    }
}

impl MulAssign<FloatNum> for Vector {
    fn mul_assign(&mut self, rhs: FloatNum) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<FloatNum> for Vector {
    type Output = Vector;
    fn div(self, rhs: FloatNum) -> Self::Output {
        (self.x / rhs, self.y / rhs).into()
    }
}

impl DivAssign<FloatNum> for Vector {
    fn div_assign(&mut self, rhs: FloatNum) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        (-self.x, -self.y).into()
    }
}

// rotate 90 degree clockwise
impl Not for Vector {
    type Output = Vector;
    fn not(self) -> Self::Output {
        (self.y, -self.x).into()
    }
}
