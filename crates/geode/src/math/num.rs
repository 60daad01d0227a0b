use std::ops::RangeInclusive;

use super::{pi, tau, FloatNum};

pub const EPSILON: FloatNum = 1e-5;

pub fn is_same_sign(v1: FloatNum, v2: FloatNum) -> bool {
    (v1.is_sign_positive() && v2.is_sign_positive())
        || (v1.is_sign_negative() && v2.is_sign_negative())
}

#[inline]
pub fn approx_eq(a: FloatNum, b: FloatNum) -> bool {
    (a - b).abs() < EPSILON
}

pub fn limit_at_range(value: FloatNum, range: RangeInclusive<FloatNum>) -> FloatNum {
    if &value < range.start() {
        *range.start()
    } else if &value > range.end() {
        *range.end()
    } else {
        value
    }
}

#[inline]
pub fn lerp(from: FloatNum, to: FloatNum, t: FloatNum) -> FloatNum {
    from + (to - from) * t
}

/// inverse of [`lerp`], degenerate ranges map to 0
pub fn inverse_lerp(from: FloatNum, to: FloatNum, value: FloatNum) -> FloatNum {
    let span = to - from;
    if span.abs() < EPSILON {
        return 0.;
    }
    (value - from) / span
}

pub fn remap(
    value: FloatNum,
    from: RangeInclusive<FloatNum>,
    to: RangeInclusive<FloatNum>,
) -> FloatNum {
    let t = inverse_lerp(*from.start(), *from.end(), value);
    lerp(*to.start(), *to.end(), t)
}

/// wrap radians into (-PI, PI]
pub fn wrap_angle(rad: FloatNum) -> FloatNum {
    let mut result = rad % tau();
    if result <= -pi() {
        result += tau();
    } else if result > pi() {
        result -= tau();
    }
    result
}

/// interpolate along the shortest arc
pub fn lerp_angle(from: FloatNum, to: FloatNum, t: FloatNum) -> FloatNum {
    from + wrap_angle(to - from) * t
}

pub fn ease_power(t: FloatNum, power: FloatNum) -> FloatNum {
    limit_at_range(t, 0.0..=1.0).powf(power)
}
