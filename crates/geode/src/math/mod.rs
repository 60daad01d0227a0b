pub mod num;
pub mod point;
pub mod transform;
pub mod vector;

pub type FloatNum = f32;

#[inline]
pub const fn pi() -> FloatNum {
    std::f32::consts::PI
}

#[inline]
pub const fn tau() -> FloatNum {
    std::f32::consts::TAU
}
