use geode_macro_tools::Fields;

use super::{point::Point, vector::Vector, FloatNum};

/// translation, counterclockwise rotation in radians and uniform scale,
/// applied as scale, then rotate, then translate
#[derive(Clone, Copy, Debug, PartialEq, Fields)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r]
#[w]
pub struct Transform {
    #[r(copy)]
    translation: Vector,
    rotation: FloatNum,
    scale: FloatNum,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<(Vector, FloatNum)> for Transform {
    fn from((translation, rotation): (Vector, FloatNum)) -> Self {
        Self {
            translation,
            rotation,
            scale: 1.,
        }
    }
}

impl From<Vector> for Transform {
    fn from(translation: Vector) -> Self {
        Self::from_translation(translation)
    }
}

impl std::ops::AddAssign<&Transform> for Transform {
    fn add_assign(&mut self, rhs: &Transform) {
        self.translation += rhs.translation;
        self.rotation += rhs.rotation;
    }
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translation: Vector::ZERO,
        rotation: 0.,
        scale: 1.,
    };

    pub fn new(translation: impl Into<Vector>, rotation: FloatNum, scale: FloatNum) -> Self {
        Self {
            translation: translation.into(),
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: impl Into<Vector>) -> Self {
        Self {
            translation: translation.into(),
            ..Self::IDENTITY
        }
    }

    pub fn position(&self) -> Point {
        self.translation.to_point()
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    pub fn apply_to_vector(&self, vector: &Vector) -> Vector {
        (*vector * self.scale).rotate(self.rotation)
    }

    pub fn apply_to_point(&self, point: &Point) -> Point {
        self.apply_to_vector(&point.to_vector()).to_point() + self.translation
    }

    /// treat self as a local transform inside `parent`
    pub fn combine(&self, parent: &Transform) -> Transform {
        Transform {
            translation: parent.apply_to_point(&self.translation.to_point()).to_vector(),
            rotation: self.rotation + parent.rotation,
            scale: self.scale * parent.scale,
        }
    }
}
