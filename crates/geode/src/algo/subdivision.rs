use std::collections::VecDeque;

use geode_macro_tools::{Builder, Fields};
use log::trace;
use rand::Rng;

use crate::math::{
    num::{inverse_lerp, limit_at_range},
    FloatNum,
};

use super::triangulation::Triangulation;

/// Controls how far [`Triangulation::subdivide`] breaks triangles apart.
///
/// A triangle is kept when it is smaller than `min_area` or narrow, always
/// split when larger than `max_area`, and otherwise kept with
/// `keep_chance`. A `keep_chance` outside `0..=1` makes the chance grow as
/// the area shrinks from `max_area` towards `min_area`.
#[derive(Clone, Debug, Fields, Builder)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[r]
#[w(set)]
pub struct SubdivisionConfig {
    #[default = 0.]
    min_area: FloatNum,
    #[default(FloatNum::MAX)]
    max_area: FloatNum,
    #[default = 0.5]
    keep_chance: FloatNum,
    /// sine of the smallest interior angle below which a triangle is left alone
    #[default = 0.]
    narrow_value: FloatNum,
    /// number of times a piece of the input may be split again
    #[default = 8]
    max_depth: usize,
}

impl SubdivisionConfig {
    pub fn keep_probability(&self, area: FloatNum) -> FloatNum {
        if (0. ..=1.).contains(&self.keep_chance) {
            self.keep_chance
        } else {
            let t = inverse_lerp(self.min_area, self.max_area, area);
            1. - limit_at_range(t, 0. ..=1.)
        }
    }
}

pub(crate) fn subdivide<R: Rng + ?Sized>(
    triangulation: &Triangulation,
    config: &SubdivisionConfig,
    rng: &mut R,
) -> Triangulation {
    let mut queue: VecDeque<_> = triangulation.iter().map(|&t| (t, 0_usize)).collect();
    let mut result = Vec::with_capacity(queue.len());
    let mut splits = 0;

    while let Some((triangle, depth)) = queue.pop_front() {
        let area = triangle.area();

        let keep = if depth >= config.max_depth
            || area <= config.min_area
            || triangle.is_narrow(config.narrow_value)
        {
            true
        } else if area > config.max_area {
            false
        } else {
            rng.gen::<FloatNum>() < config.keep_probability(area)
        };

        if keep {
            result.push(triangle);
        } else {
            splits += 1;
            queue.extend(
                triangle
                    .subdivide_at_centroid()
                    .into_iter()
                    .map(|t| (t, depth + 1)),
            );
        }
    }

    trace!(
        "subdivided {} triangles into {} with {} splits",
        triangulation.len(),
        result.len(),
        splits
    );

    result.into()
}
