use geode_macro_tools::Fields;
use log::debug;
use rand::Rng;

use crate::shape::Polygon;

use super::{clip::PolygonClipper, subdivision::SubdivisionConfig, triangulation::Triangulation};

/// what is left of a polygon after a cut, plus the rubble of the cut out part
#[derive(Clone, Debug, Default, Fields)]
#[r]
pub struct Fracture {
    remaining: Vec<Polygon>,
    pieces: Triangulation,
}

impl Fracture {
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn into_parts(self) -> (Vec<Polygon>, Triangulation) {
        (self.remaining, self.pieces)
    }
}

pub fn fracture<C, R>(
    target: &Polygon,
    cut: &Polygon,
    clipper: &C,
    config: &SubdivisionConfig,
    rng: &mut R,
) -> Fracture
where
    C: PolygonClipper + ?Sized,
    R: Rng + ?Sized,
{
    let cutouts = clipper.intersect(target, cut);
    if cutouts.is_empty() {
        debug!("fracture cut does not touch the target, nothing breaks");
        return Fracture {
            remaining: vec![target.clone()],
            pieces: Triangulation::default(),
        };
    }

    let remaining = clipper.difference(target, cut);

    let mut pieces = Triangulation::default();
    for cutout in cutouts.iter() {
        pieces.extend(cutout.triangulate().subdivide(config, rng));
    }

    debug!(
        "fracture produced {} remaining polygons and {} pieces from {} cutouts",
        remaining.len(),
        pieces.len(),
        cutouts.len()
    );

    Fracture { remaining, pieces }
}
