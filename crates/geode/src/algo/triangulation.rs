use geode_macro_tools::Deref;
use rand::Rng;

use crate::{
    math::{point::Point, FloatNum},
    shape::{
        utils::bounding_box_of, BoundingBox, ContainsPoint, Polygon, RandomPoint, Rect, Triangle,
    },
};

use super::subdivision::{subdivide, SubdivisionConfig};

#[derive(Clone, Debug, Default, PartialEq, Deref)]
pub struct Triangulation {
    #[deref]
    triangles: Vec<Triangle>,
}

impl From<Vec<Triangle>> for Triangulation {
    fn from(triangles: Vec<Triangle>) -> Self {
        Self { triangles }
    }
}

impl FromIterator<Triangle> for Triangulation {
    fn from_iter<T: IntoIterator<Item = Triangle>>(iter: T) -> Self {
        Self {
            triangles: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Triangulation {
    type Item = Triangle;
    type IntoIter = std::vec::IntoIter<Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.into_iter()
    }
}

impl Extend<Triangle> for Triangulation {
    fn extend<T: IntoIterator<Item = Triangle>>(&mut self, iter: T) {
        self.triangles.extend(iter)
    }
}

impl Triangulation {
    pub fn area(&self) -> FloatNum {
        self.triangles.iter().map(|t| t.area()).sum()
    }

    /// split triangles until they satisfy `config`
    pub fn subdivide<R: Rng + ?Sized>(&self, config: &SubdivisionConfig, rng: &mut R) -> Self {
        subdivide(self, config, rng)
    }

    pub fn to_polygons(&self) -> Vec<Polygon> {
        self.triangles.iter().map(|t| t.to_polygon()).collect()
    }
}

impl BoundingBox for Triangulation {
    fn bounding_box(&self) -> Rect {
        let vertices: Vec<Point> = self.triangles.iter().flat_map(|t| t.vertices()).collect();
        bounding_box_of(&vertices)
    }
}

impl ContainsPoint for Triangulation {
    fn contains_point(&self, point: &Point) -> bool {
        self.triangles.iter().any(|t| t.contains_point(point))
    }
}

impl RandomPoint for Triangulation {
    /// choose a triangle weighted by area
    fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Point {
        let total = self.area();
        if total <= 0. {
            return self
                .triangles
                .first()
                .map(|t| t.a())
                .unwrap_or_default();
        }

        let mut remaining = rng.gen_range(0.0..total);
        for triangle in self.triangles.iter() {
            let area = triangle.area();
            if remaining < area {
                return triangle.random_point(rng);
            }
            remaining -= area;
        }
        // float drift past the last triangle
        match self.triangles.last() {
            Some(triangle) => triangle.random_point(rng),
            None => Point::default(),
        }
    }
}
