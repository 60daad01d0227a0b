use geode_macro_tools::Fields;

use crate::math::{point::Point, vector::Vector};

use super::CollisionPoints;

/// true when the surface normal points along the incoming velocity,
/// a zero velocity never discards
pub fn faces_velocity_direction(normal: &Vector, velocity: &Vector) -> bool {
    !velocity.is_zero() && *normal * *velocity > 0.
}

/// true when the normal at `point` points away from `reference`
pub fn faces_away_from_reference(point: &Point, normal: &Vector, reference: &Point) -> bool {
    let to_reference: Vector = (point, reference).into();
    to_reference * *normal < 0.
}

/// averaged contact of a set of collision points
#[derive(Clone, Copy, Debug, Default, PartialEq, Fields)]
#[r(copy)]
pub struct CollisionSurface {
    point: Point,
    normal: Vector,
    count: usize,
}

impl CollisionSurface {
    pub fn new(point: Point, normal: Vector, count: usize) -> Self {
        Self {
            point,
            normal,
            count,
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.normal.is_zero()
    }
}

/// collision points that survived the back-face filters and their average
#[derive(Clone, Debug, Default, PartialEq, Fields)]
#[r]
pub struct Intersection {
    points: CollisionPoints,
    #[r(copy)]
    surface: CollisionSurface,
}

impl Intersection {
    /// discard invalid points, points facing along `velocity`
    /// and points facing away from `reference`, then average the rest
    pub fn new(points: CollisionPoints, velocity: &Vector, reference: &Point) -> Self {
        let points: CollisionPoints = points
            .into_iter()
            .filter(|p| p.is_valid())
            .filter(|p| !faces_velocity_direction(&p.normal(), velocity))
            .filter(|p| !faces_away_from_reference(&p.point(), &p.normal(), reference))
            .collect();
        let surface = points.average();
        Self { points, surface }
    }

    pub fn is_valid(&self) -> bool {
        !self.points.is_empty() && self.surface.is_valid()
    }

    pub fn into_points(self) -> CollisionPoints {
        self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::CollisionPoint;

    #[test]
    fn test_discard_predicates() {
        let up: Vector = (0., 1.).into();
        assert!(faces_velocity_direction(&up, &(0., 3.).into()));
        assert!(!faces_velocity_direction(&up, &(0., -3.).into()));
        assert!(!faces_velocity_direction(&up, &Vector::ZERO));

        let point = Point::ORIGIN;
        assert!(faces_away_from_reference(&point, &up, &(0., -2.).into()));
        assert!(!faces_away_from_reference(&point, &up, &(1., 2.).into()));
    }

    #[test]
    fn test_intersection_filters_back_faces() {
        let points: CollisionPoints = vec![
            CollisionPoint::new((0., 0.), (0., 1.)),
            CollisionPoint::new((1., 0.), (0., -1.)),
            CollisionPoint::new((2., 0.), (0., 0.)),
        ]
        .into();
        let intersection = Intersection::new(points, &(0., -1.).into(), &(0., 5.).into());
        assert!(intersection.is_valid());
        assert_eq!(intersection.points().len(), 1);
        assert_eq!(intersection.surface().normal(), (0., 1.).into());
    }

    #[test]
    fn test_intersection_without_survivors_is_invalid() {
        let points: CollisionPoints = vec![CollisionPoint::new((0., 0.), (0., -1.))].into();
        let intersection = Intersection::new(points, &Vector::ZERO, &(0., 5.).into());
        assert!(!intersection.is_valid());
        assert!(!intersection.surface().is_valid());
    }
}
