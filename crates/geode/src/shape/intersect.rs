use crate::query::{CollisionPoint, CollisionPoints};

use super::{EdgeIterable, Shape};

/// crossings of both outlines, each point carries the surface normal of `b`
pub(super) fn intersect(a: &Shape, b: &Shape) -> CollisionPoints {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => a.intersect_circle(b),
        (Shape::Circle(circle), other) => {
            let mut points = CollisionPoints::new();
            for edge in other.edges().iter() {
                points.extend(circle.intersect_segment(edge));
            }
            points
        }
        (other, Shape::Circle(circle)) => {
            let mut points = CollisionPoints::new();
            for edge in other.edges().iter() {
                points.extend(
                    circle
                        .intersection_points_with_segment(edge)
                        .into_iter()
                        .map(|p| CollisionPoint::new(p, circle.normal_at(&p))),
                );
            }
            points
        }
        _ => a.edges().intersect_segments(&b.edges()),
    }
}
