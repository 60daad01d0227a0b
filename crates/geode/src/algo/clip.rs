use log::{debug, warn};

use crate::{
    math::{num::EPSILON, point::Point, FloatNum},
    shape::{Points, Polygon},
};

/// Boolean operations on polygons. Every returned polygon is closed and
/// winds counterclockwise.
pub trait PolygonClipper {
    fn intersect(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon>;

    fn difference(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon>;

    fn union(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon>;
}

/// Clipper for convex clip polygons, the subject may be concave.
///
/// `intersect` is Sutherland-Hodgman. `difference` walks the clip edges and
/// peels off the part of the subject outside each edge, so the pieces never
/// overlap. `union` is not supported and hands both inputs back.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConvexClipper;

fn side(start: &Point, end: &Point, point: &Point) -> FloatNum {
    (*end - *start) ^ (*point - *start)
}

/// keep the part of `points` left of `start -> end`, or right of it when
/// `keep_left` is false
fn clip_half_plane(points: &[Point], start: &Point, end: &Point, keep_left: bool) -> Vec<Point> {
    let distance = |p: &Point| {
        let s = side(start, end, p);
        if keep_left {
            s
        } else {
            -s
        }
    };

    let len = points.len();
    let mut output = Vec::with_capacity(len + 1);
    for i in 0..len {
        let current = points[i];
        let prev = points[(i + len - 1) % len];
        let (d_current, d_prev) = (distance(&current), distance(&prev));

        if d_current >= 0. {
            if d_prev < 0. {
                output.push(prev.lerp(&current, d_prev / (d_prev - d_current)));
            }
            output.push(current);
        } else if d_prev >= 0. {
            output.push(prev.lerp(&current, d_prev / (d_prev - d_current)));
        }
    }
    output
}

fn into_polygon(points: Vec<Point>) -> Option<Polygon> {
    let mut points = Points::new(points);
    points.remove_collinear();
    let polygon = Polygon::new(points).fixed_winding();
    (polygon.is_valid() && polygon.area() > EPSILON).then_some(polygon)
}

fn clip_edges(clip: &Polygon) -> impl Iterator<Item = (Point, Point)> + '_ {
    (0..clip.len()).map(|i| (clip[i], clip[clip.next_index(i)]))
}

fn ccw_clip(clip: &Polygon) -> Option<Polygon> {
    let clip = clip.clone().fixed_winding();
    if !clip.is_valid() {
        return None;
    }
    if !clip.is_convex() {
        warn!(
            "convex clipper received a concave clip polygon with {} vertices, result is approximate",
            clip.len()
        );
    }
    Some(clip)
}

impl PolygonClipper for ConvexClipper {
    fn intersect(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon> {
        let Some(clip) = ccw_clip(clip) else {
            return vec![];
        };

        let mut output: Vec<Point> = subject.to_vec();
        for (start, end) in clip_edges(&clip) {
            if output.is_empty() {
                break;
            }
            output = clip_half_plane(&output, &start, &end, true);
        }

        into_polygon(output).into_iter().collect()
    }

    fn difference(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon> {
        let Some(clip) = ccw_clip(clip) else {
            return vec![subject.clone()];
        };

        let mut pieces = vec![];
        let mut inside: Vec<Point> = subject.to_vec();
        for (start, end) in clip_edges(&clip) {
            if inside.is_empty() {
                break;
            }
            let outside = clip_half_plane(&inside, &start, &end, false);
            pieces.extend(into_polygon(outside));
            inside = clip_half_plane(&inside, &start, &end, true);
        }
        pieces
    }

    fn union(&self, subject: &Polygon, clip: &Polygon) -> Vec<Polygon> {
        debug!("convex clipper does not merge polygons, returning both inputs");
        vec![subject.clone(), clip.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        math::num::approx_eq,
        shape::{ContainsPoint, Rect},
    };

    fn square(x: FloatNum, y: FloatNum, size: FloatNum) -> Polygon {
        Polygon::from_rect(&Rect::new(x, y, size, size))
    }

    fn total_area(polygons: &[Polygon]) -> FloatNum {
        polygons.iter().map(|p| p.area()).sum()
    }

    #[test]
    fn test_intersect_overlapping_squares() {
        let result = ConvexClipper.intersect(&square(0., 0., 2.), &square(1., 1., 2.));
        assert_eq!(result.len(), 1);
        assert!(approx_eq(result[0].area(), 1.));
        assert!(result[0].is_ccw());
    }

    #[test]
    fn test_intersect_disjoint() {
        assert!(ConvexClipper
            .intersect(&square(0., 0., 1.), &square(5., 5., 1.))
            .is_empty());
    }

    #[test]
    fn test_difference_conserves_area() {
        let subject = square(0., 0., 4.);
        let clip = Polygon::regular((4., 2.), 6, 1.5);

        let inside = ConvexClipper.intersect(&subject, &clip);
        let outside = ConvexClipper.difference(&subject, &clip);

        assert!(!outside.is_empty());
        let sum = total_area(&inside) + total_area(&outside);
        assert!((sum - subject.area()).abs() < 1e-3);
        assert!(outside.iter().all(|p| !p.contains_point(&(3.9, 2.).into())));
    }

    #[test]
    fn test_concave_subject() {
        let subject = Polygon::new(vec![
            (0., 0.).into(),
            (4., 0.).into(),
            (4., 4.).into(),
            (2., 1.).into(),
            (0., 4.).into(),
        ]);
        let clip = square(-1., 2., 6.);
        let inside = ConvexClipper.intersect(&subject, &clip);
        let outside = ConvexClipper.difference(&subject, &clip);
        let sum = total_area(&inside) + total_area(&outside);
        assert!((sum - subject.area()).abs() < 1e-3);
    }

    #[test]
    fn test_difference_without_overlap_keeps_subject() {
        let subject = square(0., 0., 1.);
        let outside = ConvexClipper.difference(&subject, &square(3., 3., 1.));
        assert!(approx_eq(total_area(&outside), 1.));
    }

    #[test]
    fn test_union_returns_inputs() {
        let (a, b) = (square(0., 0., 1.), square(3., 3., 1.));
        assert_eq!(ConvexClipper.union(&a, &b), vec![a, b]);
    }
}
