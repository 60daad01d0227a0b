use super::{circle::Circle, ContainsPoint, EdgeIterable, Shape};

pub(super) fn overlap(a: &Shape, b: &Shape) -> bool {
    match (a, b) {
        (Shape::Circle(a), Shape::Circle(b)) => a.overlap_circle(b),
        (Shape::Circle(circle), other) | (other, Shape::Circle(circle)) => {
            overlap_circle(circle, other)
        }
        (Shape::Rect(a), Shape::Rect(b)) => a.overlap_rect(b),
        (Shape::Segment(a), Shape::Segment(b)) => a.overlap_segment(b),
        _ => overlap_outlines(a, b),
    }
}

fn overlap_circle(circle: &Circle, other: &Shape) -> bool {
    if other.is_closed() && other.contains_point(&circle.center()) {
        return true;
    }
    other
        .edges()
        .iter()
        .any(|edge| circle.overlap_segment(edge))
}

/// a vertex inside the other shape or any touching edge pair
fn overlap_outlines(a: &Shape, b: &Shape) -> bool {
    if b.is_closed() && a.vertices().iter().any(|p| b.contains_point(p)) {
        return true;
    }
    if a.is_closed() && b.vertices().iter().any(|p| a.contains_point(p)) {
        return true;
    }
    a.edges().overlap_segments(&b.edges())
}

#[cfg(test)]
mod tests {
    use crate::shape::{Circle, Polygon, Polyline, Rect, Segment, Shape, Triangle};

    #[test]
    fn test_polygon_containing_other() {
        let big: Shape = Polygon::regular((0., 0.), 6, 10.).into();
        let small: Shape = Triangle::new((-1., -1.), (1., -1.), (0., 1.)).into();
        assert!(big.overlap_shape(&small));
        assert!(small.overlap_shape(&big));
    }

    #[test]
    fn test_circle_inside_polygon() {
        let square: Shape = Rect::new(0., 0., 10., 10.).to_polygon().into();
        let circle: Shape = Circle::new((5., 5.), 1.).into();
        assert!(square.overlap_shape(&circle));
        assert!(circle.overlap_shape(&square));

        let outside: Shape = Circle::new((15., 5.), 1.).into();
        assert!(!square.overlap_shape(&outside));
    }

    #[test]
    fn test_open_shapes() {
        let line: Shape = Polyline::new([(0., 0.), (4., 0.), (4., 4.)]).into();
        let crossing: Shape = Segment::new((2., -1.), (2., 1.)).into();
        let inside_bend: Shape = Segment::new((1., 1.), (3., 3.)).into();
        assert!(line.overlap_shape(&crossing));
        assert!(!line.overlap_shape(&inside_bend));

        let rect: Shape = Rect::new(1., 1., 1., 1.).into();
        assert!(!line.overlap_shape(&rect));
        assert!(rect.overlap_shape(&Segment::new((0., 0.), (1.5, 1.5)).into()));
    }

    #[test]
    fn test_rect_pairs() {
        let a: Shape = Rect::new(0., 0., 1., 1.).into();
        let b: Shape = Rect::new(0.5, 0.5, 1., 1.).into();
        let c: Shape = Rect::new(3., 3., 1., 1.).into();
        assert!(a.overlap_shape(&b));
        assert!(!a.overlap_shape(&c));
        let triangle: Shape = Triangle::new((0.5, -1.), (2., 0.5), (0.5, 0.5)).into();
        assert!(a.overlap_shape(&triangle));
    }
}
