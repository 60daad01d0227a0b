use crate::{
    math::{num::EPSILON, point::Point, vector::Vector, FloatNum},
    query::{ClosestPoint, CollisionPoint},
};

use super::{rect::Rect, segment::Segment};

/// crossing number test with a ray towards +x,
/// an edge counts when `(yi > p.y) != (yj > p.y)`, so min edges are inside
/// and max edges are outside; winding order does not matter
pub fn is_point_inside_polygon(point: &Point, vertices: &[Point]) -> bool {
    if vertices.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (pi, pj) = (vertices[i], vertices[j]);
        if (pi.y > point.y) != (pj.y > point.y) {
            let cross_x = pi.x + (point.y - pi.y) * (pj.x - pi.x) / (pj.y - pi.y);
            if point.x < cross_x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// shoelace formula, positive for counterclockwise
pub fn signed_area(vertices: &[Point]) -> FloatNum {
    if vertices.len() < 3 {
        return 0.;
    }
    let mut sum = 0.;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        sum += vertices[j].to_vector() ^ vertices[i].to_vector();
        j = i;
    }
    sum * 0.5
}

pub fn mean_point<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<Point> {
    let mut count = 0;
    let mut sum = Vector::ZERO;
    for p in points {
        count += 1;
        sum += p.to_vector();
    }
    (count > 0).then(|| (sum / count as FloatNum).to_point())
}

/// area weighted centroid, degenerate polygons fall back to the vertex mean
pub fn polygon_centroid(vertices: &[Point]) -> Point {
    let area = signed_area(vertices);
    if area.abs() < EPSILON {
        return mean_point(vertices).unwrap_or_default();
    }

    let mut cx = 0.;
    let mut cy = 0.;
    let mut j = vertices.len() - 1;
    for i in 0..vertices.len() {
        let (p, q) = (vertices[j], vertices[i]);
        let cross = p.to_vector() ^ q.to_vector();
        cx += (p.x + q.x) * cross;
        cy += (p.y + q.y) * cross;
        j = i;
    }
    let factor = (6. * area).recip();
    (cx * factor, cy * factor).into()
}

pub fn bounding_box_of<'a>(points: impl IntoIterator<Item = &'a Point>) -> Rect {
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return Rect::default();
    };
    let (min, max) = points.fold((*first, *first), |(min, max), p| {
        (
            (min.x.min(p.x), min.y.min(p.y)).into(),
            (max.x.max(p.x), max.y.max(p.y)).into(),
        )
    });
    Rect::from_min_max(min, max)
}

/// closest point on the closed edge loop through `vertices`, or the open chain when
/// `closed` is false, first minimum wins
pub fn closest_point_on_edges(
    vertices: &[Point],
    closed: bool,
    flipped_normals: bool,
    point: &Point,
) -> Option<(usize, Segment, ClosestPoint)> {
    edges_of(vertices, closed, flipped_normals)
        .enumerate()
        .map(|(index, edge)| {
            let closest = edge.closest_point_on(point);
            (index, edge, closest)
        })
        .fold(None, |best, current| match best {
            Some(best) if !current.2.is_closer_than(&best.2) => Some(best),
            _ => Some(current),
        })
}

pub fn edges_of(
    vertices: &[Point],
    closed: bool,
    flipped_normals: bool,
) -> impl Iterator<Item = Segment> + '_ {
    let len = vertices.len();
    let edge_count = match (closed, len) {
        (_, 0 | 1) => 0,
        (true, 2) => 1,
        (true, _) => len,
        (false, _) => len - 1,
    };
    (0..edge_count).map(move |i| {
        Segment::new(vertices[i], vertices[(i + 1) % len]).with_flipped_normals(flipped_normals)
    })
}

pub fn vertex_collision_point(point: Point, normal: Vector) -> CollisionPoint {
    CollisionPoint::new(point, normal.normalize())
}
