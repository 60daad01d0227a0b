use std::cmp::Ordering;

use log::{trace, warn};
use rand::Rng;

use crate::{
    math::{num::EPSILON, point::Point, tau, FloatNum},
    shape::{Points, Triangle},
};

use super::triangulation::Triangulation;

/// ear clipping that always clips the sharpest convex corner first,
/// the result is reproducible for the same input
pub fn triangulate(points: &Points) -> Triangulation {
    clip_ears(points, |vertices, remaining, pool| {
        pool.iter()
            .enumerate()
            .min_by(|(_, &a), (_, &b)| {
                let a = interior_angle(vertices, remaining, a);
                let b = interior_angle(vertices, remaining, b);
                a.partial_cmp(&b).unwrap_or(Ordering::Equal)
            })
            .map(|(index, _)| index)
            .unwrap_or(0)
    })
}

/// ear clipping with a random candidate order
pub fn triangulate_with_rng<R: Rng + ?Sized>(points: &Points, rng: &mut R) -> Triangulation {
    clip_ears(points, |_, _, pool| rng.gen_range(0..pool.len()))
}

#[inline]
fn corner(remaining: &[usize], position: usize) -> (usize, usize, usize) {
    let len = remaining.len();
    (
        remaining[(position + len - 1) % len],
        remaining[position],
        remaining[(position + 1) % len],
    )
}

/// angle inside a counterclockwise polygon, reflex corners exceed PI
fn interior_angle(vertices: &[Point], remaining: &[usize], position: usize) -> FloatNum {
    let (prev, current, next) = corner(remaining, position);
    let to_next = vertices[next] - vertices[current];
    let to_prev = vertices[prev] - vertices[current];
    let angle = (to_next ^ to_prev).atan2(to_next * to_prev);
    if angle < 0. {
        angle + tau()
    } else {
        angle
    }
}

fn point_in_triangle(p: &Point, a: &Point, b: &Point, c: &Point) -> bool {
    let sign = |p1: &Point, p2: &Point, p3: &Point| (*p1 - *p3) ^ (*p2 - *p3);
    let d1 = sign(p, a, b);
    let d2 = sign(p, b, c);
    let d3 = sign(p, c, a);
    let has_negative = d1 < 0. || d2 < 0. || d3 < 0.;
    let has_positive = d1 > 0. || d2 > 0. || d3 > 0.;
    !(has_negative && has_positive)
}

/// a strictly convex corner with no other remaining vertex inside its triangle
fn is_ear(vertices: &[Point], remaining: &[usize], position: usize) -> bool {
    let (prev, current, next) = corner(remaining, position);
    let (a, b, c) = (&vertices[prev], &vertices[current], &vertices[next]);

    if (*b - *a) ^ (*c - *b) <= EPSILON {
        return false;
    }

    remaining
        .iter()
        .filter(|&&index| index != prev && index != current && index != next)
        .map(|&index| &vertices[index])
        .filter(|p| *p != a && *p != b && *p != c)
        .all(|p| !point_in_triangle(p, a, b, c))
}

fn push_triangle(triangles: &mut Vec<Triangle>, vertices: &[Point], corner: (usize, usize, usize)) {
    let (a, b, c) = corner;
    triangles.push(Triangle::new(vertices[a], vertices[b], vertices[c]));
}

/// `pick` chooses an entry of `pool`, pool entries are positions inside `remaining`
fn clip_ears(
    points: &Points,
    mut pick: impl FnMut(&[Point], &[usize], &[usize]) -> usize,
) -> Triangulation {
    let mut points = points.clone();
    points.remove_collinear();
    if points.signed_area() < 0. {
        points.reverse();
    }
    let vertices: Vec<Point> = points.into();

    if vertices.len() < 3 {
        return Triangulation::default();
    }

    let vertex_count = vertices.len();
    let max_attempts = vertex_count * vertex_count;
    let mut attempts = 0;
    let mut triangles: Vec<Triangle> = Vec::with_capacity(vertex_count - 2);
    let mut remaining: Vec<usize> = (0..vertex_count).collect();
    let mut pool: Vec<usize> = (0..remaining.len()).collect();

    while remaining.len() > 3 {
        if pool.is_empty() || attempts >= max_attempts {
            warn!(
                "ear clipping stalled with {} of {} vertices left after {} attempts, falling back to a fan",
                remaining.len(),
                vertex_count,
                attempts
            );
            let anchor = remaining[0];
            for pair in remaining[1..].windows(2) {
                push_triangle(&mut triangles, &vertices, (anchor, pair[0], pair[1]));
            }
            return triangles.into();
        }

        attempts += 1;
        let position = pool.swap_remove(pick(&vertices, &remaining, &pool));
        if is_ear(&vertices, &remaining, position) {
            push_triangle(&mut triangles, &vertices, corner(&remaining, position));
            remaining.remove(position);
            pool = (0..remaining.len()).collect();
        }
    }

    push_triangle(&mut triangles, &vertices, (remaining[0], remaining[1], remaining[2]));
    trace!(
        "ear clipping produced {} triangles in {} attempts",
        triangles.len(),
        attempts
    );
    triangles.into()
}
