use geode_macro_tools::Deref;

use crate::{
    math::point::Point,
    query::{ClosestSegment, CollisionPoints},
};

use super::segment::Segment;

/// edge collection produced by [`EdgeIterable`](super::EdgeIterable)
#[derive(Clone, Debug, Default, PartialEq, Deref)]
pub struct Segments {
    #[deref]
    segments: Vec<Segment>,
}

impl From<Vec<Segment>> for Segments {
    fn from(segments: Vec<Segment>) -> Self {
        Self { segments }
    }
}

impl FromIterator<Segment> for Segments {
    fn from_iter<T: IntoIterator<Item = Segment>>(iter: T) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Segments {
    type Item = Segment;
    type IntoIter = std::vec::IntoIter<Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.into_iter()
    }
}

impl Segments {
    /// first minimum wins on ties
    pub fn closest_segment(&self, point: &Point) -> Option<ClosestSegment> {
        let mut result: Option<ClosestSegment> = None;
        for (index, segment) in self.segments.iter().enumerate() {
            let closest = segment.closest_point_on(point);
            let is_closer = result
                .as_ref()
                .map(|best| closest.is_closer_than(&best.closest))
                .unwrap_or(true);
            if is_closer {
                result = Some(ClosestSegment {
                    segment: *segment,
                    closest,
                    index,
                });
            }
        }
        result
    }

    /// crossing points of `segment` with every edge, carrying the edge normals
    pub fn intersect_segment(&self, segment: &Segment) -> CollisionPoints {
        self.segments
            .iter()
            .filter_map(|edge| segment.intersect_segment(edge))
            .collect()
    }

    pub fn overlap_segment(&self, segment: &Segment) -> bool {
        self.segments.iter().any(|edge| edge.overlap_segment(segment))
    }

    /// every edge pair is checked, nothing short circuits
    pub fn intersect_segments(&self, other: &Segments) -> CollisionPoints {
        let mut points = CollisionPoints::new();
        for segment in self.segments.iter() {
            points.extend(other.intersect_segment(segment));
        }
        points
    }

    pub fn overlap_segments(&self, other: &Segments) -> bool {
        self.segments
            .iter()
            .any(|segment| other.overlap_segment(segment))
    }
}
