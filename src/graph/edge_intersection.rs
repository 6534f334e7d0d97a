use geo_types::Coord;

use crate::num::OverlayFloat;

/// A vertex at which an edge is split during noding: either an original
/// endpoint or a computed intersection, recorded with the 1-based segment
/// it falls on and its "edge distance" along that segment (spec §4.1 step 4).
#[derive(Debug, Clone, Copy)]
pub struct EdgeIntersection<T: OverlayFloat> {
    pub coord: Coord<T>,
    pub segment_index: usize,
    pub distance: T,
}

impl<T: OverlayFloat> EdgeIntersection<T> {
    pub fn new(coord: Coord<T>, segment_index: usize, distance: T) -> Self {
        Self { coord, segment_index, distance }
    }
}

impl<T: OverlayFloat> PartialEq for EdgeIntersection<T> {
    fn eq(&self, other: &Self) -> bool {
        self.segment_index == other.segment_index && self.distance == other.distance
    }
}
impl<T: OverlayFloat> Eq for EdgeIntersection<T> {}

impl<T: OverlayFloat> PartialOrd for EdgeIntersection<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: OverlayFloat> Ord for EdgeIntersection<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| self.distance.partial_cmp(&other.distance).unwrap_or(std::cmp::Ordering::Equal))
    }
}
