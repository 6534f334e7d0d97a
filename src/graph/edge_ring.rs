use geo_types::{Coord, LineString};

use crate::num::OverlayFloat;

use super::directed_edge::DirectedEdgeId;

/// A cycle of directed edges assembled from `inResult` edges (spec §3,
/// "EdgeRing"). `is_maximal` rings may touch a node more than once (degree
/// >2); those are split into one or more `!is_maximal` minimal rings before
/// becoming OGC-valid polygon boundaries.
#[derive(Debug, Clone)]
pub struct EdgeRing<T: OverlayFloat> {
    pub directed_edges: Vec<DirectedEdgeId>,
    pub coords: LineString<T>,
    pub is_shell: bool,
    pub is_maximal: bool,
}

impl<T: OverlayFloat> EdgeRing<T> {
    pub fn new(directed_edges: Vec<DirectedEdgeId>, mut coords: Vec<Coord<T>>, is_maximal: bool) -> Self {
        if coords.first() != coords.last() {
            coords.push(coords[0]);
        }
        // OGC convention used throughout this crate: shells are CW, holes
        // are CCW (spec §8, "Ring orientation") - chosen because result
        // extraction reads the RHS location of an edge, which orients
        // shells clockwise.
        let is_shell = is_clockwise(&coords);
        EdgeRing {
            directed_edges,
            coords: LineString(coords),
            is_shell,
            is_maximal,
        }
    }

    pub fn envelope(&self) -> geo_types::Rect<T> {
        let mut min = self.coords.0[0];
        let mut max = self.coords.0[0];
        for &c in &self.coords.0 {
            if c.x < min.x {
                min.x = c.x;
            }
            if c.y < min.y {
                min.y = c.y;
            }
            if c.x > max.x {
                max.x = c.x;
            }
            if c.y > max.y {
                max.y = c.y;
            }
        }
        geo_types::Rect::new(min, max)
    }
}

/// Signed area via the shoelace formula; positive for counter-clockwise
/// rings under the standard mathematical (y-up) orientation convention.
pub fn signed_area<T: OverlayFloat>(coords: &[Coord<T>]) -> T {
    let mut sum = T::zero();
    for window in coords.windows(2) {
        let (a, b) = (window[0], window[1]);
        sum = sum + (a.x * b.y - b.x * a.y);
    }
    sum / (T::one() + T::one())
}

pub fn is_clockwise<T: OverlayFloat>(coords: &[Coord<T>]) -> bool {
    signed_area(coords) < T::zero()
}
