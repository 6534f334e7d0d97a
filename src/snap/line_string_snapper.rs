use float_next_after::NextAfter;
use geo_types::{Coord, LineString};

use crate::num::{dist2, OverlayFloat};

/// Snaps one linestring's vertices to a set of target points within a
/// tolerance, inserting new vertices on its segments where a target point
/// has no nearby vertex of its own (spec §4.6, `LineStringSnapper`).
pub struct LineStringSnapper<T: OverlayFloat> {
    tolerance: T,
    allow_snapping_to_source_vertices: bool,
}

impl<T: OverlayFloat> LineStringSnapper<T> {
    pub fn new(tolerance: T, allow_snapping_to_source_vertices: bool) -> Self {
        LineStringSnapper { tolerance, allow_snapping_to_source_vertices }
    }

    pub fn snap_to(&self, source: &LineString<T>, snap_points: &[Coord<T>]) -> LineString<T> {
        if source.0.is_empty() {
            return source.clone();
        }
        let mut coords = source.0.clone();
        self.snap_vertices(&mut coords, snap_points);
        self.snap_segments(&mut coords, snap_points);
        LineString(coords)
    }

    /// For each source vertex, replace it with the nearest snap point
    /// within tolerance, unless it already equals that point. A closed
    /// ring's replacement at index 0 is mirrored onto its last vertex so
    /// the ring stays closed.
    fn snap_vertices(&self, coords: &mut [Coord<T>], snap_points: &[Coord<T>]) {
        let last = coords.len() - 1;
        let is_closed = coords.len() > 1 && coords[0] == coords[last];
        for i in 0..coords.len() {
            if is_closed && i == last {
                continue;
            }
            if let Some(snap) = nearest_within(coords[i], snap_points, self.tolerance) {
                if coords[i] != snap {
                    let snap = nudge_off_neighbor(coords, i, snap);
                    coords[i] = snap;
                    if is_closed && i == 0 {
                        coords[last] = snap;
                    }
                }
            }
        }
    }

    /// For each snap point not already coincident with a source vertex,
    /// find the nearest source segment within tolerance and insert the
    /// point as a new vertex there.
    fn snap_segments(&self, coords: &mut Vec<Coord<T>>, snap_points: &[Coord<T>]) {
        for &snap in &distinct_snap_points(snap_points) {
            if coords.iter().any(|&c| c == snap) {
                continue;
            }
            if let Some(insert_at) = self.nearest_segment(coords, snap) {
                coords.insert(insert_at + 1, snap);
            }
        }
    }

    fn nearest_segment(&self, coords: &[Coord<T>], point: Coord<T>) -> Option<usize> {
        let mut best: Option<(usize, T)> = None;
        for i in 0..coords.len().saturating_sub(1) {
            let (a, b) = (coords[i], coords[i + 1]);
            if !self.allow_snapping_to_source_vertices && (a == point || b == point) {
                continue;
            }
            let d = distance_to_segment(point, a, b);
            if d > self.tolerance {
                continue;
            }
            if best.map(|(_, best_d)| d < best_d).unwrap_or(true) {
                best = Some((i, d));
            }
        }
        best.map(|(i, _)| i)
    }
}

/// If snapping vertex `i` onto `snap` would make it coincide exactly with
/// its already-placed predecessor — collapsing the segment between them to
/// zero length — nudge it one ULP toward infinity on `y` instead. The nudge
/// is far smaller than any realistic `tolerance`, so the point stays a
/// valid snap target while the edge stays non-degenerate.
fn nudge_off_neighbor<T: OverlayFloat>(coords: &[Coord<T>], i: usize, snap: Coord<T>) -> Coord<T> {
    if i > 0 && coords[i - 1] == snap {
        Coord { x: snap.x, y: snap.y.next_after(T::infinity()) }
    } else {
        snap
    }
}

fn nearest_within<T: OverlayFloat>(coord: Coord<T>, snap_points: &[Coord<T>], tolerance: T) -> Option<Coord<T>> {
    let tol2 = tolerance * tolerance;
    snap_points
        .iter()
        .copied()
        .filter(|&p| dist2(coord, p) <= tol2)
        .min_by(|&a, &b| dist2(coord, a).partial_cmp(&dist2(coord, b)).unwrap_or(std::cmp::Ordering::Equal))
}

/// Treats a closed ring's snap-point set as not double-counting its
/// duplicated first/last coordinate.
fn distinct_snap_points<T: OverlayFloat>(points: &[Coord<T>]) -> Vec<Coord<T>> {
    if points.len() > 1 && points.first() == points.last() {
        points[..points.len() - 1].to_vec()
    } else {
        points.to_vec()
    }
}

fn distance_to_segment<T: OverlayFloat>(p: Coord<T>, a: Coord<T>, b: Coord<T>) -> T {
    let len2 = dist2(a, b);
    if len2 == T::zero() {
        return dist2(p, a).sqrt();
    }
    let t = ((p.x - a.x) * (b.x - a.x) + (p.y - a.y) * (b.y - a.y)) / len2;
    let t = t.max(T::zero()).min(T::one());
    let proj = Coord { x: a.x + t * (b.x - a.x), y: a.y + t * (b.y - a.y) };
    dist2(p, proj).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snaps_a_close_vertex_onto_the_target() {
        let snapper = LineStringSnapper::new(0.1, true);
        let source = LineString(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]);
        let snapped = snapper.snap_to(&source, &[Coord { x: 1.05, y: 0.0 }]);
        assert_eq!(snapped.0[1], Coord { x: 1.05, y: 0.0 });
    }

    #[test]
    fn inserts_a_vertex_for_an_unmatched_nearby_snap_point() {
        let snapper = LineStringSnapper::new(0.5, false);
        let source = LineString(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 0.0 }]);
        let snapped = snapper.snap_to(&source, &[Coord { x: 1.0, y: 0.1 }]);
        assert_eq!(snapped.0.len(), 3);
        assert_eq!(snapped.0[1], Coord { x: 1.0, y: 0.1 });
    }

    #[test]
    fn leaves_far_vertices_untouched() {
        let snapper = LineStringSnapper::new(0.01, true);
        let source = LineString(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }]);
        let snapped = snapper.snap_to(&source, &[Coord { x: 5.0, y: 5.0 }]);
        assert_eq!(snapped, source);
    }

    #[test]
    fn snapping_two_vertices_onto_the_same_point_nudges_the_second_off_it() {
        // Two source vertices both fall within tolerance of one target, so
        // a naive snap would collapse the segment between them to zero
        // length. The second snapped vertex should end up one ULP away
        // from the first instead of exactly coincident with it.
        let snapper = LineStringSnapper::new(0.2, true);
        let source = LineString(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 0.1, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]);
        let snapped = snapper.snap_to(&source, &[Coord { x: 0.0, y: 0.0 }]);
        assert_eq!(snapped.0[0], Coord { x: 0.0, y: 0.0 });
        assert_ne!(snapped.0[1], snapped.0[0]);
        assert!((snapped.0[1].y - 0.0_f64).abs() < 1e-9);
    }
}
