use geo_types::Line;

use crate::error::{OverlayResult, TopologyError};
use crate::graph::Edge;
use crate::line_intersector::{LineIntersection, LineIntersector};
use crate::num::OverlayFloat;

type Segment<T> = (usize, usize, Line<T>);

fn all_segments<T: OverlayFloat>(edges: &[Edge<T>]) -> Vec<Segment<T>> {
    let mut out = Vec::new();
    for (edge_index, edge) in edges.iter().enumerate() {
        let coords = edge.coords();
        for seg_index in 0..coords.len() - 1 {
            out.push((edge_index, seg_index, Line::new(coords[seg_index], coords[seg_index + 1])));
        }
    }
    out
}

/// Self-noding (spec §4.1 step 2): intersects every pair of non-adjacent
/// segments drawn from `edges` (which may belong to different rings or
/// components of the same input) and records each crossing on both edges it
/// touches.
pub fn self_node<T: OverlayFloat>(edges: &mut [Edge<T>], intersector: &dyn LineIntersector<T>) {
    let segs = all_segments(edges);
    let mut events = Vec::new();
    for a in 0..segs.len() {
        for b in (a + 1)..segs.len() {
            let (ei, si, li) = segs[a];
            let (ej, sj, lj) = segs[b];
            if ei == ej && si.abs_diff(sj) <= 1 {
                continue;
            }
            if let Some(intersection) = intersector.compute_intersection(li, lj) {
                events.push((ei, intersection, li, si));
                events.push((ej, intersection, lj, sj));
            }
        }
    }
    for (edge_index, intersection, line, seg_index) in events {
        edges[edge_index].add_intersections(intersection, line, seg_index);
    }
}

/// Cross-noding (spec §4.1 step 3): intersects every segment of `a` against
/// every segment of `b`.
pub fn node_pairs<T: OverlayFloat>(a: &mut [Edge<T>], b: &mut [Edge<T>], intersector: &dyn LineIntersector<T>) {
    let segs_a = all_segments(a);
    let segs_b = all_segments(b);
    let mut events_a = Vec::new();
    let mut events_b = Vec::new();
    for &(ei, si, li) in &segs_a {
        for &(ej, sj, lj) in &segs_b {
            if let Some(intersection) = intersector.compute_intersection(li, lj) {
                events_a.push((ei, intersection, li, si));
                events_b.push((ej, intersection, lj, sj));
            }
        }
    }
    for (edge_index, intersection, line, seg_index) in events_a {
        a[edge_index].add_intersections(intersection, line, seg_index);
    }
    for (edge_index, intersection, line, seg_index) in events_b {
        b[edge_index].add_intersections(intersection, line, seg_index);
    }
}

/// `FastNodingValidator` equivalent (spec §4.1 step 6): rechecks that no two
/// segments drawn from `edges` still cross anywhere but at a shared
/// endpoint. Segments within the same edge are skipped, since adjacent
/// segments of one already-split edge always share their common endpoint.
pub fn validate<T: OverlayFloat>(edges: &[Edge<T>], intersector: &dyn LineIntersector<T>) -> OverlayResult<(), T> {
    let segs = all_segments(edges);
    for a in 0..segs.len() {
        for b in (a + 1)..segs.len() {
            let (ei, _, li) = segs[a];
            let (ej, _, lj) = segs[b];
            if ei == ej {
                continue;
            }
            check_pair(li, lj, intersector)?;
        }
    }
    Ok(())
}

/// Cross-set variant of `validate`, used to recheck noding between two
/// already-individually-validated edge sets (e.g. the two inputs' final
/// split edges) without re-testing either set against itself.
pub fn validate_pair<T: OverlayFloat>(
    a: &[Edge<T>],
    b: &[Edge<T>],
    intersector: &dyn LineIntersector<T>,
) -> OverlayResult<(), T> {
    let segs_a = all_segments(a);
    let segs_b = all_segments(b);
    for &(_, _, li) in &segs_a {
        for &(_, _, lj) in &segs_b {
            check_pair(li, lj, intersector)?;
        }
    }
    Ok(())
}

fn check_pair<T: OverlayFloat>(li: Line<T>, lj: Line<T>, intersector: &dyn LineIntersector<T>) -> OverlayResult<(), T> {
    let Some(intersection) = intersector.compute_intersection(li, lj) else {
        return Ok(());
    };
    let coord = match intersection {
        LineIntersection::SinglePoint { intersection, .. } => intersection,
        LineIntersection::Collinear { intersection } => intersection.start,
    };
    let is_vertex = coord == li.start || coord == li.end || coord == lj.start || coord == lj.end;
    if is_vertex {
        Ok(())
    } else {
        Err(TopologyError::NodingFailure(coord))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::label::Label;
    use crate::line_intersector::RobustLineIntersector;
    use geo_types::Coord;

    fn edge(coords: Vec<Coord<f64>>) -> Edge<f64> {
        Edge::new(coords, Label::empty_line_or_point())
    }

    #[test]
    fn self_node_splits_crossing_edges() {
        let mut edges = vec![
            edge(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 }]),
            edge(vec![Coord { x: 0.0, y: 2.0 }, Coord { x: 2.0, y: 0.0 }]),
        ];
        self_node(&mut edges, &RobustLineIntersector);
        let split0 = edges[0].split_at_intersections();
        assert_eq!(split0.len(), 2);
        assert!(split0.iter().any(|s| s.contains(&Coord { x: 1.0, y: 1.0 })));
    }

    #[test]
    fn validate_accepts_shared_endpoint() {
        let edges = vec![
            edge(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 1.0 }]),
            edge(vec![Coord { x: 1.0, y: 1.0 }, Coord { x: 2.0, y: 0.0 }]),
        ];
        assert!(validate(&edges, &RobustLineIntersector).is_ok());
    }

    #[test]
    fn validate_rejects_unnoded_crossing() {
        let edges = vec![
            edge(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 2.0, y: 2.0 }]),
            edge(vec![Coord { x: 0.0, y: 2.0 }, Coord { x: 2.0, y: 0.0 }]),
        ];
        assert!(validate(&edges, &RobustLineIntersector).is_err());
    }
}
