use geo_types::{Coord, Line};

use crate::num::{Kernel, Orientation, OverlayFloat};

/// The result of intersecting two line segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection<T: OverlayFloat> {
    /// The segments meet in a single point, which may or may not be
    /// interior to both (see `is_proper`).
    SinglePoint { intersection: Coord<T>, is_proper: bool },
    /// The segments overlap collinearly in a sub-segment.
    Collinear { intersection: Line<T> },
}

impl<T: OverlayFloat> LineIntersection<T> {
    pub fn is_proper(&self) -> bool {
        matches!(self, Self::SinglePoint { is_proper: true, .. })
    }
}

/// A `LineIntersector` computes the intersection(s) of two line segments and
/// classifies whether the intersection lies in both segments' interiors.
///
/// This is the external collaborator named in spec §6; `RobustLineIntersector`
/// is the one concrete implementation the core ships, since a core with no
/// intersector at all can't be exercised.
pub trait LineIntersector<T: OverlayFloat> {
    fn compute_intersection(&self, p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>>;
}

/// Orientation-predicate based line intersector, following the structure of
/// JTS's `RobustLineIntersector`: reject via bounding-box and orientation
/// tests before falling back to an explicit determinant solve, and snap
/// intersections that land on an input endpoint to that endpoint exactly
/// (float division of a near-degenerate system is the single biggest source
/// of noding failures downstream).
#[derive(Debug, Default, Clone, Copy)]
pub struct RobustLineIntersector;

impl<T: OverlayFloat> LineIntersector<T> for RobustLineIntersector {
    fn compute_intersection(&self, p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>> {
        line_intersection(p, q)
    }
}

fn bbox_intersects<T: OverlayFloat>(p: Line<T>, q: Line<T>) -> bool {
    let (p_min_x, p_max_x) = minmax(p.start.x, p.end.x);
    let (p_min_y, p_max_y) = minmax(p.start.y, p.end.y);
    let (q_min_x, q_max_x) = minmax(q.start.x, q.end.x);
    let (q_min_y, q_max_y) = minmax(q.start.y, q.end.y);
    p_min_x <= q_max_x && q_min_x <= p_max_x && p_min_y <= q_max_y && q_min_y <= p_max_y
}

fn minmax<T: OverlayFloat>(a: T, b: T) -> (T, T) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

pub fn line_intersection<T: OverlayFloat>(p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>> {
    if !bbox_intersects(p, q) {
        return None;
    }

    use Orientation::*;
    let p_q1 = T::orient2d(p.start, p.end, q.start);
    let p_q2 = T::orient2d(p.start, p.end, q.end);
    if matches!((p_q1, p_q2), (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)) {
        return None;
    }

    let q_p1 = T::orient2d(q.start, q.end, p.start);
    let q_p2 = T::orient2d(q.start, q.end, p.end);
    if matches!((q_p1, q_p2), (Clockwise, Clockwise) | (CounterClockwise, CounterClockwise)) {
        return None;
    }

    if matches!((p_q1, p_q2, q_p1, q_p2), (Collinear, Collinear, Collinear, Collinear)) {
        return collinear_intersection(p, q);
    }

    if p_q1 == Collinear || p_q2 == Collinear || q_p1 == Collinear || q_p2 == Collinear {
        let intersection = if p.start == q.start || p.start == q.end {
            p.start
        } else if p.end == q.start || p.end == q.end {
            p.end
        } else if p_q1 == Collinear {
            q.start
        } else if p_q2 == Collinear {
            q.end
        } else if q_p1 == Collinear {
            p.start
        } else {
            p.end
        };
        Some(LineIntersection::SinglePoint { intersection, is_proper: false })
    } else {
        Some(LineIntersection::SinglePoint {
            intersection: proper_intersection(p, q),
            is_proper: true,
        })
    }
}

fn proper_intersection<T: OverlayFloat>(p: Line<T>, q: Line<T>) -> Coord<T> {
    // Standard line/line intersection via Cramer's rule on the 2x2 system.
    let (p1, p2, q1, q2) = (p.start, p.end, q.start, q.end);
    let denom = (p2.x - p1.x) * (q2.y - q1.y) - (p2.y - p1.y) * (q2.x - q1.x);
    if denom.is_zero() {
        // Degenerate (near-collinear past predicate resolution); fall back
        // to the closer endpoint as JTS's central-endpoint heuristic does.
        return central_endpoint_heuristic(p, q);
    }
    let t = ((q1.x - p1.x) * (q2.y - q1.y) - (q1.y - p1.y) * (q2.x - q1.x)) / denom;
    Coord {
        x: p1.x + t * (p2.x - p1.x),
        y: p1.y + t * (p2.y - p1.y),
    }
}

fn central_endpoint_heuristic<T: OverlayFloat>(p: Line<T>, q: Line<T>) -> Coord<T> {
    let candidates = [p.start, p.end, q.start, q.end];
    let centroid = Coord {
        x: (p.start.x + p.end.x + q.start.x + q.end.x) / T::from(4).unwrap(),
        y: (p.start.y + p.end.y + q.start.y + q.end.y) / T::from(4).unwrap(),
    };
    candidates
        .into_iter()
        .min_by(|a, b| crate::num::dist2(*a, centroid).partial_cmp(&crate::num::dist2(*b, centroid)).unwrap())
        .unwrap()
}

fn collinear_intersection<T: OverlayFloat>(p: Line<T>, q: Line<T>) -> Option<LineIntersection<T>> {
    let on_p = |c: Coord<T>| in_range(c, p);
    let on_q = |c: Coord<T>| in_range(c, q);

    let mut candidates = vec![];
    if on_q(p.start) {
        candidates.push(p.start);
    }
    if on_q(p.end) {
        candidates.push(p.end);
    }
    if on_p(q.start) {
        candidates.push(q.start);
    }
    if on_p(q.end) {
        candidates.push(q.end);
    }
    candidates.sort_by(crate::num::lex_cmp);
    candidates.dedup();

    match candidates.len() {
        0 => None,
        1 => Some(LineIntersection::SinglePoint { intersection: candidates[0], is_proper: false }),
        _ => Some(LineIntersection::Collinear {
            intersection: Line::new(candidates[0], *candidates.last().unwrap()),
        }),
    }
}

fn in_range<T: OverlayFloat>(c: Coord<T>, line: Line<T>) -> bool {
    let (min_x, max_x) = minmax(line.start.x, line.end.x);
    let (min_y, max_y) = minmax(line.start.y, line.end.y);
    c.x >= min_x && c.x <= max_x && c.y >= min_y && c.y <= max_y
}

/// A robust, easy-to-compute (non-Euclidean) metric of how far an
/// intersection point lies along a segment, used to order multiple
/// intersections on the same edge. Whichever ordinate the segment varies
/// more in is the one used, so the metric stays well-conditioned for
/// near-axis-aligned edges.
pub fn compute_edge_distance<T: OverlayFloat>(intersection: Coord<T>, line: Line<T>) -> T {
    let dx = (line.end.x - line.start.x).abs();
    let dy = (line.end.y - line.start.y).abs();
    if intersection == line.start {
        T::zero()
    } else if intersection == line.end {
        if dx > dy {
            dx
        } else {
            dy
        }
    } else {
        let idx = (intersection.x - line.start.x).abs();
        let idy = (intersection.y - line.start.y).abs();
        let dist = if dx > dy { idx } else { idy };
        if dist.is_zero() {
            idx.max(idy)
        } else {
            dist
        }
    }
}
