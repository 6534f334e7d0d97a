use geo_types::{Coord, CoordFloat};

/// The outcome of the orientation predicate `orient2d(p, q, r)`: which way
/// you turn going from segment `p->q` to `q->r`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    Collinear,
}

/// Robust geometric predicates for a scalar type, used everywhere the
/// overlay engine needs to know which side of a line a point falls on.
///
/// Delegates to the `robust` crate's adaptive-precision orientation test
/// when available (`f64`); other float types fall back to the direct
/// determinant, which is what the predicate reduces to away from the
/// ill-conditioned near-collinear cases `robust` exists to rescue.
pub trait Kernel: CoordFloat {
    fn orient2d(p: Coord<Self>, q: Coord<Self>, r: Coord<Self>) -> Orientation;
}

impl Kernel for f64 {
    fn orient2d(p: Coord<f64>, q: Coord<f64>, r: Coord<f64>) -> Orientation {
        let det = robust::orient2d(
            robust::Coord { x: p.x, y: p.y },
            robust::Coord { x: q.x, y: q.y },
            robust::Coord { x: r.x, y: r.y },
        );
        if det > 0.0 {
            Orientation::CounterClockwise
        } else if det < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

impl Kernel for f32 {
    fn orient2d(p: Coord<f32>, q: Coord<f32>, r: Coord<f32>) -> Orientation {
        let det = (q.x - p.x) * (r.y - q.y) - (q.y - p.y) * (r.x - q.x);
        if det > 0.0 {
            Orientation::CounterClockwise
        } else if det < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Collinear
        }
    }
}

/// The numeric trait bound used throughout the overlay core.
///
/// Mirrors the `GeoFloat` / `HasKernel` split used elsewhere in the georust
/// ecosystem: algorithms are generic over this one trait rather than over
/// `CoordFloat` directly, so a single bound pulls in orientation predicates,
/// signed arithmetic (for common-bits translation) and `NextAfter` (for
/// `float_next_after`-based ULP nudging during snapping).
pub trait OverlayFloat:
    CoordFloat + Kernel + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}

impl<T> OverlayFloat for T where
    T: CoordFloat + Kernel + num_traits::Signed + num_traits::Bounded + float_next_after::NextAfter
{
}

/// 2D squared distance between two coordinates, used by nearest-segment
/// search in the line-string snapper.
pub fn dist2<T: OverlayFloat>(a: Coord<T>, b: Coord<T>) -> T {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

/// Lexicographic ordering on coordinates (x, then y), used to key node maps
/// and edge-list comparisons the same way the rest of the corpus does.
pub fn lex_cmp<T: OverlayFloat>(a: &Coord<T>, b: &Coord<T>) -> std::cmp::Ordering {
    a.x.partial_cmp(&b.x)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then_with(|| a.y.partial_cmp(&b.y).unwrap_or(std::cmp::Ordering::Equal))
}
