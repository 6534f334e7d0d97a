use crate::num::{Kernel, Orientation, OverlayFloat};
use geo_types::Coord;

/// Which quadrant of the plane a directed ray `(dx, dy)` points into,
/// labelled so that `NE < NW < SW < SE` sorts rays counter-clockwise from
/// due east. Used as the coarse bucket for ordering directed edges around a
/// node before falling back to the orientation predicate within a bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Quadrant {
    NE,
    NW,
    SW,
    SE,
}

impl Quadrant {
    pub fn new<T: OverlayFloat>(dx: T, dy: T) -> Option<Quadrant> {
        if dx.is_zero() && dy.is_zero() {
            return None;
        }
        Some(match (dy >= T::zero(), dx >= T::zero()) {
            (true, true) => Quadrant::NE,
            (true, false) => Quadrant::NW,
            (false, false) => Quadrant::SW,
            (false, true) => Quadrant::SE,
        })
    }
}

/// Total order on directed edges leaving a common origin, by increasing
/// counter-clockwise angle from the positive x-axis. Two edges in the same
/// quadrant are ordered by the orientation predicate rather than an angle
/// computation, so the comparison stays exact.
pub fn compare_direction<T: OverlayFloat>(origin: Coord<T>, a: Coord<T>, b: Coord<T>) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    if a == b {
        return Ordering::Equal;
    }
    let qa = Quadrant::new(a.x - origin.x, a.y - origin.y);
    let qb = Quadrant::new(b.x - origin.x, b.y - origin.y);
    match (qa, qb) {
        (Some(qa), Some(qb)) if qa != qb => qa.cmp(&qb),
        _ => match T::orient2d(origin, b, a) {
            Orientation::Clockwise => Ordering::Less,
            Orientation::CounterClockwise => Ordering::Greater,
            Orientation::Collinear => Ordering::Equal,
        },
    }
}
