use geo_types::{Coord, Geometry};

use crate::geom_util::{for_each_coord, map_coords};
use crate::num::OverlayFloat;

/// Removes the common high-order mantissa bits shared by every coordinate
/// across a pair of geometries, translating both close to the origin so
/// overlay arithmetic stays well-conditioned, and restores the translation
/// on the result afterward (spec §4.6, step 2).
#[derive(Debug, Clone, Copy)]
pub struct CommonBitsRemover<T: OverlayFloat> {
    common: Coord<T>,
}

impl<T: OverlayFloat> CommonBitsRemover<T> {
    pub fn new(g0: &Geometry<T>, g1: &Geometry<T>) -> Self {
        let mut xs = Vec::new();
        let mut ys = Vec::new();
        let mut collect = |c: Coord<T>| {
            xs.push(c.x);
            ys.push(c.y);
        };
        for_each_coord(g0, &mut collect);
        for_each_coord(g1, &mut collect);
        CommonBitsRemover { common: Coord { x: common_bits(&xs), y: common_bits(&ys) } }
    }

    pub fn remove(&self, g: &Geometry<T>) -> Geometry<T> {
        let common = self.common;
        map_coords(g, &move |c| Coord { x: c.x - common.x, y: c.y - common.y })
    }

    pub fn restore(&self, g: &Geometry<T>) -> Geometry<T> {
        let common = self.common;
        map_coords(g, &move |c| Coord { x: c.x + common.x, y: c.y + common.y })
    }
}

/// The value obtained by masking off every bit of the IEEE-754 pattern past
/// the point where two values first diverge, across every value seen.
fn common_bits<T: OverlayFloat>(values: &[T]) -> T {
    let mut bits: Option<u64> = None;
    for &v in values {
        let this_bits = v.to_f64().unwrap_or(0.0).to_bits();
        bits = Some(match bits {
            None => this_bits,
            Some(common) => longest_common_prefix(common, this_bits),
        });
    }
    T::from(f64::from_bits(bits.unwrap_or(0))).unwrap_or_else(T::zero)
}

fn longest_common_prefix(a: u64, b: u64) -> u64 {
    let diff = a ^ b;
    if diff == 0 {
        return a;
    }
    let highest_diff_bit = 63 - diff.leading_zeros();
    let keep_mask = if highest_diff_bit == 63 { 0 } else { !0u64 << (highest_diff_bit + 1) };
    a & keep_mask
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_bits_of_identical_values_is_that_value() {
        assert_eq!(common_bits(&[3.25_f64, 3.25, 3.25]), 3.25);
    }

    #[test]
    fn common_bits_masks_out_the_differing_tail() {
        let a = 1_000_000.0_f64;
        let b = 1_000_000.25_f64;
        let common = common_bits(&[a, b]);
        // the shared high-order bits still round to a value close to both
        assert!((common - a).abs() < 1.0);
    }

    #[test]
    fn remove_then_restore_is_identity() {
        use geo_types::{point, Geometry};
        let g0: Geometry<f64> = point!(x: 100.0, y: 200.0).into();
        let g1: Geometry<f64> = point!(x: 100.5, y: 200.5).into();
        let remover = CommonBitsRemover::new(&g0, &g1);
        let shifted = remover.remove(&g0);
        let restored = remover.restore(&shifted);
        match restored {
            Geometry::Point(p) => {
                assert!((p.x() - 100.0).abs() < 1e-6);
                assert!((p.y() - 200.0).abs() < 1e-6);
            }
            _ => panic!("expected point"),
        }
    }
}
