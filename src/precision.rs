//! The coordinate precision model (spec §3): every geometry is either
//! FLOATING (full native precision) or FIXED to a grid of a given scale.
//! Two places in the core consult it: `OverlayOp` rounds its inputs onto
//! the model's grid before noding (mirroring a `PrecisionModel`-aware
//! `GeometryFactory`), and the snap-tolerance computation (spec §4.6 step
//! 1) floors the tolerance at half the model's grid-cell diagonal so
//! snapping never undershoots the model's own rounding.

use geo_types::Coord;

use crate::num::OverlayFloat;

/// FLOATING or FIXED-with-scale (spec §3). `scale` is coordinate units per
/// grid cell, i.e. a coordinate snaps to the nearest multiple of `1/scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PrecisionModel<T> {
    Floating,
    Fixed { scale: T },
}

impl<T> Default for PrecisionModel<T> {
    /// Inferred when no precision model is supplied (spec §3, SPEC_FULL.md §B).
    fn default() -> Self {
        PrecisionModel::Floating
    }
}

impl<T: OverlayFloat> PrecisionModel<T> {
    /// `fixedGridTol` (spec §4.6 step 1): `(1/scale) * 2 / sqrt(2)`. Zero
    /// for FLOATING.
    pub fn fixed_grid_tolerance(&self) -> T {
        match self {
            PrecisionModel::Floating => T::zero(),
            PrecisionModel::Fixed { scale } => {
                let cell = T::one() / *scale;
                cell * T::from(2.0).unwrap() / T::from(std::f64::consts::SQRT_2).unwrap()
            }
        }
    }

    /// Rounds a coordinate onto this model's grid; a no-op for FLOATING.
    pub fn make_precise(&self, coord: Coord<T>) -> Coord<T> {
        match self {
            PrecisionModel::Floating => coord,
            PrecisionModel::Fixed { scale } => Coord {
                x: (coord.x * *scale).round() / *scale,
                y: (coord.y * *scale).round() / *scale,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floating_model_has_no_grid_tolerance() {
        assert_eq!(PrecisionModel::<f64>::Floating.fixed_grid_tolerance(), 0.0);
    }

    #[test]
    fn fixed_model_grid_tolerance_matches_formula() {
        let model = PrecisionModel::Fixed { scale: 2.0_f64 };
        let expected = (1.0 / 2.0) * 2.0 / std::f64::consts::SQRT_2;
        assert!((model.fixed_grid_tolerance() - expected).abs() < 1e-12);
    }

    #[test]
    fn fixed_model_rounds_onto_the_grid() {
        let model = PrecisionModel::Fixed { scale: 10.0_f64 };
        let rounded = model.make_precise(Coord { x: 1.04, y: 1.06 });
        assert!((rounded.x - 1.0).abs() < 1e-12);
        assert!((rounded.y - 1.1).abs() < 1e-12);
    }

    #[test]
    fn floating_model_leaves_coordinates_untouched() {
        let coord = Coord { x: 1.23456789, y: 9.87654321 };
        assert_eq!(PrecisionModel::<f64>::Floating.make_precise(coord), coord);
    }
}
