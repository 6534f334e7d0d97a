use geo_types::{Coord, Geometry};

use crate::error::OverlayResult;
use crate::geom_util::{envelope_diagonal, for_each_coord, map_line_strings};
use crate::num::OverlayFloat;
use crate::overlay::{OpCode, OverlayOp};
use crate::precision::PrecisionModel;

use super::common_bits::CommonBitsRemover;
use super::line_string_snapper::LineStringSnapper;

const SCALE_FACTOR: f64 = 1e-9;

/// `tol(g) = max(size(g) * 1e-9, fixedGridTol)` (spec §4.6, step 1).
fn tolerance_for<T: OverlayFloat>(g: &Geometry<T>, precision: &PrecisionModel<T>) -> T {
    let size_tol = envelope_diagonal(g) * T::from(SCALE_FACTOR).unwrap();
    let grid_tol = precision.fixed_grid_tolerance();
    if size_tol > grid_tol {
        size_tol
    } else {
        grid_tol
    }
}

pub fn snap_tolerance<T: OverlayFloat>(
    g0: &Geometry<T>,
    precision0: &PrecisionModel<T>,
    g1: &Geometry<T>,
    precision1: &PrecisionModel<T>,
) -> T {
    let a = tolerance_for(g0, precision0);
    let b = tolerance_for(g1, precision1);
    if a < b {
        a
    } else {
        b
    }
}

fn vertices_of<T: OverlayFloat>(g: &Geometry<T>) -> Vec<Coord<T>> {
    let mut out = Vec::new();
    for_each_coord(g, &mut |c| out.push(c));
    out
}

fn self_snap<T: OverlayFloat>(g: &Geometry<T>, tolerance: T) -> Geometry<T> {
    let points = vertices_of(g);
    let snapper = LineStringSnapper::new(tolerance, true);
    map_line_strings(g, &|ls| snapper.snap_to(ls, &points))
}

fn snap_to_other<T: OverlayFloat>(g: &Geometry<T>, other_points: &[Coord<T>], tolerance: T) -> Geometry<T> {
    let snapper = LineStringSnapper::new(tolerance, false);
    map_line_strings(g, &|ls| snapper.snap_to(ls, other_points))
}

/// `SnapOverlay` (spec §4.6): remove the inputs' common bits, self-snap
/// each to close slivers, snap the second to the (already snapped) first,
/// run the plain overlay on that pair, and restore the translation on the
/// output. Ordering matters: reversing "remove common bits" and "snap"
/// changes the effective tolerance (spec §9 design note).
pub struct SnapOverlay;

impl SnapOverlay {
    pub fn overlay<T: OverlayFloat>(
        g0: &Geometry<T>,
        precision0: PrecisionModel<T>,
        g1: &Geometry<T>,
        precision1: PrecisionModel<T>,
        op: OpCode,
    ) -> OverlayResult<Geometry<T>, T> {
        let tolerance = snap_tolerance(g0, &precision0, g1, &precision1);
        let remover = CommonBitsRemover::new(g0, g1);
        let shifted0 = remover.remove(g0);
        let shifted1 = remover.remove(g1);

        let snapped0 = self_snap(&shifted0, tolerance);
        let snapped1 = self_snap(&shifted1, tolerance);
        let points0 = vertices_of(&snapped0);
        let aligned1 = snap_to_other(&snapped1, &points0, tolerance);

        let result = OverlayOp::new(snapped0, aligned1).with_precision_models(precision0, precision1).result(op)?;
        Ok(remover.restore(&result))
    }
}
