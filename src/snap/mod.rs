//! Robustness wrappers around the core overlay (spec §4.6): common-bits
//! translation, vertex snapping, and the snap-if-needed fallback.

mod common_bits;
mod line_string_snapper;
mod snap_overlay;

pub use common_bits::CommonBitsRemover;
pub use line_string_snapper::LineStringSnapper;
pub use snap_overlay::{snap_tolerance, SnapOverlay};

use geo_types::Geometry;
use log::debug;

use crate::error::OverlayResult;
use crate::num::OverlayFloat;
use crate::overlay::{OpCode, OverlayOp};
use crate::precision::PrecisionModel;

/// `SnapIfNeededOverlay` (spec §4.6): try the plain overlay first; on any
/// failure retry once through the snap-and-common-bits path. If the retry
/// also fails, the *original* error is what the caller sees.
pub fn overlay<T: OverlayFloat>(g0: Geometry<T>, g1: Geometry<T>, op: OpCode) -> OverlayResult<Geometry<T>, T> {
    overlay_with_precision(g0, PrecisionModel::default(), g1, PrecisionModel::default(), op)
}

/// Same as [`overlay`], threading an explicit precision model for each
/// input through both the plain attempt and the snap retry (spec §3, §4.6).
pub fn overlay_with_precision<T: OverlayFloat>(
    g0: Geometry<T>,
    precision0: PrecisionModel<T>,
    g1: Geometry<T>,
    precision1: PrecisionModel<T>,
    op: OpCode,
) -> OverlayResult<Geometry<T>, T> {
    match OverlayOp::new(g0.clone(), g1.clone()).with_precision_models(precision0, precision1).result(op) {
        Ok(result) => Ok(result),
        Err(first_err) => {
            debug!("plain overlay failed ({first_err}), retrying with snapping");
            match SnapOverlay::overlay(&g0, precision0, &g1, precision1, op) {
                Ok(result) => Ok(result),
                Err(_) => Err(first_err),
            }
        }
    }
}
