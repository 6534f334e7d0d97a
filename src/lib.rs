//! Topological overlay and polygonal union core for 2D planar geometry.
//!
//! The public surface is small and deliberately so: a single [`overlay`]
//! entry point for the four set operations, plus [`unary_union`] and
//! [`cascaded_union`] for batch polygon dissolution. Everything underneath
//! — the labelled planar graph, result extraction, ring assembly, the
//! common-bits/snap robustness wrappers — is an implementation detail
//! reachable only through these three calls and the error type they
//! return.

mod depth;
mod error;
mod geom_util;
mod graph;
mod label;
mod labelling;
mod line_intersector;
mod location;
mod noding;
mod num;
mod overlay;
mod point_locator;
mod precision;
mod snap;
mod topology_position;
mod union;

pub use error::{OverlayResult, TopologyError};
pub use location::CoordPos;
pub use num::OverlayFloat;
pub use overlay::OpCode;
pub use precision::PrecisionModel;

use geo_types::Geometry;

/// Runs one of the four set operations (`INTERSECTION`, `UNION`,
/// `DIFFERENCE`, `SYMDIFFERENCE`) between two geometries, producing the
/// most specific geometry type that represents the result (spec §4, §6).
///
/// Wrapped in the snap-if-needed fallback: a `NodingFailure` or
/// `OrphanHole` from the plain overlay triggers one retry through the
/// common-bits/vertex-snapping path before the original error is
/// surfaced to the caller (spec §4.6).
pub fn overlay<T: OverlayFloat>(g0: Geometry<T>, g1: Geometry<T>, op: OpCode) -> OverlayResult<Geometry<T>, T> {
    snap::overlay(g0, g1, op)
}

/// Same as [`overlay`], but with an explicit [`PrecisionModel`] for each
/// input (spec §3, §4.6 step 1). The model rounds each input onto its grid
/// before noding and floors the snap-retry tolerance at half the grid
/// cell's diagonal, so a `FIXED` model never gets snapped at a tolerance
/// finer than its own rounding.
pub fn overlay_with_precision<T: OverlayFloat>(
    g0: Geometry<T>,
    g1: Geometry<T>,
    op: OpCode,
    precision0: PrecisionModel<T>,
    precision1: PrecisionModel<T>,
) -> OverlayResult<Geometry<T>, T> {
    snap::overlay_with_precision(g0, precision0, g1, precision1, op)
}

/// Dissolves a batch of polygons via a balanced binary reduction over an
/// STR-tree's spatial grouping (spec §4.5). Returns `None` for an empty
/// input list.
pub fn cascaded_union<T: OverlayFloat>(polygons: Vec<geo_types::Polygon<T>>) -> OverlayResult<Option<Geometry<T>>, T> {
    union::CascadedUnion::new(polygons).union()
}

/// Unions a mixed collection of geometries, partitioning by dimension and
/// recombining the per-dimension results (spec §4.8). Returns `None` only
/// when the input list itself is empty.
pub fn unary_union<T: OverlayFloat>(geoms: &[Geometry<T>]) -> OverlayResult<Option<Geometry<T>>, T> {
    union::unary_union(geoms)
}
