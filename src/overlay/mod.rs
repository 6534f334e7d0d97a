//! Result extraction and the overlay driver (spec §4.3-§4.5, §5).

mod line_builder;
mod op;
mod point_builder;
mod polygon_builder;
mod select;

pub use op::{is_result, OpCode};

use geo_types::{Geometry, GeometryCollection, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon};
use log::debug;

use crate::error::OverlayResult;
use crate::geom_util::map_coords;
use crate::line_intersector::{LineIntersector, RobustLineIntersector};
use crate::noding;
use crate::num::OverlayFloat;
use crate::precision::PrecisionModel;

/// Drives one overlay call end to end: noding, labelling, result
/// extraction, ring assembly, and geometry construction (spec §4, §5).
///
/// One-shot by construction: `result` consumes `self`, so a completed
/// `OverlayOp` cannot be reused, satisfying the one-shot contract without a
/// runtime guard.
pub struct OverlayOp<T: OverlayFloat> {
    g0: Geometry<T>,
    g1: Geometry<T>,
    intersector: Box<dyn LineIntersector<T>>,
    precision0: PrecisionModel<T>,
    precision1: PrecisionModel<T>,
}

impl<T: OverlayFloat> OverlayOp<T> {
    pub fn new(g0: Geometry<T>, g1: Geometry<T>) -> Self {
        Self::with_intersector(g0, g1, Box::new(RobustLineIntersector))
    }

    pub fn with_intersector(g0: Geometry<T>, g1: Geometry<T>, intersector: Box<dyn LineIntersector<T>>) -> Self {
        OverlayOp { g0, g1, intersector, precision0: PrecisionModel::default(), precision1: PrecisionModel::default() }
    }

    /// Sets each input's precision model (spec §3, SPEC_FULL.md §B);
    /// inferred as `FLOATING` for both when left unset. Each input is
    /// rounded onto its own model's grid before noding.
    pub fn with_precision_models(mut self, precision0: PrecisionModel<T>, precision1: PrecisionModel<T>) -> Self {
        self.precision0 = precision0;
        self.precision1 = precision1;
        self
    }

    pub fn result(self, op: OpCode) -> OverlayResult<Geometry<T>, T> {
        let g0 = make_precise(&self.g0, &self.precision0);
        let g1 = make_precise(&self.g1, &self.precision1);

        if let Some(fast) = degenerate_fast_path(&g0, &g1, op) {
            return Ok(fast);
        }

        let mut graph = noding::build_graph(&g0, &g1, self.intersector.as_ref())?;
        select::mark_result_edges(&mut graph, op);

        let polygons = polygon_builder::build_polygons(&graph)?;
        let lines = line_builder::build_lines(&graph, op);
        let points = point_builder::build_points(&graph, op, &lines, &polygons);
        debug!(
            "overlay {:?}: {} points, {} lines, {} polygons",
            op,
            points.len(),
            lines.len(),
            polygons.len()
        );

        Ok(build_most_specific(points, lines, polygons)
            .unwrap_or_else(|| empty_of_dimension(result_dimension(&g0, &g1, op))))
    }
}

/// Rounds every coordinate of `g` onto `precision`'s grid; a no-op pass
/// through for `FLOATING` (spec §3).
fn make_precise<T: OverlayFloat>(g: &Geometry<T>, precision: &PrecisionModel<T>) -> Geometry<T> {
    if matches!(precision, PrecisionModel::Floating) {
        return g.clone();
    }
    map_coords(g, &|c| precision.make_precise(c))
}

/// §4.7 empty-result dimension rule.
fn result_dimension<T: OverlayFloat>(g0: &Geometry<T>, g1: &Geometry<T>, op: OpCode) -> i8 {
    let (d0, d1) = (dimension(g0), dimension(g1));
    match op {
        OpCode::Intersection => d0.min(d1),
        OpCode::Union | OpCode::SymDifference => d0.max(d1),
        OpCode::Difference => d0,
    }
}

fn dimension<T: OverlayFloat>(g: &Geometry<T>) -> i8 {
    match g {
        Geometry::Point(_) | Geometry::MultiPoint(_) => 0,
        Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => 1,
        Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_) => 2,
        Geometry::GeometryCollection(gc) => gc.iter().map(dimension).max().unwrap_or(0),
    }
}

fn empty_of_dimension<T: OverlayFloat>(dim: i8) -> Geometry<T> {
    match dim {
        0 => Geometry::MultiPoint(MultiPoint(Vec::new())),
        1 => Geometry::MultiLineString(MultiLineString(Vec::new())),
        _ => Geometry::MultiPolygon(MultiPolygon(Vec::new())),
    }
}

/// `GeometryFactory::buildGeometry` analogue (§6): the most specific
/// geometry variant that can represent the accumulated result pools, or
/// `None` if every pool was empty.
fn build_most_specific<T: OverlayFloat>(
    points: Vec<Point<T>>,
    lines: Vec<geo_types::LineString<T>>,
    polygons: Vec<Polygon<T>>,
) -> Option<Geometry<T>> {
    let pool_count = !points.is_empty() as u8 + !lines.is_empty() as u8 + !polygons.is_empty() as u8;
    if pool_count > 1 {
        let mut items = Vec::new();
        items.extend(points.into_iter().map(Geometry::Point));
        items.extend(lines.into_iter().map(Geometry::LineString));
        items.extend(polygons.into_iter().map(Geometry::Polygon));
        return Some(Geometry::GeometryCollection(GeometryCollection(items)));
    }
    if !polygons.is_empty() {
        return Some(if polygons.len() == 1 {
            Geometry::Polygon(polygons.into_iter().next().unwrap())
        } else {
            Geometry::MultiPolygon(MultiPolygon(polygons))
        });
    }
    if !lines.is_empty() {
        return Some(if lines.len() == 1 {
            Geometry::LineString(lines.into_iter().next().unwrap())
        } else {
            Geometry::MultiLineString(MultiLineString(lines))
        });
    }
    if !points.is_empty() {
        return Some(if points.len() == 1 {
            Geometry::Point(points.into_iter().next().unwrap())
        } else {
            Geometry::MultiPoint(MultiPoint(points))
        });
    }
    None
}

/// Degenerate-input fast paths: skip the noding/labelling machinery
/// entirely when either input is empty.
fn degenerate_fast_path<T: OverlayFloat>(g0: &Geometry<T>, g1: &Geometry<T>, op: OpCode) -> Option<Geometry<T>> {
    let empty0 = is_empty(g0);
    let empty1 = is_empty(g1);
    if !empty0 && !empty1 {
        return None;
    }
    Some(match op {
        OpCode::Intersection => empty_of_dimension(result_dimension(g0, g1, op)),
        OpCode::Difference => {
            if empty0 {
                empty_of_dimension(result_dimension(g0, g1, op))
            } else {
                g0.clone()
            }
        }
        OpCode::Union | OpCode::SymDifference => match (empty0, empty1) {
            (true, true) => empty_of_dimension(result_dimension(g0, g1, op)),
            (true, false) => g1.clone(),
            (false, true) => g0.clone(),
            (false, false) => unreachable!("both-empty case handled above"),
        },
    })
}

fn is_empty<T: OverlayFloat>(g: &Geometry<T>) -> bool {
    match g {
        Geometry::Point(_) => false,
        Geometry::MultiPoint(mp) => mp.0.is_empty(),
        Geometry::Line(_) => false,
        Geometry::LineString(ls) => ls.0.is_empty(),
        Geometry::MultiLineString(mls) => mls.0.iter().all(|ls| ls.0.is_empty()),
        Geometry::Polygon(p) => p.exterior().0.is_empty(),
        Geometry::MultiPolygon(mp) => mp.0.iter().all(|p| p.exterior().0.is_empty()),
        Geometry::GeometryCollection(gc) => gc.iter().all(is_empty),
        Geometry::Rect(_) | Geometry::Triangle(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{line_string, polygon, Coord};

    #[test]
    fn union_of_overlapping_squares_has_area_seven() {
        let a: Geometry<f64> = polygon![
            (x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0),
        ]
        .into();
        let b: Geometry<f64> = polygon![
            (x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0),
        ]
        .into();
        let result = OverlayOp::new(a, b).result(OpCode::Union).unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
    }

    #[test]
    fn intersection_of_crossing_lines_is_a_point() {
        let a: Geometry<f64> = line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)].into();
        let b: Geometry<f64> = line_string![(x: 0.0, y: 2.0), (x: 2.0, y: 0.0)].into();
        let result = OverlayOp::new(a, b).result(OpCode::Intersection).unwrap();
        assert_eq!(result, Geometry::Point(Point(Coord { x: 1.0, y: 1.0 })));
    }

    #[test]
    fn union_with_empty_input_returns_the_other_side() {
        let a: Geometry<f64> = polygon![
            (x: 0.0, y: 0.0), (x: 1.0, y: 0.0), (x: 1.0, y: 1.0), (x: 0.0, y: 1.0),
        ]
        .into();
        let empty: Geometry<f64> = Geometry::MultiPolygon(MultiPolygon(Vec::new()));
        let result = OverlayOp::new(a.clone(), empty).result(OpCode::Union).unwrap();
        assert_eq!(result, a);
    }

    #[test]
    fn difference_of_identical_empties_is_empty_of_dimension_a() {
        let empty_line: Geometry<f64> = Geometry::MultiLineString(MultiLineString(Vec::new()));
        let empty_poly: Geometry<f64> = Geometry::MultiPolygon(MultiPolygon(Vec::new()));
        let result = OverlayOp::new(empty_line, empty_poly).result(OpCode::Difference).unwrap();
        assert_eq!(result, Geometry::MultiLineString(MultiLineString(Vec::new())));
    }

    #[test]
    fn fixed_precision_model_rounds_inputs_before_noding() {
        let a: Geometry<f64> = polygon![
            (x: 0.0, y: 0.0), (x: 2.0001, y: 0.0), (x: 2.0001, y: 2.0001), (x: 0.0, y: 2.0001),
        ]
        .into();
        let b: Geometry<f64> = polygon![
            (x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0),
        ]
        .into();
        let result = OverlayOp::new(a, b)
            .with_precision_models(crate::PrecisionModel::Fixed { scale: 1.0 }, crate::PrecisionModel::Fixed { scale: 1.0 })
            .result(OpCode::Union)
            .unwrap();
        assert!(matches!(result, Geometry::Polygon(_)));
    }
}
