use geo_types::{Geometry, LineString, Point, Polygon};

use crate::graph::PlanarGraph;
use crate::location::CoordPos;
use crate::num::OverlayFloat;
use crate::point_locator::PointLocator;

use super::op::{is_result, OpCode};

/// Point-edge extraction (spec §4.3, "Point edges"): an isolated node (no
/// incident directed edge already placed in the result) contributes a
/// `Point` when its own degree is zero, or the operator is INTERSECTION,
/// its label passes `isResult`, and its coordinate isn't already covered by
/// a result line or polygon.
pub fn build_points<T: OverlayFloat>(
    graph: &PlanarGraph<T>,
    op: OpCode,
    result_lines: &[LineString<T>],
    result_polygons: &[Polygon<T>],
) -> Vec<Point<T>> {
    let mut out = Vec::new();
    for node in graph.nodes().iter() {
        let incident_in_result = node.star().iter().any(|&de| graph.directed_edge(de).is_in_result());
        if incident_in_result {
            continue;
        }
        if !(node.star().is_empty() || op == OpCode::Intersection) {
            continue;
        }
        let on0 = node.label().on_position(0);
        let on1 = node.label().on_position(1);
        if !is_result(on0, on1, op) {
            continue;
        }
        let coord = node.coord();
        if covered_by(coord, result_lines, result_polygons) {
            continue;
        }
        out.push(Point(coord));
    }
    out
}

fn covered_by<T: OverlayFloat>(coord: geo_types::Coord<T>, lines: &[LineString<T>], polygons: &[Polygon<T>]) -> bool {
    for line in lines {
        let geom = Geometry::LineString(line.clone());
        if !matches!(geom.locate(coord), CoordPos::Exterior) {
            return true;
        }
    }
    for polygon in polygons {
        let geom = Geometry::Polygon(polygon.clone());
        if !matches!(geom.locate(coord), CoordPos::Exterior) {
            return true;
        }
    }
    false
}
