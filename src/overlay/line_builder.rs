use geo_types::LineString;

use crate::graph::PlanarGraph;
use crate::location::Direction;
use crate::num::OverlayFloat;

use super::op::{is_result, OpCode};

/// Line-edge extraction (spec §4.3, "Line edges"): a line-typed edge (a
/// genuine lineal input, or an area edge that collapsed to a line for one
/// argument) is emitted when its `on` locations pass `isResult` and it
/// isn't covered by a result area. For INTERSECTION, edges that stayed area
/// for both arguments but whose shared boundary passes `isResult` are also
/// emitted, producing the expected degenerate result where two polygons
/// touch only along an edge.
pub fn build_lines<T: OverlayFloat>(graph: &PlanarGraph<T>, op: OpCode) -> Vec<LineString<T>> {
    let mut out = Vec::new();
    for edge_id in 0..graph.edge_count() {
        let edge = graph.edge(edge_id);
        if edge.is_covered() {
            continue;
        }
        let label = edge.label();
        let on0 = label.position(0, Direction::On);
        let on1 = label.position(1, Direction::On);
        let is_line_edge = label.is_line_for(0) || label.is_line_for(1) || edge.is_collapsed();

        let selected = if is_line_edge {
            is_result(on0, on1, op)
        } else if op == OpCode::Intersection && label.is_area() {
            is_result(on0, on1, OpCode::Intersection)
        } else {
            false
        };

        if selected {
            out.push(LineString(edge.coords().to_vec()));
        }
    }
    out
}
