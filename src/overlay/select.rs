use crate::graph::{sym_of, PlanarGraph};
use crate::location::Direction;
use crate::num::OverlayFloat;

use super::op::{is_result, OpCode};

/// Marks area directed edges as `inResult` (spec §4.3, "Area edges"). For
/// each non-collapsed area edge, a directed edge is selected when
/// `isResult` holds for the locations on its *right*, since reading the
/// right-hand side is what keeps selected shells oriented clockwise. When
/// both a directed edge and its sym qualify, they cancel (the edge would
/// contribute a zero-width sliver) and neither is marked.
///
/// Also flags the underlying `Edge` as covered when its area reading put it
/// in the result, so the line builder skips emitting the same location
/// twice.
pub fn mark_result_edges<T: OverlayFloat>(graph: &mut PlanarGraph<T>, op: OpCode) {
    for edge_id in 0..graph.edge_count() {
        let edge = graph.edge(edge_id);
        if edge.is_collapsed() || !edge.label().is_area() {
            continue;
        }
        let fwd = edge_id * 2;
        let bwd = sym_of(fwd);
        let fwd_in = is_result(
            graph.directed_edge(fwd).label().position(0, Direction::Right),
            graph.directed_edge(fwd).label().position(1, Direction::Right),
            op,
        );
        let bwd_in = is_result(
            graph.directed_edge(bwd).label().position(0, Direction::Right),
            graph.directed_edge(bwd).label().position(1, Direction::Right),
            op,
        );
        if fwd_in && bwd_in {
            continue;
        }
        graph.directed_edge(fwd).set_in_result(fwd_in);
        graph.directed_edge(bwd).set_in_result(bwd_in);
        if fwd_in || bwd_in {
            graph.edge_mut(edge_id).set_covered(true);
        }
    }
}
