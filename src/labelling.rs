//! Labelling engine (spec §4.2): turns the accumulated per-edge `Depth` into
//! concrete left/right locations, and fills in node labels that noding alone
//! can't determine (isolated components, nodes touched by only one input).

use geo_types::Geometry;

use crate::graph::{DirectedEdgeId, Edge, PlanarGraph};
use crate::label::Label;
use crate::location::Direction;
use crate::num::OverlayFloat;
use crate::point_locator::PointLocator;

/// Depth normalisation and label-from-depth (spec §4.2, first bullet): for
/// each argument side with a non-null depth, normalise so the minimum is
/// zero, then either derive INTERIOR/EXTERIOR locations from the normalised
/// depth or -- when the two sides collapse to the same depth -- flag the
/// edge as collapsed and re-label that side as a line.
pub fn derive_label<T: OverlayFloat>(edge: &mut Edge<T>) {
    for geom_index in 0..2 {
        if !edge.label().is_area_for(geom_index) {
            continue;
        }
        if edge.depth().is_null_at(geom_index, Direction::Left) {
            continue;
        }
        edge.depth_mut().normalize(geom_index);
        if edge.depth().delta(geom_index) == 0 {
            edge.set_collapsed(true);
            let on = edge.label().position(geom_index, Direction::On);
            edge.label_mut()
                .set_position_as_line(geom_index, on.unwrap_or(crate::location::CoordPos::Interior));
        } else {
            let left = edge.depth().location_at(geom_index, Direction::Left).unwrap();
            let right = edge.depth().location_at(geom_index, Direction::Right).unwrap();
            edge.label_mut().set_position(geom_index, Direction::Left, left);
            edge.label_mut().set_position(geom_index, Direction::Right, right);
        }
    }
}

/// Incomplete-node labelling (spec §4.2, last bullet): a node whose label is
/// still null for one argument wasn't touched by any of that argument's
/// edges, so its relationship to that argument can only be recovered by
/// asking the argument geometry directly.
pub fn label_incomplete_nodes<T: OverlayFloat>(graph: &mut PlanarGraph<T>, geoms: [&Geometry<T>; 2]) {
    let coords: Vec<_> = graph.nodes().iter().map(|n| n.coord()).collect();
    for coord in coords {
        for (geom_index, geom) in geoms.iter().enumerate() {
            let is_null = graph
                .nodes()
                .find(coord)
                .map(|n| n.is_isolated(geom_index))
                .unwrap_or(true);
            if !is_null {
                continue;
            }
            let position = geom.locate(coord);
            if let Some(node) = graph.nodes_mut().find_mut(coord) {
                node.set_on_position(geom_index, position);
            }
        }
    }
    propagate_node_labels_to_star(graph);
}

/// A directed edge whose label is null for an argument (the edge itself
/// doesn't touch that argument) inherits its node's freshly-classified
/// location for that argument, so downstream result extraction never has to
/// treat it as "unknown".
fn propagate_node_labels_to_star<T: OverlayFloat>(graph: &mut PlanarGraph<T>) {
    let assignments: Vec<(DirectedEdgeId, Label)> = graph
        .nodes()
        .iter()
        .flat_map(|n| n.star().iter().map(move |&de| (de, n.label().clone())))
        .collect();
    for (de_id, node_label) in assignments {
        let de = graph.directed_edge_mut(de_id);
        for geom_index in 0..2 {
            if let Some(position) = node_label.on_position(geom_index) {
                de.label_mut().set_all_positions_if_empty(geom_index, position);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::CoordPos;
    use crate::topology_position::TopologyPosition;
    use geo_types::Coord;

    fn area_edge() -> Edge<f64> {
        let label = Label::new(0, TopologyPosition::area(CoordPos::Boundary, CoordPos::Exterior, CoordPos::Interior));
        Edge::new(vec![Coord { x: 0.0, y: 0.0 }, Coord { x: 1.0, y: 0.0 }], label)
    }

    #[test]
    fn derive_label_keeps_area_when_sides_differ() {
        let mut edge = area_edge();
        edge.depth_mut().add(0, Direction::Left, CoordPos::Exterior);
        edge.depth_mut().add(0, Direction::Right, CoordPos::Interior);
        derive_label(&mut edge);
        assert!(!edge.is_collapsed());
        assert_eq!(edge.label().position(0, Direction::Right), Some(CoordPos::Interior));
    }

    #[test]
    fn derive_label_collapses_when_sides_match() {
        let mut edge = area_edge();
        edge.depth_mut().add(0, Direction::Left, CoordPos::Exterior);
        edge.depth_mut().add(0, Direction::Right, CoordPos::Exterior);
        derive_label(&mut edge);
        assert!(edge.is_collapsed());
        assert!(edge.label().is_line_for(0));
    }
}
