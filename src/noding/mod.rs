//! Noding and edge-list construction (spec §4.1): turns two input
//! geometries into a set of edges whose only intersections are at shared
//! vertices, with accumulated depth and merged labels ready for the
//! labelling engine.

mod edge_list;
mod extract;
mod noder;

pub use edge_list::EdgeList;
pub use extract::{extract, Extracted, RawEdge};
pub use noder::{node_pairs, self_node, validate, validate_pair};

use geo_types::Geometry;
use log::debug;

use crate::error::OverlayResult;
use crate::graph::{Edge, PlanarGraph};
use crate::labelling;
use crate::line_intersector::LineIntersector;
use crate::location::CoordPos;
use crate::num::OverlayFloat;

fn edge_from_raw<T: OverlayFloat>(raw: &RawEdge<T>) -> Edge<T> {
    let mut edge = Edge::new(raw.coords.clone(), raw.label.clone());
    edge.add_vertex_intersections();
    edge
}

fn split_all<T: OverlayFloat>(edges: &[Edge<T>]) -> Vec<Edge<T>> {
    let mut out = Vec::new();
    for edge in edges {
        for coords in edge.split_at_intersections() {
            out.push(Edge::new(coords, edge.label().clone()));
        }
    }
    out
}

/// Builds a fully noded and labelled `PlanarGraph` for a pair of inputs
/// (spec §4.1-§4.2 end to end). Fails with `TopologyError::NodingFailure` if
/// the noded edge set still has an unresolved crossing, which the snap
/// wrapper (§4.6) catches to retry with vertex snapping.
pub fn build_graph<T: OverlayFloat>(
    g0: &Geometry<T>,
    g1: &Geometry<T>,
    intersector: &dyn LineIntersector<T>,
) -> OverlayResult<PlanarGraph<T>, T> {
    let ex0 = extract(g0, 0);
    let ex1 = extract(g1, 1);

    let mut edges0: Vec<Edge<T>> = ex0.edges.iter().map(edge_from_raw).collect();
    let mut edges1: Vec<Edge<T>> = ex1.edges.iter().map(edge_from_raw).collect();

    self_node(&mut edges0, intersector);
    self_node(&mut edges1, intersector);
    node_pairs(&mut edges0, &mut edges1, intersector);
    debug!("noding: {} raw edges from g0, {} from g1", edges0.len(), edges1.len());

    let split0 = split_all(&edges0);
    let split1 = split_all(&edges1);

    validate(&split0, intersector)?;
    validate(&split1, intersector)?;
    validate_pair(&split0, &split1, intersector)?;

    let mut edge_list = EdgeList::new();
    for edge in split0 {
        edge_list.insert(edge, 0);
    }
    for edge in split1 {
        edge_list.insert(edge, 1);
    }
    let mut edges = edge_list.into_edges();
    for edge in &mut edges {
        labelling::derive_label(edge);
    }
    debug!("noding: {} unique edges after dedup", edges.len());

    let mut graph = PlanarGraph::new();
    for &coord in &ex0.points {
        graph.record_input_node(coord, 0, CoordPos::Interior);
    }
    for &coord in &ex1.points {
        graph.record_input_node(coord, 1, CoordPos::Interior);
    }
    for &coord in &ex0.line_endpoints {
        graph.node_or_insert(coord).add_boundary_touch(0);
    }
    for &coord in &ex1.line_endpoints {
        graph.node_or_insert(coord).add_boundary_touch(1);
    }
    for edge in edges {
        graph.add_edge(edge);
    }
    graph.sort_node_stars();
    graph.compute_node_labels();
    labelling::label_incomplete_nodes(&mut graph, [g0, g1]);

    Ok(graph)
}
