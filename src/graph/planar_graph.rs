use geo_types::Coord;

use crate::label::Label;
use crate::num::OverlayFloat;

use super::directed_edge::{sym_of, DirectedEdge, DirectedEdgeId, EdgeId};
use super::edge::Edge;
use super::node::CoordNode;
use super::node_map::NodeMap;

/// Owns every node, edge and directed edge produced while noding and
/// labelling a single overlay call. All lifetimes here are bounded to that
/// one call; the whole arena is dropped when the overlay returns (spec §3,
/// "Ownership").
pub struct PlanarGraph<T: OverlayFloat> {
    nodes: NodeMap<T>,
    edges: Vec<Edge<T>>,
    directed_edges: Vec<DirectedEdge>,
}

impl<T: OverlayFloat> Default for PlanarGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OverlayFloat> PlanarGraph<T> {
    pub fn new() -> Self {
        PlanarGraph {
            nodes: NodeMap::new(),
            edges: Vec::new(),
            directed_edges: Vec::new(),
        }
    }

    pub fn nodes(&self) -> &NodeMap<T> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeMap<T> {
        &mut self.nodes
    }

    pub fn node_or_insert(&mut self, coord: Coord<T>) -> &mut CoordNode<T> {
        self.nodes.get_or_insert(coord)
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<T> {
        &self.edges[id]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge<T> {
        &mut self.edges[id]
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn directed_edge(&self, id: DirectedEdgeId) -> &DirectedEdge {
        &self.directed_edges[id]
    }

    pub fn directed_edge_mut(&mut self, id: DirectedEdgeId) -> &mut DirectedEdge {
        &mut self.directed_edges[id]
    }

    pub fn directed_edges(&self) -> &[DirectedEdge] {
        &self.directed_edges
    }

    pub fn directed_edge_count(&self) -> usize {
        self.directed_edges.len()
    }

    /// Registers a fully-noded, fully-labelled `Edge` with the graph: links
    /// its two directed edges, and attaches each to its origin node's star.
    /// Mirrors `PlanarGraph.addEdges`.
    pub fn add_edge(&mut self, edge: Edge<T>) -> EdgeId {
        let edge_id = self.edges.len();
        let label = edge.label().clone();
        self.edges.push(edge);

        let forward_id = self.directed_edges.len();
        self.directed_edges.push(DirectedEdge::new(edge_id, true, label.clone()));
        let mut backward_label = label;
        backward_label.flip();
        self.directed_edges.push(DirectedEdge::new(edge_id, false, backward_label));
        let backward_id = forward_id + 1;
        debug_assert_eq!(sym_of(forward_id), backward_id);

        let edge_ref = &self.edges[edge_id];
        let orig_fwd = self.directed_edges[forward_id].orig_coord(edge_ref);
        let orig_bwd = self.directed_edges[backward_id].orig_coord(edge_ref);
        self.nodes.get_or_insert(orig_fwd).push_star(forward_id);
        self.nodes.get_or_insert(orig_bwd).push_star(backward_id);

        edge_id
    }

    /// Sorts every node's star by outgoing counter-clockwise angle. Must be
    /// called once after all edges are added and before ring assembly.
    pub fn sort_node_stars(&mut self) {
        let edges = &self.edges;
        let directed_edges = &self.directed_edges;
        for node in self.nodes.iter_mut() {
            node.sort_star(|de_id| {
                let de = &directed_edges[de_id];
                de.direction_point(&edges[de.edge()])
            });
        }
    }

    /// Merges each node's label from the labels of its incident directed
    /// edges (spec §4.2, "Node-level labelling").
    pub fn compute_node_labels(&mut self) {
        let directed_edges = &self.directed_edges;
        for node in self.nodes.iter_mut() {
            let star: Vec<_> = node.star().to_vec();
            for de_id in star {
                node.label_mut().merge(directed_edges[de_id].label());
            }
        }
    }

    /// Pairs each incoming result directed edge at a node to the next
    /// outgoing result directed edge in CCW order (spec §4.4 step 1).
    pub fn link_result_directed_edges(&self) {
        for node in self.nodes.iter() {
            link_directed_edges_at_node(node.star(), &self.directed_edges, |de| {
                self.directed_edges[sym_of(de)].is_in_result()
            }, |de| self.directed_edges[de].is_in_result(), |from, to| {
                self.directed_edges[from].set_next(to);
            });
        }
    }

    /// Re-links directed edges belonging to one maximal ring using
    /// `next_min`, producing degree-<=2 traversal through each node
    /// (spec §4.4 step 3).
    pub fn link_minimal_directed_edges(&self, ring_id: usize) {
        for node in self.nodes.iter() {
            let in_ring = |de: DirectedEdgeId| self.directed_edges[de].edge_ring() == Some(ring_id);
            link_directed_edges_at_node(
                node.star(),
                &self.directed_edges,
                |de| in_ring(sym_of(de)),
                in_ring,
                |from, to| self.directed_edges[from].set_next_min(to),
            );
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Installs an original-location label for an input node (spec §4.1
    /// step 1, "copy nodes").
    pub fn record_input_node(&mut self, coord: Coord<T>, geom_index: usize, position: crate::location::CoordPos) {
        self.node_or_insert(coord).set_on_position(geom_index, position);
    }

    pub fn labels_for_edge(&self, id: EdgeId) -> &Label {
        self.edges[id].label()
    }
}

/// Shared circular-sweep used by both `link_result_directed_edges` and
/// `link_minimal_directed_edges`: walk a node's angularly-sorted star twice
/// around, pairing each "incoming" candidate edge (an edge whose `sym`
/// satisfies `is_incoming`) to the next "outgoing" candidate (`is_outgoing`)
/// seen after it.
fn link_directed_edges_at_node(
    star: &[DirectedEdgeId],
    _directed_edges: &[DirectedEdge],
    is_incoming: impl Fn(DirectedEdgeId) -> bool,
    is_outgoing: impl Fn(DirectedEdgeId) -> bool,
    mut set_next: impl FnMut(DirectedEdgeId, DirectedEdgeId),
) {
    let n = star.len();
    if n == 0 {
        return;
    }
    let start = match (0..n).find(|&i| is_incoming(star[i])) {
        Some(i) => i,
        None => return,
    };
    let mut incoming: Option<DirectedEdgeId> = Some(sym_of(star[start]));
    for k in 1..=n {
        let i = (start + k) % n;
        let de = star[i];
        if is_outgoing(de) {
            if let Some(inc) = incoming.take() {
                set_next(inc, de);
            }
        }
        if is_incoming(de) {
            incoming = Some(sym_of(de));
        }
    }
}
