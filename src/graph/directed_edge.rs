use std::cell::Cell;

use geo_types::Coord;

use crate::label::Label;
use crate::num::OverlayFloat;

use super::edge::Edge;

pub type EdgeId = usize;

/// Index into `PlanarGraph::directed_edges`. Directed edges are always
/// allocated in `sym` pairs at consecutive indices, so `sym()` is index XOR
/// 1 rather than a stored pointer (design note: "arena of directed edges,
/// indices rather than back-pointers").
pub type DirectedEdgeId = usize;

pub fn sym_of(id: DirectedEdgeId) -> DirectedEdgeId {
    id ^ 1
}

/// One of the two orientations of an `Edge`. Carries the per-argument label
/// used by result extraction, plus the mutable links ring assembly fills in:
/// `next` (successor around maximal rings), `next_min` (successor within a
/// minimal ring once a maximal ring has been split), and the owning ring
/// indices once assembled.
#[derive(Debug)]
pub struct DirectedEdge {
    edge: EdgeId,
    forward: bool,
    label: Label,
    in_result: Cell<bool>,
    visited: Cell<bool>,
    next: Cell<Option<DirectedEdgeId>>,
    next_min: Cell<Option<DirectedEdgeId>>,
    edge_ring: Cell<Option<usize>>,
    min_edge_ring: Cell<Option<usize>>,
}

impl DirectedEdge {
    pub fn new(edge: EdgeId, forward: bool, label: Label) -> Self {
        DirectedEdge {
            edge,
            forward,
            label,
            in_result: Cell::new(false),
            visited: Cell::new(false),
            next: Cell::new(None),
            next_min: Cell::new(None),
            edge_ring: Cell::new(None),
            min_edge_ring: Cell::new(None),
        }
    }

    pub fn edge(&self) -> EdgeId {
        self.edge
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result.get()
    }

    pub fn set_in_result(&self, value: bool) {
        self.in_result.set(value);
    }

    pub fn is_visited(&self) -> bool {
        self.visited.get()
    }

    pub fn set_visited(&self, value: bool) {
        self.visited.set(value);
    }

    pub fn next(&self) -> Option<DirectedEdgeId> {
        self.next.get()
    }

    pub fn set_next(&self, value: DirectedEdgeId) {
        self.next.set(Some(value));
    }

    pub fn next_min(&self) -> Option<DirectedEdgeId> {
        self.next_min.get()
    }

    pub fn set_next_min(&self, value: DirectedEdgeId) {
        self.next_min.set(Some(value));
    }

    pub fn edge_ring(&self) -> Option<usize> {
        self.edge_ring.get()
    }

    pub fn set_edge_ring(&self, value: usize) {
        self.edge_ring.set(Some(value));
    }

    pub fn min_edge_ring(&self) -> Option<usize> {
        self.min_edge_ring.get()
    }

    pub fn set_min_edge_ring(&self, value: usize) {
        self.min_edge_ring.set(Some(value));
    }

    pub fn orig_coord<T: OverlayFloat>(&self, edge: &Edge<T>) -> Coord<T> {
        if self.forward {
            edge.coords()[0]
        } else {
            *edge.coords().last().unwrap()
        }
    }

    pub fn dest_coord<T: OverlayFloat>(&self, edge: &Edge<T>) -> Coord<T> {
        if self.forward {
            *edge.coords().last().unwrap()
        } else {
            edge.coords()[0]
        }
    }

    /// The point adjacent to the origin in the direction of travel, used to
    /// sort directed edges by outgoing angle around a node.
    pub fn direction_point<T: OverlayFloat>(&self, edge: &Edge<T>) -> Coord<T> {
        let coords = edge.coords();
        if self.forward {
            coords[1]
        } else {
            coords[coords.len() - 2]
        }
    }
}
