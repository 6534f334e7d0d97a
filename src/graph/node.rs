use geo_types::Coord;

use crate::label::Label;
use crate::location::CoordPos;
use crate::num::OverlayFloat;

use super::directed_edge::DirectedEdgeId;

/// A point where one or more edges meet, labelled by merging the labels of
/// its incident directed edges (spec §3, "Node").
#[derive(Debug)]
pub struct CoordNode<T: OverlayFloat> {
    coord: Coord<T>,
    label: Label,
    /// Outgoing directed edges at this node, in increasing counter-clockwise
    /// angle order. Populated once noding is complete and all edges have
    /// been added to the graph.
    star: Vec<DirectedEdgeId>,
}

impl<T: OverlayFloat> CoordNode<T> {
    pub fn new(coord: Coord<T>) -> Self {
        CoordNode {
            coord,
            label: Label::empty_line_or_point(),
            star: Vec::new(),
        }
    }

    pub fn coord(&self) -> Coord<T> {
        self.coord
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn star(&self) -> &[DirectedEdgeId] {
        &self.star
    }

    pub fn push_star(&mut self, de: DirectedEdgeId) {
        self.star.push(de);
    }

    pub fn sort_star(&mut self, sort_key: impl Fn(DirectedEdgeId) -> Coord<T>) {
        self.star.sort_by(|&a, &b| super::quadrant::compare_direction(self.coord, sort_key(a), sort_key(b)));
    }

    pub fn set_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.label.set_on_position(geom_index, position);
    }

    /// Updates boundary labelling obeying the mod-2 rule: a node touched an
    /// even number of times by a geometry's boundary is interior to it, an
    /// odd number of times is on its boundary.
    pub fn add_boundary_touch(&mut self, geom_index: usize) {
        let new_position = match self.label.on_position(geom_index) {
            Some(CoordPos::Boundary) => CoordPos::Interior,
            Some(CoordPos::Interior) => CoordPos::Boundary,
            None | Some(CoordPos::Exterior) => CoordPos::Boundary,
        };
        self.label.set_on_position(geom_index, new_position);
    }

    pub fn is_isolated(&self, geom_index: usize) -> bool {
        self.label.is_null(geom_index)
    }
}
