use std::collections::BTreeSet;

use geo_types::{Coord, Line};

use crate::depth::Depth;
use crate::label::Label;
use crate::line_intersector::{compute_edge_distance, LineIntersection};
use crate::num::OverlayFloat;

use super::edge_intersection::EdgeIntersection;

/// An ordered coordinate sequence contributed by noding, labelled with its
/// topological relationship to both inputs and its accumulated winding
/// depth (spec §3, "Edge").
#[derive(Debug)]
pub struct Edge<T: OverlayFloat> {
    coords: Vec<Coord<T>>,
    label: Label,
    depth: Depth,
    intersections: BTreeSet<EdgeIntersection<T>>,
    collapsed: bool,
    covered: bool,
    in_result: bool,
}

impl<T: OverlayFloat> Edge<T> {
    pub fn new(mut coords: Vec<Coord<T>>, label: Label) -> Self {
        assert!(coords.len() >= 2, "edge needs at least two coordinates");
        coords.shrink_to_fit();
        Edge {
            coords,
            label,
            depth: Depth::new(),
            intersections: BTreeSet::new(),
            collapsed: false,
            covered: false,
            in_result: false,
        }
    }

    pub fn coords(&self) -> &[Coord<T>] {
        &self.coords
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn depth(&self) -> &Depth {
        &self.depth
    }

    pub fn depth_mut(&mut self) -> &mut Depth {
        &mut self.depth
    }

    pub fn is_closed(&self) -> bool {
        self.coords.first() == self.coords.last()
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        self.collapsed = collapsed;
    }

    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub fn set_covered(&mut self, covered: bool) {
        self.covered = covered;
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    pub fn add_endpoint_intersections(&mut self) {
        let last = self.coords.len() - 1;
        self.intersections.insert(EdgeIntersection::new(self.coords[0], 0, T::zero()));
        self.intersections.insert(EdgeIntersection::new(self.coords[last], last, T::zero()));
    }

    /// Marks every original vertex as an intersection so `split_at_intersections`
    /// never collapses interior vertices that no self- or cross-noding pass
    /// happened to split on.
    pub fn add_vertex_intersections(&mut self) {
        for (index, &coord) in self.coords.iter().enumerate() {
            self.intersections.insert(EdgeIntersection::new(coord, index, T::zero()));
        }
    }

    pub fn add_intersections(&mut self, intersection: LineIntersection<T>, line: Line<T>, segment_index: usize) {
        match intersection {
            LineIntersection::SinglePoint { intersection, .. } => {
                self.add_intersection(intersection, line, segment_index);
            }
            LineIntersection::Collinear { intersection } => {
                self.add_intersection(intersection.start, line, segment_index);
                self.add_intersection(intersection.end, line, segment_index);
            }
        }
    }

    /// An intersection that lands exactly on a vertex is normalized to the
    /// higher of the two possible segment indices, matching JTS's rule so
    /// the same coordinate is never filed under two different indices.
    pub fn add_intersection(&mut self, coord: Coord<T>, line: Line<T>, segment_index: usize) {
        let mut normalized_index = segment_index;
        let mut distance = compute_edge_distance(coord, line);

        let next_index = normalized_index + 1;
        if next_index < self.coords.len() && coord == self.coords[next_index] {
            normalized_index = next_index;
            distance = T::zero();
        }
        self.intersections.insert(EdgeIntersection::new(coord, normalized_index, distance));
    }

    /// Split this edge into sub-edge coordinate sequences at every recorded
    /// intersection vertex (spec §4.1 step 4). Endpoints are always
    /// included even if no interior intersection was recorded.
    pub fn split_at_intersections(&self) -> Vec<Vec<Coord<T>>> {
        let mut vertices: Vec<(usize, T, Coord<T>)> = self
            .intersections
            .iter()
            .map(|i| (i.segment_index, i.distance, i.coord))
            .collect();
        let last = self.coords.len() - 1;
        vertices.push((0, T::zero(), self.coords[0]));
        vertices.push((last, T::zero(), self.coords[last]));
        vertices.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)));
        vertices.dedup_by(|a, b| a.2 == b.2);

        let mut out = Vec::with_capacity(vertices.len().saturating_sub(1));
        for window in vertices.windows(2) {
            if window[0].2 == window[1].2 {
                continue;
            }
            out.push(vec![window[0].2, window[1].2]);
        }
        out
    }
}
