use std::collections::BTreeMap;

use geo_types::Coord;

use crate::graph::Edge;
use crate::label::Label;
use crate::location::Direction;
use crate::num::{lex_cmp, OverlayFloat};

#[derive(Clone, Copy)]
struct CoordKey<T: OverlayFloat>(Coord<T>);

impl<T: OverlayFloat> PartialEq for CoordKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T: OverlayFloat> Eq for CoordKey<T> {}
impl<T: OverlayFloat> PartialOrd for CoordKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: OverlayFloat> Ord for CoordKey<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        lex_cmp(&self.0, &other.0)
    }
}

/// Deduplicates noded segments sharing the same coordinate pair (spec §4.1
/// step 5): a segment contributed once by each input collapses into one
/// `Edge` whose label and depth carry both arguments' information.
pub struct EdgeList<T: OverlayFloat> {
    edges: Vec<Edge<T>>,
    index: BTreeMap<(CoordKey<T>, CoordKey<T>), usize>,
}

impl<T: OverlayFloat> Default for EdgeList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OverlayFloat> EdgeList<T> {
    pub fn new() -> Self {
        EdgeList { edges: Vec::new(), index: BTreeMap::new() }
    }

    /// Inserts a single-input segment (exactly two coordinates, the unit
    /// noding produces after `Edge::split_at_intersections`) contributed by
    /// `geom_index`, merging it into a matching existing segment if one
    /// (forward or reversed) is already present.
    pub fn insert(&mut self, mut edge: Edge<T>, geom_index: usize) {
        let start = edge.coords()[0];
        let end = *edge.coords().last().unwrap();
        let forward_key = (CoordKey(start), CoordKey(end));
        let backward_key = (CoordKey(end), CoordKey(start));

        if let Some(&idx) = self.index.get(&forward_key) {
            self.merge_into(idx, edge, geom_index);
            return;
        }
        if let Some(&idx) = self.index.get(&backward_key) {
            edge.label_mut().flip();
            self.merge_into(idx, edge, geom_index);
            return;
        }

        let label = edge.label().clone();
        accumulate_depth::<T>(edge.depth_mut(), &label, geom_index);
        let idx = self.edges.len();
        self.index.insert(forward_key, idx);
        self.edges.push(edge);
    }

    fn merge_into(&mut self, idx: usize, edge: Edge<T>, geom_index: usize) {
        accumulate_depth::<T>(self.edges[idx].depth_mut(), edge.label(), geom_index);
        let incoming_label = edge.label().clone();
        self.edges[idx].label_mut().merge(&incoming_label);
    }

    pub fn into_edges(self) -> Vec<Edge<T>> {
        self.edges
    }
}

/// Adds one contribution's winding delta to `depth`. `Depth::add` seeds a
/// still-null slot on first contact and increments on every subsequent one,
/// so this is correct whether `edge` is a brand-new unique edge or one
/// merging into an existing entry.
fn accumulate_depth<T: OverlayFloat>(depth: &mut crate::depth::Depth, label: &Label, geom_index: usize) {
    if !label.is_area_for(geom_index) {
        return;
    }
    if let Some(loc) = label.position(geom_index, Direction::On) {
        depth.add(geom_index, Direction::On, loc);
    }
    if let Some(loc) = label.position(geom_index, Direction::Left) {
        depth.add(geom_index, Direction::Left, loc);
    }
    if let Some(loc) = label.position(geom_index, Direction::Right) {
        depth.add(geom_index, Direction::Right, loc);
    }
}
