use std::collections::BTreeMap;

use geo_types::Coord;

use crate::num::{lex_cmp, OverlayFloat};

use super::node::CoordNode;

#[derive(Clone, Copy)]
struct NodeKey<T: OverlayFloat>(Coord<T>);

impl<T: OverlayFloat> PartialEq for NodeKey<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}
impl<T: OverlayFloat> Eq for NodeKey<T> {}
impl<T: OverlayFloat> PartialOrd for NodeKey<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}
impl<T: OverlayFloat> Ord for NodeKey<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        lex_cmp(&self.0, &other.0)
    }
}

/// Nodes of a `PlanarGraph`, keyed by coordinate so that noding's repeated
/// "insert or find the node at this vertex" pattern is O(log n).
#[derive(Default)]
pub struct NodeMap<T: OverlayFloat> {
    map: BTreeMap<NodeKey<T>, CoordNode<T>>,
}

impl<T: OverlayFloat> NodeMap<T> {
    pub fn new() -> Self {
        Self { map: BTreeMap::new() }
    }

    pub fn get_or_insert(&mut self, coord: Coord<T>) -> &mut CoordNode<T> {
        self.map.entry(NodeKey(coord)).or_insert_with(|| CoordNode::new(coord))
    }

    pub fn find(&self, coord: Coord<T>) -> Option<&CoordNode<T>> {
        self.map.get(&NodeKey(coord))
    }

    pub fn find_mut(&mut self, coord: Coord<T>) -> Option<&mut CoordNode<T>> {
        self.map.get_mut(&NodeKey(coord))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CoordNode<T>> {
        self.map.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut CoordNode<T>> {
        self.map.values_mut()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
