use core::fmt;

use crate::location::{CoordPos, Direction};
use crate::topology_position::TopologyPosition;


/// The topological classification of a graph component (edge or node)
/// relative to each of the two input geometries.
///
/// Index 0 is the first argument, index 1 the second. A label is *area*
/// when either side carries left/right positions, *line* when it describes
/// a 1D edge, and a geometry's side is *null* when that geometry does not
/// touch the component at all.
#[derive(Clone)]
pub struct Label {
    sides: [TopologyPosition; 2],
}

impl fmt::Debug for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Label {{ 0: {:?}, 1: {:?} }}", self.sides[0], self.sides[1])
    }
}

impl Label {
    pub fn empty_line_or_point() -> Label {
        Label {
            sides: [
                TopologyPosition::empty_line_or_point(),
                TopologyPosition::empty_line_or_point(),
            ],
        }
    }

    pub fn empty_area() -> Label {
        Label {
            sides: [TopologyPosition::empty_area(), TopologyPosition::empty_area()],
        }
    }

    /// A label initialized with `position` for `geom_index`; the other
    /// geometry's side is left empty.
    pub fn new(geom_index: usize, position: TopologyPosition) -> Label {
        let mut label = match position {
            TopologyPosition::LineOrPoint { .. } => Self::empty_line_or_point(),
            TopologyPosition::Area { .. } => Self::empty_area(),
        };
        label.sides[geom_index] = position;
        label
    }

    pub fn flip(&mut self) {
        self.sides[0].flip();
        self.sides[1].flip();
    }

    pub fn position(&self, geom_index: usize, direction: Direction) -> Option<CoordPos> {
        self.sides[geom_index].get(direction)
    }

    pub fn on_position(&self, geom_index: usize) -> Option<CoordPos> {
        self.sides[geom_index].get(Direction::On)
    }

    pub fn set_position(&mut self, geom_index: usize, direction: Direction, position: CoordPos) {
        self.sides[geom_index].set_position(direction, position);
    }

    pub fn set_on_position(&mut self, geom_index: usize, position: CoordPos) {
        self.sides[geom_index].set_position(Direction::On, position);
    }

    pub fn set_all_positions(&mut self, geom_index: usize, position: CoordPos) {
        self.sides[geom_index].set_all_positions(position);
    }

    pub fn set_all_positions_if_empty(&mut self, geom_index: usize, position: CoordPos) {
        self.sides[geom_index].set_all_positions_if_empty(position);
    }

    /// Converts this side from an area label to a line label, carrying over
    /// only the `on` position. Used when depth analysis finds the edge has
    /// collapsed for this argument (spec §4.2, "dimensional collapse").
    pub fn set_position_as_line(&mut self, geom_index: usize, on: CoordPos) {
        self.sides[geom_index] = TopologyPosition::line_or_point(on);
    }

    pub fn is_null(&self, geom_index: usize) -> bool {
        self.sides[geom_index].is_empty()
    }

    pub fn is_area(&self) -> bool {
        self.sides[0].is_area() || self.sides[1].is_area()
    }

    pub fn is_area_for(&self, geom_index: usize) -> bool {
        self.sides[geom_index].is_area()
    }

    pub fn is_line_for(&self, geom_index: usize) -> bool {
        self.sides[geom_index].is_line()
    }

    /// Merge `other`'s side for `geom_index` into this label's, filling in
    /// only positions this label doesn't already have an opinion about.
    /// Used when directed edges around a node are merged into the node's
    /// own label.
    pub fn merge(&mut self, other: &Label) {
        for geom_index in 0..2 {
            match (&mut self.sides[geom_index], &other.sides[geom_index]) {
                (TopologyPosition::Area { on, left, right }, TopologyPosition::Area { on: o, left: l, right: r }) => {
                    if on.is_none() {
                        *on = *o;
                    }
                    if left.is_none() {
                        *left = *l;
                    }
                    if right.is_none() {
                        *right = *r;
                    }
                }
                (TopologyPosition::LineOrPoint { on }, TopologyPosition::LineOrPoint { on: o }) => {
                    if on.is_none() {
                        *on = *o;
                    }
                }
                _ => {}
            }
        }
    }
}
