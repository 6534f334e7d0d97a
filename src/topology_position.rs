use core::fmt;

use crate::location::{CoordPos, Direction};

/// The labelling of one graph component's topological relationship to a
/// single input geometry.
///
/// Area components (edges bounding a 2D region) carry a position for each
/// of `On`/`Left`/`Right`; line and point components carry only `On`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub enum TopologyPosition {
    Area {
        on: Option<CoordPos>,
        left: Option<CoordPos>,
        right: Option<CoordPos>,
    },
    LineOrPoint {
        on: Option<CoordPos>,
    },
}

impl fmt::Debug for TopologyPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn c(p: &Option<CoordPos>, f: &mut fmt::Formatter) -> fmt::Result {
            match p {
                Some(CoordPos::Interior) => write!(f, "i"),
                Some(CoordPos::Boundary) => write!(f, "b"),
                Some(CoordPos::Exterior) => write!(f, "e"),
                None => write!(f, "_"),
            }
        }
        match self {
            Self::LineOrPoint { on } => c(on, f),
            Self::Area { on, left, right } => {
                c(left, f)?;
                c(on, f)?;
                c(right, f)
            }
        }
    }
}

impl TopologyPosition {
    pub fn area(on: CoordPos, left: CoordPos, right: CoordPos) -> Self {
        Self::Area {
            on: Some(on),
            left: Some(left),
            right: Some(right),
        }
    }

    pub fn empty_area() -> Self {
        Self::Area {
            on: None,
            left: None,
            right: None,
        }
    }

    pub fn line_or_point(on: CoordPos) -> Self {
        Self::LineOrPoint { on: Some(on) }
    }

    pub fn empty_line_or_point() -> Self {
        Self::LineOrPoint { on: None }
    }

    pub fn get(&self, direction: Direction) -> Option<CoordPos> {
        match (direction, self) {
            (Direction::Left, Self::Area { left, .. }) => *left,
            (Direction::Right, Self::Area { right, .. }) => *right,
            (Direction::On, Self::LineOrPoint { on }) | (Direction::On, Self::Area { on, .. }) => {
                *on
            }
            (_, Self::LineOrPoint { .. }) => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(
            self,
            Self::LineOrPoint { on: None }
                | Self::Area {
                    on: None,
                    left: None,
                    right: None,
                }
        )
    }

    pub fn is_area(&self) -> bool {
        matches!(self, Self::Area { .. })
    }

    pub fn is_line(&self) -> bool {
        matches!(self, Self::LineOrPoint { .. })
    }

    /// Swap left/right, preserving `on`. Used when an edge is inserted in
    /// the opposite orientation to the one already recorded for it.
    pub fn flip(&mut self) {
        if let Self::Area { left, right, .. } = self {
            std::mem::swap(left, right);
        }
    }

    pub fn set_all_positions(&mut self, position: CoordPos) {
        match self {
            Self::LineOrPoint { on } => *on = Some(position),
            Self::Area { on, left, right } => {
                *on = Some(position);
                *left = Some(position);
                *right = Some(position);
            }
        }
    }

    pub fn set_all_positions_if_empty(&mut self, position: CoordPos) {
        match self {
            Self::LineOrPoint { on } => {
                if on.is_none() {
                    *on = Some(position);
                }
            }
            Self::Area { on, left, right } => {
                if on.is_none() {
                    *on = Some(position);
                }
                if left.is_none() {
                    *left = Some(position);
                }
                if right.is_none() {
                    *right = Some(position);
                }
            }
        }
    }

    pub fn set_position(&mut self, direction: Direction, position: CoordPos) {
        match (direction, self) {
            (Direction::On, Self::LineOrPoint { on }) => *on = Some(position),
            (_, Self::LineOrPoint { .. }) => {}
            (Direction::On, Self::Area { on, .. }) => *on = Some(position),
            (Direction::Left, Self::Area { left, .. }) => *left = Some(position),
            (Direction::Right, Self::Area { right, .. }) => *right = Some(position),
        }
    }
}
