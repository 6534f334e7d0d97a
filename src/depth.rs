use crate::location::{CoordPos, Direction};

const NULL_DEPTH: i32 = -1;

/// Per-argument winding depth on each side of an edge.
///
/// Depth is accumulated when duplicate edges (produced by noding two inputs
/// that share boundary segments) merge in the edge list: each contributing
/// occurrence adds its own left/right depth delta. `delta()` (`left -
/// right`) encodes dimensional collapse: an edge with equal depth on both
/// sides lies entirely inside (or outside) one argument and degenerates to
/// a line in the result (spec §4.2).
#[derive(Debug, Clone, Copy)]
pub struct Depth {
    // [geom_index][direction: On=0 unused, Left=1, Right=2]
    depths: [[i32; 3]; 2],
}

impl Default for Depth {
    fn default() -> Self {
        Depth {
            depths: [[NULL_DEPTH; 3]; 2],
        }
    }
}

fn dir_index(direction: Direction) -> usize {
    match direction {
        Direction::On => 0,
        Direction::Left => 1,
        Direction::Right => 2,
    }
}

impl Depth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, geom_index: usize, direction: Direction) -> i32 {
        self.depths[geom_index][dir_index(direction)]
    }

    pub fn set(&mut self, geom_index: usize, direction: Direction, depth: i32) {
        self.depths[geom_index][dir_index(direction)] = depth;
    }

    pub fn is_null(&self) -> bool {
        self.depths
            .iter()
            .all(|side| side.iter().all(|d| *d == NULL_DEPTH))
    }

    pub fn is_null_at(&self, geom_index: usize, direction: Direction) -> bool {
        self.get(geom_index, direction) == NULL_DEPTH
    }

    /// Seed this depth from a coarse on/left/right location label, the way
    /// a freshly-inserted edge's depth is initialized from its own label
    /// before any duplicate contributes to it.
    pub fn add_from_label(&mut self, geom_index: usize, on: Option<CoordPos>, left: Option<CoordPos>, right: Option<CoordPos>) {
        if let Some(loc) = on {
            if self.is_null_at(geom_index, Direction::On) {
                self.set(geom_index, Direction::On, depth_at_location(loc));
            }
        }
        if let Some(loc) = left {
            if self.is_null_at(geom_index, Direction::Left) {
                self.set(geom_index, Direction::Left, depth_at_location(loc));
            }
        }
        if let Some(loc) = right {
            if self.is_null_at(geom_index, Direction::Right) {
                self.set(geom_index, Direction::Right, depth_at_location(loc));
            }
        }
    }

    /// Add one occurrence's contribution: crossing an edge toggles depth by
    /// +1/-1 depending on whether the side is interior-facing.
    pub fn add(&mut self, geom_index: usize, direction: Direction, location: CoordPos) {
        let delta = match location {
            CoordPos::Interior => 1,
            _ => 0,
        };
        let idx = dir_index(direction);
        if self.depths[geom_index][idx] == NULL_DEPTH {
            self.depths[geom_index][idx] = delta;
        } else {
            self.depths[geom_index][idx] += delta;
        }
    }

    pub fn delta(&self, geom_index: usize) -> i32 {
        self.get(geom_index, Direction::Left) - self.get(geom_index, Direction::Right)
    }

    /// Shift depths for `geom_index` so the minimum is zero. JTS normalizes
    /// depth this way before reading location off it, since only relative
    /// depth (not absolute winding count) carries meaning.
    pub fn normalize(&mut self, geom_index: usize) {
        let on = self.get(geom_index, Direction::On);
        let left = self.get(geom_index, Direction::Left);
        let right = self.get(geom_index, Direction::Right);
        let min_depth = [on, left, right]
            .into_iter()
            .filter(|d| *d != NULL_DEPTH)
            .min()
            .unwrap_or(0);
        let shift = |d: i32| if d == NULL_DEPTH { NULL_DEPTH } else { d - min_depth };
        self.set(geom_index, Direction::On, shift(on));
        self.set(geom_index, Direction::Left, shift(left));
        self.set(geom_index, Direction::Right, shift(right));
    }

    /// Location implied by a normalized depth: 0 is exterior, >=1 interior.
    pub fn location_at(&self, geom_index: usize, direction: Direction) -> Option<CoordPos> {
        let d = self.get(geom_index, direction);
        if d == NULL_DEPTH {
            None
        } else if d == 0 {
            Some(CoordPos::Exterior)
        } else {
            Some(CoordPos::Interior)
        }
    }
}

fn depth_at_location(loc: CoordPos) -> i32 {
    match loc {
        CoordPos::Interior => 1,
        _ => 0,
    }
}
