/// Classification of a coordinate relative to a geometry, per the OGC
/// Simple Features model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordPos {
    Interior,
    Boundary,
    Exterior,
}

impl CoordPos {
    /// Promote `Boundary` to `Interior`; used by `isResult` (spec §4.3),
    /// where a shared boundary counts as interior for the purposes of
    /// deciding set membership.
    pub fn promote_boundary(self) -> CoordPos {
        match self {
            CoordPos::Boundary => CoordPos::Interior,
            other => other,
        }
    }
}

/// One of the three positions a `Label` can hold for an edge: on the edge
/// itself, or to its left/right looking along its direction of travel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    On,
    Left,
    Right,
}
