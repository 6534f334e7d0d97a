use core::fmt;

use geo_types::{Coord, CoordNum};

/// Failures raised while building or extracting a planar overlay.
///
/// This is the single error taxonomy described for the crate: callers match
/// on one type rather than juggling several fallible interfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum TopologyError<T: CoordNum + fmt::Debug> {
    /// The noded edge set still has an interior-of-segment intersection with
    /// a vertex, or two interior vertices coincide, after noding.
    ///
    /// Recoverable: the snap-if-needed wrapper catches this and retries with
    /// vertex snapping.
    NodingFailure(Coord<T>),

    /// A hole in the polygon-assembly step could not be matched to any
    /// enclosing shell.
    OrphanHole(Coord<T>),

    /// The noding validator found a residual interior intersection even
    /// after snapping. Fatal: there is no further fallback.
    Robustness(String),

    /// An argument geometry variant wasn't recognized as one the operation
    /// supports, or `unaryUnion` was given neither a factory nor any
    /// geometry to derive one from.
    InvalidArgument(String),

    /// A one-shot object (`OverlayOp`, `CascadedUnion`) was driven twice.
    InvalidState(&'static str),
}

impl<T: CoordNum + fmt::Debug> fmt::Display for TopologyError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TopologyError::NodingFailure(coord) => {
                write!(f, "noding failure: segments not properly noded near {coord:?}")
            }
            TopologyError::OrphanHole(coord) => {
                write!(f, "found hole with no containing shell, near {coord:?}")
            }
            TopologyError::Robustness(msg) => write!(f, "robustness failure: {msg}"),
            TopologyError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            TopologyError::InvalidState(msg) => write!(f, "invalid state: {msg}"),
        }
    }
}

impl<T: CoordNum + fmt::Debug> std::error::Error for TopologyError<T> {}

pub type OverlayResult<V, F> = std::result::Result<V, TopologyError<F>>;
