use std::fmt;

use pathviz_core::Pos;

/// A search request the engine refuses to start. Nothing in the grid has
/// been touched when this is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidQuery {
    MissingStart,
    MissingEnd,
    /// Start and end are the same cell.
    SameCell(Pos),
    OutOfBounds(Pos),
    /// Start or end sits on a barrier.
    BarrierEndpoint(Pos),
    /// Barriers changed since the neighbour lists were last rebuilt.
    StaleNeighbors,
}

impl fmt::Display for InvalidQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingStart => f.write_str("invalid query: no start cell"),
            Self::MissingEnd => f.write_str("invalid query: no end cell"),
            Self::SameCell(p) => write!(f, "invalid query: start and end are both {p}"),
            Self::OutOfBounds(p) => write!(f, "invalid query: {p} is outside the grid"),
            Self::BarrierEndpoint(p) => write!(f, "invalid query: {p} is a barrier"),
            Self::StaleNeighbors => {
                f.write_str("invalid query: neighbour lists are stale, refresh the grid first")
            }
        }
    }
}

impl std::error::Error for InvalidQuery {}
