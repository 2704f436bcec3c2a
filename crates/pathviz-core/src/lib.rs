//! **pathviz-core**: the grid model behind the pathviz A* visualiser.
//!
//! This crate owns the cells of a square grid: their identity, the role a
//! user painted on them (start, end, barrier), the search state an engine
//! tagged them with, and the cached open-neighbour lists a search walks.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod style;

pub use cell::{Cell, Role, SearchState};
pub use geom::Pos;
pub use grid::{Grid, GridError};
pub use style::Color;
