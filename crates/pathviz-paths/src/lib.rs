//! Step-driven A* search over a [`pathviz_core::Grid`].
//!
//! The [`Engine`] expands one cell per iteration, tags cells in the grid as
//! it goes (frontier, visited, path) and hands the grid to a
//! [`StepObserver`] after every expansion, so a caller can redraw the search
//! while it runs and cancel it between steps.
//!
//! ```
//! use pathviz_core::Grid;
//! use pathviz_paths::{Engine, Outcome};
//!
//! let mut grid = Grid::from_layout("S..\n.#.\n..E", 1).unwrap();
//! let report = Engine::new().run_grid(&mut grid, &mut ()).unwrap();
//! assert_eq!(report.outcome(), Outcome::PathFound);
//! assert_eq!(report.path_len(), Some(4));
//! ```
//!
//! # Seams
//!
//! | Trait | Role |
//! |---|---|
//! | [`Heuristic`] | estimate of the remaining cost; [`Manhattan`] by default |
//! | [`StepObserver`] | redraw hook and cancellation predicate |

mod astar;
mod config;
mod distance;
mod error;
mod observer;
mod report;
mod traits;

pub use astar::Engine;
pub use config::{Requeue, SearchConfig, TieBreak};
pub use distance::{Manhattan, manhattan};
pub use error::InvalidQuery;
pub use observer::{Hooks, hooks};
pub use report::{Outcome, SearchReport, SearchStats, UNREACHABLE};
pub use traits::{Heuristic, StepObserver};
