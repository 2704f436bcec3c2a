//! Crossterm front end for pathviz.
//!
//! The terminal plays the collaborator role around the search engine: it
//! turns mouse and key input into grid edits ([`Editor`]), draws the grid
//! with one coloured block per cell ([`CrosstermDriver`]), and redraws after
//! every search step while watching for a cancel or quit key
//! ([`SearchView`]).

mod app;
mod driver;
mod editor;
mod input;
mod render;

pub use app::run;
pub use driver::{CrosstermDriver, SearchView};
pub use editor::{Action, Editor, EditorConfig, Status};
pub use input::{Key, MouseAction, Msg};
pub use render::Canvas;
