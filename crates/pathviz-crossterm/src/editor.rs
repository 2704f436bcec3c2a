//! The edit loop: placing endpoints and barriers, wiping the board, and
//! launching searches.

use std::fmt;
use std::time::Duration;

use log::{debug, trace};
use pathviz_core::{Grid, Pos, Role, SearchState};
use pathviz_paths::{Engine, InvalidQuery, Outcome, SearchConfig, SearchReport, StepObserver};
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::input::{Key, MouseAction, Msg};

/// Settings for an [`Editor`] session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EditorConfig {
    /// Rows (and columns) of the grid.
    pub rows: i32,
    /// Terminal columns per cell. Cells are one terminal row tall.
    pub cell_width: i32,
    /// Pause after every drawn search step.
    pub step_delay: Duration,
    /// Probability that `r` turns an empty cell into a barrier.
    pub density: f64,
    /// Seed for barrier scattering; random when `None`.
    pub seed: Option<u64>,
    pub search: SearchConfig,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            rows: 30,
            cell_width: 2,
            step_delay: Duration::from_millis(20),
            density: 0.3,
            seed: None,
            search: SearchConfig::default(),
        }
    }
}

/// What the run loop should do after an input message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    None,
    Redraw,
    Search,
    Quit,
}

/// Outcome of the last search, shown on the status line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Found { len: usize, expansions: usize },
    NotFound { expansions: usize },
    Cancelled { expansions: usize },
    Rejected(String),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Idle => f.write_str("ready"),
            Status::Found { len, expansions } => {
                write!(f, "path found: {len} steps, {expansions} cells expanded")
            }
            Status::NotFound { expansions } => {
                write!(f, "no path: {expansions} cells expanded")
            }
            Status::Cancelled { expansions } => {
                write!(f, "cancelled after {expansions} cells")
            }
            Status::Rejected(reason) => f.write_str(reason),
        }
    }
}

const HELP: &str = "left: place/paint  right: erase  space: search  r: scatter  c: clear  q: quit";

/// Grid plus the editing rules around it.
pub struct Editor {
    grid: Grid,
    config: EditorConfig,
    engine: Engine,
    rng: StdRng,
    status: Status,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        debug!("[editor] new: rows={} seed={seed}", config.rows);
        Self {
            grid: Grid::new(config.rows, config.cell_width),
            config,
            engine: Engine::with_config(config.search),
            rng: StdRng::seed_from_u64(seed),
            status: Status::Idle,
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    #[inline]
    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Status plus key help, as drawn under the grid.
    pub fn status_line(&self) -> String {
        format!("{}  |  {HELP}", self.status)
    }

    /// The cell under a terminal column / row.
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Pos> {
        let size = self.grid.cell_size();
        self.grid
            .pos_at(i32::from(column), i32::from(row).saturating_mul(size))
    }

    /// Apply one input message.
    pub fn update(&mut self, msg: &Msg) -> Action {
        if msg.is_quit() {
            return Action::Quit;
        }
        match *msg {
            Msg::KeyDown {
                key: Key::Space | Key::Enter,
                ..
            } => {
                if self.grid.start().is_some() && self.grid.end().is_some() {
                    Action::Search
                } else {
                    self.status = Status::Rejected("place a start and an end first".into());
                    Action::Redraw
                }
            }
            Msg::KeyDown {
                key: Key::Escape | Key::Delete | Key::Char('c'),
                ..
            } => {
                self.clear();
                Action::Redraw
            }
            Msg::KeyDown {
                key: Key::Char('r'),
                ..
            } => {
                self.scatter();
                Action::Redraw
            }
            Msg::Mouse {
                action,
                column,
                row,
            } => {
                let Some(p) = self.cell_at(column, row) else {
                    return Action::None;
                };
                let changed = match action {
                    MouseAction::Main => self.paint(p),
                    MouseAction::Secondary => self.erase(p),
                    MouseAction::Release | MouseAction::Move => false,
                };
                if changed { Action::Redraw } else { Action::None }
            }
            Msg::Screen { .. } => Action::Redraw,
            Msg::KeyDown { .. } => Action::None,
        }
    }

    /// Left click: start first, then end, then barriers. Start and end are
    /// never painted over.
    pub fn paint(&mut self, p: Pos) -> bool {
        let Some(cell) = self.grid.at(p) else {
            return false;
        };
        let role = cell.role();
        let new_role = if self.grid.start().is_none() && role != Role::End {
            Role::Start
        } else if self.grid.end().is_none() && role != Role::Start {
            Role::End
        } else if role != Role::Start && role != Role::End {
            Role::Barrier
        } else {
            return false;
        };
        if role == new_role {
            return false;
        }
        match self.grid.set_role(p, new_role) {
            Ok(()) => {
                trace!("[editor] paint {p} {new_role:?}");
                true
            }
            Err(e) => {
                debug!("[editor] paint {p} rejected: {e}");
                false
            }
        }
    }

    /// Right click: back to an empty cell, freeing start or end.
    pub fn erase(&mut self, p: Pos) -> bool {
        let Some(cell) = self.grid.at(p) else {
            return false;
        };
        let dirty = cell.role() != Role::Empty || cell.state() != SearchState::Unvisited;
        if dirty && self.grid.clear_role(p).is_ok() {
            trace!("[editor] erase {p}");
        }
        dirty
    }

    /// Wipe roles and tags.
    pub fn clear(&mut self) {
        self.grid.reset_search_state(false);
        self.status = Status::Idle;
        debug!("[editor] board cleared");
    }

    /// Turn a random share of the empty cells into barriers.
    pub fn scatter(&mut self) -> usize {
        let density = self.config.density.clamp(0.0, 1.0);
        let mut placed = 0;
        for i in 0..self.grid.len() {
            let p = self.grid.pos(i);
            if self.grid.cell(i).role() != Role::Empty || !self.rng.random_bool(density) {
                continue;
            }
            if self.grid.set_role(p, Role::Barrier).is_ok() {
                placed += 1;
            }
        }
        debug!("[editor] scattered {placed} barriers at density {density}");
        placed
    }

    /// Refresh adjacency, drop old tags and run the engine, reporting every
    /// step to `observer`.
    pub fn search<O: StepObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<SearchReport, InvalidQuery> {
        self.grid.prepare_search();
        let report = match self.engine.run_grid(&mut self.grid, observer) {
            Ok(report) => report,
            Err(e) => {
                self.status = Status::Rejected(e.to_string());
                return Err(e);
            }
        };
        let expansions = report.stats().expansions;
        self.status = match report.outcome() {
            Outcome::PathFound => Status::Found {
                len: report.path_len().unwrap_or_default(),
                expansions,
            },
            Outcome::PathNotFound => Status::NotFound { expansions },
            Outcome::Cancelled => Status::Cancelled { expansions },
        };
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use pathviz_paths::hooks;

    use super::*;

    fn editor(rows: i32) -> Editor {
        Editor::new(EditorConfig {
            rows,
            cell_width: 2,
            seed: Some(7),
            ..EditorConfig::default()
        })
    }

    fn click(ed: &mut Editor, action: MouseAction, p: Pos) -> Action {
        ed.update(&Msg::Mouse {
            action,
            column: (p.col * 2) as u16,
            row: p.row as u16,
        })
    }

    #[test]
    fn clicks_place_start_end_then_barriers() {
        let mut ed = editor(4);
        assert_eq!(click(&mut ed, MouseAction::Main, Pos::new(0, 0)), Action::Redraw);
        assert_eq!(click(&mut ed, MouseAction::Main, Pos::new(3, 3)), Action::Redraw);
        assert_eq!(click(&mut ed, MouseAction::Main, Pos::new(1, 1)), Action::Redraw);
        assert_eq!(ed.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.grid().end(), Some(Pos::new(3, 3)));
        assert_eq!(ed.grid().at(Pos::new(1, 1)).unwrap().role(), Role::Barrier);

        // Endpoints are not painted over, repainting a barrier is a no-op.
        assert_eq!(click(&mut ed, MouseAction::Main, Pos::new(0, 0)), Action::None);
        assert_eq!(click(&mut ed, MouseAction::Main, Pos::new(1, 1)), Action::None);
        assert_eq!(ed.grid().at(Pos::new(0, 0)).unwrap().role(), Role::Start);
    }

    #[test]
    fn erasing_start_frees_it_for_the_next_click() {
        let mut ed = editor(4);
        click(&mut ed, MouseAction::Main, Pos::new(0, 0));
        click(&mut ed, MouseAction::Main, Pos::new(3, 3));
        assert_eq!(click(&mut ed, MouseAction::Secondary, Pos::new(0, 0)), Action::Redraw);
        assert_eq!(ed.grid().start(), None);
        // The next click places a start again; the end cell is skipped.
        click(&mut ed, MouseAction::Main, Pos::new(3, 3));
        assert_eq!(ed.grid().start(), None);
        click(&mut ed, MouseAction::Main, Pos::new(2, 1));
        assert_eq!(ed.grid().start(), Some(Pos::new(2, 1)));
        assert_eq!(click(&mut ed, MouseAction::Secondary, Pos::new(0, 0)), Action::None);
    }

    #[test]
    fn mouse_outside_grid_is_ignored() {
        let mut ed = editor(3);
        assert_eq!(
            ed.update(&Msg::Mouse {
                action: MouseAction::Main,
                column: 6,
                row: 0
            }),
            Action::None
        );
        assert_eq!(ed.cell_at(5, 2), Some(Pos::new(2, 2)));
        assert_eq!(ed.cell_at(0, 3), None);
    }

    #[test]
    fn keys() {
        let mut ed = editor(3);
        assert_eq!(ed.update(&Msg::key(Key::Char('q'))), Action::Quit);
        assert_eq!(ed.update(&Msg::key(Key::Space)), Action::Redraw);
        assert!(matches!(ed.status(), Status::Rejected(_)));
        click(&mut ed, MouseAction::Main, Pos::new(0, 0));
        click(&mut ed, MouseAction::Main, Pos::new(2, 2));
        assert_eq!(ed.update(&Msg::key(Key::Enter)), Action::Search);
        assert_eq!(ed.update(&Msg::key(Key::Char('c'))), Action::Redraw);
        assert_eq!(ed.grid().start(), None);
        assert_eq!(ed.status(), &Status::Idle);
        assert_eq!(ed.update(&Msg::key(Key::Char('z'))), Action::None);
    }

    #[test]
    fn scatter_respects_density_and_endpoints() {
        let mut ed = Editor::new(EditorConfig {
            rows: 5,
            density: 1.0,
            seed: Some(1),
            ..EditorConfig::default()
        });
        ed.paint(Pos::new(0, 0));
        ed.paint(Pos::new(4, 4));
        assert_eq!(ed.scatter(), 23);
        assert_eq!(ed.grid().start(), Some(Pos::new(0, 0)));
        assert_eq!(ed.grid().end(), Some(Pos::new(4, 4)));

        let mut ed = Editor::new(EditorConfig {
            rows: 5,
            density: 0.0,
            seed: Some(1),
            ..EditorConfig::default()
        });
        assert_eq!(ed.scatter(), 0);
    }

    #[test]
    fn search_updates_status_and_rerun_resets_tags() {
        let mut ed = editor(4);
        click(&mut ed, MouseAction::Main, Pos::new(0, 0));
        click(&mut ed, MouseAction::Main, Pos::new(3, 3));
        let report = ed.search(&mut ()).unwrap();
        assert_eq!(report.path_len(), Some(6));
        assert!(matches!(ed.status(), Status::Found { len: 6, .. }));

        // Wall off the end; the rerun must not reuse stale tags or adjacency.
        click(&mut ed, MouseAction::Main, Pos::new(2, 3));
        click(&mut ed, MouseAction::Main, Pos::new(3, 2));
        let report = ed.search(&mut ()).unwrap();
        assert_eq!(report.outcome(), Outcome::PathNotFound);
        assert_eq!(ed.status(), &Status::NotFound { expansions: 13 });
        assert!(
            ed.grid()
                .iter()
                .all(|(_, c)| c.state() != SearchState::Path)
        );
    }

    #[test]
    fn cancelled_search_is_reported() {
        let mut ed = editor(6);
        click(&mut ed, MouseAction::Main, Pos::new(0, 0));
        click(&mut ed, MouseAction::Main, Pos::new(5, 5));
        let mut observer = hooks(|_: &Grid| {}, || true);
        let report = ed.search(&mut observer).unwrap();
        assert_eq!(report.outcome(), Outcome::Cancelled);
        assert_eq!(ed.status(), &Status::Cancelled { expansions: 0 });
    }
}
