//! The [`Grid`] type: a square board of [`Cell`]s.
//!
//! The grid is the only state shared between the editor that paints it and
//! the search that explores it. It keeps the single-start / single-end
//! invariant, and remembers whether its cached neighbour lists still match
//! the barrier layout.

use std::fmt;

use crate::cell::{Cell, Role, SearchState};
use crate::geom::Pos;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised by grid edits and layout parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// The position lies outside the grid.
    OutOfBounds(Pos),
    /// A second start or end was requested; `at` already holds the role.
    RoleTaken { role: Role, at: Pos },
    /// A layout line does not have as many columns as there are lines.
    NotSquare { line: usize, width: usize, rows: usize },
    /// A layout contains a character with no role.
    InvalidGlyph { ch: char, pos: Pos },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "position {p} is outside the grid"),
            Self::RoleTaken { role, at } => {
                write!(f, "{role:?} is already placed at {at}")
            }
            Self::NotSquare { line, width, rows } => write!(
                f,
                "layout is not square: line {line} has {width} columns, expected {rows}"
            ),
            Self::InvalidGlyph { ch, pos } => {
                write!(f, "layout contains invalid glyph \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An N×N grid of cells, stored row-major.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    rows: i32,
    cell_size: i32,
    start: Option<Pos>,
    end: Option<Pos>,
    stale: bool,
}

impl Grid {
    /// Create a `rows`×`rows` grid of empty cells, each `cell_size` pixels
    /// wide. Negative sizes clamp to zero.
    pub fn new(rows: i32, cell_size: i32) -> Self {
        let rows = rows.max(0);
        let n = rows as usize;
        Self {
            cells: vec![Cell::default(); n * n],
            rows,
            cell_size: cell_size.max(0),
            start: None,
            end: None,
            stale: true,
        }
    }

    /// Parse a square text layout made of `.`, `#`, `S` and `E`.
    ///
    /// Surrounding whitespace and blank lines are ignored. The returned grid
    /// has its neighbour lists refreshed.
    pub fn from_layout(layout: &str, cell_size: i32) -> Result<Self, GridError> {
        let lines: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let rows = lines.len();
        let mut grid = Grid::new(rows as i32, cell_size);
        for (r, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != rows {
                return Err(GridError::NotSquare {
                    line: r,
                    width,
                    rows,
                });
            }
            for (c, ch) in line.chars().enumerate() {
                let pos = Pos::new(r as i32, c as i32);
                let role = Role::from_glyph(ch).ok_or(GridError::InvalidGlyph { ch, pos })?;
                grid.set_role(pos, role)?;
            }
        }
        grid.refresh_neighbors();
        Ok(grid)
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Side length of a cell in pixels.
    #[inline]
    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn contains(&self, p: Pos) -> bool {
        p.row >= 0 && p.col >= 0 && p.row < self.rows && p.col < self.rows
    }

    /// Flat row-major index of `p`, or `None` outside the grid.
    #[inline]
    pub fn index(&self, p: Pos) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some(p.row as usize * self.rows as usize + p.col as usize)
    }

    /// Inverse of [`index`](Grid::index).
    #[inline]
    pub fn pos(&self, idx: usize) -> Pos {
        let n = self.rows as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }

    /// The cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn cell(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// The cell at `p`, if inside the grid.
    #[inline]
    pub fn at(&self, p: Pos) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// Where the start cell is, if placed.
    #[inline]
    pub fn start(&self) -> Option<Pos> {
        self.start
    }

    /// Where the end cell is, if placed.
    #[inline]
    pub fn end(&self) -> Option<Pos> {
        self.end
    }

    /// Whether barriers changed since the last
    /// [`refresh_neighbors`](Grid::refresh_neighbors).
    #[inline]
    pub fn needs_refresh(&self) -> bool {
        self.stale
    }

    /// Row-major iterator over `(Pos, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Pos, &Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, c)| (self.pos(i), c))
    }

    // -----------------------------------------------------------------------
    // Editing
    // -----------------------------------------------------------------------

    /// Paint `role` on the cell at `p`.
    ///
    /// A second start or end is rejected with [`GridError::RoleTaken`];
    /// overwriting the current start or end frees that role. Any change
    /// resets the cell's search state.
    pub fn set_role(&mut self, p: Pos, role: Role) -> Result<(), GridError> {
        let i = self.index(p).ok_or(GridError::OutOfBounds(p))?;
        let old = self.cells[i].role;
        if old == role {
            return Ok(());
        }

        let taken = match role {
            Role::Start => self.start,
            Role::End => self.end,
            _ => None,
        };
        if let Some(at) = taken {
            return Err(GridError::RoleTaken { role, at });
        }

        match old {
            Role::Start => self.start = None,
            Role::End => self.end = None,
            _ => {}
        }
        match role {
            Role::Start => self.start = Some(p),
            Role::End => self.end = Some(p),
            _ => {}
        }
        if old == Role::Barrier || role == Role::Barrier {
            self.stale = true;
        }

        let cell = &mut self.cells[i];
        cell.role = role;
        cell.state = SearchState::Unvisited;
        Ok(())
    }

    /// Reset the cell at `p` to an empty, unvisited cell.
    pub fn clear_role(&mut self, p: Pos) -> Result<(), GridError> {
        self.set_role(p, Role::Empty)?;
        if let Some(i) = self.index(p) {
            self.cells[i].state = SearchState::Unvisited;
        }
        Ok(())
    }

    /// Tag the cell at `p`. No-op outside the grid.
    pub fn set_search_state(&mut self, p: Pos, state: SearchState) {
        if let Some(i) = self.index(p) {
            self.cells[i].state = state;
        }
    }

    /// Rebuild every cell's list of open orthogonal neighbours.
    ///
    /// Barrier cells get an empty list and never appear in another list.
    pub fn refresh_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let neighbors: Vec<Pos> = if self.cells[i].is_barrier() {
                Vec::new()
            } else {
                self.pos(i)
                    .neighbors_4()
                    .into_iter()
                    .filter(|&n| self.index(n).is_some_and(|j| !self.cells[j].is_barrier()))
                    .collect()
            };
            self.cells[i].neighbors = neighbors;
        }
        self.stale = false;
    }

    /// Mark every cell unvisited. With `preserve_roles == false` the board
    /// is wiped as well.
    pub fn reset_search_state(&mut self, preserve_roles: bool) {
        let mut removed_barrier = false;
        for cell in &mut self.cells {
            cell.state = SearchState::Unvisited;
            if !preserve_roles {
                removed_barrier |= cell.is_barrier();
                cell.role = Role::Empty;
            }
        }
        if !preserve_roles {
            self.start = None;
            self.end = None;
            self.stale |= removed_barrier;
        }
    }

    /// Get the grid ready for a (re)run: fresh adjacency, no leftover tags,
    /// roles untouched.
    pub fn prepare_search(&mut self) {
        self.refresh_neighbors();
        self.reset_search_state(true);
    }

    // -----------------------------------------------------------------------
    // Pixel mapping
    // -----------------------------------------------------------------------

    /// The cell under pixel `(x, y)`, if any.
    pub fn pos_at(&self, x: i32, y: i32) -> Option<Pos> {
        if x < 0 || y < 0 || self.cell_size == 0 {
            return None;
        }
        let p = Pos::new(y / self.cell_size, x / self.cell_size);
        self.contains(p).then_some(p)
    }

    /// Top-left pixel `(x, y)` of the cell at `p`.
    #[inline]
    pub fn origin_of(&self, p: Pos) -> (i32, i32) {
        (p.col * self.cell_size, p.row * self.cell_size)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.rows.max(1) as usize) {
            let line: String = row.iter().map(Cell::glyph).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_empty_and_stale() {
        let g = Grid::new(4, 10);
        assert_eq!(g.len(), 16);
        assert_eq!(g.rows(), 4);
        assert!(g.needs_refresh());
        assert!(
            g.iter()
                .all(|(_, c)| c.role() == Role::Empty && c.state() == SearchState::Unvisited)
        );
        assert_eq!(Grid::new(-3, 10).len(), 0);
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::new(5, 1);
        for i in 0..g.len() {
            assert_eq!(g.index(g.pos(i)), Some(i));
        }
        assert_eq!(g.index(Pos::new(5, 0)), None);
        assert_eq!(g.index(Pos::new(0, -1)), None);
    }

    #[test]
    fn second_start_is_rejected() {
        let mut g = Grid::new(3, 1);
        g.set_role(Pos::new(0, 0), Role::Start).unwrap();
        let err = g.set_role(Pos::new(1, 1), Role::Start).unwrap_err();
        assert_eq!(
            err,
            GridError::RoleTaken {
                role: Role::Start,
                at: Pos::new(0, 0)
            }
        );
        // Re-painting the same cell is fine.
        g.set_role(Pos::new(0, 0), Role::Start).unwrap();
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn overwriting_endpoint_frees_role() {
        let mut g = Grid::new(3, 1);
        g.set_role(Pos::new(2, 2), Role::End).unwrap();
        g.set_role(Pos::new(2, 2), Role::Barrier).unwrap();
        assert_eq!(g.end(), None);
        g.set_role(Pos::new(0, 1), Role::End).unwrap();
        assert_eq!(g.end(), Some(Pos::new(0, 1)));
    }

    #[test]
    fn clear_role_resets_cell() {
        let mut g = Grid::new(3, 1);
        let p = Pos::new(1, 1);
        g.set_role(p, Role::Start).unwrap();
        g.set_search_state(p, SearchState::Visited);
        g.clear_role(p).unwrap();
        let cell = g.at(p).unwrap();
        assert_eq!(cell.role(), Role::Empty);
        assert_eq!(cell.state(), SearchState::Unvisited);
        assert_eq!(g.start(), None);
        assert_eq!(
            g.clear_role(Pos::new(9, 9)),
            Err(GridError::OutOfBounds(Pos::new(9, 9)))
        );
    }

    #[test]
    fn refresh_excludes_barriers_and_bounds() {
        let mut g = Grid::from_layout(
            "
            .#.
            ...
            ...
            ",
            1,
        )
        .unwrap();
        assert!(!g.needs_refresh());
        // Corner next to a barrier: only the cell below.
        assert_eq!(g.at(Pos::new(0, 0)).unwrap().neighbors(), &[Pos::new(1, 0)]);
        // Centre: down, right, left (up is the barrier).
        assert_eq!(
            g.at(Pos::new(1, 1)).unwrap().neighbors(),
            &[Pos::new(2, 1), Pos::new(1, 2), Pos::new(1, 0)]
        );
        assert!(g.at(Pos::new(0, 1)).unwrap().neighbors().is_empty());

        g.clear_role(Pos::new(0, 1)).unwrap();
        assert!(g.needs_refresh());
        g.refresh_neighbors();
        assert_eq!(
            g.at(Pos::new(0, 0)).unwrap().neighbors(),
            &[Pos::new(1, 0), Pos::new(0, 1)]
        );
    }

    #[test]
    fn reset_search_state_keeps_or_wipes_roles() {
        let mut g = Grid::from_layout("S#\n.E", 1).unwrap();
        g.set_search_state(Pos::new(1, 0), SearchState::Path);

        g.reset_search_state(true);
        assert_eq!(g.at(Pos::new(1, 0)).unwrap().state(), SearchState::Unvisited);
        assert_eq!(g.at(Pos::new(0, 1)).unwrap().role(), Role::Barrier);
        assert_eq!(g.start(), Some(Pos::new(0, 0)));
        assert!(!g.needs_refresh());

        g.reset_search_state(false);
        assert!(g.iter().all(|(_, c)| c.role() == Role::Empty));
        assert_eq!(g.start(), None);
        assert_eq!(g.end(), None);
        assert!(g.needs_refresh());
    }

    #[test]
    fn prepare_search_clears_tags_keeps_roles() {
        let mut g = Grid::from_layout("S.\n#E", 1).unwrap();
        g.set_search_state(Pos::new(0, 1), SearchState::Visited);
        g.set_role(Pos::new(1, 0), Role::Empty).unwrap();
        g.prepare_search();
        assert!(!g.needs_refresh());
        assert_eq!(g.at(Pos::new(0, 1)).unwrap().state(), SearchState::Unvisited);
        assert_eq!(g.at(Pos::new(1, 0)).unwrap().neighbors().len(), 2);
        assert_eq!(g.end(), Some(Pos::new(1, 1)));
    }

    #[test]
    fn layout_errors() {
        assert_eq!(
            Grid::from_layout("..\n...", 1).unwrap_err(),
            GridError::NotSquare {
                line: 1,
                width: 3,
                rows: 2
            }
        );
        assert_eq!(
            Grid::from_layout(".?\n..", 1).unwrap_err(),
            GridError::InvalidGlyph {
                ch: '?',
                pos: Pos::new(0, 1)
            }
        );
        assert!(matches!(
            Grid::from_layout("SS\n..", 1),
            Err(GridError::RoleTaken {
                role: Role::Start,
                ..
            })
        ));
    }

    #[test]
    fn display_renders_layout() {
        let layout = "S.#\n...\n#.E\n";
        let mut g = Grid::from_layout(layout, 1).unwrap();
        assert_eq!(g.to_string(), layout);
        g.set_search_state(Pos::new(0, 1), SearchState::Path);
        g.set_search_state(Pos::new(1, 1), SearchState::Frontier);
        g.set_search_state(Pos::new(2, 2), SearchState::Path);
        assert_eq!(g.to_string(), "S*#\n.o.\n#.E\n");
    }

    #[test]
    fn pixel_mapping() {
        let g = Grid::new(30, 20);
        assert_eq!(g.pos_at(0, 0), Some(Pos::new(0, 0)));
        assert_eq!(g.pos_at(45, 19), Some(Pos::new(0, 2)));
        assert_eq!(g.pos_at(599, 599), Some(Pos::new(29, 29)));
        assert_eq!(g.pos_at(600, 0), None);
        assert_eq!(g.pos_at(-1, 0), None);
        assert_eq!(g.origin_of(Pos::new(2, 3)), (60, 40));
    }
}
