//! The [`Cell`] type: one square of the grid, with its role and search tag.

use crate::geom::Pos;
use crate::style::Color;

/// What the user painted on a cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
}

impl Role {
    /// Glyph used by the text layout format.
    pub const fn glyph(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Barrier => '#',
            Role::Start => 'S',
            Role::End => 'E',
        }
    }

    /// Inverse of [`glyph`](Role::glyph).
    pub const fn from_glyph(ch: char) -> Option<Role> {
        match ch {
            '.' => Some(Role::Empty),
            '#' => Some(Role::Barrier),
            'S' => Some(Role::Start),
            'E' => Some(Role::End),
            _ => None,
        }
    }
}

/// What a search did with a cell. Orthogonal to [`Role`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchState {
    #[default]
    Unvisited,
    /// Discovered and waiting in the open set.
    Frontier,
    /// Popped and fully expanded.
    Visited,
    /// Part of the reconstructed route.
    Path,
}

/// A grid cell.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) role: Role,
    pub(crate) state: SearchState,
    pub(crate) neighbors: Vec<Pos>,
}

impl Cell {
    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Open orthogonal neighbours as of the last
    /// [`refresh_neighbors`](crate::Grid::refresh_neighbors).
    #[inline]
    pub fn neighbors(&self) -> &[Pos] {
        &self.neighbors
    }

    #[inline]
    pub fn is_barrier(&self) -> bool {
        self.role == Role::Barrier
    }

    /// Colour of the cell. Role colours win over search-state colours, so
    /// the endpoints keep their own colour once a path is drawn through them.
    pub fn color(&self) -> Color {
        match (self.role, self.state) {
            (Role::Start, _) => Color::BLUE,
            (Role::End, _) => Color::DARK_RED,
            (Role::Barrier, _) => Color::BLACK,
            (Role::Empty, SearchState::Unvisited) => Color::PINKISH_WHITE,
            (Role::Empty, SearchState::Frontier) => Color::ORANGE,
            (Role::Empty, SearchState::Visited) => Color::RED,
            (Role::Empty, SearchState::Path) => Color::GREEN,
        }
    }

    /// Single-character rendering, same precedence as [`color`](Cell::color).
    pub fn glyph(&self) -> char {
        match (self.role, self.state) {
            (Role::Empty, SearchState::Frontier) => 'o',
            (Role::Empty, SearchState::Visited) => 'x',
            (Role::Empty, SearchState::Path) => '*',
            (role, _) => role.glyph(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(role: Role, state: SearchState) -> Cell {
        Cell {
            role,
            state,
            neighbors: Vec::new(),
        }
    }

    #[test]
    fn role_color_wins_over_state() {
        assert_eq!(cell(Role::End, SearchState::Path).color(), Color::DARK_RED);
        assert_eq!(cell(Role::Start, SearchState::Frontier).color(), Color::BLUE);
        assert_eq!(cell(Role::Empty, SearchState::Path).color(), Color::GREEN);
        assert_eq!(cell(Role::Empty, SearchState::Visited).color(), Color::RED);
    }

    #[test]
    fn glyphs() {
        assert_eq!(cell(Role::Empty, SearchState::Unvisited).glyph(), '.');
        assert_eq!(cell(Role::Empty, SearchState::Frontier).glyph(), 'o');
        assert_eq!(cell(Role::Barrier, SearchState::Unvisited).glyph(), '#');
        assert_eq!(cell(Role::End, SearchState::Path).glyph(), 'E');
        for role in [Role::Empty, Role::Barrier, Role::Start, Role::End] {
            assert_eq!(Role::from_glyph(role.glyph()), Some(role));
        }
        assert_eq!(Role::from_glyph('?'), None);
    }
}
