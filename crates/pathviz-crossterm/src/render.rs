//! Frame diffing: only cells whose colour changed since the last draw are
//! sent to the terminal.

use pathviz_core::{Color, Grid, Pos};

/// Remembers the colour last drawn for every cell.
#[derive(Debug, Default)]
pub struct Canvas {
    prev: Vec<Option<Color>>,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget what is on screen; the next [`diff`](Canvas::diff) returns
    /// every cell.
    pub fn invalidate(&mut self) {
        self.prev.clear();
    }

    /// Cells whose projected colour differs from the previous frame.
    pub fn diff(&mut self, grid: &Grid) -> Vec<(Pos, Color)> {
        if self.prev.len() != grid.len() {
            self.prev = vec![None; grid.len()];
        }
        let mut changed = Vec::new();
        for (i, (p, cell)) in grid.iter().enumerate() {
            let color = cell.color();
            if self.prev[i] != Some(color) {
                self.prev[i] = Some(color);
                changed.push((p, color));
            }
        }
        changed
    }
}
