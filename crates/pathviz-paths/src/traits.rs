use pathviz_core::{Grid, Pos};

/// Estimate of the remaining cost between two cells.
pub trait Heuristic {
    /// Must never overestimate the true number of steps from `from` to `to`
    /// (admissible), or the returned path may not be the shortest.
    fn estimate(&self, from: Pos, to: Pos) -> u32;
}

impl<F: Fn(Pos, Pos) -> u32> Heuristic for F {
    fn estimate(&self, from: Pos, to: Pos) -> u32 {
        self(from, to)
    }
}

/// Receives control from the engine once per step.
pub trait StepObserver {
    /// Called after each expansion and after each path cell is tagged.
    fn on_step(&mut self, grid: &Grid);

    /// Polled once per iteration before the next pop. Returning `true`
    /// aborts the search with [`Outcome::Cancelled`](crate::Outcome::Cancelled).
    fn should_cancel(&mut self) -> bool {
        false
    }
}

/// No-op observer: never redraws, never cancels.
impl StepObserver for () {
    fn on_step(&mut self, _grid: &Grid) {}
}
