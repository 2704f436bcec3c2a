use pathviz_core::Grid;

use crate::traits::StepObserver;

/// A [`StepObserver`] assembled from two closures. See [`hooks`].
pub struct Hooks<S, C> {
    step: S,
    cancel: C,
}

/// Build an observer from a redraw closure and a cancellation predicate.
///
/// ```
/// use pathviz_core::Grid;
/// use pathviz_paths::{Engine, Outcome, hooks};
///
/// let mut grid = Grid::from_layout("S...\n....\n....\n...E", 1).unwrap();
/// let mut steps = 0;
/// let mut observer = hooks(|_: &Grid| steps += 1, || false);
/// let report = Engine::new().run_grid(&mut grid, &mut observer).unwrap();
/// assert_eq!(report.outcome(), Outcome::PathFound);
/// drop(observer);
/// assert!(steps > 0);
/// ```
pub fn hooks<S, C>(step: S, cancel: C) -> Hooks<S, C>
where
    S: FnMut(&Grid),
    C: FnMut() -> bool,
{
    Hooks { step, cancel }
}

impl<S, C> StepObserver for Hooks<S, C>
where
    S: FnMut(&Grid),
    C: FnMut() -> bool,
{
    #[inline]
    fn on_step(&mut self, grid: &Grid) {
        (self.step)(grid)
    }

    #[inline]
    fn should_cancel(&mut self) -> bool {
        (self.cancel)()
    }
}
