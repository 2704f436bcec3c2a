use pathviz_core::Pos;

use crate::traits::Heuristic;

/// Manhattan (L1) distance between two cells.
#[inline]
pub fn manhattan(a: Pos, b: Pos) -> u32 {
    a.manhattan(b)
}

/// The L1 heuristic. Admissible and consistent on a 4-connected grid with
/// unit step cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Manhattan;

impl Heuristic for Manhattan {
    #[inline]
    fn estimate(&self, from: Pos, to: Pos) -> u32 {
        manhattan(from, to)
    }
}
