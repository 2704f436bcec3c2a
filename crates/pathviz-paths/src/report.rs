use pathviz_core::Pos;

/// Sentinel g-score for cells the search never reached.
pub const UNREACHABLE: u32 = u32::MAX;

pub(crate) const NO_PARENT: usize = usize::MAX;

/// How a search ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    PathFound,
    /// Every cell reachable from start was expanded without meeting end.
    PathNotFound,
    /// The observer asked to stop. Tags are left as they were.
    Cancelled,
}

/// Counters collected during a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells whose neighbours were considered.
    pub expansions: usize,
    /// Entries taken off the open set, stale ones included.
    pub pops: usize,
    /// Entries put on the open set.
    pub pushes: usize,
    /// Extra entries pushed for cells already in the open set.
    pub requeued: usize,
    /// Popped entries dropped because a newer one superseded them.
    pub stale_pops: usize,
    /// Observer notifications.
    pub steps: usize,
}

/// Result of one [`Engine::run`](crate::Engine::run).
///
/// Besides the outcome and the path, the report keeps the final g-score and
/// predecessor tables of the run so they can be inspected afterwards.
#[derive(Clone, Debug)]
pub struct SearchReport {
    pub(crate) outcome: Outcome,
    pub(crate) path: Vec<Pos>,
    pub(crate) stats: SearchStats,
    pub(crate) rows: i32,
    pub(crate) g: Vec<u32>,
    pub(crate) parent: Vec<usize>,
}

impl SearchReport {
    #[inline]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.outcome == Outcome::PathFound
    }

    /// The route from start to end, both included. Empty unless a path was
    /// found.
    #[inline]
    pub fn path(&self) -> &[Pos] {
        &self.path
    }

    /// Number of steps along the path.
    pub fn path_len(&self) -> Option<usize> {
        self.is_found().then(|| self.path.len() - 1)
    }

    #[inline]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Best known cost from start to `p` when the run ended.
    pub fn g_score(&self, p: Pos) -> Option<u32> {
        self.index(p)
            .map(|i| self.g[i])
            .filter(|&g| g != UNREACHABLE)
    }

    /// The cell `p` was last reached from.
    pub fn predecessor(&self, p: Pos) -> Option<Pos> {
        let parent = self.parent[self.index(p)?];
        (parent != NO_PARENT).then(|| self.pos(parent))
    }

    /// Number of cells that got a predecessor link.
    pub fn linked(&self) -> usize {
        self.parent.iter().filter(|&&p| p != NO_PARENT).count()
    }

    fn index(&self, p: Pos) -> Option<usize> {
        if p.row < 0 || p.col < 0 || p.row >= self.rows || p.col >= self.rows {
            return None;
        }
        Some(p.row as usize * self.rows as usize + p.col as usize)
    }

    fn pos(&self, idx: usize) -> Pos {
        let n = self.rows as usize;
        Pos::new((idx / n) as i32, (idx % n) as i32)
    }
}
