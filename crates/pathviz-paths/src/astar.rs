use std::collections::BinaryHeap;

use log::{debug, trace};
use pathviz_core::{Grid, Pos, SearchState};

use crate::config::{Requeue, SearchConfig, TieBreak};
use crate::distance::Manhattan;
use crate::error::InvalidQuery;
use crate::report::{NO_PARENT, Outcome, SearchReport, SearchStats, UNREACHABLE};
use crate::traits::{Heuristic, StepObserver};

// ---------------------------------------------------------------------------
// Open-set entry
// ---------------------------------------------------------------------------

/// Reference into the per-run tables, ordered by `f` then by `tie`.
#[derive(Clone, Copy, Eq, PartialEq)]
struct Entry {
    idx: usize,
    f: u32,
    tie: u64,
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f, then smallest tie.
        other.f.cmp(&self.f).then_with(|| other.tie.cmp(&self.tie))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// Per-run state
// ---------------------------------------------------------------------------

/// Score tables and open set of a single search. Indexed by flat cell index.
struct Run {
    g: Vec<u32>,
    f: Vec<u32>,
    parent: Vec<usize>,
    frontier: Vec<bool>,
    open: BinaryHeap<Entry>,
    seq: u64,
    tie_break: TieBreak,
    stats: SearchStats,
}

impl Run {
    fn new(len: usize, tie_break: TieBreak) -> Self {
        Self {
            g: vec![UNREACHABLE; len],
            f: vec![UNREACHABLE; len],
            parent: vec![NO_PARENT; len],
            frontier: vec![false; len],
            open: BinaryHeap::new(),
            seq: 0,
            tie_break,
            stats: SearchStats::default(),
        }
    }

    fn push(&mut self, idx: usize) {
        let tie = match self.tie_break {
            TieBreak::Fifo => self.seq,
            TieBreak::Lifo => u64::MAX - self.seq,
        };
        self.seq += 1;
        self.stats.pushes += 1;
        self.open.push(Entry {
            idx,
            f: self.f[idx],
            tie,
        });
    }

    /// Walk predecessor links from `end` back to `start`, tagging every cell
    /// but `start` as path and notifying the observer after each one.
    fn retrace<O: StepObserver + ?Sized>(
        &mut self,
        grid: &mut Grid,
        start: usize,
        end: usize,
        observer: &mut O,
    ) -> Vec<Pos> {
        let mut path = Vec::new();
        let mut ci = end;
        while ci != start && ci != NO_PARENT {
            let p = grid.pos(ci);
            grid.set_search_state(p, SearchState::Path);
            observer.on_step(grid);
            self.stats.steps += 1;
            path.push(p);
            ci = self.parent[ci];
        }
        path.push(grid.pos(start));
        path.reverse();
        path
    }

    fn into_report(self, outcome: Outcome, path: Vec<Pos>, rows: i32) -> SearchReport {
        SearchReport {
            outcome,
            path,
            stats: self.stats,
            rows,
            g: self.g,
            parent: self.parent,
        }
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A* over a unit-cost 4-connected grid.
///
/// The engine is stateless between runs: every call to [`run`](Engine::run)
/// allocates its own score tables and returns them inside the
/// [`SearchReport`].
#[derive(Clone, Debug, Default)]
pub struct Engine<H = Manhattan> {
    config: SearchConfig,
    heuristic: H,
}

impl Engine {
    /// Manhattan heuristic, FIFO tie-break, lazy requeue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Manhattan heuristic with the given tie-break and requeue policy.
    pub fn with_config(config: SearchConfig) -> Self {
        Self {
            config,
            heuristic: Manhattan,
        }
    }
}

impl<H: Heuristic> Engine<H> {
    /// Use a custom heuristic. It must be admissible for the returned paths
    /// to be shortest.
    pub fn with_heuristic(config: SearchConfig, heuristic: H) -> Self {
        Self { config, heuristic }
    }

    /// The tie-break and requeue policy this engine runs with.
    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// [`run`](Engine::run) between the grid's own start and end cells.
    pub fn run_grid<O: StepObserver + ?Sized>(
        &self,
        grid: &mut Grid,
        observer: &mut O,
    ) -> Result<SearchReport, InvalidQuery> {
        let (start, end) = (grid.start(), grid.end());
        self.run(grid, start, end, observer)
    }

    /// Search for a shortest path from `start` to `end`.
    ///
    /// The grid's neighbour lists must be up to date. Cells are tagged
    /// [`Frontier`](SearchState::Frontier) when queued,
    /// [`Visited`](SearchState::Visited) once expanded and
    /// [`Path`](SearchState::Path) during reconstruction; `start` itself is
    /// never tagged. The observer is polled for cancellation before every
    /// pop and notified after every expansion and every path cell.
    pub fn run<O: StepObserver + ?Sized>(
        &self,
        grid: &mut Grid,
        start: Option<Pos>,
        end: Option<Pos>,
        observer: &mut O,
    ) -> Result<SearchReport, InvalidQuery> {
        let start = start.ok_or(InvalidQuery::MissingStart)?;
        let end = end.ok_or(InvalidQuery::MissingEnd)?;
        let si = grid.index(start).ok_or(InvalidQuery::OutOfBounds(start))?;
        let ei = grid.index(end).ok_or(InvalidQuery::OutOfBounds(end))?;
        if si == ei {
            return Err(InvalidQuery::SameCell(start));
        }
        for (p, i) in [(start, si), (end, ei)] {
            if grid.cell(i).is_barrier() {
                return Err(InvalidQuery::BarrierEndpoint(p));
            }
        }
        if grid.needs_refresh() {
            return Err(InvalidQuery::StaleNeighbors);
        }

        debug!(
            "[astar] run: start={start} end={end} rows={} config={:?}",
            grid.rows(),
            self.config
        );

        let mut run = Run::new(grid.len(), self.config.tie_break);
        run.g[si] = 0;
        run.f[si] = self.heuristic.estimate(start, end);
        run.frontier[si] = true;
        run.push(si);

        let mut nbuf: Vec<Pos> = Vec::with_capacity(4);

        let outcome = loop {
            if observer.should_cancel() {
                break Outcome::Cancelled;
            }
            let Some(current) = run.open.pop() else {
                break Outcome::PathNotFound;
            };
            run.stats.pops += 1;
            let ci = current.idx;

            // Skip entries superseded by a cheaper requeue.
            if self.config.requeue == Requeue::Lazy
                && (!run.frontier[ci] || current.f != run.f[ci])
            {
                run.stats.stale_pops += 1;
                continue;
            }
            run.frontier[ci] = false;

            if ci == ei {
                break Outcome::PathFound;
            }

            run.stats.expansions += 1;
            let next_g = run.g[ci] + 1;
            let current_pos = grid.pos(ci);
            trace!(
                "[astar] expand {current_pos} g={} f={}",
                run.g[ci],
                run.f[ci]
            );

            nbuf.clear();
            nbuf.extend_from_slice(grid.cell(ci).neighbors());

            for &np in nbuf.iter() {
                let Some(ni) = grid.index(np) else {
                    continue;
                };
                if next_g >= run.g[ni] {
                    continue;
                }
                run.g[ni] = next_g;
                run.f[ni] = next_g + self.heuristic.estimate(np, end);
                run.parent[ni] = ci;

                if !run.frontier[ni] {
                    run.frontier[ni] = true;
                    run.push(ni);
                    grid.set_search_state(np, SearchState::Frontier);
                } else if self.config.requeue == Requeue::Lazy {
                    run.stats.requeued += 1;
                    run.push(ni);
                }
            }

            observer.on_step(grid);
            run.stats.steps += 1;

            if ci != si {
                grid.set_search_state(current_pos, SearchState::Visited);
            }
        };

        let path = match outcome {
            Outcome::PathFound => run.retrace(grid, si, ei, observer),
            Outcome::PathNotFound | Outcome::Cancelled => Vec::new(),
        };

        debug!(
            "[astar] {outcome:?}: path_len={} expansions={} pops={} requeued={}",
            path.len().saturating_sub(1),
            run.stats.expansions,
            run.stats.pops,
            run.stats.requeued
        );

        Ok(run.into_report(outcome, path, grid.rows()))
    }
}
