//! Terminal A* visualiser.
//!
//! Run: cargo run --bin pathviz -- --rows 20

use std::time::Duration;

use clap::Parser;
use pathviz_crossterm::EditorConfig;
use pathviz_paths::{Requeue, SearchConfig, TieBreak};

/// Paint barriers on a grid and watch A* find its way from start to end.
#[derive(Parser, Debug)]
#[command(name = "pathviz", version)]
struct Args {
    /// Rows (and columns) of the grid.
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(i32).range(2..=200))]
    rows: i32,

    /// Terminal columns per grid cell.
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i32).range(1..=8))]
    cell_width: i32,

    /// Pause after each search step, in milliseconds.
    #[arg(long, default_value_t = 20)]
    delay_ms: u64,

    /// Share of empty cells turned into barriers by `r`.
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Seed for barrier scattering.
    #[arg(long)]
    seed: Option<u64>,

    /// Break priority ties newest-first instead of oldest-first.
    #[arg(long)]
    lifo: bool,

    /// Never requeue a frontier cell whose cost improved.
    #[arg(long)]
    no_requeue: bool,
}

impl Args {
    fn into_config(self) -> EditorConfig {
        EditorConfig {
            rows: self.rows,
            cell_width: self.cell_width,
            step_delay: Duration::from_millis(self.delay_ms),
            density: self.density,
            seed: self.seed,
            search: SearchConfig {
                tie_break: if self.lifo {
                    TieBreak::Lifo
                } else {
                    TieBreak::Fifo
                },
                requeue: if self.no_requeue {
                    Requeue::Never
                } else {
                    Requeue::Lazy
                },
            },
        }
    }
}

fn main() {
    let config = Args::parse().into_config();
    if let Err(e) = pathviz_crossterm::run(config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
