use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use crate::cell::Cell;
use crate::pattern;
use crate::presets::Preset;

/// Size of a random grid when none is given
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 40;

/// Conway's Game of Life on a bounded grid
#[derive(Parser, Debug)]
#[command(name = "conway", version)]
pub struct Cli {
    /// Start from a named pattern: block, blinker or glider
    #[arg(long, conflicts_with = "pattern")]
    pub preset: Option<Preset>,

    /// Start from a plaintext pattern file
    #[arg(long, value_name = "FILE")]
    pub pattern: Option<PathBuf>,

    /// Number of rows. Defaults to the pattern's height
    #[arg(long)]
    pub rows: Option<usize>,

    /// Number of columns. Defaults to the pattern's width
    #[arg(long)]
    pub cols: Option<usize>,

    /// Time between generations
    #[arg(long, value_name = "MS", default_value_t = 1000)]
    pub interval_ms: u64,

    /// Stop after this many generations, even if cells are still alive
    #[arg(long, value_name = "N")]
    pub generations: Option<u64>,

    /// Seed for the random starting grid
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print frames one after another instead of redrawing the terminal
    #[arg(long)]
    pub plain: bool,
}

/// Everything needed to start a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub rows: usize,
    pub cols: usize,

    /// `None` for a random grid
    pub initial: Option<Vec<Vec<Cell>>>,

    pub interval: Duration,
    pub generations: Option<u64>,
    pub seed: Option<u64>,
    pub plain: bool,
}

impl Cli {
    /// Resolve the starting grid and its dimensions. Reads the pattern file, if any.
    pub fn into_config(self) -> anyhow::Result<RunConfig> {
        let cells: Option<Vec<Vec<Cell>>> = match (&self.preset, &self.pattern) {
            (Some(preset), _) => Some(preset.grid().iter().map(|row| row.to_vec()).collect()),
            (None, Some(path)) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read pattern {}", path.display()))?;
                let cells = pattern::parse_pattern(&text)
                    .with_context(|| format!("Failed to parse pattern {}", path.display()))?;

                Some(cells)
            }
            (None, None) => None,
        };

        let (initial, rows, cols) = match cells {
            Some(cells) => {
                let rows = self.rows.unwrap_or(cells.len());
                let cols = self.cols.unwrap_or(cells[0].len());

                let initial = pattern::place(&cells, rows, cols)
                    .context("Failed to place pattern")?;

                (Some(initial), rows, cols)
            }
            None => (
                None,
                self.rows.unwrap_or(DEFAULT_ROWS),
                self.cols.unwrap_or(DEFAULT_COLS),
            ),
        };

        Ok(RunConfig {
            rows,
            cols,
            initial,
            interval: Duration::from_millis(self.interval_ms),
            generations: self.generations,
            seed: self.seed,
            plain: self.plain,
        })
    }
}
