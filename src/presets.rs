use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Cell;

const A: Cell = Cell::Alive;
const D: Cell = Cell::Dead;

/// 2x2 still life
static BLOCK: [[Cell; 4]; 4] = [
    [D, D, D, D],
    [D, A, A, D],
    [D, A, A, D],
    [D, D, D, D],
];

/// Period 2 oscillator, starting horizontal
static BLINKER: [[Cell; 5]; 5] = [
    [D, D, D, D, D],
    [D, D, D, D, D],
    [D, A, A, A, D],
    [D, D, D, D, D],
    [D, D, D, D, D],
];

/// Heads south-east until it runs into the corner of the grid
static GLIDER: [[Cell; 8]; 8] = [
    [D, A, D, D, D, D, D, D],
    [D, D, A, D, D, D, D, D],
    [A, A, A, D, D, D, D, D],
    [D, D, D, D, D, D, D, D],
    [D, D, D, D, D, D, D, D],
    [D, D, D, D, D, D, D, D],
    [D, D, D, D, D, D, D, D],
    [D, D, D, D, D, D, D, D],
];

/// Named starting patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Block,
    Blinker,
    Glider,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Block, Preset::Blinker, Preset::Glider];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Block => "block",
            Preset::Blinker => "blinker",
            Preset::Glider => "glider",
        }
    }

    /// The rows of the preset grid
    pub fn grid(self) -> Vec<&'static [Cell]> {
        match self {
            Preset::Block => BLOCK.iter().map(|row| row.as_slice()).collect(),
            Preset::Blinker => BLINKER.iter().map(|row| row.as_slice()).collect(),
            Preset::Glider => GLIDER.iter().map(|row| row.as_slice()).collect(),
        }
    }

    /// `(rows, cols)` of the preset grid
    pub fn dimensions(self) -> (usize, usize) {
        match self {
            Preset::Block => (BLOCK.len(), BLOCK[0].len()),
            Preset::Blinker => (BLINKER.len(), BLINKER[0].len()),
            Preset::Glider => (GLIDER.len(), GLIDER[0].len()),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown preset \"{0}\", expected one of: block, blinker, glider")]
pub struct UnknownPreset(pub String);

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|preset| preset.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}
