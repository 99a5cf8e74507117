use std::io;
use std::io::Write;

use crossterm::cursor;
use crossterm::execute;
use crossterm::terminal;

use crate::Generation;
use crate::cell::Cell;
use crate::grid::Grid;

/// Receives every frame of a run, and the end of the game.
///
/// Sinks only observe; they never feed anything back into the engine.
pub trait FrameSink {
    type Error;

    /// Called once per tick with the grid as it is before advancing.
    fn frame(&mut self, generation: Generation, grid: &Grid) -> Result<(), Self::Error>;

    /// Called exactly once, after the tick whose resulting grid is all dead.
    fn game_over(&mut self, generation: Generation) -> Result<(), Self::Error>;
}

/// Characters used to draw a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
    pub alive: char,
    pub dead: char,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            alive: '*',
            dead: ' ',
        }
    }
}

impl Glyphs {
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

/// Draw a grid as text: one line per row, then a blank separator line.
pub fn render_frame(grid: &Grid, glyphs: Glyphs) -> String {
    let mut fb = String::new();
    render_into(&mut fb, grid, glyphs);
    fb
}

fn render_into(fb: &mut String, grid: &Grid, glyphs: Glyphs) {
    // One byte per cell for ascii glyphs, plus a newline per row and the separator
    fb.reserve(grid.rows() * (grid.cols() + 1) + 1);

    for row in grid.iter_rows() {
        fb.extend(row.iter().map(|&cell| glyphs.glyph(cell)));
        fb.push('\n');
    }
    fb.push('\n');
}

pub const GAME_OVER: &str = "Game Over";

/// Writes frames as plain text to any writer
pub struct TextRenderer<W> {
    out: W,
    glyphs: Glyphs,

    /// The frame buffer, reused between frames
    fb: String,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self::with_glyphs(out, Glyphs::default())
    }

    pub fn with_glyphs(out: W, glyphs: Glyphs) -> Self {
        Self {
            out,
            glyphs,
            fb: String::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> FrameSink for TextRenderer<W> {
    type Error = io::Error;

    fn frame(&mut self, _generation: Generation, grid: &Grid) -> io::Result<()> {
        self.fb.clear();
        render_into(&mut self.fb, grid, self.glyphs);

        self.out.write_all(self.fb.as_bytes())?;
        self.out.flush()
    }

    fn game_over(&mut self, _generation: Generation) -> io::Result<()> {
        writeln!(self.out, "{GAME_OVER}")?;
        self.out.flush()
    }
}

/// Draws each frame on a freshly cleared terminal
pub struct ConsoleSink {
    stdout: io::Stdout,
    glyphs: Glyphs,
    fb: String,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            glyphs: Glyphs::default(),
            fb: String::new(),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for ConsoleSink {
    type Error = io::Error;

    fn frame(&mut self, generation: Generation, grid: &Grid) -> io::Result<()> {
        self.fb.clear();
        render_into(&mut self.fb, grid, self.glyphs);

        let mut stdout = self.stdout.lock();

        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0),
        )?;

        stdout.write_all(self.fb.as_bytes())?;
        writeln!(stdout, "generation {generation}")?;

        stdout.flush()
    }

    fn game_over(&mut self, _generation: Generation) -> io::Result<()> {
        let mut stdout = self.stdout.lock();

        writeln!(stdout, "{GAME_OVER}")?;
        stdout.flush()
    }
}
