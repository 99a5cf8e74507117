use std::mem;

use rand::Rng;
use thiserror::Error;

use crate::Generation;
use crate::cell::Cell;
use crate::grid::Grid;
use crate::render::FrameSink;
use crate::rules;
use crate::timer::Ticker;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    #[error("Initial grid is {rows}x{cols}, but the engine expects {expected_rows}x{expected_cols}")]
    DimensionMismatch {
        expected_rows: usize,
        expected_cols: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Grid dimensions must be non-zero, got {rows}x{cols}")]
    EmptyDimensions { rows: usize, cols: usize },
}

/// Where the run loop is at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,

    /// Every cell died. Nothing is emitted or advanced after this.
    Stopped,
}

/// Why [`Engine::run`] returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The grid died out at `generation`
    GameOver { generation: Generation },

    /// The ticker stopped firing before the grid died out
    Interrupted { generation: Generation },
}

/// Simulates the Game of Life on a bounded grid.
///
/// The engine is the only owner of its grid. Collaborators hand it an initial pattern, or let it
/// pick a random one, and get read-only snapshots back.
#[derive(Debug, Clone)]
pub struct Engine {
    /// The current generation
    grid: Grid,

    /// The back buffer. Each generation is computed here in full, then swapped in.
    next: Grid,

    generation: Generation,

    state: RunState,
}

impl Engine {
    /// Create a new engine.
    ///
    /// Without an `initial` grid, every cell is alive or dead with equal probability. Otherwise
    /// `initial` must be exactly `rows x cols`, and it is copied.
    pub fn new<R>(rows: usize, cols: usize, initial: Option<&[R]>) -> Result<Self, EngineError>
    where
        R: AsRef<[Cell]>,
    {
        Self::with_rng(rows, cols, initial, &mut rand::thread_rng())
    }

    /// Like [`Engine::new`], but draws random cells from `rng`.
    pub fn with_rng<R, G>(
        rows: usize,
        cols: usize,
        initial: Option<&[R]>,
        rng: &mut G,
    ) -> Result<Self, EngineError>
    where
        R: AsRef<[Cell]>,
        G: Rng + ?Sized,
    {
        if rows == 0 || cols == 0 {
            return Err(EngineError::EmptyDimensions { rows, cols });
        }

        let grid = match initial {
            Some(initial) => Self::copy_initial(rows, cols, initial)?,
            None => Grid::random(rows, cols, rng),
        };

        tracing::info!(
            rows,
            cols,
            population = grid.population(),
            random = initial.is_none(),
            "created engine"
        );

        Ok(Self {
            grid,
            next: Grid::new(rows, cols),
            generation: 0,
            state: RunState::Running,
        })
    }

    fn copy_initial<R>(rows: usize, cols: usize, initial: &[R]) -> Result<Grid, EngineError>
    where
        R: AsRef<[Cell]>,
    {
        let mismatch = |found_cols| EngineError::DimensionMismatch {
            expected_rows: rows,
            expected_cols: cols,
            rows: initial.len(),
            cols: found_cols,
        };

        let first_cols = initial.first().map_or(0, |row| row.as_ref().len());
        if initial.len() != rows || first_cols != cols {
            return Err(mismatch(first_cols));
        }

        let mut grid = Grid::new(rows, cols);

        for (r, row) in initial.iter().enumerate() {
            let row = row.as_ref();

            // A ragged row would leave part of the grid uninitialized
            if row.len() != cols {
                return Err(mismatch(row.len()));
            }

            for (c, &cell) in row.iter().enumerate() {
                grid.set(r, c, cell);
            }
        }

        Ok(grid)
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// A read-only view of the current generation
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// How many times the grid has advanced
    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Count the live neighbors of `(row, col)`. Out of bounds neighbors are dead.
    pub fn count_live_neighbors(&self, row: usize, col: usize) -> u8 {
        self.grid.live_neighbors(row, col)
    }

    /// Advance the grid by one generation.
    ///
    /// Every cell of the next generation is computed from the current one only, then the two
    /// buffers swap. Nobody can observe a half-updated grid.
    pub fn advance(&mut self) {
        for r in 0..self.grid.rows() {
            for c in 0..self.grid.cols() {
                let n = self.grid.live_neighbors(r, c);
                let cell = rules::next_state(self.grid[(r, c)], n);

                self.next.set(r, c, cell);
            }
        }

        mem::swap(&mut self.grid, &mut self.next);
        self.generation += 1;

        tracing::debug!(
            generation = self.generation,
            population = self.grid.population(),
            "advanced"
        );
    }

    /// Whether every cell is dead
    pub fn is_terminal(&self) -> bool {
        self.grid.is_dead()
    }

    /// Run a single tick: emit the current grid, advance, then stop if everything died.
    ///
    /// On a stopped engine this does nothing.
    pub fn tick<S>(&mut self, sink: &mut S) -> Result<RunState, S::Error>
    where
        S: FrameSink,
    {
        if self.state == RunState::Stopped {
            return Ok(RunState::Stopped);
        }

        sink.frame(self.generation, &self.grid)?;
        self.advance();

        if self.is_terminal() {
            self.state = RunState::Stopped;

            tracing::info!(generation = self.generation, "game over");
            sink.game_over(self.generation)?;
        }

        Ok(self.state)
    }

    /// Tick every time `ticker` fires, until the grid dies out or the ticker stops.
    ///
    /// When the grid dies out the ticker is cancelled, so it never fires again.
    pub fn run<S, T>(&mut self, sink: &mut S, ticker: &mut T) -> Result<RunOutcome, S::Error>
    where
        S: FrameSink,
        T: Ticker,
    {
        while self.state == RunState::Running {
            if !ticker.wait() {
                tracing::info!(generation = self.generation, "ticker stopped");

                return Ok(RunOutcome::Interrupted {
                    generation: self.generation,
                });
            }

            if self.tick(sink)? == RunState::Stopped {
                ticker.cancel();
            }
        }

        Ok(RunOutcome::GameOver {
            generation: self.generation,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::convert::Infallible;

    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::Engine;
    use super::EngineError;
    use super::RunOutcome;
    use super::RunState;
    use crate::Generation;
    use crate::cell::Cell;
    use crate::grid::Grid;
    use crate::render::FrameSink;
    use crate::timer::Ticker;

    const A: Cell = Cell::Alive;
    const D: Cell = Cell::Dead;

    #[derive(Debug, PartialEq, Eq)]
    enum Record {
        Frame(Generation, Vec<Vec<Cell>>),
        GameOver(Generation),
    }

    #[derive(Default)]
    struct Recorder(Vec<Record>);

    impl FrameSink for Recorder {
        type Error = Infallible;

        fn frame(&mut self, generation: Generation, grid: &Grid) -> Result<(), Infallible> {
            self.0.push(Record::Frame(generation, grid.to_rows()));
            Ok(())
        }

        fn game_over(&mut self, generation: Generation) -> Result<(), Infallible> {
            self.0.push(Record::GameOver(generation));
            Ok(())
        }
    }

    /// Fires `remaining` times without sleeping
    struct Manual {
        remaining: u32,
        cancelled: bool,
    }

    impl Manual {
        fn new(remaining: u32) -> Self {
            Self {
                remaining,
                cancelled: false,
            }
        }
    }

    impl Ticker for Manual {
        fn wait(&mut self) -> bool {
            if self.cancelled || self.remaining == 0 {
                return false;
            }

            self.remaining -= 1;
            true
        }

        fn cancel(&mut self) {
            self.cancelled = true;
        }
    }

    fn engine(initial: &[&[Cell]]) -> Engine {
        let cols = initial[0].len();
        Engine::new(initial.len(), cols, Some(initial)).unwrap()
    }

    #[test]
    fn copies_initial_grid() {
        let initial = vec![vec![A, D, D], vec![D, D, A]];
        let engine = Engine::new(2, 3, Some(&initial[..])).unwrap();

        assert_eq!(engine.grid().to_rows(), initial);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.state(), RunState::Running);
    }

    #[test]
    fn accepts_arrays() {
        let initial = [[D; 4]; 3];
        let engine = Engine::new(3, 4, Some(&initial[..])).unwrap();

        assert_eq!((engine.rows(), engine.cols()), (3, 4));
    }

    #[test]
    fn row_count_mismatch() {
        let initial = vec![vec![D; 5]; 3];
        let err = Engine::new(4, 5, Some(&initial[..])).unwrap_err();

        assert_eq!(
            err,
            EngineError::DimensionMismatch {
                expected_rows: 4,
                expected_cols: 5,
                rows: 3,
                cols: 5,
            }
        );
    }

    #[test]
    fn col_count_mismatch() {
        let initial = vec![vec![D; 4]; 4];
        let err = Engine::new(4, 5, Some(&initial[..])).unwrap_err();

        assert!(matches!(err, EngineError::DimensionMismatch { cols: 4, .. }));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let initial = vec![vec![D; 3], vec![D; 2]];
        let err = Engine::new(2, 3, Some(&initial[..])).unwrap_err();

        assert!(matches!(err, EngineError::DimensionMismatch { cols: 2, .. }));
    }

    #[test]
    fn empty_initial_grid() {
        let initial: Vec<Vec<Cell>> = Vec::new();
        let err = Engine::new(1, 1, Some(&initial[..])).unwrap_err();

        assert!(matches!(err, EngineError::DimensionMismatch { rows: 0, cols: 0, .. }));
    }

    #[test]
    fn zero_dimensions() {
        let err = Engine::new::<Vec<Cell>>(0, 3, None).unwrap_err();

        assert_eq!(err, EngineError::EmptyDimensions { rows: 0, cols: 3 });
    }

    #[test]
    fn random_grid_has_the_right_shape() {
        let mut rng = StdRng::seed_from_u64(1);
        let engine = Engine::with_rng::<Vec<Cell>, _>(6, 9, None, &mut rng).unwrap();

        assert_eq!(engine.grid().iter_rows().len(), 6);
        assert!(engine.grid().iter_rows().all(|row| row.len() == 9));
    }

    #[test]
    fn all_dead_is_terminal_immediately() {
        let engine = engine(&[&[D, D], &[D, D]]);

        assert!(engine.is_terminal());
    }

    #[test]
    fn lonely_cell_dies() {
        let mut engine = engine(&[&[D, D, D], &[D, A, D], &[D, D, D]]);

        assert!(!engine.is_terminal());
        engine.advance();

        assert!(engine.is_terminal());
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn advance_reads_only_the_current_generation() {
        // Three cells of an L fill in to a block
        let mut engine = engine(&[&[D, A, D], &[A, A, D], &[D, D, D]]);

        engine.advance();

        assert_eq!(
            engine.grid().to_rows(),
            vec![vec![A, A, D], vec![A, A, D], vec![D, D, D]]
        );
    }

    #[test]
    fn tick_order() {
        let mut engine = engine(&[&[D, A, D], &[D, D, D]]);
        let mut sink = Recorder::default();

        let state = engine.tick(&mut sink).unwrap();

        assert_eq!(state, RunState::Stopped);
        assert_eq!(
            sink.0,
            vec![
                Record::Frame(0, vec![vec![D, A, D], vec![D, D, D]]),
                Record::GameOver(1),
            ]
        );
    }

    #[test]
    fn stopped_engine_is_inert() {
        let mut engine = engine(&[&[A]]);
        let mut sink = Recorder::default();

        engine.tick(&mut sink).unwrap();
        let len = sink.0.len();

        assert_eq!(engine.tick(&mut sink).unwrap(), RunState::Stopped);
        assert_eq!(
            engine.run(&mut sink, &mut Manual::new(5)).unwrap(),
            RunOutcome::GameOver { generation: 1 }
        );
        assert_eq!(sink.0.len(), len);
        assert_eq!(engine.generation(), 1);
    }

    #[test]
    fn run_until_game_over() {
        // A diagonal pair dies in one generation
        let mut engine = engine(&[&[A, D], &[D, A]]);
        let mut sink = Recorder::default();
        let mut ticker = Manual::new(10);

        let outcome = engine.run(&mut sink, &mut ticker).unwrap();

        assert_eq!(outcome, RunOutcome::GameOver { generation: 1 });
        assert!(ticker.cancelled);
        assert_eq!(ticker.remaining, 9);

        let game_overs = sink
            .0
            .iter()
            .filter(|r| matches!(r, Record::GameOver(_)))
            .count();
        assert_eq!(game_overs, 1);
        assert_eq!(sink.0.last(), Some(&Record::GameOver(1)));
    }

    #[test]
    fn all_dead_input_runs_one_tick() {
        let mut engine = engine(&[&[D, D], &[D, D]]);
        let mut sink = Recorder::default();

        let outcome = engine.run(&mut sink, &mut Manual::new(10)).unwrap();

        assert_eq!(outcome, RunOutcome::GameOver { generation: 1 });
        assert_eq!(
            sink.0,
            vec![
                Record::Frame(0, vec![vec![D, D], vec![D, D]]),
                Record::GameOver(1),
            ]
        );
    }

    #[test]
    fn interrupted_by_ticker() {
        let block = [[A, A], [A, A]];
        let mut engine = Engine::new(2, 2, Some(&block[..])).unwrap();
        let mut sink = Recorder::default();

        let outcome = engine.run(&mut sink, &mut Manual::new(3)).unwrap();

        assert_eq!(outcome, RunOutcome::Interrupted { generation: 3 });
        assert_eq!(engine.state(), RunState::Running);
        assert_eq!(sink.0.len(), 3);
        assert!(sink.0.iter().all(|r| matches!(r, Record::Frame(..))));
    }

    #[test]
    fn sink_errors_propagate() {
        struct Broken;

        impl FrameSink for Broken {
            type Error = &'static str;

            fn frame(&mut self, _: Generation, _: &Grid) -> Result<(), Self::Error> {
                Err("broken pipe")
            }

            fn game_over(&mut self, _: Generation) -> Result<(), Self::Error> {
                Ok(())
            }
        }

        let mut engine = engine(&[&[A, A], &[A, A]]);

        assert_eq!(engine.run(&mut Broken, &mut Manual::new(3)), Err("broken pipe"));
        assert_eq!(engine.generation(), 0);
    }
}
