use std::ops::Index;

use rand::Rng;

use crate::cell::Cell;

/// Offsets of the Moore neighborhood, the 3x3 block around a cell minus the cell itself.
///
///   (-1,-1) (-1, 0) (-1, 1)
///   ( 0,-1)         ( 0, 1)
///   ( 1,-1) ( 1, 0) ( 1, 1)
///
const NEIGHBORHOOD: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// A fixed `rows x cols` matrix of cells.
///
/// Cells are stored row-major in a single buffer. The shape is set once and never changes, only
/// the contents do. Grids are only ever built by the engine, which checks that both dimensions are
/// non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// The cell buffer, `rows * cols` long
    cells: Vec<Cell>,

    /// Number of rows
    rows: usize,

    /// Number of columns, i.e. the length of every row
    cols: usize,
}

impl Grid {
    /// Create an all-dead grid
    pub(crate) fn new(rows: usize, cols: usize) -> Self {
        debug_assert!(rows > 0 && cols > 0, "grid dimensions must be non-zero");

        Self {
            cells: vec![Cell::Dead; rows * cols],
            rows,
            cols,
        }
    }

    /// Create a grid where each cell is independently alive with probability one half
    pub(crate) fn random<R>(rows: usize, cols: usize, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let mut grid = Self::new(rows, cols);

        for cell in grid.cells.iter_mut() {
            *cell = Cell::from(rng.gen_bool(0.5));
        }

        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Get the cell at `(row, col)`, or `None` if it falls outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.rows && col < self.cols {
            Some(self.cells[self.offset(row, col)])
        } else {
            None
        }
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        assert!(row < self.rows, "row is out of bounds");
        assert!(col < self.cols, "col is out of bounds");

        let i = self.offset(row, col);
        self.cells[i] = cell;
    }

    /// A single row of the grid
    pub fn row(&self, row: usize) -> &[Cell] {
        assert!(row < self.rows, "row is out of bounds");

        let start = row * self.cols;
        &self.cells[start..start + self.cols]
    }

    /// Iterate over the rows of the grid, top to bottom
    pub fn iter_rows(&self) -> impl ExactSizeIterator<Item = &[Cell]> {
        self.cells.chunks_exact(self.cols)
    }

    /// Count the live cells in the Moore neighborhood of `(row, col)`.
    ///
    /// Neighbors that fall outside the grid count as dead. There is no wraparound, so a cell in
    /// row `0` never sees row `rows - 1`.
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        let mut n = 0;

        for (dr, dc) in NEIGHBORHOOD {
            let (Some(r), Some(c)) = (row.checked_add_signed(dr), col.checked_add_signed(dc))
            else {
                continue;
            };

            if self.get(r, c).is_some_and(Cell::is_alive) {
                n += 1;
            }
        }

        n
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.is_alive()).count()
    }

    /// Whether every cell is dead
    pub fn is_dead(&self) -> bool {
        self.cells.iter().all(|c| c.is_dead())
    }

    /// Copy the grid out as a list of rows
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.iter_rows().map(<[Cell]>::to_vec).collect()
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = Cell;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows, "row is out of bounds");
        assert!(col < self.cols, "col is out of bounds");

        &self.cells[self.offset(row, col)]
    }
}
