use thiserror::Error;

use crate::cell::Cell;

pub type PatternResult<T> = Result<T, PatternError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PatternError {
    #[error("Unrecognized character '{got}' at line {line}, column {col}")]
    UnexpectedChar { got: char, line: usize, col: usize },

    #[error("Pattern contains no cells")]
    Empty,

    #[error("Pattern is {rows}x{cols}, which doesn't fit in a {max_rows}x{max_cols} grid")]
    TooLarge {
        rows: usize,
        cols: usize,
        max_rows: usize,
        max_cols: usize,
    },
}

/// Parse a plaintext pattern.
///
/// ```notrust
/// !Name: Blinker
/// .....
/// .***.
/// .....
/// ```
///
/// Lines starting with `!` are comments. `*` and `O` are live cells, `.` and spaces are dead ones.
/// Rows shorter than the widest row are padded with dead cells.
///
/// See: https://conwaylife.com/wiki/Plaintext
pub fn parse_pattern(text: &str) -> PatternResult<Vec<Vec<Cell>>> {
    let mut rows = Vec::new();

    for (i, line) in text.lines().enumerate() {
        if line.starts_with('!') {
            continue;
        }

        let row = line
            .trim_end()
            .chars()
            .enumerate()
            .map(|(j, c)| match c {
                '*' | 'O' | 'o' => Ok(Cell::Alive),
                '.' | ' ' => Ok(Cell::Dead),
                got => Err(PatternError::UnexpectedChar {
                    got,
                    line: i + 1,
                    col: j + 1,
                }),
            })
            .collect::<PatternResult<Vec<_>>>()?;

        rows.push(row);
    }

    // Blank lines around the pattern don't count towards its height
    while rows.last().is_some_and(Vec::is_empty) {
        rows.pop();
    }
    let leading = rows.iter().take_while(|row| row.is_empty()).count();
    rows.drain(..leading);

    let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
    if cols == 0 {
        return Err(PatternError::Empty);
    }

    for row in rows.iter_mut() {
        row.resize(cols, Cell::Dead);
    }

    Ok(rows)
}

/// Centre `pattern` in an otherwise dead `rows x cols` grid.
pub fn place(pattern: &[Vec<Cell>], rows: usize, cols: usize) -> PatternResult<Vec<Vec<Cell>>> {
    let height = pattern.len();
    let width = pattern.iter().map(Vec::len).max().unwrap_or(0);

    if height > rows || width > cols {
        return Err(PatternError::TooLarge {
            rows: height,
            cols: width,
            max_rows: rows,
            max_cols: cols,
        });
    }

    let (dr, dc) = ((rows - height) / 2, (cols - width) / 2);
    let mut grid = vec![vec![Cell::Dead; cols]; rows];

    for (r, row) in pattern.iter().enumerate() {
        for (c, &cell) in row.iter().enumerate() {
            grid[dr + r][dc + c] = cell;
        }
    }

    Ok(grid)
}
