use crate::cell::Cell;

/// Neighbor counts under which a dead cell is born, one bit per count.
///
/// Bit `i` set means a dead cell with exactly `i` live neighbors comes alive.
/// ```notrust
/// b3:  0_0000_1000
/// ```
const BIRTHS: u16 = 0b0_0000_1000;

/// Neighbor counts under which a live cell survives, one bit per count.
/// ```notrust
/// s23: 0_0000_1100
/// ```
const SURVIVALS: u16 = 0b0_0000_1100;

/// The largest possible number of neighbors in a Moore neighborhood.
pub const MAX_NEIGHBORS: u8 = 8;

/// Apply the rules of Conway's Game of Life (B3/S23) to a single cell.
///
/// * A live cell with fewer than two or more than three live neighbors dies.
/// * A live cell with two or three live neighbors lives on.
/// * A dead cell with exactly three live neighbors becomes alive.
/// * Any other dead cell stays dead.
///
/// See: https://conwaylife.com/wiki/Rulestring
pub fn next_state(cell: Cell, live_neighbors: u8) -> Cell {
    debug_assert!(live_neighbors <= MAX_NEIGHBORS);

    let mask = 1u16 << live_neighbors;

    let set = match cell {
        Cell::Alive => SURVIVALS,
        Cell::Dead => BIRTHS,
    };

    Cell::from(set & mask == mask)
}
