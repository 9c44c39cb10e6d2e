use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use super::Player;
use crate::error::{GameError, MoveError};

/// Number of same-player tokens in a line needed to win.
pub const CONNECT: usize = 4;

/// The four line orientations through a cell: horizontal, vertical, and the
/// two diagonals. Each is walked in both signs.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    Occupied(Player),
}

impl Cell {
    /// 0 for empty, otherwise the occupant's player number
    pub fn number(self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Occupied(player) => player.number(),
        }
    }
}

/// Largest cell count a board can allocate.
const MAX_CELLS: usize = isize::MAX as usize / std::mem::size_of::<Cell>();

/// Board size; both sides are positive and the cell count fits in memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self, GameError> {
        match rows.checked_mul(cols) {
            Some(cells) if rows > 0 && cols > 0 && cells <= MAX_CELLS => {
                Ok(Dimensions { rows, cols })
            }
            _ => Err(GameError::InvalidDimensions { rows, cols }),
        }
    }

    /// Constructor for fixed sizes; use in a `const` so a bad size fails the build.
    pub const fn fixed(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be positive");
        assert!(
            rows <= MAX_CELLS / cols,
            "board cell count exceeds the largest allocatable board"
        );
        Dimensions { rows, cols }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }
}

/// A `rows x cols` grid. Row 0 is the top, row `rows - 1` is the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    dims: Dimensions,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(dims: Dimensions) -> Self {
        Board {
            dims,
            cells: vec![Cell::Empty; dims.cell_count()],
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Get the cell at a specific position.
    ///
    /// Panics if the position is outside the board.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(row < self.rows() && col < self.cols(), "cell ({row}, {col}) out of bounds");
        self.cells[self.index(row, col)]
    }

    /// One row of cells, left to right
    pub fn row(&self, row: usize) -> &[Cell] {
        let start = row * self.cols();
        &self.cells[start..start + self.cols()]
    }

    /// Lowest empty row in `col`, or `None` when the column is full.
    /// Columns outside the board have no landing row.
    pub fn landing_row(&self, col: usize) -> Option<usize> {
        if col >= self.cols() {
            return None;
        }
        (0..self.rows())
            .rev()
            .find(|&row| self.get(row, col) == Cell::Empty)
    }

    /// Check if a column is full. Columns outside the board count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= self.cols() {
            return true;
        }
        self.get(0, col) != Cell::Empty
    }

    /// Drop a piece in a column, returns the row where it landed
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        if col >= self.cols() {
            return Err(MoveError::InvalidColumn {
                column: col,
                cols: self.cols(),
            });
        }

        let row = self.landing_row(col).ok_or(MoveError::ColumnFull { column: col })?;
        let idx = self.index(row, col);
        self.cells[idx] = Cell::Occupied(player);
        Ok(row)
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Cell::Empty)
    }

    /// Check whether `player` has at least `CONNECT` in a line through (row, col).
    ///
    /// The cell at (row, col) counts as one of the player's tokens. Only lines
    /// through that cell are examined, which is sufficient when it holds the
    /// most recent move.
    pub fn check_win(&self, row: usize, col: usize, player: Player) -> bool {
        DIRECTIONS.iter().any(|&(dr, dc)| {
            let count = 1
                + self.count_direction(row, col, player, dr, dc)
                + self.count_direction(row, col, player, -dr, -dc);
            count >= CONNECT
        })
    }

    /// Count contiguous `player` cells starting next to (row, col) and walking
    /// by (dr, dc) until a different cell or the edge of the board.
    fn count_direction(&self, row: usize, col: usize, player: Player, dr: isize, dc: isize) -> usize {
        let mut count = 0;
        let mut r = row as isize + dr;
        let mut c = col as isize + dc;
        while let Some(cell) = self.cell_at(r, c) {
            if cell != Cell::Occupied(player) {
                break;
            }
            count += 1;
            r += dr;
            c += dc;
        }
        count
    }

    fn cell_at(&self, row: isize, col: isize) -> Option<Cell> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        if row >= self.rows() || col >= self.cols() {
            return None;
        }
        Some(self.cells[self.index(row, col)])
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols() + col
    }
}

/// Serialized as a matrix of player numbers, top row first.
impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in 0..self.rows() {
            let numbers: Vec<u8> = self.row(row).iter().map(|cell| cell.number()).collect();
            seq.serialize_element(&numbers)?;
        }
        seq.end()
    }
}
