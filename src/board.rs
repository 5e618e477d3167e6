use crate::types::{Cell, Player};

pub const BOARD_SIZE: usize = 8;
pub const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 8x8 grid of cells, row-major. Copying it is cheap, so search works on copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Cell; NUM_SQUARES],
}

impl Board {
    /// Creates the opening board:
    /// (3,3)=black, (4,4)=black, (3,4)=white, (4,3)=white.
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.set(3, 3, Cell::Black);
        board.set(4, 4, Cell::Black);
        board.set(3, 4, Cell::White);
        board.set(4, 3, Cell::White);
        board
    }

    pub fn empty() -> Self {
        Self {
            cells: [Cell::Empty; NUM_SQUARES],
        }
    }

    pub fn from_cells(cells: [Cell; NUM_SQUARES]) -> Self {
        Self { cells }
    }

    /// Returns the cell at `(row, col)`; coordinates must be in bounds.
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row * BOARD_SIZE + col]
    }

    /// Bounds-checked lookup for signed coordinates produced by direction scans.
    pub fn at(&self, row: i32, col: i32) -> Option<Cell> {
        if in_bounds(row, col) {
            Some(self.get(row as usize, col as usize))
        } else {
            None
        }
    }

    pub fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row * BOARD_SIZE + col] = cell;
    }

    /// Recolours every square in `mask` to `cell`.
    pub fn paint(&mut self, mask: u64, cell: Cell) {
        let mut bits = mask;
        while bits != 0 {
            let pos = bits.trailing_zeros() as usize;
            self.cells[pos] = cell;
            bits &= bits - 1;
        }
    }

    /// Returns `(black_count, white_count)`, kings included.
    pub fn count(&self) -> (u8, u8) {
        self.cells
            .iter()
            .fold((0u8, 0u8), |(black, white), cell| match cell.owner() {
                Some(Player::Black) => (black + 1, white),
                Some(Player::White) => (black, white + 1),
                None => (black, white),
            })
    }

    pub fn non_empty_count(&self) -> u8 {
        let (black, white) = self.count();
        black + white
    }

    /// Returns the number of empty squares.
    pub fn empty_count(&self) -> u8 {
        NUM_SQUARES as u8 - self.non_empty_count()
    }

    /// Iterates `(row, col, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(pos, &cell)| (pos / BOARD_SIZE, pos % BOARD_SIZE, cell))
    }

    /// Converts board to `[u8; 64]` using [`Cell::to_u8`].
    pub fn to_array(&self) -> [u8; NUM_SQUARES] {
        let mut out = [0u8; NUM_SQUARES];
        for (slot, cell) in out.iter_mut().zip(self.cells.iter()) {
            *slot = cell.to_u8();
        }
        out
    }

    /// Parses eight rows of `.`=empty, `b`=black, `w`=white, `B`=black king, `W`=white king.
    #[cfg(test)]
    pub(crate) fn from_rows(rows: [&str; BOARD_SIZE]) -> Self {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            assert_eq!(line.len(), BOARD_SIZE, "row {row} must have 8 cells");
            for (col, ch) in line.chars().enumerate() {
                let cell = match ch {
                    '.' => Cell::Empty,
                    'b' => Cell::Black,
                    'w' => Cell::White,
                    'B' => Cell::BlackKing,
                    'W' => Cell::WhiteKing,
                    other => panic!("unexpected cell {other:?}"),
                };
                board.set(row, col, cell);
            }
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

pub fn bit(row: usize, col: usize) -> u64 {
    1u64 << (row * BOARD_SIZE + col)
}

pub fn in_bounds(row: i32, col: i32) -> bool {
    (0..BOARD_SIZE as i32).contains(&row) && (0..BOARD_SIZE as i32).contains(&col)
}

pub fn is_border(row: usize, col: usize) -> bool {
    row == 0 || col == 0 || row == BOARD_SIZE - 1 || col == BOARD_SIZE - 1
}

pub fn bitmask_to_indices(mask: u64) -> Vec<u8> {
    let mut bits = mask;
    let mut out = Vec::new();

    while bits != 0 {
        let idx = bits.trailing_zeros() as u8;
        out.push(idx);
        bits &= bits - 1;
    }

    out
}
