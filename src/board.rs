//! Voxel board representation and collision detection

use crate::piece::Piece;
use crate::tetromino::{BlockColor, Position};

/// Well dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;
pub const BOARD_DEPTH: usize = 10;
/// Cells in one horizontal (constant y) layer
pub const LAYER_SIZE: usize = BOARD_WIDTH * BOARD_DEPTH;
pub const CELL_COUNT: usize = BOARD_WIDTH * BOARD_HEIGHT * BOARD_DEPTH;

/// A cell on the board - either empty or filled with the color of the piece that settled there
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(BlockColor),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    pub fn color(&self) -> Option<BlockColor> {
        match self {
            Cell::Filled(color) => Some(*color),
            Cell::Empty => None,
        }
    }
}

/// The game board
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    /// Flat grid indexed by `x + y * WIDTH + z * WIDTH * HEIGHT`; y = 0 is the top layer
    cells: Vec<Cell>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Check whether a position lies inside the well
pub fn in_bounds(pos: Position) -> bool {
    (0..BOARD_WIDTH as i32).contains(&pos.x)
        && (0..BOARD_HEIGHT as i32).contains(&pos.y)
        && (0..BOARD_DEPTH as i32).contains(&pos.z)
}

fn index(x: usize, y: usize, z: usize) -> usize {
    x + y * BOARD_WIDTH + z * BOARD_WIDTH * BOARD_HEIGHT
}

fn checked_index(pos: Position) -> Option<usize> {
    in_bounds(pos).then(|| index(pos.x as usize, pos.y as usize, pos.z as usize))
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: vec![Cell::Empty; CELL_COUNT],
        }
    }

    /// Get the cell at a position, None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Cell> {
        checked_index(pos).map(|i| self.cells[i])
    }

    /// Set a cell at a position. Returns false if out of bounds
    pub fn set(&mut self, pos: Position, cell: Cell) -> bool {
        match checked_index(pos) {
            Some(i) => {
                self.cells[i] = cell;
                true
            }
            None => false,
        }
    }

    /// True iff every block of the piece is in bounds and lands on an empty cell.
    /// The one collision predicate for movement, rotation, spawning and landing.
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece
            .cells()
            .iter()
            .all(|&pos| matches!(self.get(pos), Some(Cell::Empty)))
    }

    /// Settle a piece's blocks with its shape color.
    /// Out-of-bounds blocks are skipped; returns how many were skipped.
    pub fn place(&mut self, piece: &Piece) -> usize {
        let color = piece.color();
        piece
            .cells()
            .iter()
            .filter(|&&pos| !self.set(pos, Cell::Filled(color)))
            .count()
    }

    /// Check if every (x, z) cell of layer y is occupied
    pub fn is_layer_full(&self, y: usize) -> bool {
        (0..BOARD_DEPTH).all(|z| (0..BOARD_WIDTH).all(|x| self.cells[index(x, y, z)].is_filled()))
    }

    /// Remove full layers, scanning from the floor upward, and return how many were removed.
    ///
    /// Every layer above a removed one drops by one slot and the top layer is emptied;
    /// the same y is examined again since new content has just shifted into it.
    pub fn clear_lines(&mut self) -> u32 {
        let mut lines_cleared = 0;
        let mut y = BOARD_HEIGHT;

        while y > 0 {
            let row = y - 1;
            if !self.is_layer_full(row) {
                y -= 1;
                continue;
            }

            lines_cleared += 1;
            for dst in (1..=row).rev() {
                self.copy_layer(dst - 1, dst);
            }
            self.clear_layer(0);
            // Re-check `row` without decrementing
        }

        lines_cleared
    }

    fn copy_layer(&mut self, src: usize, dst: usize) {
        for z in 0..BOARD_DEPTH {
            for x in 0..BOARD_WIDTH {
                self.cells[index(x, dst, z)] = self.cells[index(x, src, z)];
            }
        }
    }

    fn clear_layer(&mut self, y: usize) {
        for z in 0..BOARD_DEPTH {
            for x in 0..BOARD_WIDTH {
                self.cells[index(x, y, z)] = Cell::Empty;
            }
        }
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Number of occupied cells in layer y
    pub fn layer_count(&self, y: usize) -> usize {
        (0..BOARD_DEPTH)
            .flat_map(|z| (0..BOARD_WIDTH).map(move |x| (x, z)))
            .filter(|&(x, z)| self.cells[index(x, y, z)].is_filled())
            .count()
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    /// Iterate over every occupied cell with its position
    pub fn filled_cells(&self) -> impl Iterator<Item = (Position, BlockColor)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let color = cell.color()?;
            let x = i % BOARD_WIDTH;
            let y = (i / BOARD_WIDTH) % BOARD_HEIGHT;
            let z = i / (BOARD_WIDTH * BOARD_HEIGHT);
            Some((Position::new(x as i32, y as i32, z as i32), color))
        })
    }
}
