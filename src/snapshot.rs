//! Read-only copy of the whole game state for renderers and other observers

use crate::board::{BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::Game;
use crate::piece::Piece;
use crate::randomizer::ShapeSource;
use crate::tetromino::{BlockColor, Position, ShapeKind};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct FilledCell {
    pub position: Position,
    pub color: BlockColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ActiveSnapshot {
    pub kind: ShapeKind,
    pub anchor: Position,
    pub rotation: u8,
    pub cells: [Position; 4],
    pub color: BlockColor,
}

impl From<Piece> for ActiveSnapshot {
    fn from(piece: Piece) -> Self {
        Self {
            kind: piece.kind(),
            anchor: piece.anchor,
            rotation: piece.rotation,
            cells: piece.cells(),
            color: piece.color(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
    /// Occupied board cells, in storage order
    pub filled: Vec<FilledCell>,
    pub current: Option<ActiveSnapshot>,
    pub next_shape: ShapeKind,
    pub score: u64,
    pub level: u32,
    pub lines: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        self.current.is_some() && !self.is_game_over && !self.is_paused
    }
}

impl<R: ShapeSource> Game<R> {
    /// Capture the current state
    pub fn snapshot(&self) -> GameSnapshot {
        let score = self.score();
        GameSnapshot {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            depth: BOARD_DEPTH,
            filled: self
                .board()
                .filled_cells()
                .map(|(position, color)| FilledCell { position, color })
                .collect(),
            current: self.current_piece().copied().map(ActiveSnapshot::from),
            next_shape: self.next_shape(),
            score: score.points,
            level: score.level,
            lines: score.lines,
            is_game_over: self.is_game_over(),
            is_paused: self.is_paused(),
        }
    }
}
