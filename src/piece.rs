//! Active falling piece

use crate::board::{BOARD_DEPTH, BOARD_WIDTH};
use crate::tetromino::{BlockColor, Position, Shape, ShapeKind};
use serde::Serialize;

/// Where every new piece is anchored: horizontally centered, top layer
pub const SPAWN_ANCHOR: Position =
    Position::new(BOARD_WIDTH as i32 / 2 - 1, 0, BOARD_DEPTH as i32 / 2);

/// An active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Piece {
    /// Shape with its current (possibly rotated) offsets
    pub shape: Shape,
    /// Absolute position the block offsets are relative to
    pub anchor: Position,
    /// Number of quarter turns applied, modulo 4 (informational only)
    pub rotation: u8,
}

impl Piece {
    /// Create a new piece at the spawn anchor
    pub fn spawn(kind: ShapeKind) -> Self {
        Self {
            shape: Shape::new(kind),
            anchor: SPAWN_ANCHOR,
            rotation: 0,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind
    }

    pub fn color(&self) -> BlockColor {
        self.shape.color()
    }

    /// Absolute positions of all 4 blocks
    pub fn cells(&self) -> [Position; 4] {
        self.shape.blocks.map(|b| self.anchor + b)
    }

    /// Copy of this piece shifted by the given delta
    pub fn translated(&self, dx: i32, dy: i32, dz: i32) -> Piece {
        Piece {
            anchor: self.anchor.offset(dx, dy, dz),
            ..*self
        }
    }

    /// Copy of this piece turned a quarter about the y axis around its anchor
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotated(),
            rotation: (self.rotation + 1) % 4,
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_anchor() {
        let piece = Piece::spawn(ShapeKind::T);
        assert_eq!(piece.anchor, Position::new(4, 0, 5));
        assert_eq!(piece.rotation, 0);
    }

    #[test]
    fn test_cells_follow_anchor() {
        let piece = Piece::spawn(ShapeKind::O);
        assert_eq!(
            piece.cells(),
            [
                Position::new(4, 0, 5),
                Position::new(5, 0, 5),
                Position::new(4, 1, 5),
                Position::new(5, 1, 5),
            ]
        );
        let moved = piece.translated(0, 3, -1);
        assert_eq!(moved.cells()[3], Position::new(5, 4, 4));
        assert_eq!(piece.anchor, SPAWN_ANCHOR);
    }

    #[test]
    fn test_rotation_counter_wraps() {
        let mut piece = Piece::spawn(ShapeKind::I);
        for _ in 0..4 {
            piece = piece.rotated();
        }
        assert_eq!(piece.rotation, 0);
        assert_eq!(piece, Piece::spawn(ShapeKind::I));
    }

    #[test]
    fn test_rotated_i_runs_along_z() {
        let piece = Piece::spawn(ShapeKind::I).rotated();
        let cells = piece.cells();
        assert!(cells.iter().all(|c| c.x == 4 && c.y == 0));
        let zs: Vec<_> = cells.iter().map(|c| c.z).collect();
        assert_eq!(zs, vec![5, 6, 7, 8]);
    }
}
