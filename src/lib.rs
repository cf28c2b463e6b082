//! VOXTRIS - falling blocks in a 10x20x10 voxel well
//!
//! The engine is a plain state machine: [`Game`] owns the board, the falling piece and
//! the counters, and front ends drive it through commands plus [`Game::advance`] for
//! gravity. Renderers read [`GameSnapshot`]s or the borrowing accessors.
//!
//! ```
//! use std::time::Duration;
//! use voxtris::{Direction, Game};
//!
//! let mut game = Game::with_seed(7);
//! game.start();
//! game.move_piece(Direction::Left);
//! game.rotate();
//! game.hard_drop();
//! game.advance(Duration::from_millis(1000)); // gravity lands the piece
//! assert_eq!(game.board().filled_count(), 4);
//! ```
//!
//! Rotation only turns about the vertical axis.

pub mod board;
pub mod game;
pub mod gravity;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod snapshot;
pub mod tetromino;

pub use board::{BOARD_DEPTH, BOARD_HEIGHT, BOARD_WIDTH, Board, Cell};
pub use game::{Action, Direction, Game, MoveOutcome};
pub use gravity::GravityTimer;
pub use piece::{Piece, SPAWN_ANCHOR};
pub use randomizer::{Randomizer, Sequence, ShapeSource};
pub use score::Score;
pub use snapshot::{ActiveSnapshot, FilledCell, GameSnapshot};
pub use tetromino::{BlockColor, Position, Shape, ShapeKind};
