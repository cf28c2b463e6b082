//! Core game state and logic
//!
//! `Game` owns the board, the falling piece, the next-shape lookahead, the score and
//! the gravity timer. Every command runs to completion before returning; commands that
//! are not legal right now are silent no-ops, never errors.

use crate::board::Board;
use crate::gravity::GravityTimer;
use crate::piece::Piece;
use crate::randomizer::{Randomizer, ShapeSource};
use crate::score::Score;
use crate::tetromino::ShapeKind;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Directions a piece can be moved in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    /// Toward the viewer (z - 1)
    Forward,
    /// Away from the viewer (z + 1)
    Backward,
}

impl Direction {
    /// (dx, dy, dz) applied to the anchor
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Direction::Left => (-1, 0, 0),
            Direction::Right => (1, 0, 0),
            Direction::Down => (0, 1, 0),
            Direction::Forward => (0, 0, -1),
            Direction::Backward => (0, 0, 1),
        }
    }
}

/// Input actions the game can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Rotate,
    HardDrop,
    Pause,
    Restart,
}

/// What a move command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// No piece, paused, or game over
    Ignored,
    Moved,
    /// Sideways move into a wall or block; nothing changed
    Blocked,
    /// A downward move was blocked, so the piece settled
    Landed { lines_cleared: u32 },
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game<R: ShapeSource = Randomizer> {
    board: Board,
    current_piece: Option<Piece>,
    /// Shape that spawns after the current piece lands
    next_shape: ShapeKind,
    score: Score,
    game_over: bool,
    paused: bool,
    source: R,
    /// Live gravity timer; None whenever gravity must not fire
    gravity: Option<GravityTimer>,
    /// Generation handed to the most recently armed timer
    timer_generation: u64,
    /// Blocks dropped by `Board::place` for lying outside the well, this game
    stray_blocks: usize,
}

impl Game<Randomizer> {
    /// Create a pre-game instance with a random seed
    pub fn new() -> Self {
        Self::with_source(Randomizer::new())
    }

    /// Create a pre-game instance whose shape sequence is fixed by `seed`
    pub fn with_seed(seed: u64) -> Self {
        Self::with_source(Randomizer::with_seed(seed))
    }
}

impl Default for Game<Randomizer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ShapeSource> Game<R> {
    /// Create a pre-game instance drawing shapes from `source`.
    /// Nothing falls until `start` is called.
    pub fn with_source(mut source: R) -> Self {
        let next_shape = source.next_shape();
        Self {
            board: Board::new(),
            current_piece: None,
            next_shape,
            score: Score::new(),
            game_over: false,
            paused: false,
            source,
            gravity: None,
            timer_generation: 0,
            stray_blocks: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<&Piece> {
        self.current_piece.as_ref()
    }

    pub fn next_shape(&self) -> ShapeKind {
        self.next_shape
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// The armed gravity timer, if any
    pub fn gravity(&self) -> Option<&GravityTimer> {
        self.gravity.as_ref()
    }

    /// Landed blocks that fell outside the well and were not placed; stays 0 in legal play
    pub fn stray_blocks(&self) -> usize {
        self.stray_blocks
    }

    /// Whether piece commands and gravity currently have any effect
    pub fn is_playable(&self) -> bool {
        self.current_piece.is_some() && !self.game_over && !self.paused
    }

    /// Where the current piece would come to rest if hard dropped
    pub fn drop_preview(&self) -> Option<Piece> {
        self.current_piece.map(|piece| self.lowest_position(piece))
    }

    /// Reset to a fresh game: empty board, new piece, zeroed counters.
    /// Callable at any time, including mid-game and after game over.
    pub fn start(&mut self) {
        self.board = Board::new();
        let first = self.source.next_shape();
        self.current_piece = Some(Piece::spawn(first));
        self.next_shape = self.source.next_shape();
        self.score = Score::new();
        self.game_over = false;
        self.paused = false;
        self.stray_blocks = 0;

        // Any timer from the previous game dies here
        self.gravity = None;
        self.sync_gravity();

        info!(first = first.name(), next = self.next_shape.name(), "game started");
    }

    /// Flip the pause flag. Pausing only gates commands; nothing is undone.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        self.sync_gravity();
        debug!(paused = self.paused, "pause toggled");
    }

    /// Process an action
    pub fn process_action(&mut self, action: Action) {
        match action {
            Action::Move(direction) => {
                self.move_piece(direction);
            }
            Action::Rotate => {
                self.rotate();
            }
            Action::HardDrop => {
                self.hard_drop();
            }
            Action::Pause => self.toggle_pause(),
            Action::Restart => self.start(),
        }
    }

    /// Try to shift the current piece one cell. A blocked downward move lands the piece.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        if !self.is_playable() {
            return MoveOutcome::Ignored;
        }
        let Some(piece) = self.current_piece else {
            return MoveOutcome::Ignored;
        };

        let (dx, dy, dz) = direction.delta();
        let candidate = piece.translated(dx, dy, dz);
        if self.board.is_valid_position(&candidate) {
            self.current_piece = Some(candidate);
            return MoveOutcome::Moved;
        }

        if direction == Direction::Down {
            let lines_cleared = self.land(piece);
            MoveOutcome::Landed { lines_cleared }
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Turn the current piece a quarter about the y axis, in place.
    /// Returns false if there is no piece or the turned piece would collide.
    pub fn rotate(&mut self) -> bool {
        if !self.is_playable() {
            return false;
        }
        let Some(piece) = self.current_piece else {
            return false;
        };

        let rotated = piece.rotated();
        if self.board.is_valid_position(&rotated) {
            self.current_piece = Some(rotated);
            true
        } else {
            false
        }
    }

    /// Drop the current piece as far as it goes and return the distance fallen.
    /// The piece stays active; the next downward move lands it.
    pub fn hard_drop(&mut self) -> u32 {
        if !self.is_playable() {
            return 0;
        }
        let Some(piece) = self.current_piece else {
            return 0;
        };

        let dropped = self.lowest_position(piece);
        self.current_piece = Some(dropped);
        (dropped.anchor.y - piece.anchor.y) as u32
    }

    /// Feed elapsed time to the gravity timer, moving the piece down once per fire.
    /// Returns how many times gravity fired.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        let mut fires = 0;
        let mut step = dt;

        while let Some(timer) = self.gravity.as_mut() {
            if !timer.advance(step) {
                break;
            }
            step = Duration::ZERO;
            fires += 1;
            self.move_piece(Direction::Down);
        }

        fires
    }

    fn lowest_position(&self, mut piece: Piece) -> Piece {
        loop {
            let below = piece.translated(0, 1, 0);
            if !self.board.is_valid_position(&below) {
                return piece;
            }
            piece = below;
        }
    }

    /// Settle `piece`, clear full layers, score, and bring in the next piece
    fn land(&mut self, piece: Piece) -> u32 {
        let skipped = self.board.place(&piece);
        if skipped > 0 {
            self.stray_blocks += skipped;
            warn!(skipped, "landed piece had blocks outside the board");
        }

        let lines_cleared = self.board.clear_lines();
        let level_before = self.score.level;
        let awarded = self.score.add_clear(lines_cleared);
        debug!(
            shape = piece.kind().name(),
            x = piece.anchor.x,
            y = piece.anchor.y,
            z = piece.anchor.z,
            lines_cleared,
            awarded,
            "piece landed"
        );
        if self.score.level != level_before {
            info!(level = self.score.level, lines = self.score.lines, "level up");
        }

        let spawned = Piece::spawn(self.next_shape);
        self.next_shape = self.source.next_shape();

        if self.board.is_valid_position(&spawned) {
            self.current_piece = Some(spawned);
        } else {
            self.current_piece = None;
            self.game_over = true;
            info!(
                score = self.score.points,
                level = self.score.level,
                lines = self.score.lines,
                "game over"
            );
        }

        self.sync_gravity();
        lines_cleared
    }

    /// Bring the gravity timer in line with the current state: disarmed unless playable,
    /// and re-armed from zero whenever the level's interval differs from the live one.
    fn sync_gravity(&mut self) {
        if !self.is_playable() {
            if let Some(timer) = self.gravity.take() {
                debug!(generation = timer.generation(), "gravity disarmed");
            }
            return;
        }

        let interval = self.score.gravity_interval();
        if self.gravity.as_ref().is_some_and(|t| t.interval() == interval) {
            return;
        }

        self.timer_generation += 1;
        self.gravity = Some(GravityTimer::arm(interval, self.timer_generation));
        debug!(
            generation = self.timer_generation,
            interval_ms = interval.as_millis() as u64,
            "gravity armed"
        );
    }
}
