#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use std::collections::VecDeque;

use crate::game::{
    BOARD_HEIGHT, BOARD_WIDTH, LINES_PER_LEVEL, STARTING_LEVEL, line_clear_points,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TetrominoKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl TetrominoKind {
    pub const ALL: [TetrominoKind; 7] = [
        TetrominoKind::I,
        TetrominoKind::J,
        TetrominoKind::L,
        TetrominoKind::O,
        TetrominoKind::S,
        TetrominoKind::T,
        TetrominoKind::Z,
    ];

    #[must_use]
    pub fn random() -> Self {
        Self::ALL[fastrand::usize(0..Self::ALL.len())]
    }

    /// Base occupancy matrix, rows of 0/1, unrotated orientation.
    #[must_use]
    pub fn base_matrix(self) -> Vec<Vec<u8>> {
        match self {
            TetrominoKind::I => vec![vec![1, 1, 1, 1]],
            TetrominoKind::J => vec![vec![1, 0, 0], vec![1, 1, 1]],
            TetrominoKind::L => vec![vec![0, 0, 1], vec![1, 1, 1]],
            TetrominoKind::O => vec![vec![1, 1], vec![1, 1]],
            TetrominoKind::S => vec![vec![0, 1, 1], vec![1, 1, 0]],
            TetrominoKind::T => vec![vec![0, 1, 0], vec![1, 1, 1]],
            TetrominoKind::Z => vec![vec![1, 1, 0], vec![0, 1, 1]],
        }
    }

    #[must_use]
    pub fn get_color(self) -> ratatui::style::Color {
        crate::config::piece_color(self)
    }
}

/// An active tetromino: occupancy matrix plus anchor position in board
/// coordinates. The matrix changes only through `rotated`, the anchor only
/// through `translated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoKind,
    pub shape: Vec<Vec<u8>>,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Instantiate a kind at the spawn column, row 0, unrotated.
    #[must_use]
    pub fn spawn(kind: TetrominoKind) -> Self {
        Self {
            kind,
            shape: kind.base_matrix(),
            x: (BOARD_WIDTH / 2) as i32 - 1,
            y: 0,
        }
    }

    #[must_use]
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Clockwise rotation: transpose the matrix, then reverse each row.
    /// Position is unchanged.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let rows = self.shape.len();
        let cols = self.shape[0].len();
        let mut shape = vec![vec![0u8; rows]; cols];
        for (r, row) in self.shape.iter().enumerate() {
            for (c, &cell) in row.iter().enumerate() {
                shape[c][rows - 1 - r] = cell;
            }
        }
        Self {
            shape,
            ..self.clone()
        }
    }

    /// Board coordinates of every occupied cell.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape.iter().enumerate().flat_map(move |(r, row)| {
            row.iter()
                .enumerate()
                .filter(|&(_, &cell)| cell != 0)
                .map(move |(c, _)| (self.x + c as i32, self.y + r as i32))
        })
    }
}

/// The locked-cell grid, `BOARD_HEIGHT` rows by `BOARD_WIDTH` columns.
/// A cell holds the kind of the piece that locked there; color is a render
/// concern derived from the palette.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub cells: Vec<Vec<Option<TetrominoKind>>>,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cells: vec![vec![None; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        for row in &mut self.cells {
            row.fill(None);
        }
    }

    /// Collision test. An occupied piece cell collides when it is left of
    /// column 0, right of the last column, at or below the floor, or when it
    /// lands on a locked cell. Cells above the top (`y < 0`) are exempt from
    /// the occupancy check but still bounded horizontally.
    #[must_use]
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i32
                || y >= BOARD_HEIGHT as i32
                || (y >= 0 && self.cells[y as usize][x as usize].is_some())
        })
    }

    /// Write the piece into the grid. Returns `false` without touching the
    /// board when any occupied cell sits above the top row; the caller
    /// treats that as game over.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        if piece.cells().any(|(_, y)| y < 0) {
            return false;
        }
        for (x, y) in piece.cells() {
            self.cells[y as usize][x as usize] = Some(piece.kind);
        }
        true
    }

    /// Remove complete rows bottom-to-top, prepending an empty row at the
    /// top for each so the height stays constant. The same index is
    /// re-checked after a removal since the rows above shift down.
    pub fn clear_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT - 1;
        loop {
            if self.cells[y].iter().all(Option::is_some) {
                self.cells.remove(y);
                self.cells.insert(0, vec![None; BOARD_WIDTH]);
                cleared += 1;
                // re-check the same row, everything above moved down
            } else if y == 0 {
                break;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    #[must_use]
    pub fn top_row_occupied(&self) -> bool {
        self.cells[0].iter().any(Option::is_some)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(Option::is_none))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Piece source for spawning. `Random` draws uniformly via fastrand;
/// `Scripted` serves a fixed sequence so tests get deterministic pieces,
/// falling back to random when exhausted.
#[derive(Resource, Debug, Clone)]
pub enum PieceGen {
    Random,
    Scripted(VecDeque<TetrominoKind>),
}

impl PieceGen {
    #[must_use]
    pub fn scripted(kinds: &[TetrominoKind]) -> Self {
        PieceGen::Scripted(kinds.iter().copied().collect())
    }

    pub fn next_kind(&mut self) -> TetrominoKind {
        match self {
            PieceGen::Random => TetrominoKind::random(),
            PieceGen::Scripted(queue) => queue.pop_front().unwrap_or_else(TetrominoKind::random),
        }
    }
}

impl Default for PieceGen {
    fn default() -> Self {
        PieceGen::Random
    }
}

/// Everything a match owns besides the board: the active and next pieces
/// plus the derived counters the room view renders.
#[derive(Resource, Debug, Clone)]
pub struct MatchState {
    pub current: Piece,
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub elapsed_seconds: u32,
    pub speed_multiplier: f32,
    pub paused: bool,
    pub game_over: bool,
    /// Bumped every time a fresh piece becomes active so the timing
    /// controller can restart its drop timer.
    pub piece_serial: u64,
}

impl MatchState {
    #[must_use]
    pub fn new(source: &mut PieceGen) -> Self {
        Self {
            current: Piece::spawn(source.next_kind()),
            next: Piece::spawn(source.next_kind()),
            score: 0,
            level: STARTING_LEVEL,
            lines: 0,
            elapsed_seconds: 0,
            speed_multiplier: 1.0,
            paused: false,
            game_over: false,
            piece_serial: 0,
        }
    }

    /// Paused and game over both freeze the match: every movement command
    /// and the autonomous tick are rejected.
    #[must_use]
    pub fn frozen(&self) -> bool {
        self.paused || self.game_over
    }

    /// Score and level bookkeeping for a lock that cleared `cleared` rows.
    /// The level goes up by one each time the cumulative line count crosses
    /// a multiple of `LINES_PER_LEVEL`; it never goes down within a match.
    pub fn record_clear(&mut self, cleared: usize) {
        if cleared == 0 {
            return;
        }
        self.score += line_clear_points(cleared, self.level);
        let before = self.lines;
        self.lines += cleared as u32;
        if self.lines / LINES_PER_LEVEL > before / LINES_PER_LEVEL {
            self.level += 1;
        }
    }

    /// Promote the next piece and draw a fresh one from the source.
    pub fn advance_piece(&mut self, source: &mut PieceGen) {
        self.current = std::mem::replace(&mut self.next, Piece::spawn(source.next_kind()));
        self.piece_serial += 1;
    }
}
