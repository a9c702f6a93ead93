#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow sign loss casting board coordinates back to usize; visibility
    // is checked before the cast
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;

use crate::Time;
use crate::components::{Board, MatchState, PieceGen, TetrominoKind};
use crate::engine;
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::roster::Roster;

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub room_name: String,
}

impl App {
    #[must_use]
    pub fn new(room_name: impl Into<String>) -> Self {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Board::new());
        world.insert_resource(Roster::seeded());

        let mut source = PieceGen::default();
        let state = MatchState::new(&mut source);
        world.insert_resource(source);
        world.insert_resource(state);

        Self {
            world,
            should_quit: false,
            room_name: room_name.into(),
        }
    }

    /// Locked cells plus the active piece, board coordinates, for the
    /// renderer. Active-piece cells above the top row are not visible.
    #[must_use]
    pub fn render_cells(&self) -> Vec<(usize, usize, TetrominoKind)> {
        let board = self.world.resource::<Board>();
        let state = self.world.resource::<MatchState>();

        let mut cells = Vec::new();
        for (y, row) in board.cells.iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                if let Some(kind) = cell {
                    cells.push((x, y, *kind));
                }
            }
        }
        for (x, y) in state.current.cells() {
            if y >= 0 && y < BOARD_HEIGHT as i32 && x >= 0 && x < BOARD_WIDTH as i32 {
                cells.push((x as usize, y as usize, state.current.kind));
            }
        }
        cells
    }

    /// Ghost projection of the active piece, a render-time overlay computed
    /// on demand and never written into the board.
    #[must_use]
    pub fn ghost_cells(&self) -> Vec<(usize, usize, TetrominoKind)> {
        let board = self.world.resource::<Board>();
        let state = self.world.resource::<MatchState>();
        let ghost = engine::ghost_position(board, &state.current);

        ghost
            .cells()
            .filter(|&(x, y)| {
                y >= 0 && y < BOARD_HEIGHT as i32 && x >= 0 && x < BOARD_WIDTH as i32
            })
            .map(|(x, y)| (x as usize, y as usize, ghost.kind))
            .collect()
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new("Unnamed Room")
    }
}
