#![warn(clippy::all, clippy::pedantic)]

pub mod components_tests;

// Shared test utilities
pub mod test_utils {
    use bevy_ecs::prelude::*;

    use crate::components::{Board, MatchState, PieceGen, TetrominoKind};
    use crate::game::BOARD_WIDTH;
    use crate::roster::Roster;

    /// World with the full resource set and a scripted piece sequence so
    /// the active and next pieces are deterministic.
    #[must_use]
    pub fn create_test_world(kinds: &[TetrominoKind]) -> World {
        let mut world = World::new();
        world.insert_resource(crate::Time::new());
        world.insert_resource(Board::new());
        world.insert_resource(Roster::seeded());

        let mut source = PieceGen::scripted(kinds);
        let state = MatchState::new(&mut source);
        world.insert_resource(source);
        world.insert_resource(state);
        world
    }

    /// Fill an entire board row with locked cells.
    pub fn fill_row(board: &mut Board, y: usize, kind: TetrominoKind) {
        for x in 0..BOARD_WIDTH {
            board.cells[y][x] = Some(kind);
        }
    }

    /// Fill a row except the listed columns.
    pub fn fill_row_except(board: &mut Board, y: usize, gaps: &[usize], kind: TetrominoKind) {
        for x in 0..BOARD_WIDTH {
            if !gaps.contains(&x) {
                board.cells[y][x] = Some(kind);
            }
        }
    }

    /// Score of the current roster player.
    #[must_use]
    pub fn current_player_score(world: &World) -> u32 {
        world
            .resource::<Roster>()
            .current()
            .map(|p| p.score)
            .unwrap_or_default()
    }
}
