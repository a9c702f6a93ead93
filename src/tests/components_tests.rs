#[cfg(test)]
mod tests {
    use crate::components::{Board, MatchState, Piece, PieceGen, TetrominoKind};
    use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, STARTING_LEVEL};
    use crate::tests::test_utils::{fill_row, fill_row_except};

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(TetrominoKind::T);
        assert_eq!(piece.x, (BOARD_WIDTH / 2) as i32 - 1);
        assert_eq!(piece.y, 0);
        assert_eq!(piece.shape, TetrominoKind::T.base_matrix());
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // J: [[1,0,0],[1,1,1]] rotated once becomes [[1,1],[1,0],[1,0]]
        let piece = Piece::spawn(TetrominoKind::J).rotated();
        assert_eq!(piece.shape, vec![vec![1, 1], vec![1, 0], vec![1, 0]]);
    }

    #[test]
    fn test_four_rotations_return_to_start() {
        for kind in TetrominoKind::ALL {
            let original = Piece::spawn(kind);
            let mut piece = original.clone();
            for _ in 0..4 {
                piece = piece.rotated();
            }
            assert_eq!(piece.shape, original.shape, "{kind:?} after 4 rotations");
            assert_eq!(piece.x, original.x);
            assert_eq!(piece.y, original.y);
        }
    }

    #[test]
    fn test_o_piece_rotation_fixed_point() {
        let piece = Piece::spawn(TetrominoKind::O);
        assert_eq!(piece.rotated().shape, piece.shape);
    }

    #[test]
    fn test_collides_outside_horizontal_bounds_at_any_height() {
        let board = Board::new();
        for y in [-5, -1, 0, 10, 19] {
            let mut left = Piece::spawn(TetrominoKind::O);
            left.x = -1;
            left.y = y;
            assert!(board.collides(&left), "left of column 0 at y={y}");

            let mut right = Piece::spawn(TetrominoKind::O);
            right.x = BOARD_WIDTH as i32 - 1;
            right.y = y;
            assert!(board.collides(&right), "right of last column at y={y}");
        }
    }

    #[test]
    fn test_collides_below_floor() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoKind::O);
        piece.y = BOARD_HEIGHT as i32 - 1;
        assert!(board.collides(&piece));

        piece.y = BOARD_HEIGHT as i32 - 2;
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_partially_above_top_is_not_a_collision() {
        let board = Board::new();
        let mut piece = Piece::spawn(TetrominoKind::I);
        piece.y = -1;
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_collides_with_locked_cell() {
        let mut board = Board::new();
        board.cells[1][4] = Some(TetrominoKind::Z);

        let mut piece = Piece::spawn(TetrominoKind::O);
        piece.x = 4;
        piece.y = 0;
        assert!(board.collides(&piece));

        piece.x = 6;
        assert!(!board.collides(&piece));
    }

    #[test]
    fn test_lock_writes_piece_kind() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(TetrominoKind::O);
        piece.x = 0;
        piece.y = BOARD_HEIGHT as i32 - 2;

        assert!(board.lock(&piece));
        assert_eq!(board.cells[BOARD_HEIGHT - 2][0], Some(TetrominoKind::O));
        assert_eq!(board.cells[BOARD_HEIGHT - 1][1], Some(TetrominoKind::O));
    }

    #[test]
    fn test_lock_above_top_abandons_board_write() {
        let mut board = Board::new();
        let mut piece = Piece::spawn(TetrominoKind::O);
        piece.y = -1;

        assert!(!board.lock(&piece));
        assert!(board.is_empty());
    }

    #[test]
    fn test_clear_rows_identity_when_none_complete() {
        let mut board = Board::new();
        fill_row_except(&mut board, BOARD_HEIGHT - 1, &[3], TetrominoKind::S);
        let before = board.clone();

        assert_eq!(board.clear_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_rows_single_row() {
        let mut board = Board::new();
        board.cells[5][2] = Some(TetrominoKind::L);
        fill_row(&mut board, 12, TetrominoKind::I);

        assert_eq!(board.clear_rows(), 1);
        assert_eq!(board.cells.len(), BOARD_HEIGHT);
        // New empty row prepended at the top; the marker above the cleared
        // row shifted down by one
        assert!(board.cells[0].iter().all(Option::is_none));
        assert_eq!(board.cells[6][2], Some(TetrominoKind::L));
        assert!(board.cells[12].iter().all(Option::is_none));
    }

    #[test]
    fn test_clear_rows_four_at_once() {
        let mut board = Board::new();
        for y in (BOARD_HEIGHT - 4)..BOARD_HEIGHT {
            fill_row(&mut board, y, TetrominoKind::J);
        }

        assert_eq!(board.clear_rows(), 4);
        assert!(board.is_empty());
    }

    #[test]
    fn test_scripted_piece_source() {
        let mut source =
            PieceGen::scripted(&[TetrominoKind::I, TetrominoKind::Z, TetrominoKind::O]);
        assert_eq!(source.next_kind(), TetrominoKind::I);
        assert_eq!(source.next_kind(), TetrominoKind::Z);
        assert_eq!(source.next_kind(), TetrominoKind::O);
    }

    #[test]
    fn test_match_state_initial_values() {
        let mut source = PieceGen::scripted(&[TetrominoKind::T, TetrominoKind::L]);
        let state = MatchState::new(&mut source);

        assert_eq!(state.current.kind, TetrominoKind::T);
        assert_eq!(state.next.kind, TetrominoKind::L);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, STARTING_LEVEL);
        assert_eq!(state.lines, 0);
        assert_eq!(state.elapsed_seconds, 0);
        assert!((state.speed_multiplier - 1.0).abs() < f32::EPSILON);
        assert!(!state.paused);
        assert!(!state.game_over);
    }

    #[test]
    fn test_record_clear_scores_with_pre_clear_level() {
        let mut source = PieceGen::scripted(&[TetrominoKind::T, TetrominoKind::L]);
        let mut state = MatchState::new(&mut source);
        state.level = 2;
        state.lines = 8;

        // Four rows at level 2, scored before the level bump
        state.record_clear(4);
        assert_eq!(state.score, 2400);
        assert_eq!(state.lines, 12);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_level_bumps_on_each_multiple_of_ten() {
        let mut source = PieceGen::scripted(&[TetrominoKind::T, TetrominoKind::L]);
        let mut state = MatchState::new(&mut source);

        state.lines = 9;
        state.record_clear(1);
        assert_eq!(state.lines, 10);
        assert_eq!(state.level, 2);

        state.lines = 19;
        state.record_clear(1);
        assert_eq!(state.lines, 20);
        assert_eq!(state.level, 3);

        // No bump in between
        state.record_clear(1);
        assert_eq!(state.level, 3);
    }

    #[test]
    fn test_advance_piece_promotes_next() {
        let mut source = PieceGen::scripted(&[
            TetrominoKind::T,
            TetrominoKind::L,
            TetrominoKind::S,
        ]);
        let mut state = MatchState::new(&mut source);
        let serial = state.piece_serial;

        state.advance_piece(&mut source);
        assert_eq!(state.current.kind, TetrominoKind::L);
        assert_eq!(state.next.kind, TetrominoKind::S);
        assert_eq!(state.piece_serial, serial + 1);
    }
}
