/// Property-based tests for the game engine over arbitrary board sizes
use proptest::prelude::*;

use super::{Board, Cell, Dimensions, GameState, MoveOutcome, Player, CONNECT};
use crate::error::MoveError;

fn dims() -> impl Strategy<Value = Dimensions> {
    (1usize..=9, 1usize..=9).prop_map(|(rows, cols)| Dimensions::new(rows, cols).unwrap())
}

/// Board dimensions plus a move sequence that may stray past the last column.
fn game_plan() -> impl Strategy<Value = (Dimensions, Vec<usize>)> {
    dims().prop_flat_map(|d| (Just(d), prop::collection::vec(0..d.cols() + 2, 0..120)))
}

/// Full-board scan for any run of `CONNECT` same-player cells.
fn any_run(board: &Board) -> bool {
    let (rows, cols) = (board.rows() as isize, board.cols() as isize);
    let at = |r: isize, c: isize| -> Option<Cell> {
        (r >= 0 && r < rows && c >= 0 && c < cols).then(|| board.get(r as usize, c as usize))
    };
    for r in 0..rows {
        for c in 0..cols {
            let Some(Cell::Occupied(player)) = at(r, c) else {
                continue;
            };
            for (dr, dc) in [(0, 1), (1, 0), (1, 1), (1, -1)] {
                let run = (0..CONNECT as isize)
                    .all(|k| at(r + k * dr, c + k * dc) == Some(Cell::Occupied(player)));
                if run {
                    return true;
                }
            }
        }
    }
    false
}

proptest! {
    /// Property: a new board has rows * cols empty cells
    #[test]
    fn prop_new_board_is_empty(d in dims()) {
        let board = Board::new(d);
        let mut empty = 0;
        for row in 0..d.rows() {
            empty += board.row(row).iter().filter(|&&cell| cell == Cell::Empty).count();
        }
        prop_assert_eq!(empty, d.rows() * d.cols());
        prop_assert_eq!(board.is_full(), false);
    }

    /// Property: every move is either a clean rejection or an accepted move
    /// that lands on the lowest empty row, bumps the turn count by one, and
    /// causes exactly one of win, draw, or turn switch.
    #[test]
    fn prop_moves_follow_the_rules((d, moves) in game_plan()) {
        let mut state = GameState::new("p1", "p2", d);

        for col in moves {
            let before = state.clone();
            match state.apply_move(col) {
                Err(err) => {
                    prop_assert_eq!(&state, &before);
                    match err {
                        MoveError::GameAlreadyOver => {
                            prop_assert!(before.is_terminal());
                        }
                        MoveError::InvalidColumn { .. } => {
                            prop_assert!(col >= d.cols());
                        }
                        MoveError::ColumnFull { .. } => {
                            prop_assert_eq!(before.board().landing_row(col), None);
                        }
                    }
                }
                Ok(outcome) => {
                    let mover = before.current_player();
                    let row = outcome.row();
                    prop_assert_eq!(Some(row), before.board().landing_row(col));
                    prop_assert_eq!(state.board().get(row, col), Cell::Occupied(mover));
                    for below in row + 1..d.rows() {
                        prop_assert_ne!(state.board().get(below, col), Cell::Empty);
                    }
                    prop_assert_eq!(state.turn_count(), before.turn_count() + 1);

                    match outcome {
                        MoveOutcome::Won { player, .. } => {
                            prop_assert_eq!(player, mover);
                            prop_assert_eq!(state.winner(), Some(mover));
                            prop_assert!(!state.is_draw());
                            prop_assert_eq!(state.current_player(), mover);
                        }
                        MoveOutcome::Draw { .. } => {
                            prop_assert!(state.is_draw());
                            prop_assert_eq!(state.winner(), None);
                            prop_assert!(state.board().is_full());
                            prop_assert_eq!(state.current_player(), mover);
                        }
                        MoveOutcome::NextTurn { player, .. } => {
                            prop_assert_eq!(player, mover.other());
                            prop_assert_eq!(state.current_player(), mover.other());
                            prop_assert!(!state.is_terminal());
                        }
                    }

                    // The local check agrees with a full-board scan
                    prop_assert_eq!(any_run(state.board()), state.winner().is_some());
                }
            }
        }
    }

    /// Property: once terminal, every move is rejected without mutation
    #[test]
    fn prop_terminal_rejects_everything(d in dims(), extra in prop::collection::vec(0usize..12, 1..10)) {
        let mut state = GameState::new("p1", "p2", d);
        // Fill column by column; on any size the game ends by win or draw
        'fill: for col in 0..d.cols() {
            for _ in 0..d.rows() {
                if state.apply_move(col).is_err() || state.is_terminal() {
                    break 'fill;
                }
            }
        }
        while !state.is_terminal() {
            let col = state.legal_columns()[0];
            state.apply_move(col).unwrap();
        }

        let frozen = state.clone();
        for col in extra {
            prop_assert_eq!(state.apply_move(col), Err(MoveError::GameAlreadyOver));
        }
        prop_assert_eq!(state, frozen);
    }

    /// Property: reset restores a fresh game with the same size and names
    #[test]
    fn prop_reset_restores_initial((d, moves) in game_plan()) {
        let mut state = GameState::new("left", "right", d);
        for col in moves {
            let _ = state.apply_move(col);
        }
        state.reset();
        prop_assert_eq!(state, GameState::new("left", "right", d));
    }
}

#[test]
fn test_player_switch_alternates() {
    let mut state = GameState::new("p1", "p2", Dimensions::new(6, 7).unwrap());
    let mut expected = Player::One;
    for col in [0, 1, 2, 3, 4, 5] {
        assert_eq!(state.current_player(), expected);
        state.apply_move(col).unwrap();
        expected = expected.other();
    }
}
