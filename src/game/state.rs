use serde::Serialize;

use super::{Board, Dimensions, Player};
use crate::error::MoveError;

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

/// Coarse lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Won(Player),
    Draw,
}

/// What an accepted move did. Exactly one of these happens per move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Won { player: Player, row: usize },
    Draw { row: usize },
    NextTurn { player: Player, row: usize },
}

impl MoveOutcome {
    /// Row the token landed in
    pub fn row(&self) -> usize {
        match *self {
            MoveOutcome::Won { row, .. }
            | MoveOutcome::Draw { row }
            | MoveOutcome::NextTurn { row, .. } => row,
        }
    }
}

/// A single game: board, turn, outcome, and the two display names.
///
/// All mutation goes through [`GameState::apply_move`] and
/// [`GameState::reset`]. Callers sharing one state between threads must
/// serialize access themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    board: Board,
    current_player: Player,
    #[serde(skip)]
    outcome: Option<GameOutcome>,
    turn_count: u32,
    player1_name: String,
    player2_name: String,
}

impl GameState {
    /// Create a fresh game; player one moves first.
    pub fn new(player1_name: impl Into<String>, player2_name: impl Into<String>, dims: Dimensions) -> Self {
        GameState {
            board: Board::new(dims),
            current_player: Player::One,
            outcome: None,
            turn_count: 0,
            player1_name: player1_name.into(),
            player2_name: player2_name.into(),
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dimensions(&self) -> Dimensions {
        self.board.dimensions()
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        match self.outcome {
            Some(GameOutcome::Winner(player)) => Some(player),
            _ => None,
        }
    }

    pub fn is_draw(&self) -> bool {
        self.outcome == Some(GameOutcome::Draw)
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn status(&self) -> GameStatus {
        match self.outcome {
            None => GameStatus::InProgress,
            Some(GameOutcome::Winner(player)) => GameStatus::Won(player),
            Some(GameOutcome::Draw) => GameStatus::Draw,
        }
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn player_name(&self, player: Player) -> &str {
        match player {
            Player::One => &self.player1_name,
            Player::Two => &self.player2_name,
        }
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..self.board.cols())
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's token into `column`.
    ///
    /// On success the move is recorded and exactly one of win, draw, or turn
    /// switch happens, checked in that order. On error nothing changes.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveOutcome, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameAlreadyOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(column, player)?;
        self.turn_count += 1;

        if self.board.check_win(row, column, player) {
            self.outcome = Some(GameOutcome::Winner(player));
            Ok(MoveOutcome::Won { player, row })
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
            Ok(MoveOutcome::Draw { row })
        } else {
            self.current_player = player.other();
            Ok(MoveOutcome::NextTurn {
                player: self.current_player,
                row,
            })
        }
    }

    /// Clear the board and start over with the same size and names.
    pub fn reset(&mut self) {
        self.board = Board::new(self.board.dimensions());
        self.current_player = Player::One;
        self.outcome = None;
        self.turn_count = 0;
    }

    /// JSON-friendly view with the 0/1/2 winner encoding.
    pub fn snapshot(&self) -> GameSnapshot<'_> {
        GameSnapshot {
            rows: self.board.rows(),
            cols: self.board.cols(),
            winner: self.winner().map_or(0, Player::number),
            is_draw: self.is_draw(),
            state: self,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct GameSnapshot<'a> {
    #[serde(flatten)]
    state: &'a GameState,
    rows: usize,
    cols: usize,
    winner: u8,
    is_draw: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Cell;

    fn classic() -> GameState {
        GameState::new("Ada", "Grace", Dimensions::new(6, 7).unwrap())
    }

    #[test]
    fn test_initial_state() {
        let state = classic();
        assert_eq!(state.current_player(), Player::One);
        assert!(!state.is_terminal());
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.turn_count(), 0);
        assert_eq!(state.legal_columns().len(), 7);
        assert_eq!(state.player_name(Player::Two), "Grace");
    }

    #[test]
    fn test_apply_move() {
        let mut state = classic();
        let outcome = state.apply_move(3).unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::NextTurn {
                player: Player::Two,
                row: 5
            }
        );
        assert_eq!(state.current_player(), Player::Two);
        assert_eq!(state.board().get(5, 3), Cell::Occupied(Player::One));
        assert_eq!(state.turn_count(), 1);
    }

    #[test]
    fn test_vertical_win_in_column_three() {
        let mut state = classic();

        for other in [0, 1, 2] {
            state.apply_move(3).unwrap(); // One
            state.apply_move(other).unwrap(); // Two, never in column 3
        }
        let outcome = state.apply_move(3).unwrap();

        assert_eq!(outcome, MoveOutcome::Won { player: Player::One, row: 2 });
        assert_eq!(state.winner(), Some(Player::One));
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.turn_count(), 7);
        assert!(state.legal_columns().is_empty());
    }

    #[test]
    fn test_horizontal_win_detection() {
        let mut state = classic();

        // One builds along the bottom row, Two stacks on top
        for col in 0..4 {
            state.apply_move(col).unwrap(); // One
            if col < 3 {
                state.apply_move(col).unwrap(); // Two (different row)
            }
        }

        assert!(state.is_terminal());
        assert_eq!(state.outcome(), Some(GameOutcome::Winner(Player::One)));
    }

    #[test]
    fn test_moves_rejected_after_win() {
        let mut state = classic();
        for _ in 0..3 {
            state.apply_move(0).unwrap();
            state.apply_move(1).unwrap();
        }
        state.apply_move(0).unwrap();
        assert_eq!(state.winner(), Some(Player::One));

        let before = state.clone();
        assert_eq!(state.apply_move(4), Err(MoveError::GameAlreadyOver));
        assert_eq!(state.apply_move(99), Err(MoveError::GameAlreadyOver));
        assert_eq!(state, before);
    }

    #[test]
    fn test_rejections_leave_state_unchanged() {
        let mut state = GameState::new("a", "b", Dimensions::new(2, 3).unwrap());
        state.apply_move(0).unwrap();
        state.apply_move(0).unwrap();

        let before = state.clone();
        assert_eq!(
            state.apply_move(0),
            Err(MoveError::ColumnFull { column: 0 })
        );
        assert_eq!(
            state.apply_move(3),
            Err(MoveError::InvalidColumn { column: 3, cols: 3 })
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_draw() {
        // 2x3 is too small for four in a row, so filling it must draw
        let mut state = GameState::new("a", "b", Dimensions::new(2, 3).unwrap());
        let moves = [0, 0, 1, 1, 2];
        for col in moves {
            assert!(matches!(
                state.apply_move(col).unwrap(),
                MoveOutcome::NextTurn { .. }
            ));
        }
        let outcome = state.apply_move(2).unwrap();

        assert_eq!(outcome, MoveOutcome::Draw { row: 0 });
        assert!(state.is_draw());
        assert_eq!(state.winner(), None);
        assert_eq!(state.status(), GameStatus::Draw);
        assert_eq!(state.apply_move(0), Err(MoveError::GameAlreadyOver));
    }

    #[test]
    fn test_win_takes_precedence_over_full_board() {
        // 1x4 with three of One's tokens placed directly: the last move both
        // fills the board and completes the line.
        let mut state = GameState::new("a", "b", Dimensions::new(1, 4).unwrap());
        for col in 0..3 {
            state.board.drop_piece(col, Player::One).unwrap();
        }
        let outcome = state.apply_move(3).unwrap();

        assert!(state.board().is_full());
        assert_eq!(outcome, MoveOutcome::Won { player: Player::One, row: 0 });
        assert!(!state.is_draw());
    }

    #[test]
    fn test_reset_preserves_names_and_size() {
        let mut state = GameState::new("Ada", "Grace", Dimensions::new(7, 8).unwrap());
        state.apply_move(0).unwrap();
        state.apply_move(1).unwrap();
        state.apply_move(2).unwrap();

        state.reset();

        assert_eq!(state.turn_count(), 0);
        assert_eq!(state.current_player(), Player::One);
        assert_eq!(state.status(), GameStatus::InProgress);
        assert_eq!(state.dimensions(), Dimensions::new(7, 8).unwrap());
        assert_eq!(state.player_name(Player::One), "Ada");
        assert_eq!(state.player_name(Player::Two), "Grace");
        assert!((0..8).all(|col| state.board().landing_row(col) == Some(6)));
    }

    #[test]
    fn test_snapshot_json() {
        let mut state = GameState::new("Ada", "Grace", Dimensions::new(2, 2).unwrap());
        state.apply_move(1).unwrap();
        let json = serde_json::to_value(state.snapshot()).unwrap();

        assert_eq!(json["board"], serde_json::json!([[0, 0], [0, 1]]));
        assert_eq!(json["current_player"], 2);
        assert_eq!(json["winner"], 0);
        assert_eq!(json["is_draw"], false);
        assert_eq!(json["turn_count"], 1);
        assert_eq!(json["rows"], 2);
        assert_eq!(json["cols"], 2);
        assert_eq!(json["player1_name"], "Ada");
    }
}
