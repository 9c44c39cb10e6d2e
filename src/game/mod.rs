//! Core Connect Four game logic: board representation, player types, and the
//! in-place game state machine. Pure and synchronous; nothing here logs or
//! touches I/O.

mod board;
mod player;
mod state;

#[cfg(test)]
mod tests_props;

pub use board::{Board, Cell, Dimensions, CONNECT};
pub use player::Player;
pub use state::{GameOutcome, GameSnapshot, GameState, GameStatus, MoveOutcome};
