//! HTTP front end: game registry, difficulty presets, HTML pages, and the
//! actix-web routes that drive the engine.

pub mod difficulty;
pub mod render;
mod routes;
pub mod store;

pub use difficulty::Difficulty;
pub use routes::configure;
pub use store::{GameId, GameStore, SharedGame};

/// Shared state handed to every request handler.
#[derive(Debug)]
pub struct AppState {
    pub games: GameStore,
}

impl AppState {
    pub fn new(max_games: usize) -> Self {
        AppState {
            games: GameStore::new(max_games),
        }
    }
}
