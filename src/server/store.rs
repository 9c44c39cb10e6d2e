use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;
use uuid::Uuid;

use crate::game::GameState;

pub type GameId = Uuid;

/// One game behind its own lock. Moves and resets on a game are serialized
/// through this mutex; different games never contend.
pub type SharedGame = Arc<Mutex<GameState>>;

#[derive(Debug)]
struct Slot {
    game: SharedGame,
    /// Store clock value of the last create or lookup.
    touched: AtomicU64,
}

/// In-memory registry of live games, keyed by id.
///
/// Holds at most `max_games` entries. Creating a game in a full store evicts
/// the least recently touched finished game, or the least recently touched
/// game if none has finished.
#[derive(Debug)]
pub struct GameStore {
    games: DashMap<GameId, Slot>,
    max_games: usize,
    clock: AtomicU64,
}

impl GameStore {
    pub fn new(max_games: usize) -> Self {
        GameStore {
            games: DashMap::new(),
            max_games,
            clock: AtomicU64::new(0),
        }
    }

    /// Register a new game and return its id, evicting if the store is full.
    ///
    /// The size check and insert are not atomic, so concurrent creators may
    /// overshoot the limit by at most the number of racing requests.
    pub fn create(&self, state: GameState) -> GameId {
        while self.games.len() >= self.max_games {
            let Some(victim) = self.eviction_candidate() else {
                break;
            };
            if self.remove(&victim) {
                tracing::info!(game_id = %victim, "evicted game to make room");
            }
        }

        let id = Uuid::new_v4();
        self.games.insert(
            id,
            Slot {
                game: Arc::new(Mutex::new(state)),
                touched: AtomicU64::new(self.tick()),
            },
        );
        id
    }

    /// Handle to a game. The map shard lock is released before returning, so
    /// callers may hold the game lock as long as they need.
    pub fn get(&self, id: &GameId) -> Option<SharedGame> {
        self.games.get(id).map(|slot| {
            slot.touched.store(self.tick(), Ordering::Relaxed);
            Arc::clone(&slot.game)
        })
    }

    pub fn remove(&self, id: &GameId) -> bool {
        self.games.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn max_games(&self) -> usize {
        self.max_games
    }

    fn tick(&self) -> u64 {
        self.clock.fetch_add(1, Ordering::Relaxed)
    }

    /// Oldest finished game, else oldest game. A game whose lock is held is
    /// in use and counts as unfinished.
    fn eviction_candidate(&self) -> Option<GameId> {
        let mut oldest_finished: Option<(u64, GameId)> = None;
        let mut oldest: Option<(u64, GameId)> = None;

        for entry in self.games.iter() {
            let touched = entry.touched.load(Ordering::Relaxed);
            let candidate = (touched, *entry.key());
            let finished = entry
                .game
                .try_lock()
                .is_some_and(|game| game.is_terminal());

            if finished && oldest_finished.map_or(true, |(t, _)| touched < t) {
                oldest_finished = Some(candidate);
            }
            if oldest.map_or(true, |(t, _)| touched < t) {
                oldest = Some(candidate);
            }
        }

        oldest_finished.or(oldest).map(|(_, id)| id)
    }
}
