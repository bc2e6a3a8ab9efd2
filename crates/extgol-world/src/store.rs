//! Persistence seam for games.
//!
//! The engine never talks to storage itself. A driver loads a `Game` from a
//! `GameRepository`, steps it, and saves it back.

use crate::board::Board;
use crate::cell::Cell;
use crate::game::Game;
use crate::generation::Generation;
use chrono::{DateTime, Utc};
use extgol_core::{BoardId, Error, GameId, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info};

pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable record of a game: dimensions, every cell, and the history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub version: u32,
    pub saved_at: DateTime<Utc>,
    pub game_id: GameId,
    pub board_id: BoardId,
    pub width: i32,
    pub height: i32,
    pub cells: Vec<Cell>,
    pub generations: Vec<Generation>,
}

impl From<&Game> for GameSnapshot {
    fn from(game: &Game) -> Self {
        let board = game.board();
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: Utc::now(),
            game_id: game.id(),
            board_id: board.id(),
            width: board.width(),
            height: board.height(),
            cells: board.cells().cloned().collect(),
            generations: game.generations().to_vec(),
        }
    }
}

impl GameSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from(self)
    }

    /// Rebuild a game from a snapshot. Tile topology is recomputed and the
    /// board must come back complete.
    pub fn restore(snapshot: GameSnapshot) -> Result<Self> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(Error::Serialization(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }

        let mut board = Board::with_id(
            snapshot.board_id,
            snapshot.game_id,
            snapshot.width,
            snapshot.height,
        )?;
        for cell in snapshot.cells {
            board.attach_cell(cell)?;
        }
        board.validate()?;

        Game::from_parts(board, snapshot.generations)
    }
}

/// Storage collaborator used by drivers around the engine
pub trait GameRepository {
    fn save(&self, game: &Game) -> Result<()>;

    fn load(&self, id: GameId) -> Result<Option<Game>>;

    fn delete(&self, id: GameId) -> Result<bool>;

    fn load_board(&self, id: GameId) -> Result<Option<Board>> {
        Ok(self.load(id)?.map(Game::into_board))
    }

    /// Alive cells of the game's board, row-major
    fn load_alive_cells(&self, id: GameId) -> Result<Vec<Cell>> {
        let board = self
            .load_board(id)?
            .ok_or_else(|| Error::NotFound(format!("game {}", id)))?;
        Ok(board.into_cells().into_iter().filter(Cell::is_alive).collect())
    }
}

/// In-memory repository holding bincode-encoded snapshots
#[derive(Default)]
pub struct MemoryRepository {
    games: RwLock<HashMap<GameId, Vec<u8>>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }
}

impl GameRepository for MemoryRepository {
    fn save(&self, game: &Game) -> Result<()> {
        let bytes = game.snapshot().to_bytes()?;
        debug!(game_id = %game.id(), bytes = bytes.len(), "Saving game");
        self.games.write().insert(game.id(), bytes);
        Ok(())
    }

    fn load(&self, id: GameId) -> Result<Option<Game>> {
        let bytes = match self.games.read().get(&id) {
            Some(bytes) => bytes.clone(),
            None => return Ok(None),
        };

        let game = Game::restore(GameSnapshot::from_bytes(&bytes)?)?;
        debug!(game_id = %id, generations = game.generations().len(), "Loaded game");
        Ok(Some(game))
    }

    fn delete(&self, id: GameId) -> Result<bool> {
        Ok(self.games.write().remove(&id).is_some())
    }
}

/// Load a stored game, run `count` steps, and save it back.
///
/// Nothing is saved if a step fails.
pub fn advance_stored<R>(repo: &R, id: GameId, count: usize) -> Result<Option<Generation>>
where
    R: GameRepository + ?Sized,
{
    let mut game = repo
        .load(id)?
        .ok_or_else(|| Error::NotFound(format!("game {}", id)))?;

    let latest = game.evolve(count)?.last().cloned();
    repo.save(&game)?;

    info!(game_id = %id, steps = count, "Advanced stored game");
    Ok(latest)
}
