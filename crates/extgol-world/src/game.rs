//! A game: one board plus the generations produced from it.

use crate::board::Board;
use crate::engine;
use crate::generation::Generation;
use extgol_core::{Coord, Error, GameConfig, GameId, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    board: Board,
    generations: Vec<Generation>,
}

impl Game {
    /// Build a fully populated, randomly seeded game from configuration
    pub fn new(config: &GameConfig) -> Result<Self> {
        let id = GameId::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let board = Board::from_config(id, config, &mut rng)?;

        info!(
            game_id = %id,
            width = board.width(),
            height = board.height(),
            alive = board.alive_count(),
            "Created game"
        );

        Ok(Self::from_board(board))
    }

    /// Wrap an already materialised board. The game takes the board's game id.
    pub fn from_board(board: Board) -> Self {
        Self {
            id: board.game_id(),
            board,
            generations: Vec::new(),
        }
    }

    pub(crate) fn from_parts(board: Board, generations: Vec<Generation>) -> Result<Self> {
        if generations.windows(2).any(|pair| pair[0].index >= pair[1].index) {
            return Err(Error::InconsistentBoard(
                "generation indices are not strictly increasing".to_string(),
            ));
        }

        for generation in &generations {
            let off_board = generation
                .members
                .iter()
                .chain(generation.alive.iter())
                .find(|c| !board.contains(**c));
            if let Some(coord) = off_board {
                return Err(Error::InconsistentBoard(format!(
                    "generation {} refers to {} outside the board",
                    generation.index, coord
                )));
            }
            if !generation.alive.is_subset(&generation.members) {
                return Err(Error::InconsistentBoard(format!(
                    "generation {} has alive cells that were not evaluated",
                    generation.index
                )));
            }
        }

        let game = Self {
            id: board.game_id(),
            board,
            generations,
        };

        for cell in game.board.cells() {
            for &index in cell.generations() {
                let recorded = game
                    .generation(index)
                    .is_some_and(|g| g.contains(cell.coord()));
                if !recorded {
                    return Err(Error::InconsistentBoard(format!(
                        "cell {} refers to generation {} which does not list it",
                        cell.coord(),
                        index
                    )));
                }
            }
        }

        Ok(game)
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn into_board(self) -> Board {
        self.board
    }

    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    pub fn generation(&self, index: u64) -> Option<&Generation> {
        self.generations
            .binary_search_by_key(&index, |g| g.index)
            .ok()
            .map(|pos| &self.generations[pos])
    }

    pub fn latest_generation(&self) -> Option<&Generation> {
        self.generations.last()
    }

    /// Index the next step will receive
    pub fn next_index(&self) -> u64 {
        self.latest_generation().map_or(1, |g| g.index + 1)
    }

    /// Run one generation step.
    ///
    /// On failure the board is left exactly as it was and no generation is
    /// recorded.
    #[instrument(skip(self), fields(game_id = %self.id, generation = self.next_index()))]
    pub fn step(&mut self) -> Result<&Generation> {
        let index = self.next_index();

        let outcome = match engine::advance(&mut self.board, index) {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(event = "step_aborted", error = %e, "Generation step aborted");
                return Err(e);
            }
        };

        debug!(
            event = "generation",
            alive = outcome.alive.len(),
            births = outcome.stats.births,
            deaths = outcome.stats.deaths,
            interactions = outcome.stats.interactions,
            reprieves = outcome.stats.reprieves,
            "Generation complete"
        );

        self.generations.push(Generation::new(
            index,
            outcome.members,
            outcome.alive,
            outcome.stats,
        ));

        let generation = &self.generations[self.generations.len() - 1];
        Ok(generation)
    }

    /// Run `count` steps and return the generations they produced.
    ///
    /// Each step is atomic; if one fails, the steps before it stay committed.
    pub fn evolve(&mut self, count: usize) -> Result<&[Generation]> {
        let start = self.generations.len();

        for _ in 0..count {
            self.step()?;
        }

        let produced = &self.generations[start..];
        if let Some(last) = produced.last() {
            info!(
                game_id = %self.id,
                steps = produced.len(),
                generation = last.index,
                alive = last.alive_count(),
                "Evolution finished"
            );
        }

        Ok(produced)
    }

    /// Generations the cell at `coord` was evaluated in, oldest first
    pub fn cell_history(&self, coord: Coord) -> Result<Vec<&Generation>> {
        let cell = self
            .board
            .cell_at(coord)?
            .ok_or_else(|| Error::NotFound(format!("no cell at {}", coord)))?;

        cell.generations()
            .iter()
            .map(|&index| {
                self.generation(index).ok_or_else(|| {
                    Error::NotFound(format!("generation {} of cell {}", index, coord))
                })
            })
            .collect()
    }
}
