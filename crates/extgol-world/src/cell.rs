//! Cell state, the evolution rule, and pairwise interaction.

use crate::tile::TileId;
use extgol_core::{
    interaction_effect, BoardId, CellType, Coord, Error, GameId, InteractionEffect, Mood, Result,
    DEFAULT_MAX_THRESHOLD, DEFAULT_MIN_THRESHOLD,
};
use serde::{Deserialize, Serialize};

/// Out-of-range generations a Highlander may survive
pub const HIGHLANDER_REPRIEVES: i32 = 3;

/// `skipped_gen` value once a Highlander has used up its reprieves
pub const IMMUNITY_EXHAUSTED: i32 = -1;

/// Next state of a cell, computed without mutating it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub alive: bool,
    pub skipped_gen: i32,
}

/// A cell on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    coord: Coord,
    tile: TileId,
    board: BoardId,
    game: GameId,
    alive: bool,
    life_points: i32,
    mood: Mood,
    cell_type: CellType,
    min_threshold: i32,
    max_threshold: i32,
    skipped_gen: i32,
    generations: Vec<u64>,
}

impl Cell {
    /// Create a dead, naive, basic cell bound to a game and board
    pub fn new(coord: Coord, tile: TileId, board: BoardId, game: GameId) -> Self {
        Self {
            coord,
            tile,
            board,
            game,
            alive: false,
            life_points: 0,
            mood: Mood::Naive,
            cell_type: CellType::Basic,
            min_threshold: DEFAULT_MIN_THRESHOLD,
            max_threshold: DEFAULT_MAX_THRESHOLD,
            skipped_gen: 0,
            generations: Vec::new(),
        }
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Back-reference to the hosting tile
    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn board_id(&self) -> BoardId {
        self.board
    }

    pub fn game_id(&self) -> GameId {
        self.game
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }

    pub fn life_points(&self) -> i32 {
        self.life_points
    }

    pub fn set_life_points(&mut self, life_points: i32) {
        self.life_points = life_points;
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn set_mood(&mut self, mood: Mood) {
        self.mood = mood;
    }

    pub fn cell_type(&self) -> CellType {
        self.cell_type
    }

    /// Assign a type, resetting thresholds to the type's bounds.
    ///
    /// Highlanders always restart with a full reprieve budget.
    pub fn set_type(&mut self, cell_type: CellType) {
        let (min, max) = cell_type.thresholds();
        self.cell_type = cell_type;
        self.min_threshold = min;
        self.max_threshold = max;
        if cell_type == CellType::Highlander {
            self.skipped_gen = 0;
        }
    }

    pub fn min_threshold(&self) -> i32 {
        self.min_threshold
    }

    pub fn set_min_threshold(&mut self, min: i32) -> Result<()> {
        if min > self.max_threshold {
            return Err(Error::InvalidThreshold {
                min,
                max: self.max_threshold,
            });
        }
        self.min_threshold = min;
        Ok(())
    }

    pub fn max_threshold(&self) -> i32 {
        self.max_threshold
    }

    pub fn set_max_threshold(&mut self, max: i32) -> Result<()> {
        if max < self.min_threshold {
            return Err(Error::InvalidThreshold {
                min: self.min_threshold,
                max,
            });
        }
        self.max_threshold = max;
        Ok(())
    }

    pub fn skipped_gen(&self) -> i32 {
        self.skipped_gen
    }

    /// Restore a persisted reprieve counter
    pub fn set_skipped_gen(&mut self, skipped_gen: i32) -> Result<()> {
        if !(IMMUNITY_EXHAUSTED..=HIGHLANDER_REPRIEVES).contains(&skipped_gen) {
            return Err(Error::Validation(format!(
                "skipped_gen {} out of range",
                skipped_gen
            )));
        }
        self.skipped_gen = skipped_gen;
        Ok(())
    }

    pub fn has_exhausted_immunity(&self) -> bool {
        self.cell_type == CellType::Highlander && self.skipped_gen == IMMUNITY_EXHAUSTED
    }

    /// Check the invariants the setters enforce, for cells built by deserialization
    pub fn validate(&self) -> Result<()> {
        if self.min_threshold > self.max_threshold {
            return Err(Error::InvalidThreshold {
                min: self.min_threshold,
                max: self.max_threshold,
            });
        }
        if !(IMMUNITY_EXHAUSTED..=HIGHLANDER_REPRIEVES).contains(&self.skipped_gen) {
            return Err(Error::Validation(format!(
                "cell {} has skipped_gen {} out of range",
                self.coord, self.skipped_gen
            )));
        }
        if self.generations.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(Error::Validation(format!(
                "cell {} has an unordered generation history",
                self.coord
            )));
        }
        Ok(())
    }

    /// Indices of the generations this cell was evaluated in, oldest first
    pub fn generations(&self) -> &[u64] {
        &self.generations
    }

    pub(crate) fn record_generation(&mut self, index: u64) {
        self.generations.push(index);
    }

    pub(crate) fn bind_tile(&mut self, tile: TileId) {
        self.tile = tile;
    }

    /// Compute the next state from a count of alive neighbors.
    ///
    /// A dead cell is born with exactly three alive neighbors, whatever its
    /// type. A live cell survives while the count stays within its thresholds.
    /// Outside them it dies, unless it is a Highlander with reprieves left.
    pub fn next_state(&self, alive_neighbors: i32) -> Transition {
        let skipped_gen = self.skipped_gen;

        if !self.alive {
            return Transition {
                alive: alive_neighbors == 3,
                skipped_gen,
            };
        }

        if (self.min_threshold..=self.max_threshold).contains(&alive_neighbors) {
            return Transition {
                alive: true,
                skipped_gen,
            };
        }

        match self.cell_type {
            CellType::Highlander if (0..HIGHLANDER_REPRIEVES).contains(&skipped_gen) => Transition {
                alive: true,
                skipped_gen: skipped_gen + 1,
            },
            CellType::Highlander => Transition {
                alive: false,
                skipped_gen: IMMUNITY_EXHAUSTED,
            },
            _ => Transition {
                alive: false,
                skipped_gen,
            },
        }
    }

    /// Apply `next_state` in place and return the new alive flag
    pub fn evolve(&mut self, alive_neighbors: i32) -> bool {
        let transition = self.next_state(alive_neighbors);
        self.apply_transition(transition);
        self.alive
    }

    pub(crate) fn apply_transition(&mut self, transition: Transition) {
        self.alive = transition.alive;
        self.skipped_gen = transition.skipped_gen;
    }

    /// Exchange energy with `other` according to both moods
    pub fn interact(&mut self, other: &mut Cell) -> InteractionEffect {
        let effect = interaction_effect(self.mood, other.mood);
        self.absorb(effect.this_delta, effect.this_mood);
        other.absorb(effect.other_delta, effect.other_mood);
        effect
    }

    pub(crate) fn absorb(&mut self, delta: i32, mood: Option<Mood>) {
        self.life_points = self.life_points.saturating_add(delta);
        if let Some(mood) = mood {
            self.mood = mood;
        }
    }
}
