//! Configuration types for the simulation.

use crate::{CellType, Error, Mood, Result};
use serde::{Deserialize, Serialize};

/// Board configuration parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Width of the board grid
    pub width: i32,
    /// Height of the board grid
    pub height: i32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
        }
    }
}

/// Initial state given to every cell placed on a fresh board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    /// Starting life points
    pub initial_life_points: i32,
    /// Starting mood
    pub default_mood: Mood,
    /// Starting type
    pub default_type: CellType,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            initial_life_points: 0,
            default_mood: Mood::Naive,
            default_type: CellType::Basic,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Board configuration
    pub board: BoardConfig,
    /// Cell defaults
    pub cells: CellConfig,
    /// Random seed for reproducible seeding
    pub seed: u64,
    /// Fraction of cells seeded alive (0.0 to 1.0)
    pub alive_density: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board: BoardConfig::default(),
            cells: CellConfig::default(),
            seed: 0,
            alive_density: 0.0,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.board.width <= 0 || self.board.height <= 0 {
            return Err(Error::InvalidDimensions {
                width: self.board.width,
                height: self.board.height,
            });
        }

        if !(0.0..=1.0).contains(&self.alive_density) {
            return Err(Error::Validation(format!(
                "alive_density {} is outside [0, 1]",
                self.alive_density
            )));
        }

        Ok(())
    }
}
