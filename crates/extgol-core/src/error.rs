//! Error types for the simulation.

use crate::Coord;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Coordinate {coord} is outside the {width}x{height} board")]
    InvalidCoordinate { coord: Coord, width: i32, height: i32 },

    #[error("Invalid board dimensions: {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    #[error("Interaction target missing: {0}")]
    NullInteractionTarget(String),

    #[error("Invalid mood or type: {0}")]
    InvalidMoodOrType(String),

    #[error("Invalid thresholds: min {min} > max {max}")]
    InvalidThreshold { min: i32, max: i32 },

    #[error("Inconsistent board: {0}")]
    InconsistentBoard(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<bincode::Error> for Error {
    fn from(err: bincode::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}
