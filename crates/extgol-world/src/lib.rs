//! Board, cells and the generation engine.
//!
//! This crate implements the finite 2D board where cells live, evolve under
//! type-specific thresholds, and exchange energy according to their moods.

pub mod tile;
pub mod cell;
pub mod board;
pub mod generation;
pub mod game;
pub mod store;
mod engine;

pub use tile::{CellId, Tile, TileId};
pub use cell::{Cell, Transition, HIGHLANDER_REPRIEVES, IMMUNITY_EXHAUSTED};
pub use board::Board;
pub use generation::{Generation, StepStats};
pub use game::Game;
pub use store::{advance_stored, GameRepository, GameSnapshot, MemoryRepository};
