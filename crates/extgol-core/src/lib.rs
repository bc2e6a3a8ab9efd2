//! Core types and utilities for the Extended Game of Life.

pub mod types;
pub mod config;
pub mod error;
pub mod interaction;

pub use error::{Error, Result};
pub use types::*;
pub use config::*;
pub use interaction::*;
