//! Fixed grid positions and their precomputed neighborhoods.

use extgol_core::Coord;
use serde::{Deserialize, Serialize};

/// Index of a tile in its board's tile arena (row-major)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

/// Index of a cell in its board's cell arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellId(pub usize);

/// A grid position hosting at most one cell
#[derive(Debug, Clone)]
pub struct Tile {
    id: TileId,
    coord: Coord,
    cell: Option<CellId>,
    neighbors: Vec<TileId>,
}

impl Tile {
    pub(crate) fn new(id: TileId, coord: Coord, neighbors: Vec<TileId>) -> Self {
        Self {
            id,
            coord,
            cell: None,
            neighbors,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn coord(&self) -> Coord {
        self.coord
    }

    /// Handle of the hosted cell, if any
    pub fn cell(&self) -> Option<CellId> {
        self.cell
    }

    pub fn has_cell(&self) -> bool {
        self.cell.is_some()
    }

    /// Adjacent tiles, computed once at board construction
    pub fn neighbors(&self) -> &[TileId] {
        &self.neighbors
    }

    pub(crate) fn attach(&mut self, cell: CellId) {
        self.cell = Some(cell);
    }
}
