//! Finite 2D board of tiles and the cells they host.

use crate::cell::Cell;
use crate::tile::{CellId, Tile, TileId};
use extgol_core::{
    BoardId, CellConfig, Coord, Error, GameConfig, GameId, InteractionEffect, Result,
};
use rand::Rng;
use std::collections::BTreeSet;

/// A fixed `width x height` grid. Tiles are stored row-major and their
/// neighbor lists never change after construction.
#[derive(Debug, Clone)]
pub struct Board {
    id: BoardId,
    game: GameId,
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
    cells: Vec<Cell>,
}

impl Board {
    /// Create a board of empty tiles
    pub fn new(game: GameId, width: i32, height: i32) -> Result<Self> {
        Self::with_id(BoardId::new(), game, width, height)
    }

    pub(crate) fn with_id(id: BoardId, game: GameId, width: i32, height: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(Error::InvalidDimensions { width, height });
        }

        let size = (width as usize) * (height as usize);
        let mut tiles = Vec::with_capacity(size);

        for index in 0..size {
            let coord = Self::coord_of(width, index);
            let neighbors = coord
                .neighbors(width, height)
                .map(|n| TileId((n.y * width + n.x) as usize))
                .collect();
            tiles.push(Tile::new(TileId(index), coord, neighbors));
        }

        Ok(Self {
            id,
            game,
            width,
            height,
            tiles,
            cells: Vec::with_capacity(size),
        })
    }

    /// Create a board with a cell on every tile, initialised from `defaults`
    pub fn populated(game: GameId, width: i32, height: i32, defaults: &CellConfig) -> Result<Self> {
        let mut board = Self::new(game, width, height)?;

        for index in 0..board.tiles.len() {
            let coord = board.tiles[index].coord();
            let cell = board.place_cell(coord)?;
            cell.set_life_points(defaults.initial_life_points);
            cell.set_mood(defaults.default_mood);
            cell.set_type(defaults.default_type);
        }

        Ok(board)
    }

    /// Create a populated board from configuration and seed it randomly
    pub fn from_config<R: Rng>(game: GameId, config: &GameConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut board = Self::populated(game, config.board.width, config.board.height, &config.cells)?;
        board.seed_random(config.alive_density, rng);
        Ok(board)
    }

    pub fn id(&self) -> BoardId {
        self.id
    }

    pub fn game_id(&self) -> GameId {
        self.game
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.in_bounds(self.width, self.height)
    }

    fn coord_of(width: i32, index: usize) -> Coord {
        let x = (index as i32) % width;
        let y = (index as i32) / width;
        Coord::new(x, y)
    }

    fn index_of(&self, coord: Coord) -> Result<usize> {
        if !self.contains(coord) {
            return Err(Error::InvalidCoordinate {
                coord,
                width: self.width,
                height: self.height,
            });
        }
        Ok((coord.y * self.width + coord.x) as usize)
    }

    /// Tile at a coordinate, or `InvalidCoordinate` outside the board
    pub fn tile_at(&self, coord: Coord) -> Result<&Tile> {
        let index = self.index_of(coord)?;
        Ok(&self.tiles[index])
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0)
    }

    /// All tiles, row-major
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Up to eight adjacent tiles, in neighbor-offset order
    pub fn neighbors_of(&self, coord: Coord) -> Result<Vec<&Tile>> {
        let tile = self.tile_at(coord)?;
        Ok(tile.neighbors().iter().map(|id| &self.tiles[id.0]).collect())
    }

    pub fn cell(&self, id: CellId) -> Option<&Cell> {
        self.cells.get(id.0)
    }

    pub fn cell_mut(&mut self, id: CellId) -> Option<&mut Cell> {
        self.cells.get_mut(id.0)
    }

    /// Cell hosted at a coordinate, if the tile has one
    pub fn cell_at(&self, coord: Coord) -> Result<Option<&Cell>> {
        let tile = self.tile_at(coord)?;
        Ok(tile.cell().map(|id| &self.cells[id.0]))
    }

    pub fn cell_at_mut(&mut self, coord: Coord) -> Result<Option<&mut Cell>> {
        let index = self.index_of(coord)?;
        match self.tiles[index].cell() {
            Some(id) => Ok(Some(&mut self.cells[id.0])),
            None => Ok(None),
        }
    }

    /// Cells in row-major tile order
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.tiles
            .iter()
            .filter_map(move |tile| tile.cell().map(|id| &self.cells[id.0]))
    }

    pub fn alive_cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells().filter(|cell| cell.is_alive())
    }

    pub fn alive_coords(&self) -> BTreeSet<Coord> {
        self.alive_cells().map(Cell::coord).collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive_cells().count()
    }

    /// Place a new default cell on an empty tile
    pub fn place_cell(&mut self, coord: Coord) -> Result<&mut Cell> {
        let index = self.index_of(coord)?;
        let cell = Cell::new(coord, TileId(index), self.id, self.game);
        let id = self.attach_cell(cell)?;
        Ok(&mut self.cells[id.0])
    }

    /// Attach an existing cell to the tile at its coordinate
    pub(crate) fn attach_cell(&mut self, mut cell: Cell) -> Result<CellId> {
        let index = self.index_of(cell.coord())?;
        cell.validate()?;

        if cell.game_id() != self.game || cell.board_id() != self.id {
            return Err(Error::InconsistentBoard(format!(
                "cell {} belongs to another game or board",
                cell.coord()
            )));
        }

        if self.tiles[index].has_cell() {
            return Err(Error::InconsistentBoard(format!(
                "tile {} already hosts a cell",
                cell.coord()
            )));
        }

        let id = CellId(self.cells.len());
        cell.bind_tile(TileId(index));
        self.cells.push(cell);
        self.tiles[index].attach(id);
        Ok(id)
    }

    /// Count neighbor tiles whose cell is present and alive
    pub fn count_alive_neighbors(&self, coord: Coord) -> Result<i32> {
        let tile = self.tile_at(coord)?;
        Ok(self.alive_neighbors_of(tile))
    }

    pub(crate) fn alive_neighbors_of(&self, tile: &Tile) -> i32 {
        tile.neighbors()
            .iter()
            .filter_map(|id| self.tiles[id.0].cell())
            .filter(|id| self.cells[id.0].is_alive())
            .count() as i32
    }

    /// Mark the cells at `coords` alive. Every coordinate is checked first,
    /// so a failure leaves the board untouched.
    pub fn set_alive_at(&mut self, coords: &[Coord]) -> Result<()> {
        let mut ids = Vec::with_capacity(coords.len());
        for &coord in coords {
            let id = self.tile_at(coord)?.cell().ok_or_else(|| {
                Error::InconsistentBoard(format!("tile {} has no cell", coord))
            })?;
            ids.push(id);
        }

        for id in ids {
            self.cells[id.0].set_alive(true);
        }
        Ok(())
    }

    /// Randomly bring cells to life with probability `density`
    pub fn seed_random<R: Rng>(&mut self, density: f32, rng: &mut R) {
        if density <= 0.0 {
            return;
        }

        for cell in &mut self.cells {
            if rng.gen::<f32>() < density {
                cell.set_alive(true);
            }
        }
    }

    /// Let the cell at `a` interact with the cell at `b`
    pub fn interact_at(&mut self, a: Coord, b: Coord) -> Result<InteractionEffect> {
        if a == b {
            return Err(Error::Validation(format!("cell {} cannot interact with itself", a)));
        }

        let first = self
            .tile_at(a)?
            .cell()
            .ok_or_else(|| Error::NullInteractionTarget(format!("no cell at {}", a)))?;
        let second = self
            .tile_at(b)?
            .cell()
            .ok_or_else(|| Error::NullInteractionTarget(format!("no cell at {}", b)))?;

        let (this, other) = pair_mut(&mut self.cells, first.0, second.0);
        Ok(this.interact(other))
    }

    /// Check that the tile arena covers the rectangle and every tile hosts a
    /// cell whose back-reference points at it.
    pub fn validate(&self) -> Result<()> {
        let expected = (self.width as usize) * (self.height as usize);
        if self.tiles.len() != expected {
            return Err(Error::InconsistentBoard(format!(
                "expected {} tiles, found {}",
                expected,
                self.tiles.len()
            )));
        }

        for (index, tile) in self.tiles.iter().enumerate() {
            if tile.id() != TileId(index) || tile.coord() != Self::coord_of(self.width, index) {
                return Err(Error::InconsistentBoard(format!(
                    "tile {} is not mapped to its coordinate",
                    index
                )));
            }

            let id = tile.cell().ok_or_else(|| {
                Error::InconsistentBoard(format!("tile {} has no cell", tile.coord()))
            })?;

            let cell = self.cells.get(id.0).ok_or_else(|| {
                Error::InconsistentBoard(format!("tile {} points at a missing cell", tile.coord()))
            })?;

            if cell.tile() != tile.id() || cell.coord() != tile.coord() {
                return Err(Error::InconsistentBoard(format!(
                    "cell at {} is bound to another tile",
                    tile.coord()
                )));
            }
        }

        Ok(())
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub(crate) fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

/// Borrow two distinct elements mutably
fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    if a < b {
        let (left, right) = items.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = items.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
