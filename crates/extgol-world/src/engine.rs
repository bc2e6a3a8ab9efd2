//! Per-generation evolution engine.
//!
//! A step runs in phases over a snapshot of the previous generation:
//!
//! 1. snapshot every cell's alive flag and mood,
//! 2. compute each cell's next state from snapshot neighbor counts,
//! 3. accumulate interactions between snapshot-alive neighbors,
//! 4. commit transitions, life point deltas and mood changes together.
//!
//! Phases 2 and 3 only read the snapshot, so their order does not matter and
//! no cell ever sees another cell's state from the same step. Any error is
//! raised before phase 4, leaving the board untouched.
//!
//! Interaction pairs are visited once per unordered pair: tiles in row-major
//! order, each paired with its neighbors of higher tile index, the
//! lower-index cell acting as initiator.

use crate::board::Board;
use crate::cell::{Transition, IMMUNITY_EXHAUSTED};
use crate::generation::StepStats;
use crate::tile::CellId;
use extgol_core::{interaction_effect, CellType, Coord, Error, Mood, Result};
use std::collections::BTreeSet;
use tracing::{debug, trace};

/// Everything a step will write back, computed before anything is written
struct PendingStep {
    cell_ids: Vec<CellId>,
    transitions: Vec<Transition>,
    life_deltas: Vec<i32>,
    mood_changes: Vec<Option<Mood>>,
    stats: StepStats,
}

/// Result of a committed step
pub(crate) struct StepOutcome {
    pub members: BTreeSet<Coord>,
    pub alive: BTreeSet<Coord>,
    pub stats: StepStats,
}

/// Advance the board by one generation and tag every cell with `index`
pub(crate) fn advance(board: &mut Board, index: u64) -> Result<StepOutcome> {
    board.validate()?;

    let pending = plan(board)?;
    Ok(commit(board, pending, index))
}

fn plan(board: &Board) -> Result<PendingStep> {
    let tiles = board.tiles();
    let size = tiles.len();

    // Snapshot of the previous generation, indexed by tile
    let mut cell_ids = Vec::with_capacity(size);
    let mut alive = Vec::with_capacity(size);
    let mut moods = Vec::with_capacity(size);
    for tile in tiles {
        let id = tile.cell().ok_or_else(|| {
            Error::InconsistentBoard(format!("tile {} has no cell", tile.coord()))
        })?;
        let cell = board.cell(id).ok_or_else(|| {
            Error::InconsistentBoard(format!("tile {} points at a missing cell", tile.coord()))
        })?;
        cell_ids.push(id);
        alive.push(cell.is_alive());
        moods.push(cell.mood());
    }

    let mut stats = StepStats::default();

    // Next states
    let mut transitions = Vec::with_capacity(size);
    for (index, tile) in tiles.iter().enumerate() {
        let count = tile.neighbors().iter().filter(|n| alive[n.0]).count() as i32;
        let cell = board.cell(cell_ids[index]).ok_or_else(|| {
            Error::InconsistentBoard(format!("tile {} points at a missing cell", tile.coord()))
        })?;
        let transition = cell.next_state(count);

        match (alive[index], transition.alive) {
            (false, true) => stats.births += 1,
            (true, false) => stats.deaths += 1,
            (true, true) => stats.survivors += 1,
            (false, false) => {}
        }

        if cell.cell_type() == CellType::Highlander && alive[index] {
            if transition.skipped_gen > cell.skipped_gen() {
                stats.reprieves += 1;
            } else if transition.skipped_gen == IMMUNITY_EXHAUSTED
                && cell.skipped_gen() != IMMUNITY_EXHAUSTED
            {
                stats.exhausted += 1;
                debug!(
                    event = "highlander_exhausted",
                    x = tile.coord().x,
                    y = tile.coord().y,
                    "Highlander lost its immunity"
                );
            }
        }

        trace!(x = tile.coord().x, y = tile.coord().y, count, next = transition.alive, "evaluated cell");
        transitions.push(transition);
    }

    // Interactions among snapshot-alive neighbors, each pair once
    let mut life_deltas = vec![0i32; size];
    let mut mood_changes: Vec<Option<Mood>> = vec![None; size];
    for (index, tile) in tiles.iter().enumerate() {
        if !alive[index] {
            continue;
        }

        for neighbor in tile.neighbors() {
            let other = neighbor.0;
            if other <= index || !alive[other] {
                continue;
            }

            let effect = interaction_effect(moods[index], moods[other]);
            if effect.is_noop() {
                continue;
            }

            life_deltas[index] = life_deltas[index].saturating_add(effect.this_delta);
            life_deltas[other] = life_deltas[other].saturating_add(effect.other_delta);
            if let Some(mood) = effect.this_mood {
                mood_changes[index] = Some(mood);
            }
            if let Some(mood) = effect.other_mood {
                mood_changes[other] = Some(mood);
            }
            stats.interactions += 1;
        }
    }

    Ok(PendingStep {
        cell_ids,
        transitions,
        life_deltas,
        mood_changes,
        stats,
    })
}

fn commit(board: &mut Board, pending: PendingStep, index: u64) -> StepOutcome {
    let mut members = BTreeSet::new();
    let mut alive = BTreeSet::new();

    let cells = board.cells_mut();
    for (tile_index, id) in pending.cell_ids.iter().enumerate() {
        let cell = &mut cells[id.0];
        cell.apply_transition(pending.transitions[tile_index]);
        cell.absorb(pending.life_deltas[tile_index], pending.mood_changes[tile_index]);
        cell.record_generation(index);

        members.insert(cell.coord());
        if cell.is_alive() {
            alive.insert(cell.coord());
        }
    }

    StepOutcome {
        members,
        alive,
        stats: pending.stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extgol_core::{CellConfig, GameId};

    fn board(width: i32, height: i32) -> Board {
        Board::populated(GameId::new(), width, height, &CellConfig::default()).unwrap()
    }

    #[test]
    fn test_blinker_oscillates() {
        let mut b = board(5, 5);
        b.set_alive_at(&[Coord::new(1, 2), Coord::new(2, 2), Coord::new(3, 2)])
            .unwrap();

        let outcome = advance(&mut b, 1).unwrap();
        let vertical: BTreeSet<Coord> = [Coord::new(2, 1), Coord::new(2, 2), Coord::new(2, 3)]
            .into_iter()
            .collect();
        assert_eq!(outcome.alive, vertical);
        assert_eq!(outcome.stats.births, 2);
        assert_eq!(outcome.stats.deaths, 2);
        assert_eq!(outcome.stats.survivors, 1);
        assert_eq!(outcome.members.len(), 25);

        let outcome = advance(&mut b, 2).unwrap();
        assert!(outcome.alive.contains(&Coord::new(1, 2)));
        assert!(outcome.alive.contains(&Coord::new(3, 2)));
    }

    #[test]
    fn test_block_is_still() {
        let mut b = board(4, 4);
        let block = [Coord::new(1, 1), Coord::new(2, 1), Coord::new(1, 2), Coord::new(2, 2)];
        b.set_alive_at(&block).unwrap();

        let outcome = advance(&mut b, 1).unwrap();
        assert_eq!(outcome.alive, block.into_iter().collect::<BTreeSet<_>>());
    }

    #[test]
    fn test_interactions_use_snapshot_moods() {
        // The vampire converts its naive neighbor, but the conversion does not
        // spread further down the row within the same step.
        let mut b = board(4, 1);
        b.set_alive_at(&[Coord::new(0, 0), Coord::new(1, 0), Coord::new(2, 0), Coord::new(3, 0)])
            .unwrap();
        b.cell_at_mut(Coord::new(0, 0)).unwrap().unwrap().set_mood(Mood::Vampire);

        let outcome = advance(&mut b, 1).unwrap();
        assert_eq!(outcome.stats.interactions, 1);

        let moods: Vec<Mood> = b.cells().map(|c| c.mood()).collect();
        assert_eq!(moods, vec![Mood::Vampire, Mood::Vampire, Mood::Naive, Mood::Naive]);

        let points: Vec<i32> = b.cells().map(|c| c.life_points()).collect();
        assert_eq!(points, vec![1, -1, 0, 0]);
    }

    #[test]
    fn test_dead_cells_do_not_interact() {
        let mut b = board(2, 1);
        b.set_alive_at(&[Coord::new(0, 0)]).unwrap();
        b.cell_at_mut(Coord::new(1, 0)).unwrap().unwrap().set_mood(Mood::Vampire);

        let outcome = advance(&mut b, 1).unwrap();
        assert_eq!(outcome.stats.interactions, 0);
        assert_eq!(b.cell_at(Coord::new(0, 0)).unwrap().unwrap().mood(), Mood::Naive);
    }

    #[test]
    fn test_healer_ring_feeds_everyone() {
        let mut b = board(3, 3);
        b.set_alive_at(&[Coord::new(1, 1), Coord::new(0, 0), Coord::new(2, 2)])
            .unwrap();
        b.cell_at_mut(Coord::new(1, 1)).unwrap().unwrap().set_mood(Mood::Healer);

        advance(&mut b, 1).unwrap();
        assert_eq!(b.cell_at(Coord::new(0, 0)).unwrap().unwrap().life_points(), 1);
        assert_eq!(b.cell_at(Coord::new(2, 2)).unwrap().unwrap().life_points(), 1);
        assert_eq!(b.cell_at(Coord::new(1, 1)).unwrap().unwrap().life_points(), 0);
    }

    #[test]
    fn test_incomplete_board_is_rejected_untouched() {
        let mut b = Board::new(GameId::new(), 2, 2).unwrap();
        b.place_cell(Coord::new(0, 0)).unwrap().set_alive(true);

        assert!(matches!(advance(&mut b, 1), Err(Error::InconsistentBoard(_))));
        let cell = b.cell_at(Coord::new(0, 0)).unwrap().unwrap();
        assert!(cell.is_alive());
        assert!(cell.generations().is_empty());
    }
}
