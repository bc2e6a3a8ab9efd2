//! Indexed record of one evolution step.

use chrono::{DateTime, Utc};
use extgol_core::Coord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Counters gathered while computing a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    pub births: u32,
    pub deaths: u32,
    pub survivors: u32,
    /// Neighbor pairs whose exchange changed something
    pub interactions: u32,
    /// Highlander cells that skipped a death this step
    pub reprieves: u32,
    /// Highlander cells that lost their immunity this step
    pub exhausted: u32,
}

/// A generation: which cells were evaluated at a step, and which were alive
/// afterwards. Cells are referred to by coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generation {
    pub index: u64,
    pub members: BTreeSet<Coord>,
    pub alive: BTreeSet<Coord>,
    pub stats: StepStats,
    pub created_at: DateTime<Utc>,
}

impl Generation {
    pub fn new(index: u64, members: BTreeSet<Coord>, alive: BTreeSet<Coord>, stats: StepStats) -> Self {
        Self {
            index,
            members,
            alive,
            stats,
            created_at: Utc::now(),
        }
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.members.contains(&coord)
    }

    pub fn is_alive(&self, coord: Coord) -> bool {
        self.alive.contains(&coord)
    }

    pub fn alive_count(&self) -> usize {
        self.alive.len()
    }
}
