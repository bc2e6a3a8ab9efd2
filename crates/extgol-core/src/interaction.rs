//! Mood-based energy exchange between two cells.
//!
//! The exchange is a pure lookup over the ordered pair `(this, other)`. The
//! caller applies the returned effect to whichever cells it holds.

use crate::Mood;
use serde::{Deserialize, Serialize};

/// Outcome of one cell interacting with another
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionEffect {
    /// Life point change for the initiating cell
    pub this_delta: i32,
    /// Life point change for the partner cell
    pub other_delta: i32,
    /// Mood the initiating cell switches to, if any
    pub this_mood: Option<Mood>,
    /// Mood the partner cell switches to, if any
    pub other_mood: Option<Mood>,
}

impl InteractionEffect {
    const NONE: Self = Self {
        this_delta: 0,
        other_delta: 0,
        this_mood: None,
        other_mood: None,
    };

    pub fn is_noop(&self) -> bool {
        *self == Self::NONE
    }

    /// The same effect seen from the partner's side
    pub fn mirrored(&self) -> Self {
        Self {
            this_delta: self.other_delta,
            other_delta: self.this_delta,
            this_mood: self.other_mood,
            other_mood: self.this_mood,
        }
    }
}

/// Look up the effect of `this` interacting with `other`.
///
/// Healers donate one point to non-healers. Vampires drain one point from
/// non-vampires and turn naive victims into vampires.
pub fn interaction_effect(this: Mood, other: Mood) -> InteractionEffect {
    use Mood::*;

    match (this, other) {
        (Naive, Naive) | (Healer, Healer) | (Vampire, Vampire) => InteractionEffect::NONE,
        (Naive, Healer) => InteractionEffect {
            this_delta: 1,
            ..InteractionEffect::NONE
        },
        (Naive, Vampire) => InteractionEffect {
            this_delta: -1,
            other_delta: 1,
            this_mood: Some(Vampire),
            other_mood: None,
        },
        (Healer, Naive) => InteractionEffect {
            other_delta: 1,
            ..InteractionEffect::NONE
        },
        (Healer, Vampire) => InteractionEffect {
            this_delta: -1,
            other_delta: 1,
            ..InteractionEffect::NONE
        },
        (Vampire, Naive) => InteractionEffect {
            this_delta: 1,
            other_delta: -1,
            this_mood: None,
            other_mood: Some(Vampire),
        },
        (Vampire, Healer) => InteractionEffect {
            this_delta: 1,
            other_delta: -1,
            ..InteractionEffect::NONE
        },
    }
}
