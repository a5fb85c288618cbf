//! Escalation ("meltdown") meter.
//!
//! Losing rounds fill the meter by a random 10 to 19 points. Once it reaches
//! [`METER_CAP`] the next deal is a bonus hand made only of jacks, queens,
//! kings and aces, and the meter drains back to zero.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cards::{all_suits, high_ranks, Card};

pub const METER_CAP: u8 = 100;

/// Inclusive range of points added per losing round.
pub const FILL_MIN: u8 = 10;
pub const FILL_MAX: u8 = 19;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EscalationMeter {
    level: u8,
}

impl EscalationMeter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: u8) -> Self {
        Self {
            level: level.min(METER_CAP),
        }
    }

    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn is_full(&self) -> bool {
        self.level >= METER_CAP
    }

    /// Adds a random amount in `FILL_MIN..=FILL_MAX`, saturating at the cap.
    /// Returns the amount added.
    pub fn fill<R: Rng>(&mut self, rng: &mut R) -> u8 {
        let amount = rng.random_range(FILL_MIN..=FILL_MAX);
        self.level = self.level.saturating_add(amount).min(METER_CAP);
        amount
    }

    pub fn reset(&mut self) {
        self.level = 0;
    }
}

/// Five cards drawn independently from {J, Q, K, A} x 4 suits.
/// Draws are with replacement, so the same card may appear more than once.
pub fn bonus_hand<R: Rng>(rng: &mut R) -> [Card; 5] {
    let ranks = high_ranks();
    let suits = all_suits();
    std::array::from_fn(|_| Card {
        rank: ranks[rng.random_range(0..ranks.len())],
        suit: suits[rng.random_range(0..suits.len())],
    })
}
