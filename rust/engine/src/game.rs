use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::GameError;

/// Phase of a round. Decides which session operations are legal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// Waiting for a wager. Bets may be changed.
    AwaitingBet,
    /// Five cards are on the table; holds may be toggled before the draw.
    AwaitingDraw,
    /// The draw has been scored. A double-up may be played from here.
    Resolved,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundState::AwaitingBet => "awaiting bet",
            RoundState::AwaitingDraw => "awaiting draw",
            RoundState::Resolved => "resolved",
        };
        f.write_str(s)
    }
}

/// Five dealt cards, each with its own hold flag.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Hand {
    cards: [Card; 5],
    held: [bool; 5],
}

impl Hand {
    pub fn new(cards: [Card; 5]) -> Self {
        Self {
            cards,
            held: [false; 5],
        }
    }

    pub fn cards(&self) -> &[Card; 5] {
        &self.cards
    }

    pub fn is_held(&self, index: usize) -> bool {
        self.held.get(index).copied().unwrap_or(false)
    }

    pub fn holds(&self) -> [bool; 5] {
        self.held
    }

    /// Positions currently held, ascending.
    pub fn held_indices(&self) -> Vec<usize> {
        (0..5).filter(|&i| self.held[i]).collect()
    }

    /// Flips the hold flag at `index` and returns its new value.
    pub fn toggle(&mut self, index: usize) -> Result<bool, GameError> {
        let slot = self
            .held
            .get_mut(index)
            .ok_or(GameError::InvalidIndex(index))?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Replaces the hold flags with exactly `indices`.
    pub fn set_holds(&mut self, indices: &[usize]) -> Result<(), GameError> {
        if let Some(&bad) = indices.iter().find(|&&i| i >= 5) {
            return Err(GameError::InvalidIndex(bad));
        }
        self.held = [false; 5];
        for &i in indices {
            self.held[i] = true;
        }
        Ok(())
    }

    pub fn clear_holds(&mut self) {
        self.held = [false; 5];
    }

    pub fn unheld_count(&self) -> usize {
        self.held.iter().filter(|h| !**h).count()
    }

    /// Fills every unheld position from `replacements`, left to right.
    /// `replacements` must hold at least [`Hand::unheld_count`] cards.
    pub(crate) fn replace_unheld(&mut self, replacements: Vec<Card>) {
        let mut fresh = replacements.into_iter();
        for (card, held) in self.cards.iter_mut().zip(self.held) {
            if !held {
                if let Some(c) = fresh.next() {
                    *card = c;
                }
            }
        }
    }
}
