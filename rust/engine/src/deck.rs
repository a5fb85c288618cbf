use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// Remaining-card count below which the deck is rebuilt before the next deal.
pub const LOW_WATER_MARK: usize = 10;

#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        let rng = ChaCha20Rng::seed_from_u64(seed);
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng,
        }
    }

    /// The replenish operation: rebuilds all 52 cards and shuffles them.
    /// Cards dealt earlier are discarded, not returned, so this never
    /// permutes just the remainder.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        // SliceRandom::shuffle is Fisher-Yates: i from the end down to 1,
        // swapped with a uniform index in 0..=i.
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the first `n` cards. Leaves the deck untouched on failure.
    pub fn deal_front(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_card(&mut self) -> Result<Card, GameError> {
        let mut one = self.deal_front(1)?;
        one.pop().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    /// Reshuffles a fresh deck when fewer than [`LOW_WATER_MARK`] cards remain.
    /// Returns `true` if a reshuffle happened.
    pub fn replenish_if_low(&mut self) -> bool {
        if self.cards.len() < LOW_WATER_MARK {
            self.shuffle();
            true
        } else {
            false
        }
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_deck_is_unshuffled_full_deck() {
        let deck = Deck::new_with_seed(1);
        assert_eq!(deck.cards(), full_deck().as_slice());
    }

    #[test]
    fn deal_front_takes_from_the_front() {
        let mut deck = Deck::new_with_seed(1);
        let expected: Vec<Card> = full_deck()[..5].to_vec();
        assert_eq!(deck.deal_front(5).unwrap(), expected);
        assert_eq!(deck.remaining(), 47);
        assert_eq!(deck.cards()[0], full_deck()[5]);
    }

    #[test]
    fn overdraw_fails_without_mutation() {
        let mut deck = Deck::new_with_seed(1);
        deck.deal_front(50).unwrap();
        let err = deck.deal_front(3).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientCards {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining(), 2);
    }

    #[test]
    fn shuffle_restores_a_full_deck_after_dealing() {
        let mut deck = Deck::new_with_seed(4);
        deck.deal_front(30).unwrap();
        deck.shuffle();
        assert_eq!(deck.remaining(), 52);
        let mut cards = deck.cards().to_vec();
        cards.sort_by_key(|c| (c.suit, c.rank));
        let mut expected = full_deck();
        expected.sort_by_key(|c| (c.suit, c.rank));
        assert_eq!(cards, expected);
    }

    #[test]
    fn replenish_only_below_low_water_mark() {
        let mut deck = Deck::new_with_seed(9);
        deck.shuffle();
        deck.deal_front(52 - LOW_WATER_MARK).unwrap();
        assert!(!deck.replenish_if_low());
        assert_eq!(deck.remaining(), LOW_WATER_MARK);
        deck.deal_card().unwrap();
        assert!(deck.replenish_if_low());
        assert_eq!(deck.remaining(), 52);
    }
}
