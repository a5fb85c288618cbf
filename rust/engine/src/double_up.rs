//! Double-or-nothing side game.
//!
//! Dealer and player each get two cards. A pair beats any non-pair, pairs
//! compare by rank, and non-pairs compare by their single highest card (the
//! lower card is never a kicker). Ties go to the dealer.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    Dealer,
    Player,
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Winner::Dealer => f.write_str("dealer"),
            Winner::Player => f.write_str("player"),
        }
    }
}

/// Strength of a two-card double-up hand. Variant order is the ranking.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum DoubleHand {
    HighCard(Rank),
    Pair(Rank),
}

impl DoubleHand {
    pub fn of(cards: &[Card; 2]) -> Self {
        if cards[0].rank == cards[1].rank {
            DoubleHand::Pair(cards[0].rank)
        } else {
            DoubleHand::HighCard(cards[0].rank.max(cards[1].rank))
        }
    }
}

/// Decides the double-up. Anything short of a strictly better player hand is a dealer win.
///
/// ```
/// use meltdown_engine::cards::parse_cards;
/// use meltdown_engine::double_up::{resolve, Winner};
///
/// let c = parse_cards("7c 7d Kh 2s").unwrap();
/// assert_eq!(resolve(&[c[0], c[1]], &[c[2], c[3]]), Winner::Dealer);
/// ```
pub fn resolve(dealer: &[Card; 2], player: &[Card; 2]) -> Winner {
    match DoubleHand::of(player).cmp(&DoubleHand::of(dealer)) {
        Ordering::Greater => Winner::Player,
        Ordering::Equal | Ordering::Less => Winner::Dealer,
    }
}

/// Splits four cards dealt in table order (dealer, player, dealer, player).
pub fn split_deal(cards: &[Card; 4]) -> ([Card; 2], [Card; 2]) {
    ([cards[0], cards[2]], [cards[1], cards[3]])
}

/// Cards and stake of a double-up that has been dealt but not yet settled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleUpDeal {
    pub wager: u64,
    pub dealer: [Card; 2],
    pub player: [Card; 2],
}

/// Settled double-up as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoubleUpOutcome {
    pub dealer: [Card; 2],
    pub player: [Card; 2],
    pub winner: Winner,
    pub wager: u64,
    /// Balance after settlement.
    pub balance: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    fn pair_of(s: &str) -> [Card; 2] {
        let c = parse_cards(s).unwrap();
        [c[0], c[1]]
    }

    #[test]
    fn pair_beats_high_card() {
        assert_eq!(resolve(&pair_of("Ah Kd"), &pair_of("2c 2s")), Winner::Player);
        assert_eq!(resolve(&pair_of("7c 7d"), &pair_of("Kh 2s")), Winner::Dealer);
    }

    #[test]
    fn higher_pair_wins() {
        assert_eq!(resolve(&pair_of("9c 9d"), &pair_of("10h 10s")), Winner::Player);
        assert_eq!(resolve(&pair_of("Qc Qd"), &pair_of("Jh Js")), Winner::Dealer);
    }

    #[test]
    fn only_the_top_card_counts() {
        // K-9 vs K-2: both are king high, so the dealer takes the tie
        assert_eq!(resolve(&pair_of("Kc 2d"), &pair_of("Kh 9s")), Winner::Dealer);
        assert_eq!(resolve(&pair_of("Qc Jd"), &pair_of("Kh 2s")), Winner::Player);
    }

    #[test]
    fn equal_pairs_go_to_dealer() {
        assert_eq!(resolve(&pair_of("8c 8d"), &pair_of("8h 8s")), Winner::Dealer);
    }

    #[test]
    fn split_deal_alternates_seats() {
        let c = parse_cards("2h 3h 4h 5h").unwrap();
        let (dealer, player) = split_deal(&[c[0], c[1], c[2], c[3]]);
        assert_eq!(dealer, [c[0], c[2]]);
        assert_eq!(player, [c[1], c[3]]);
    }
}
