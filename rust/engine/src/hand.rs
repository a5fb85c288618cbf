use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank};

/// Hand categories in payout priority order, strongest first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    RoyalFlush,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    JacksOrBetter,
    NoWin,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::JacksOrBetter,
        Category::NoWin,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::RoyalFlush => "Royal Flush",
            Category::StraightFlush => "Straight Flush",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::Flush => "Flush",
            Category::Straight => "Straight",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::TwoPair => "Two Pair",
            Category::JacksOrBetter => "Jacks or Better",
            Category::NoWin => "No Win",
        }
    }

    pub fn is_win(self) -> bool {
        self != Category::NoWin
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Category plus the bet-scaled payout it earned.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub category: Category,
    pub payout: u64,
}

/// A group of equal-ranked cards and the positions they occupy in the hand.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RankGroup {
    pub rank: Rank,
    pub indices: Vec<usize>,
}

impl RankGroup {
    pub fn count(&self) -> usize {
        self.indices.len()
    }
}

/// Shape facts about a 5-card hand shared by the evaluator and the hold advisor.
#[derive(Debug, Clone)]
pub struct HandProfile {
    pub flush: bool,
    pub straight: bool,
    /// Rank groups, ordered by rank ascending.
    pub groups: Vec<RankGroup>,
    sorted_ranks: [Rank; 5],
}

impl HandProfile {
    pub fn new(cards: &[Card; 5]) -> Self {
        let flush = cards.iter().all(|c| c.suit == cards[0].suit);

        // sort a working copy; caller order is untouched
        let mut sorted_ranks: [Rank; 5] = std::array::from_fn(|i| cards[i].rank);
        sorted_ranks.sort_unstable();
        let straight = sorted_ranks
            .windows(2)
            .all(|w| w[1].value() == w[0].value() + 1);

        let mut groups: Vec<RankGroup> = Vec::with_capacity(5);
        for (i, card) in cards.iter().enumerate() {
            match groups.iter_mut().find(|g| g.rank == card.rank) {
                Some(g) => g.indices.push(i),
                None => groups.push(RankGroup {
                    rank: card.rank,
                    indices: vec![i],
                }),
            }
        }
        groups.sort_by_key(|g| g.rank);

        Self {
            flush,
            straight,
            groups,
            sorted_ranks,
        }
    }

    pub fn group_with(&self, count: usize) -> Option<&RankGroup> {
        self.groups.iter().find(|g| g.count() == count)
    }

    pub fn groups_with(&self, count: usize) -> impl Iterator<Item = &RankGroup> {
        self.groups.iter().filter(move |g| g.count() == count)
    }

    /// Four or more of one rank. Bonus hands are dealt with replacement, so
    /// five of a rank can occur and counts as four of a kind.
    pub fn quads(&self) -> Option<&RankGroup> {
        self.groups.iter().find(|g| g.count() >= 4)
    }

    pub fn is_royal(&self) -> bool {
        self.flush && self.straight && self.sorted_ranks[0] == Rank::Ten
    }

    pub fn category(&self) -> Category {
        let quads = self.quads().is_some();
        let trips = self.group_with(3).is_some();
        let pairs: Vec<&RankGroup> = self.groups_with(2).collect();

        if self.is_royal() {
            Category::RoyalFlush
        } else if self.flush && self.straight {
            Category::StraightFlush
        } else if quads {
            Category::FourOfAKind
        } else if trips && pairs.len() == 1 {
            Category::FullHouse
        } else if self.flush {
            Category::Flush
        } else if self.straight {
            Category::Straight
        } else if trips {
            Category::ThreeOfAKind
        } else if pairs.len() == 2 {
            Category::TwoPair
        } else if pairs.len() == 1 && pairs[0].rank.is_high() {
            Category::JacksOrBetter
        } else {
            Category::NoWin
        }
    }
}

/// Classifies a 5-card hand. Aces are high only: A-2-3-4-5 is not a straight.
pub fn evaluate_hand(cards: &[Card; 5]) -> Category {
    HandProfile::new(cards).category()
}

/// Converts a card slice into the fixed-size array the evaluator expects.
pub fn five_cards(cards: &[Card]) -> Option<[Card; 5]> {
    cards.try_into().ok()
}
