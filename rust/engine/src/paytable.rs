//! Jacks or Better payout table.
//!
//! Payouts are quoted for a 10-unit reference bet and scaled linearly to the
//! actual bet, rounding half up to the nearest whole unit. Every base amount
//! is a multiple of ten, so with this table the scaling is exact for any bet.

use serde::Serialize;

use crate::cards::Card;
use crate::hand::{evaluate_hand, Category, HandResult};

/// Bet amount the base payouts are quoted for.
pub const REFERENCE_BET: u64 = 10;

mod base {
    pub const ROYAL_FLUSH: u64 = 800;
    pub const STRAIGHT_FLUSH: u64 = 500;
    pub const FOUR_OF_A_KIND: u64 = 250;
    pub const FULL_HOUSE: u64 = 150;
    pub const FLUSH: u64 = 100;
    pub const STRAIGHT: u64 = 60;
    pub const THREE_OF_A_KIND: u64 = 30;
    pub const TWO_PAIR: u64 = 20;
    pub const JACKS_OR_BETTER: u64 = 10;
    pub const NO_WIN: u64 = 0;
}

/// Payout for `category` at the reference bet.
pub fn base_payout(category: Category) -> u64 {
    match category {
        Category::RoyalFlush => base::ROYAL_FLUSH,
        Category::StraightFlush => base::STRAIGHT_FLUSH,
        Category::FourOfAKind => base::FOUR_OF_A_KIND,
        Category::FullHouse => base::FULL_HOUSE,
        Category::Flush => base::FLUSH,
        Category::Straight => base::STRAIGHT,
        Category::ThreeOfAKind => base::THREE_OF_A_KIND,
        Category::TwoPair => base::TWO_PAIR,
        Category::JacksOrBetter => base::JACKS_OR_BETTER,
        Category::NoWin => base::NO_WIN,
    }
}

/// Scales the base payout to `bet`, rounding half up.
///
/// ```
/// use meltdown_engine::hand::Category;
/// use meltdown_engine::paytable::payout_for;
///
/// assert_eq!(payout_for(Category::RoyalFlush, 50), 4000);
/// assert_eq!(payout_for(Category::JacksOrBetter, 5), 5);
/// assert_eq!(payout_for(Category::Straight, 1), 6);
/// assert_eq!(payout_for(Category::NoWin, 1_000_000), 0);
/// ```
pub fn payout_for(category: Category, bet: u64) -> u64 {
    let scaled = base_payout(category).saturating_mul(bet);
    scaled.saturating_add(REFERENCE_BET / 2) / REFERENCE_BET
}

/// Evaluates `cards` and prices the result at `bet`.
pub fn score_hand(cards: &[Card; 5], bet: u64) -> HandResult {
    let category = evaluate_hand(cards);
    HandResult {
        category,
        payout: payout_for(category, bet),
    }
}

/// One row of the display table.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct PayoutLine {
    pub category: Category,
    pub payout: u64,
}

/// The paying categories, strongest first, priced at `bet`.
pub fn payout_table(bet: u64) -> Vec<PayoutLine> {
    Category::ALL
        .iter()
        .copied()
        .filter(|c| c.is_win())
        .map(|category| PayoutLine {
            category,
            payout: payout_for(category, bet),
        })
        .collect()
}
