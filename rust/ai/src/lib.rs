//! # meltdown-ai: Hold Strategies for Video Poker
//!
//! Decides which of the five dealt cards to keep before the draw. Strategies
//! share one trait so the simulator can compare them over the same seeds.
//!
//! ## Core Components
//!
//! - [`HoldStrategy`] - Trait every strategy implements
//! - [`autolock`] - The auto-lock advisor used by the game itself
//! - [`combos`] - Keeps any made combination, never flushes or straights
//! - [`NoHold`] - Draws five new cards every time
//! - [`create_strategy`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use meltdown_ai::create_strategy;
//! use meltdown_engine::session::Session;
//!
//! let strategy = create_strategy("autolock").expect("known strategy");
//!
//! let mut session = Session::with_seed(1000, 42);
//! let dealt = session.place_bet_and_deal().expect("deal");
//! for index in strategy.choose_holds(&dealt) {
//!     session.toggle_hold(index).expect("hold");
//! }
//! let outcome = session.draw().expect("draw");
//! println!("{} chose, hand is {}", strategy.name(), outcome.category);
//! ```

use meltdown_engine::cards::Card;

pub mod autolock;
pub mod combos;

/// Chooses the cards to keep from a freshly dealt hand.
///
/// # Example Implementation
///
/// ```rust
/// use meltdown_ai::HoldStrategy;
/// use meltdown_engine::cards::Card;
///
/// struct KeepFirst;
///
/// impl HoldStrategy for KeepFirst {
///     fn choose_holds(&self, _hand: &[Card; 5]) -> Vec<usize> {
///         vec![0]
///     }
///
///     fn name(&self) -> &str {
///         "KeepFirst"
///     }
/// }
/// ```
pub trait HoldStrategy: Send + Sync {
    /// Positions to hold, ascending, each in `0..5`.
    fn choose_holds(&self, hand: &[Card; 5]) -> Vec<usize>;

    fn name(&self) -> &str;
}

/// Never holds anything.
#[derive(Debug, Clone, Default)]
pub struct NoHold;

impl HoldStrategy for NoHold {
    fn choose_holds(&self, _hand: &[Card; 5]) -> Vec<usize> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "NoHold"
    }
}

/// Names accepted by [`create_strategy`].
pub fn strategy_names() -> &'static [&'static str] {
    &["autolock", "none", "combos"]
}

/// Factory for hold strategies by name.
///
/// ```rust
/// use meltdown_ai::create_strategy;
///
/// assert_eq!(create_strategy("combos").unwrap().name(), "ComboLock");
/// assert!(create_strategy("optimal").is_none());
/// ```
pub fn create_strategy(name: &str) -> Option<Box<dyn HoldStrategy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "autolock" | "auto" => Some(Box::new(autolock::AutoLock::new())),
        "none" => Some(Box::new(NoHold)),
        "combos" | "combo" => Some(Box::new(combos::ComboLock::new())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_builds() {
        for name in strategy_names() {
            assert!(create_strategy(name).is_some(), "{name}");
        }
    }

    #[test]
    fn names_are_case_insensitive() {
        assert_eq!(create_strategy(" AutoLock ").unwrap().name(), "AutoLock");
    }

    #[test]
    fn no_hold_keeps_nothing() {
        let hand: [Card; 5] = meltdown_engine::cards::full_deck()[..5]
            .try_into()
            .unwrap();
        assert!(NoHold.choose_holds(&hand).is_empty());
    }
}
