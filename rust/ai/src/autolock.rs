//! The in-game auto-lock advisor exposed as a [`HoldStrategy`].

use crate::HoldStrategy;
use meltdown_engine::advisor::auto_lock;
use meltdown_engine::cards::Card;

/// Holds made hands, flushes and straights, jacks-or-better pairs, and a lone
/// low pair. See [`meltdown_engine::advisor`] for the full cascade.
///
/// # Example
///
/// ```rust
/// use meltdown_ai::autolock::AutoLock;
/// use meltdown_ai::HoldStrategy;
/// use meltdown_engine::cards::parse_cards;
///
/// let hand: [_; 5] = parse_cards("Jh Js 3d 3c Jd").unwrap().try_into().unwrap();
/// assert_eq!(AutoLock::new().choose_holds(&hand), vec![0, 1, 2, 3, 4]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct AutoLock;

impl AutoLock {
    pub fn new() -> Self {
        Self
    }
}

impl HoldStrategy for AutoLock {
    fn choose_holds(&self, hand: &[Card; 5]) -> Vec<usize> {
        auto_lock(hand)
    }

    fn name(&self) -> &str {
        "AutoLock"
    }
}
