//! Keep-what-you-made strategy.
//!
//! Holds any pair or better by rank counts alone: four of a kind keeps the
//! four, a full house keeps everything, trips keep the three, two pair keeps
//! both pairs and a single pair of any rank is kept. Flushes and straights are
//! not recognised and get redrawn.

use crate::HoldStrategy;
use meltdown_engine::cards::Card;
use meltdown_engine::hand::HandProfile;

#[derive(Debug, Clone, Default)]
pub struct ComboLock;

impl ComboLock {
    pub fn new() -> Self {
        Self
    }
}

impl HoldStrategy for ComboLock {
    fn choose_holds(&self, hand: &[Card; 5]) -> Vec<usize> {
        let profile = HandProfile::new(hand);
        let mut held: Vec<usize> = profile
            .groups
            .iter()
            .filter(|g| g.count() >= 2)
            .flat_map(|g| g.indices.iter().copied())
            .collect();
        held.sort_unstable();
        held
    }

    fn name(&self) -> &str {
        "ComboLock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meltdown_engine::cards::parse_cards;

    fn holds(s: &str) -> Vec<usize> {
        let hand: [Card; 5] = parse_cards(s).unwrap().try_into().unwrap();
        ComboLock::new().choose_holds(&hand)
    }

    #[test]
    fn quads_keep_four() {
        assert_eq!(holds("5h 9c 5d 5s 5c"), vec![0, 2, 3, 4]);
    }

    #[test]
    fn full_house_keeps_all() {
        assert_eq!(holds("Jh Js 3d 3c Jd"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn trips_keep_three() {
        assert_eq!(holds("2h 9s 2d 2c 5s"), vec![0, 2, 3]);
    }

    #[test]
    fn two_low_pairs_are_both_kept() {
        assert_eq!(holds("4h 8c 4d 8s 9s"), vec![0, 1, 2, 3]);
    }

    #[test]
    fn any_single_pair_is_kept() {
        assert_eq!(holds("3h 8c 3d Qs 9s"), vec![0, 2]);
    }

    #[test]
    fn flushes_and_straights_are_redrawn() {
        assert!(holds("2h 9h 4h Kh 7h").is_empty());
        assert!(holds("8c 6d 7h 5s 9c").is_empty());
    }
}
