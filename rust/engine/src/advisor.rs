//! Auto-lock advisor: picks which dealt cards to hold before the draw.
//!
//! Rules are tried strongest first and the first one that fires decides:
//!
//! 1. straight flush (royal included): all five
//! 2. four of a kind: the four
//! 3. full house: all five
//! 4. three of a kind: the three
//! 5. flush: all five
//! 6. straight: all five
//! 7. every jack-or-better pair; else a single low pair; else nothing

use crate::cards::Card;
use crate::hand::HandProfile;

const ALL: [usize; 5] = [0, 1, 2, 3, 4];

/// Returns the positions to hold, ascending.
///
/// ```
/// use meltdown_engine::advisor::auto_lock;
/// use meltdown_engine::cards::parse_cards;
///
/// let cards = parse_cards("Qh Qs 4d 7c 9s").unwrap();
/// let hand: [_; 5] = cards.try_into().unwrap();
/// assert_eq!(auto_lock(&hand), vec![0, 1]);
/// ```
pub fn auto_lock(cards: &[Card; 5]) -> Vec<usize> {
    let profile = HandProfile::new(cards);
    let mut held = pick(&profile);
    held.sort_unstable();
    held
}

fn pick(p: &HandProfile) -> Vec<usize> {
    if p.flush && p.straight {
        return ALL.to_vec();
    }
    if let Some(quads) = p.quads() {
        return quads.indices.clone();
    }
    if let Some(trips) = p.group_with(3) {
        return match p.group_with(2) {
            Some(pair) => [trips.indices.as_slice(), pair.indices.as_slice()].concat(),
            None => trips.indices.clone(),
        };
    }
    if p.flush || p.straight {
        return ALL.to_vec();
    }

    let high: Vec<usize> = p
        .groups_with(2)
        .filter(|g| g.rank.is_high())
        .flat_map(|g| g.indices.iter().copied())
        .collect();
    if !high.is_empty() {
        return high;
    }
    let mut low = p.groups_with(2).filter(|g| !g.rank.is_high());
    match (low.next(), low.next()) {
        (Some(pair), None) => pair.indices.clone(),
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::hand::five_cards;

    fn lock(s: &str) -> Vec<usize> {
        auto_lock(&five_cards(&parse_cards(s).unwrap()).unwrap())
    }

    #[test]
    fn straight_flush_holds_everything() {
        assert_eq!(lock("9d Kd 10d Qd Jd"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn quads_hold_only_the_four() {
        assert_eq!(lock("5h 9c 5d 5s 5c"), vec![0, 2, 3, 4]);
    }

    #[test]
    fn full_house_holds_everything() {
        assert_eq!(lock("Jh Js 3d 3c Jd"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn trips_hold_three() {
        assert_eq!(lock("2h 9s 2d 2c 5s"), vec![0, 2, 3]);
    }

    #[test]
    fn flush_and_straight_hold_everything() {
        assert_eq!(lock("2h 9h 4h Kh 7h"), vec![0, 1, 2, 3, 4]);
        assert_eq!(lock("8c 6d 7h 5s 9c"), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn two_high_pairs_hold_four() {
        assert_eq!(lock("Kh 3c Ad Ks As"), vec![0, 2, 3, 4]);
    }

    #[test]
    fn high_pair_beats_low_pair() {
        assert_eq!(lock("4h Qc 4d Qs 9s"), vec![1, 3]);
    }

    #[test]
    fn single_low_pair_is_held() {
        assert_eq!(lock("4h 8c 4d Qs 9s"), vec![0, 2]);
    }

    #[test]
    fn two_low_pairs_hold_nothing() {
        assert!(lock("4h 8c 4d 8s 9s").is_empty());
    }

    #[test]
    fn junk_holds_nothing() {
        assert!(lock("2h 8c 4d Qs 9s").is_empty());
    }
}
