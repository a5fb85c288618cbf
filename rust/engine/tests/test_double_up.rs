use meltdown_engine::cards::{parse_cards, Card};
use meltdown_engine::double_up::{resolve, Winner};
use meltdown_engine::errors::GameError;
use meltdown_engine::game::RoundState;
use meltdown_engine::session::Session;

fn two(s: &str) -> [Card; 2] {
    let c = parse_cards(s).unwrap();
    [c[0], c[1]]
}

/// Session that has just drawn a held royal flush at bet 10 (payout 800).
fn after_royal(seed: u64) -> Session {
    let mut s = Session::with_seed(1000, seed);
    s.inject_forced_hand(&parse_cards("10h Jh Qh Kh Ah").unwrap())
        .unwrap();
    s.place_bet_and_deal().unwrap();
    s.apply_auto_lock().unwrap();
    let outcome = s.draw().unwrap();
    assert_eq!(outcome.payout, 800);
    s
}

#[test]
fn dealer_pair_beats_player_king_high() {
    assert_eq!(resolve(&two("7c 7d"), &two("Kh 2s")), Winner::Dealer);
}

#[test]
fn ties_go_to_the_dealer() {
    assert_eq!(resolve(&two("Ac 4d"), &two("Ah 4s")), Winner::Dealer);
    assert_eq!(resolve(&two("Jc Jd"), &two("Jh Js")), Winner::Dealer);
}

#[test]
fn settlement_matches_the_winner() {
    for seed in 0..20 {
        let mut s = after_royal(seed);
        let before = s.balance();
        let deal = s.start_double_up().unwrap();
        assert_eq!(deal.wager, 800);
        let outcome = s.resolve_double_up().unwrap();
        assert_eq!(outcome.winner, resolve(&deal.dealer, &deal.player));
        let expected = match outcome.winner {
            Winner::Player => before + 1600,
            Winner::Dealer => before - 800,
        };
        assert_eq!(outcome.balance, expected, "seed {seed}");
        assert_eq!(s.balance(), expected);
        assert_eq!(s.state(), RoundState::AwaitingBet);
    }
}

#[test]
fn double_up_cards_come_from_the_live_deck() {
    let mut s = after_royal(4);
    let before = s.deck_remaining();
    let deal = s.start_double_up().unwrap();
    assert_eq!(s.deck_remaining(), before - 4);
    let mut all: Vec<Card> = deal.dealer.to_vec();
    all.extend(deal.player);
    all.sort();
    all.dedup();
    assert_eq!(all.len(), 4);
}

#[test]
fn no_double_up_after_a_loss() {
    let mut s = Session::with_seed(1000, 8);
    s.inject_forced_hand(&parse_cards("2h 5d 8c Js Ah").unwrap())
        .unwrap();
    s.place_bet_and_deal().unwrap();
    for i in 0..5 {
        s.toggle_hold(i).unwrap();
    }
    s.draw().unwrap();
    assert!(!s.can_double_up());
    assert!(matches!(
        s.start_double_up(),
        Err(GameError::IllegalState { .. })
    ));
}

#[test]
fn only_one_double_up_per_win() {
    let mut s = after_royal(2);
    s.start_double_up().unwrap();
    s.resolve_double_up().unwrap();
    assert!(matches!(
        s.start_double_up(),
        Err(GameError::IllegalState { .. })
    ));
    assert!(matches!(
        s.resolve_double_up(),
        Err(GameError::IllegalState { .. })
    ));
}

#[test]
fn declining_is_just_the_next_round() {
    let mut s = after_royal(3);
    let balance = s.balance();
    s.next_round().unwrap();
    assert_eq!(s.balance(), balance);
    assert!(!s.can_double_up());
}

#[test]
fn round_record_carries_the_double_up() {
    let mut s = after_royal(6);
    assert!(s.last_record().unwrap().double_up.is_none());
    s.start_double_up().unwrap();
    let outcome = s.resolve_double_up().unwrap();
    let rec = s.last_record().unwrap();
    let du = rec.double_up.as_ref().expect("double-up recorded");
    assert_eq!(du.winner, outcome.winner);
    assert_eq!(rec.final_balance(), outcome.balance);
}
