//! End-to-end checks of the inspection commands through `meltdown_cli::run`.

mod helpers;

use helpers::run_cli;

#[test]
fn test_deal_with_seed_is_reproducible() {
    let a = run_cli(&["deal", "--seed", "7"]);
    let b = run_cli(&["deal", "--seed", "7"]);
    assert_eq!(a.exit_code, 0);
    assert_eq!(a.stdout, b.stdout);
    assert!(a.stdout.starts_with("Seed: 7\nHand: ["));
    assert!(a.stderr.is_empty());
}

#[test]
fn test_different_seeds_usually_differ() {
    let hands: std::collections::HashSet<String> = (0..5u64)
        .map(|s| run_cli(&["deal", "--seed", &s.to_string()]).stdout)
        .map(|out| out.lines().nth(1).unwrap_or_default().to_string())
        .collect();
    assert!(hands.len() > 1);
}

#[test]
fn test_eval_reference_hands() {
    let cases = [
        ("2h 2d 2c 5s 9s", "10", "Three of a Kind", "Payout: 30"),
        ("10s Js Qs Ks As", "50", "Royal Flush", "Payout: 4000"),
        ("Jh Js 3d 3c 9s", "10", "Two Pair", "Payout: 20"),
        ("Qh Qs 4d 7c 9s", "10", "Jacks or Better", "Payout: 10"),
        ("10h 10s 4d 7c 9s", "10", "No Win", "Payout: 0"),
        ("2h 3d 4c 5s 6h", "1", "Straight", "Payout: 6"),
    ];
    for (hand, bet, category, payout) in cases {
        let res = run_cli(&["eval", "--hand", hand, "--bet", bet]);
        assert_eq!(res.exit_code, 0, "{hand}: {}", res.stderr);
        assert!(res.stdout.contains(&format!("Category: {category}")), "{hand}");
        assert!(res.stdout.contains(payout), "{hand}: {}", res.stdout);
    }
}

#[test]
fn test_eval_shows_auto_lock_choice() {
    let res = run_cli(&["eval", "--hand", "Qh Qs 4d 7c 9s"]);
    assert!(res.stdout.contains("Auto-lock holds: 1 2\n"));

    let res = run_cli(&["eval", "--hand", "Jh Js 3d 3c Jd"]);
    assert!(res.stdout.contains("Auto-lock holds: 1 2 3 4 5\n"));
}

#[test]
fn test_eval_accepts_unicode_and_commas() {
    let res = run_cli(&["eval", "--hand", "A♠,K♠,Q♠,J♠,T♠"]);
    assert_eq!(res.exit_code, 0, "{}", res.stderr);
    assert!(res.stdout.contains("Royal Flush"));
}

#[test]
fn test_paytable_default_bet() {
    let res = run_cli(&["paytable"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.starts_with("Payouts at bet 10\n"));
    let rows: Vec<&str> = res.stdout.lines().skip(1).collect();
    assert_eq!(rows.len(), 9);
    assert!(rows[0].contains("Royal Flush") && rows[0].trim_end().ends_with("800"));
    assert!(rows[8].contains("Jacks or Better") && rows[8].trim_end().ends_with("10"));
}

#[test]
fn test_paytable_rounds_small_bets() {
    let res = run_cli(&["paytable", "--bet", "1"]);
    assert_eq!(res.exit_code, 0);
    let full_house = res
        .stdout
        .lines()
        .find(|l| l.contains("Full House"))
        .unwrap();
    assert!(full_house.trim_end().ends_with("15"));
}

#[test]
fn test_version_goes_to_stdout() {
    let res = run_cli(&["--version"]);
    assert_eq!(res.exit_code, 0);
    assert!(res.stdout.contains("meltdown"));
}
