//! Exit code and stream discipline: results on stdout, errors on stderr,
//! `0` on success and `2` on any failure.

mod helpers;

use helpers::run_cli;
use meltdown_cli::exit_code;

#[test]
fn test_no_arguments_is_usage_error() {
    let res = run_cli(&[]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stdout.is_empty());
    assert!(res.stderr.contains("Usage: meltdown <command> [options]"));
}

#[test]
fn test_unknown_flag_is_usage_error() {
    let res = run_cli(&["deal", "--hands", "3"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("Commands:"));
}

#[test]
fn test_invalid_card_returns_two() {
    let res = run_cli(&["eval", "--hand", "Ah Kh Qh Jh 1x"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stdout.is_empty());
    assert!(res.stderr.contains("Error: "));
    assert!(res.stderr.contains("1x"));
}

#[test]
fn test_disallowed_bet_returns_two() {
    for args in [
        vec!["paytable", "--bet", "20"],
        vec!["eval", "--hand", "Ah Kh Qh Jh 10h", "--bet", "0"],
    ] {
        let res = run_cli(&args);
        assert_eq!(res.exit_code, exit_code::ERROR, "{:?}", args);
        assert!(res.stderr.contains("not an allowed denomination"), "{:?}", args);
    }
}

#[test]
fn test_missing_stats_input_returns_two() {
    let res = run_cli(&["stats", "--input", "/nonexistent/rounds.jsonl"]);
    assert_eq!(res.exit_code, exit_code::ERROR);
    assert!(res.stderr.contains("Failed to read"));
}

#[test]
fn test_success_writes_nothing_to_stderr() {
    for args in [vec!["deal", "--seed", "1"], vec!["paytable"]] {
        let res = run_cli(&args);
        assert_eq!(res.exit_code, exit_code::SUCCESS);
        assert!(res.stderr.is_empty(), "{:?}: {}", args, res.stderr);
    }
}
