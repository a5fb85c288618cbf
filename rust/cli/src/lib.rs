//! # Meltdown CLI Library
//!
//! Command-line front end for the Meltdown video poker engine: an interactive
//! table, a strategy simulator, round log statistics and a few inspection
//! commands.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses command-line arguments
//! and executes the appropriate subcommand.
//!
//! ## Example Usage
//!
//! ```
//! let mut out = Vec::new();
//! let mut err = Vec::new();
//! let code = meltdown_cli::run(["meltdown", "paytable", "--bet", "50"], &mut out, &mut err);
//! assert_eq!(code, 0);
//! assert!(String::from_utf8(out).unwrap().contains("4000"));
//! ```
//!
//! ## Available Subcommands
//!
//! - `play`: Play an interactive session on stdin
//! - `sim`: Run automated rounds with a hold strategy and report the return
//! - `stats`: Aggregate statistics from round logs
//! - `deal`: Deal a single hand and show the auto-lock suggestion
//! - `eval`: Evaluate five given cards
//! - `paytable`: Print the payout table for a bet
//! - `cfg`: Display current configuration settings

use clap::Parser;
use std::io::Write;

#[macro_use]
mod macros;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
pub mod ui;
pub mod validation;

use cli::{Commands, MeltdownCli};
use commands::{
    PlayOptions, SimOptions, handle_cfg_command, handle_deal_command, handle_eval_command,
    handle_paytable_command, handle_play_command, handle_sim_command, handle_stats_command,
};

pub use error::CliError;

const COMMANDS: &[&str] = &["play", "sim", "stats", "deal", "eval", "paytable", "cfg"];

/// Main entry point for the CLI application.
///
/// Parses `args` (program name first) and dispatches to the subcommand handler.
/// Help and version go to `out` with exit code `0`; every failure is reported
/// on `err` and returns [`exit_code::ERROR`].
///
/// # Example
///
/// ```
/// let mut out = Vec::new();
/// let mut err = Vec::new();
/// let code = meltdown_cli::run(["meltdown", "deal", "--seed", "42"], &mut out, &mut err);
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match MeltdownCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;

            // Help and version should print to stdout and exit 0
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => {
                    write_or_exit!(err, "{}", e);
                    write_or_exit!(err, "Meltdown Poker CLI");
                    write_or_exit!(err, "Usage: meltdown <command> [options]\n");
                    write_or_exit!(err, "Commands:");
                    for c in COMMANDS {
                        write_or_exit!(err, "  {}", c);
                    }
                    write_or_exit!(err, "\nFor full help, run: meltdown --help");
                    exit_code::ERROR
                }
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg => handle_cfg_command(out, err),
        Commands::Play {
            balance,
            bet,
            seed,
            auto_lock,
            log,
        } => match load_config(err) {
            Ok(config) => {
                let opts = PlayOptions::resolve(balance, bet, seed, auto_lock, log, &config);
                let stdin = std::io::stdin();
                let mut stdin_lock = stdin.lock();
                handle_play_command(opts, out, err, &mut stdin_lock)
            }
            Err(e) => Err(e),
        },
        Commands::Sim {
            rounds,
            bet,
            seed,
            strategy,
            double,
            balance,
            output,
        } => match load_config(err) {
            Ok(config) => {
                let opts =
                    SimOptions::resolve(rounds, bet, seed, strategy, double, balance, output, &config);
                handle_sim_command(&opts, out, err)
            }
            Err(e) => Err(e),
        },
        Commands::Stats { input } => handle_stats_command(input, out, err),
        Commands::Deal { seed } => handle_deal_command(seed, out),
        Commands::Eval { hand, bet } => handle_eval_command(&hand, bet, out, err),
        Commands::Paytable { bet } => handle_paytable_command(bet, out, err),
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            write_or_exit!(err, "Error: {}", e);
            exit_code::ERROR
        }
    }
}

fn load_config(err: &mut dyn Write) -> Result<config::Config, CliError> {
    config::load().map_err(|e| {
        let _ = ui::display_warning(err, "Fix MELTDOWN_* settings or run `meltdown cfg`");
        CliError::Config(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str]) -> (i32, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let code = run(args.iter().copied(), &mut out, &mut err);
        (
            code,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_help_goes_to_stdout() {
        let (code, out, err) = run_args(&["meltdown", "--help"]);
        assert_eq!(code, 0);
        assert!(out.contains("Usage"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_unknown_command_lists_commands() {
        let (code, out, err) = run_args(&["meltdown", "fold"]);
        assert_eq!(code, 2);
        assert!(out.is_empty());
        for c in COMMANDS {
            assert!(err.contains(&format!("  {}\n", c)), "missing {c}");
        }
    }

    #[test]
    fn test_command_error_maps_to_exit_code() {
        let (code, _out, err) = run_args(&["meltdown", "eval", "--hand", "Ah Kh"]);
        assert_eq!(code, exit_code::ERROR);
        assert!(err.contains("expected 5 cards"));
    }

    #[test]
    fn test_every_listed_command_parses() {
        for c in COMMANDS {
            let result = MeltdownCli::try_parse_from(["meltdown", c, "--help"]);
            let e = result.expect_err("help exits through clap");
            assert_eq!(e.kind(), clap::error::ErrorKind::DisplayHelp, "{c}");
        }
    }
}
