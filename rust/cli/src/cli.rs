//! Command-line argument definitions.

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "meltdown",
    version,
    about = "Meltdown Poker: five-card draw video poker with auto-lock, double-up and the meltdown meter"
)]
pub struct MeltdownCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play an interactive session on stdin
    Play {
        /// Starting balance (defaults to the configured value)
        #[arg(long)]
        balance: Option<u64>,
        /// Initial bet (defaults to the configured value)
        #[arg(long)]
        bet: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Apply the auto-lock advisor to every deal
        #[arg(long)]
        auto_lock: bool,
        /// Append round records to this file (.zst compresses)
        #[arg(long)]
        log: Option<String>,
    },
    /// Play automated rounds with a hold strategy and report the return
    Sim {
        #[arg(long)]
        rounds: u64,
        #[arg(long)]
        bet: Option<u64>,
        #[arg(long)]
        seed: Option<u64>,
        /// Hold strategy: autolock, none or combos
        #[arg(long, default_value = "autolock")]
        strategy: String,
        /// Take the double-up after every win
        #[arg(long)]
        double: bool,
        #[arg(long)]
        balance: Option<u64>,
        /// Write the round log to this file (.zst compresses)
        #[arg(long)]
        output: Option<String>,
    },
    /// Summarize a round log
    Stats {
        #[arg(long)]
        input: String,
    },
    /// Deal one hand and show the auto-lock suggestion
    Deal {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Evaluate five cards, e.g. --hand "Ah Kh Qh Jh 10h"
    Eval {
        #[arg(long)]
        hand: String,
        #[arg(long, default_value_t = meltdown_engine::rules::DEFAULT_BET)]
        bet: u64,
    },
    /// Print the payout table
    Paytable {
        #[arg(long, default_value_t = meltdown_engine::rules::DEFAULT_BET)]
        bet: u64,
    },
    /// Show the resolved configuration and where each value came from
    Cfg,
}
