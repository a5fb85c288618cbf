//! Simulation command handler.
//!
//! Plays automated rounds through a real [`Session`], letting a
//! [`HoldStrategy`] pick the holds, and reports the return to player. The
//! session keeps its meter, bonus hands and bet clamping, so the figures
//! include everything a player at the table would see.
//!
//! # Examples
//!
//! ```no_run
//! use meltdown_cli::commands::{SimOptions, handle_sim_command};
//! use std::io;
//!
//! let opts = SimOptions {
//!     rounds: 10_000,
//!     bet: 10,
//!     seed: Some(42),
//!     strategy: "autolock".to_string(),
//!     double: false,
//!     balance: 1_000_000,
//!     output: Some("data/rounds.jsonl".to_string()),
//! };
//! handle_sim_command(&opts, &mut io::stdout(), &mut io::stderr()).unwrap();
//! ```

use crate::config::Config;
use crate::error::CliError;
use crate::io_utils::create_text_writer;
use crate::ui;
use crate::validation::validate_rounds;
use meltdown_ai::{HoldStrategy, create_strategy, strategy_names};
use meltdown_engine::double_up::Winner;
use meltdown_engine::hand::Category;
use meltdown_engine::logger::RoundLogger;
use meltdown_engine::session::Session;
use serde::Serialize;
use std::io::Write;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct SimOptions {
    pub rounds: u64,
    pub bet: u64,
    pub seed: Option<u64>,
    pub strategy: String,
    /// Take the double-up after every win.
    pub double: bool,
    pub balance: u64,
    pub output: Option<String>,
}

impl SimOptions {
    /// Command-line values win over the configuration.
    #[allow(clippy::too_many_arguments)]
    pub fn resolve(
        rounds: u64,
        bet: Option<u64>,
        seed: Option<u64>,
        strategy: String,
        double: bool,
        balance: Option<u64>,
        output: Option<String>,
        config: &Config,
    ) -> Self {
        Self {
            rounds,
            bet: bet.unwrap_or(config.bet),
            seed: seed.or(config.seed),
            strategy,
            double,
            balance: balance.unwrap_or(config.starting_balance),
            output,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoubleUpTally {
    pub played: u64,
    pub won: u64,
    pub lost: u64,
    /// Double-up credits minus wagers lost.
    pub net: i64,
}

/// Totals for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimReport {
    pub strategy: String,
    pub seed: u64,
    pub rounds: u64,
    pub starting_balance: u64,
    pub final_balance: u64,
    pub wagered: u64,
    /// Draw payouts only; double-up results are tallied separately.
    pub returned: u64,
    pub bonus_hands: u64,
    pub double_up: DoubleUpTally,
    /// Counts in [`Category::ALL`] order.
    pub categories: [u64; 10],
    /// True when the balance ran out before the requested rounds.
    pub stopped_early: bool,
}

impl SimReport {
    /// Return to player of the base game, in percent.
    pub fn rtp(&self) -> f64 {
        if self.wagered == 0 {
            return 0.0;
        }
        self.returned as f64 * 100.0 / self.wagered as f64
    }

    pub fn count(&self, category: Category) -> u64 {
        Category::ALL
            .iter()
            .position(|&c| c == category)
            .map_or(0, |i| self.categories[i])
    }
}

/// Handle the sim command: run the rounds and print the report.
pub fn handle_sim_command(
    opts: &SimOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    let report = match run_sim(opts) {
        Ok(r) => r,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e);
        }
    };
    if report.stopped_early {
        ui::display_warning(
            err,
            &format!(
                "Balance ran out after {} of {} round(s)",
                report.rounds, opts.rounds
            ),
        )?;
    }
    write_report(&report, out)
}

/// Plays the rounds described by `opts`, writing the round log if asked.
pub fn run_sim(opts: &SimOptions) -> Result<SimReport, CliError> {
    validate_rounds(opts.rounds).map_err(CliError::InvalidInput)?;
    let strategy: Box<dyn HoldStrategy> = create_strategy(&opts.strategy).ok_or_else(|| {
        CliError::InvalidInput(format!(
            "Unknown strategy '{}'. Valid strategies: {}",
            opts.strategy,
            strategy_names().join(", ")
        ))
    })?;
    if opts.balance == 0 {
        return Err(CliError::InvalidInput("balance must be >= 1".to_string()));
    }

    let seed = opts.seed.unwrap_or_else(rand::random);
    let mut session = Session::with_seed(opts.balance, seed);
    session.set_bet(opts.bet)?;

    let mut logger = match opts.output.as_deref() {
        Some(path) => Some(RoundLogger::from_writer(
            create_text_writer(path).map_err(CliError::InvalidInput)?,
        )),
        None => None,
    };

    let mut report = SimReport {
        strategy: strategy.name().to_string(),
        seed,
        rounds: 0,
        starting_balance: opts.balance,
        final_balance: opts.balance,
        wagered: 0,
        returned: 0,
        bonus_hands: 0,
        double_up: DoubleUpTally::default(),
        categories: [0; 10],
        stopped_early: false,
    };

    for _ in 0..opts.rounds {
        if !session.can_play() {
            report.stopped_early = true;
            break;
        }
        let dealt = session.place_bet_and_deal()?;
        let mut holds = strategy.choose_holds(&dealt);
        holds.sort_unstable();
        holds.dedup();
        for i in holds {
            session.toggle_hold(i)?;
        }
        let outcome = session.draw()?;

        if opts.double && session.can_double_up() {
            session.start_double_up()?;
            let settled = session.resolve_double_up()?;
            let tally = &mut report.double_up;
            tally.played += 1;
            match settled.winner {
                Winner::Player => {
                    tally.won += 1;
                    tally.net += 2 * settled.wager as i64;
                }
                Winner::Dealer => {
                    tally.lost += 1;
                    tally.net -= settled.wager as i64;
                }
            }
        } else {
            session.next_round()?;
        }

        if let Some(record) = session.last_record() {
            report.wagered += record.bet;
            if record.bonus {
                report.bonus_hands += 1;
            }
            if let Some(logger) = logger.as_mut() {
                logger.write(record)?;
            }
        }
        report.returned += outcome.payout;
        if let Some(i) = Category::ALL.iter().position(|&c| c == outcome.category) {
            report.categories[i] += 1;
        }
        report.rounds += 1;
    }

    report.final_balance = session.balance();
    debug!(
        rounds = report.rounds,
        wagered = report.wagered,
        returned = report.returned,
        "simulation finished"
    );
    Ok(report)
}

fn write_report(report: &SimReport, out: &mut dyn Write) -> Result<(), CliError> {
    writeln!(
        out,
        "sim: strategy={} seed={} rounds={}",
        report.strategy, report.seed, report.rounds
    )?;
    writeln!(out, "Wagered: {}", report.wagered)?;
    writeln!(out, "Returned: {}", report.returned)?;
    writeln!(out, "RTP: {:.2}%", report.rtp())?;
    writeln!(
        out,
        "Balance: {} -> {}",
        report.starting_balance, report.final_balance
    )?;
    writeln!(out, "Bonus hands: {}", report.bonus_hands)?;
    let d = &report.double_up;
    writeln!(
        out,
        "Double-ups: {} (won {}, lost {}, net {})",
        d.played, d.won, d.lost, d.net
    )?;
    writeln!(out, "Categories:")?;
    for (category, count) in Category::ALL.iter().zip(report.categories.iter()) {
        writeln!(out, "  {:<16}{:>10}", category.name(), count)?;
    }
    Ok(())
}
