//! # Play Command
//!
//! Interactive video poker on stdin.
//!
//! The loop reads one command per line (see [`crate::validation::PLAY_HELP`]),
//! forwards it to the [`Session`] and prints the result. Rejected operations
//! are reported on the error stream and the session carries on; only I/O
//! failures end it early.
//!
//! A session ends on `q`/`quit`, at end of input, or once the balance cannot
//! cover the smallest bet. With a round log configured, every round is
//! written once it is final, i.e. after its double-up or once the player
//! moves on without one.

use crate::config::Config;
use crate::error::CliError;
use crate::formatters::{
    format_cards, format_hand, format_meter, format_paytable, format_positions,
};
use crate::io_utils::{create_text_writer, read_stdin_line};
use crate::ui;
use crate::validation::{PLAY_HELP, ParseResult, PlayCommand, parse_play_command};
use meltdown_engine::double_up::Winner;
use meltdown_engine::game::RoundState;
use meltdown_engine::logger::RoundLogger;
use meltdown_engine::session::Session;
use std::io::{BufRead, Write};

/// Settings for one interactive session.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayOptions {
    pub balance: u64,
    pub bet: u64,
    pub seed: Option<u64>,
    pub auto_lock: bool,
    pub log: Option<String>,
}

impl PlayOptions {
    /// Command-line values win over the configuration.
    pub fn resolve(
        balance: Option<u64>,
        bet: Option<u64>,
        seed: Option<u64>,
        auto_lock: bool,
        log: Option<String>,
        config: &Config,
    ) -> Self {
        Self {
            balance: balance.unwrap_or(config.starting_balance),
            bet: bet.unwrap_or(config.bet),
            seed: seed.or(config.seed),
            auto_lock: auto_lock || config.auto_lock,
            log,
        }
    }
}

struct RoundLog {
    logger: Option<RoundLogger>,
    /// A resolved round whose record has not been written yet.
    pending: bool,
}

impl RoundLog {
    fn flush(&mut self, session: &Session) -> Result<(), CliError> {
        if !self.pending {
            return Ok(());
        }
        self.pending = false;
        if let (Some(logger), Some(record)) = (self.logger.as_mut(), session.last_record()) {
            logger.write(record)?;
        }
        Ok(())
    }
}

/// Handle the play command: interactive session on `stdin`.
///
/// # Returns
///
/// * `Ok(())` when the session ends normally
/// * `Err(CliError)` for a bad starting balance or bet, an unwritable log, or I/O errors
pub fn handle_play_command(
    opts: PlayOptions,
    out: &mut dyn Write,
    err: &mut dyn Write,
    stdin: &mut dyn BufRead,
) -> Result<(), CliError> {
    if opts.balance == 0 {
        ui::write_error(err, "balance must be >= 1")?;
        return Err(CliError::InvalidInput("balance must be >= 1".to_string()));
    }

    let mut session = match opts.seed {
        Some(seed) => Session::with_seed(opts.balance, seed),
        None => Session::new(opts.balance),
    };
    if let Err(e) = session.set_bet(opts.bet) {
        ui::write_error(err, &e.to_string())?;
        return Err(e.into());
    }
    session.set_auto_lock(opts.auto_lock);

    let logger = match opts.log.as_deref() {
        Some(path) => match create_text_writer(path) {
            Ok(w) => Some(RoundLogger::from_writer(w)),
            Err(e) => {
                ui::write_error(err, &format!("Failed to open log {}: {}", path, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to open log {}: {}",
                    path, e
                )));
            }
        },
        None => None,
    };
    let mut log = RoundLog {
        logger,
        pending: false,
    };

    writeln!(
        out,
        "Meltdown Poker: balance={} bet={} seed={} auto-lock={}",
        session.balance(),
        session.current_bet(),
        opts.seed
            .map_or_else(|| "random".to_string(), |s| s.to_string()),
        if session.auto_lock_enabled() { "on" } else { "off" }
    )?;
    writeln!(out, "{}", PLAY_HELP)?;

    loop {
        if session.state() != RoundState::AwaitingDraw && !session.can_play() {
            writeln!(
                out,
                "Balance {} cannot cover the smallest bet. Game over.",
                session.balance()
            )?;
            break;
        }

        ui::prompt(out, &format!("[{}] > ", session.state()))?;
        let Some(input) = read_stdin_line(stdin) else {
            writeln!(out)?;
            break;
        };

        match parse_play_command(&input) {
            ParseResult::Command(cmd) => {
                match execute(cmd, &mut session, &mut log, out) {
                    Ok(()) => {}
                    Err(CliError::Engine(e)) => ui::write_error(err, &e.to_string())?,
                    Err(e) => return Err(e),
                }
            }
            ParseResult::Quit => break,
            ParseResult::Invalid(msg) => {
                if !input.is_empty() {
                    ui::write_error(err, &msg)?;
                }
            }
        }
    }

    log.flush(&session)?;
    writeln!(
        out,
        "Session over: {} round(s), balance {}",
        session.rounds_played(),
        session.balance()
    )?;
    Ok(())
}

fn execute(
    cmd: PlayCommand,
    session: &mut Session,
    log: &mut RoundLog,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    match cmd {
        PlayCommand::Deal => {
            if session.state() == RoundState::Resolved {
                log.flush(session)?;
                session.next_round()?;
            }
            let bonus = session.meter().is_full();
            session.place_bet_and_deal()?;
            if bonus {
                writeln!(out, "MELTDOWN! Bonus hand of high cards.")?;
            }
            writeln!(
                out,
                "Bet {}  Balance {}",
                session.current_bet(),
                session.balance()
            )?;
            if session.auto_lock_enabled()
                && let Some(hand) = session.hand()
            {
                writeln!(
                    out,
                    "Auto-lock: {}",
                    format_positions(&hand.held_indices())
                )?;
            }
            write_hand(session, out)?;
        }
        PlayCommand::Hold(positions) => {
            for i in positions {
                session.toggle_hold(i)?;
            }
            write_hand(session, out)?;
        }
        PlayCommand::Auto => {
            let picks = session.apply_auto_lock()?;
            if picks.is_empty() {
                writeln!(out, "Auto-lock: nothing worth holding")?;
            } else {
                writeln!(out, "Auto-lock: {}", format_positions(&picks))?;
            }
            write_hand(session, out)?;
        }
        PlayCommand::Draw => {
            let outcome = session.draw()?;
            writeln!(out, "Hand: {}", format_cards(&outcome.hand))?;
            if outcome.payout > 0 {
                writeln!(out, "{}! Pays {}", outcome.category, outcome.payout)?;
            } else {
                writeln!(out, "{}", outcome.category)?;
            }
            writeln!(out, "Balance: {}", outcome.balance)?;
            writeln!(out, "Meter: {}", format_meter(session.meter_level()))?;
            log.pending = true;
            if session.can_double_up() {
                writeln!(
                    out,
                    "Double up {}? Type 'double' or 'collect'.",
                    session.last_win()
                )?;
            } else {
                log.flush(session)?;
            }
        }
        PlayCommand::Double => {
            let deal = session.start_double_up()?;
            writeln!(
                out,
                "Dealer: {}  Player: {}",
                format_cards(&deal.dealer),
                format_cards(&deal.player)
            )?;
            let outcome = session.resolve_double_up()?;
            match outcome.winner {
                Winner::Player => writeln!(out, "You win {}!", outcome.wager * 2)?,
                Winner::Dealer => writeln!(out, "Dealer wins. You lose {}.", outcome.wager)?,
            }
            writeln!(out, "Balance: {}", outcome.balance)?;
            log.flush(session)?;
        }
        PlayCommand::Collect => {
            log.flush(session)?;
            session.next_round()?;
            writeln!(out, "Balance: {}", session.balance())?;
        }
        PlayCommand::Bet(amount) => {
            let bet = session.set_bet(amount)?;
            writeln!(out, "Bet: {}", bet)?;
        }
        PlayCommand::BetUp => {
            let bet = session.increase_bet()?;
            writeln!(out, "Bet: {}", bet)?;
        }
        PlayCommand::BetDown => {
            let bet = session.decrease_bet()?;
            writeln!(out, "Bet: {}", bet)?;
        }
        PlayCommand::Table => {
            write!(
                out,
                "{}",
                format_paytable(session.current_bet(), &session.payout_table())
            )?;
        }
        PlayCommand::Force(cards) => {
            session.inject_forced_hand(&cards)?;
            writeln!(out, "Next deal: {}", format_cards(&cards))?;
        }
        PlayCommand::Status => {
            writeln!(out, "State: {}", session.state())?;
            writeln!(
                out,
                "Balance: {}  Bet: {}",
                session.balance(),
                session.current_bet()
            )?;
            writeln!(out, "Meter: {}", format_meter(session.meter_level()))?;
            writeln!(
                out,
                "Deck: {} card(s)  Auto-lock: {}  Rounds: {}",
                session.deck_remaining(),
                if session.auto_lock_enabled() { "on" } else { "off" },
                session.rounds_played()
            )?;
        }
        PlayCommand::Help => writeln!(out, "{}", PLAY_HELP)?,
    }
    Ok(())
}

fn write_hand(session: &Session, out: &mut dyn Write) -> Result<(), CliError> {
    if let Some(hand) = session.hand() {
        writeln!(out, "{}", format_hand(hand))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use meltdown_engine::logger::RoundRecord;
    use std::io::Cursor;

    fn opts(balance: u64, bet: u64) -> PlayOptions {
        PlayOptions {
            balance,
            bet,
            seed: Some(42),
            auto_lock: false,
            log: None,
        }
    }

    fn play(opts: PlayOptions, input: &str) -> (Result<(), CliError>, String, String) {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let mut stdin = Cursor::new(input.as_bytes());
        let result = handle_play_command(opts, &mut out, &mut err, &mut stdin);
        (
            result,
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn test_resolve_prefers_arguments_over_config() {
        let config = Config {
            starting_balance: 500,
            bet: 50,
            seed: Some(1),
            auto_lock: true,
        };
        let o = PlayOptions::resolve(None, Some(5), None, false, None, &config);
        assert_eq!(o.balance, 500);
        assert_eq!(o.bet, 5);
        assert_eq!(o.seed, Some(1));
        assert!(o.auto_lock);
    }

    #[test]
    fn test_quit_immediately() {
        let (result, out, err) = play(opts(1000, 10), "q\n");
        assert!(result.is_ok());
        assert!(out.contains("Meltdown Poker: balance=1000 bet=10 seed=42"));
        assert!(out.contains("Session over: 0 round(s), balance 1000"));
        assert!(err.is_empty());
    }

    #[test]
    fn test_full_house_round() {
        let input = "force Jh Js 3d 3c Jd\ndeal\nauto\ndraw\ncollect\nq\n";
        let (result, out, _err) = play(opts(1000, 10), input);
        assert!(result.is_ok());
        assert!(out.contains("Auto-lock: 1 2 3 4 5"));
        assert!(out.contains("Full House! Pays 150"));
        assert!(out.contains("Balance: 1140"));
        assert!(out.contains("Double up 150?"));
        assert!(out.contains("Session over: 1 round(s), balance 1140"));
    }

    #[test]
    fn test_double_up_settles() {
        let input = "force Jh Js 3d 3c Jd\ndeal\nauto\ndraw\ndouble\nq\n";
        let (result, out, _err) = play(opts(1000, 10), input);
        assert!(result.is_ok());
        assert!(out.contains("Dealer: ["));
        if out.contains("You win 300!") {
            assert!(out.contains("Balance: 1440"));
        } else {
            assert!(out.contains("Dealer wins. You lose 150."));
            assert!(out.contains("Balance: 990"));
        }
    }

    #[test]
    fn test_illegal_command_is_reported_and_session_continues() {
        let (result, out, err) = play(opts(1000, 10), "draw\ndouble\nstatus\nq\n");
        assert!(result.is_ok());
        assert!(err.contains("Error: Cannot draw while awaiting bet"));
        assert!(err.contains("Error: Cannot start double-up"));
        assert!(out.contains("State: awaiting bet"));
    }

    #[test]
    fn test_invalid_input_is_reported() {
        let (result, _out, err) = play(opts(1000, 10), "fold\n\nhold 9\nq\n");
        assert!(result.is_ok());
        assert!(err.contains("Unrecognized command 'fold'"));
        assert!(err.contains("Invalid position '9'"));
        assert_eq!(err.lines().count(), 2);
    }

    #[test]
    fn test_bet_changes() {
        let (result, out, err) = play(opts(1000, 10), "bet 50\n+\n-\n-\nbet 20\nq\n");
        assert!(result.is_ok());
        let bets: Vec<&str> = out
            .lines()
            .filter_map(|l| l.split("Bet: ").nth(1))
            .collect();
        assert_eq!(bets, vec!["50", "100", "50", "10"]);
        assert!(err.contains("not an allowed denomination"));
    }

    #[test]
    fn test_game_over_when_broke() {
        let input = "force 2h 5d 9c Js Kd\ndeal\nhold 1 2 3 4 5\ndraw\n";
        let (result, out, _err) = play(opts(1, 1), input);
        assert!(result.is_ok());
        assert!(out.contains("No Win"));
        assert!(out.contains("Balance 0 cannot cover the smallest bet. Game over."));
    }

    #[test]
    fn test_eof_ends_session() {
        let (result, out, _err) = play(opts(1000, 10), "deal\n");
        assert!(result.is_ok());
        assert!(out.contains("Session over: 0 round(s), balance 990"));
    }

    #[test]
    fn test_rejects_bad_starting_values() {
        let (result, _, err) = play(opts(0, 10), "q\n");
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
        assert!(err.contains("balance must be >= 1"));

        let (result, _, _) = play(opts(1000, 20), "q\n");
        assert!(matches!(result, Err(CliError::Engine(_))));
    }

    #[test]
    fn test_round_log_written_after_double_up_decision() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("rounds.jsonl");
        let mut o = opts(1000, 10);
        o.log = Some(path.to_str().unwrap().to_string());

        let input = "force Jh Js 3d 3c Jd\ndeal\nauto\ndraw\ndouble\n\
                     force 2h 5d 9c Js Kd\ndeal\nhold 1 2 3 4 5\ndraw\nq\n";
        let (result, _out, _err) = play(o, input);
        assert!(result.is_ok());

        let text = std::fs::read_to_string(&path).unwrap();
        let records: Vec<RoundRecord> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].payout, 150);
        assert!(records[0].double_up.is_some());
        assert!(records[0].ts.is_some());
        assert_eq!(records[1].payout, 0);
        assert!(records[1].double_up.is_none());
        assert_eq!(records[1].held, vec![0, 1, 2, 3, 4]);
    }
}
