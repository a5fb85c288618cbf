//! Input parsing and validation for interactive commands.
//!
//! Parses the lines typed at the `play` prompt into [`PlayCommand`]s and
//! checks the numeric arguments of the batch commands. Parsing never touches
//! the session; whether a command is legal in the current round state is the
//! engine's call.

use meltdown_engine::cards::{Card, parse_cards};

/// Commands accepted at the `play` prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayCommand {
    Deal,
    /// Toggle holds on these 0-based positions.
    Hold(Vec<usize>),
    Auto,
    Draw,
    Double,
    Collect,
    Bet(u64),
    BetUp,
    BetDown,
    Table,
    Force(Vec<Card>),
    Status,
    Help,
}

/// Outcome of parsing one prompt line.
#[derive(Debug, PartialEq)]
pub enum ParseResult {
    Command(PlayCommand),
    /// User entered quit command (q or quit)
    Quit,
    /// Invalid input with error message
    Invalid(String),
}

pub const PLAY_HELP: &str = "Commands: deal, hold <1-5>..., auto, draw, double, collect, \
bet <n>, +, -, table, force <5 cards>, status, help, q";

/// Parse one line typed at the `play` prompt.
///
/// Keywords are case-insensitive. Positions are typed 1-5 and returned 0-based.
/// A line made only of positions is shorthand for `hold`.
///
/// ```rust
/// # use meltdown_cli::validation::{parse_play_command, ParseResult, PlayCommand};
/// assert_eq!(
///     parse_play_command("hold 1 2"),
///     ParseResult::Command(PlayCommand::Hold(vec![0, 1]))
/// );
/// assert_eq!(parse_play_command("3"), ParseResult::Command(PlayCommand::Hold(vec![2])));
/// assert_eq!(parse_play_command("bet 50"), ParseResult::Command(PlayCommand::Bet(50)));
/// assert_eq!(parse_play_command("QUIT"), ParseResult::Quit);
///
/// match parse_play_command("fold") {
///     ParseResult::Invalid(msg) => assert!(msg.contains("Unrecognized")),
///     _ => panic!("Expected Invalid"),
/// }
/// ```
pub fn parse_play_command(input: &str) -> ParseResult {
    let trimmed = input.trim();
    let parts: Vec<&str> = trimmed.split_whitespace().collect();
    let Some(first) = parts.first() else {
        return ParseResult::Invalid("Empty input".to_string());
    };
    let keyword = first.to_lowercase();

    if keyword == "q" || keyword == "quit" {
        return ParseResult::Quit;
    }

    let cmd = match keyword.as_str() {
        "deal" | "d" => PlayCommand::Deal,
        "auto" | "a" => PlayCommand::Auto,
        "draw" | "r" => PlayCommand::Draw,
        "double" => PlayCommand::Double,
        "collect" | "c" => PlayCommand::Collect,
        "+" => PlayCommand::BetUp,
        "-" => PlayCommand::BetDown,
        "table" | "t" => PlayCommand::Table,
        "status" | "s" => PlayCommand::Status,
        "help" | "?" => PlayCommand::Help,
        "hold" | "h" => {
            if parts.len() < 2 {
                return ParseResult::Invalid(
                    "Hold requires positions (e.g., 'hold 1 3')".to_string(),
                );
            }
            match parse_positions(&parts[1..]) {
                Ok(p) => PlayCommand::Hold(p),
                Err(msg) => return ParseResult::Invalid(msg),
            }
        }
        "bet" => {
            if parts.len() < 2 {
                return ParseResult::Invalid("Bet requires an amount (e.g., 'bet 50')".to_string());
            }
            match parts[1].parse::<u64>() {
                Ok(amount) if amount > 0 => PlayCommand::Bet(amount),
                Ok(_) => return ParseResult::Invalid("Bet amount must be positive".to_string()),
                Err(_) => return ParseResult::Invalid("Invalid bet amount".to_string()),
            }
        }
        "force" => {
            let rest = trimmed[first.len()..].trim();
            match parse_cards(rest) {
                Ok(cards) if cards.len() == 5 => PlayCommand::Force(cards),
                Ok(cards) => {
                    return ParseResult::Invalid(format!(
                        "Force requires exactly 5 cards, got {}",
                        cards.len()
                    ));
                }
                Err(e) => return ParseResult::Invalid(e.to_string()),
            }
        }
        _ if keyword.chars().all(|c| c.is_ascii_digit()) => match parse_positions(&parts) {
            Ok(p) => PlayCommand::Hold(p),
            Err(msg) => return ParseResult::Invalid(msg),
        },
        _ => {
            return ParseResult::Invalid(format!(
                "Unrecognized command '{}'. {}",
                first, PLAY_HELP
            ));
        }
    };
    ParseResult::Command(cmd)
}

fn parse_positions(tokens: &[&str]) -> Result<Vec<usize>, String> {
    tokens
        .iter()
        .map(|t| match t.parse::<usize>() {
            Ok(n) if (1..=5).contains(&n) => Ok(n - 1),
            _ => Err(format!("Invalid position '{}' (expected 1-5)", t)),
        })
        .collect()
}

/// Validate the round count for `sim`.
///
/// ```rust
/// # use meltdown_cli::validation::validate_rounds;
/// assert!(validate_rounds(1).is_ok());
/// assert!(validate_rounds(0).is_err());
/// ```
pub fn validate_rounds(rounds: u64) -> Result<(), String> {
    if rounds == 0 {
        return Err("rounds must be >= 1".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(s: &str) -> PlayCommand {
        match parse_play_command(s) {
            ParseResult::Command(c) => c,
            other => panic!("expected command for {:?}, got {:?}", s, other),
        }
    }

    #[test]
    fn test_parse_simple_keywords() {
        assert_eq!(cmd("deal"), PlayCommand::Deal);
        assert_eq!(cmd("AUTO"), PlayCommand::Auto);
        assert_eq!(cmd("draw"), PlayCommand::Draw);
        assert_eq!(cmd("double"), PlayCommand::Double);
        assert_eq!(cmd("collect"), PlayCommand::Collect);
        assert_eq!(cmd("+"), PlayCommand::BetUp);
        assert_eq!(cmd("-"), PlayCommand::BetDown);
        assert_eq!(cmd("table"), PlayCommand::Table);
        assert_eq!(cmd(" status "), PlayCommand::Status);
    }

    #[test]
    fn test_parse_hold_positions() {
        assert_eq!(cmd("hold 1 5"), PlayCommand::Hold(vec![0, 4]));
        assert_eq!(cmd("2 3"), PlayCommand::Hold(vec![1, 2]));
    }

    #[test]
    fn test_parse_hold_rejects_out_of_range() {
        for input in ["hold 0", "hold 6", "hold x", "6", "hold"] {
            assert!(
                matches!(parse_play_command(input), ParseResult::Invalid(_)),
                "{input}"
            );
        }
    }

    #[test]
    fn test_parse_bet() {
        assert_eq!(cmd("bet 100"), PlayCommand::Bet(100));
        assert!(matches!(parse_play_command("bet"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("bet 0"), ParseResult::Invalid(_)));
        assert!(matches!(parse_play_command("bet -5"), ParseResult::Invalid(_)));
    }

    #[test]
    fn test_parse_force_cards() {
        let PlayCommand::Force(cards) = cmd("force Ah Kh Qh Jh 10h") else {
            panic!("expected force");
        };
        assert_eq!(cards.len(), 5);
        assert!(matches!(
            parse_play_command("force Ah Kh"),
            ParseResult::Invalid(msg) if msg.contains("exactly 5")
        ));
        assert!(matches!(
            parse_play_command("force Ah Kh Qh Jh 1x"),
            ParseResult::Invalid(_)
        ));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(parse_play_command("q"), ParseResult::Quit);
        assert_eq!(parse_play_command("Quit"), ParseResult::Quit);
    }

    #[test]
    fn test_parse_empty_is_invalid() {
        assert_eq!(
            parse_play_command("   "),
            ParseResult::Invalid("Empty input".to_string())
        );
    }
}
