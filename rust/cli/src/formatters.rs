//! Card, hand, and table formatters for terminal display.
//!
//! Pure functions that turn engine values into the strings the `play`,
//! `deal`, `eval` and `paytable` commands print. Suits render as Unicode
//! symbols where the terminal is known to support them and as the letters
//! `h d c s` otherwise.
//!
//! ## Example
//!
//! ```rust
//! use meltdown_engine::cards::{Card, Rank, Suit};
//! use meltdown_cli::formatters::{format_card, format_cards};
//!
//! let ace_spades = Card::new(Rank::Ace, Suit::Spades);
//! assert!(format_card(&ace_spades) == "A♠" || format_card(&ace_spades) == "As");
//! assert!(format_cards(&[ace_spades]).starts_with("[A"));
//! ```

use meltdown_engine::cards::{Card, Rank, Suit};
use meltdown_engine::game::Hand;
use meltdown_engine::meter::METER_CAP;
use meltdown_engine::paytable::PayoutLine;

/// Check if the terminal supports Unicode card symbols.
///
/// On Windows, checks for Windows Terminal (WT_SESSION), modern terminals (TERM_PROGRAM),
/// or VS Code (VSCODE_INJECTION). On Unix-like systems, assumes Unicode support.
pub fn supports_unicode() -> bool {
    if cfg!(windows) {
        std::env::var("WT_SESSION").is_ok()
            || std::env::var("TERM_PROGRAM").is_ok()
            || std::env::var("VSCODE_INJECTION").is_ok()
    } else {
        true
    }
}

/// Format a Suit as ♥ ♦ ♣ ♠, or h d c s without Unicode support.
pub fn format_suit(suit: &Suit) -> String {
    if supports_unicode() {
        match suit {
            Suit::Hearts => "♥",
            Suit::Diamonds => "♦",
            Suit::Clubs => "♣",
            Suit::Spades => "♠",
        }
        .to_string()
    } else {
        suit.letter().to_string()
    }
}

/// Format a Rank as 2-10, J, Q, K, A.
pub fn format_rank(rank: &Rank) -> String {
    rank.label().to_string()
}

/// Format a Card as a string combining rank and suit, e.g. "A♠" or "As".
pub fn format_card(card: &Card) -> String {
    format!("{}{}", format_rank(&card.rank), format_suit(&card.suit))
}

/// Format a list of cards in bracket notation, e.g. "[A♠ K♥]".
pub fn format_cards(cards: &[Card]) -> String {
    let formatted: Vec<String> = cards.iter().map(format_card).collect();
    format!("[{}]", formatted.join(" "))
}

/// Two-line rendering of a hand: numbered cards with `HELD` under held positions.
///
/// ```text
///  1:Q♥   2:Q♠   3:4♦   4:7♣   5:9♠
///  HELD   HELD
/// ```
pub fn format_hand(hand: &Hand) -> String {
    let mut cards = String::new();
    let mut holds = String::new();
    for (i, card) in hand.cards().iter().enumerate() {
        let cell = format!("{}:{}", i + 1, format_card(card));
        cards.push_str(&format!(" {:<6}", cell));
        let mark = if hand.is_held(i) { "HELD" } else { "" };
        holds.push_str(&format!(" {:<6}", mark));
    }
    format!("{}\n{}", cards.trim_end(), holds.trim_end())
}

/// Hold positions as the 1-based numbers the player types, e.g. "1 2".
pub fn format_positions(indices: &[usize]) -> String {
    if indices.is_empty() {
        return "none".to_string();
    }
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Meter as a ten-segment bar, e.g. "[####......] 40/100".
pub fn format_meter(level: u8) -> String {
    let filled = (level.min(METER_CAP) as usize * 10) / METER_CAP as usize;
    format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        ".".repeat(10 - filled),
        level,
        METER_CAP
    )
}

/// The payout table, one category per line with its payout right-aligned.
pub fn format_paytable(bet: u64, lines: &[PayoutLine]) -> String {
    let mut s = format!("Payouts at bet {}\n", bet);
    for line in lines {
        s.push_str(&format!(
            "  {:<16}{:>10}\n",
            line.category.name(),
            line.payout
        ));
    }
    s
}
