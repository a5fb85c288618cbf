//! Deal command handler.
//!
//! Deals one hand from a freshly shuffled deck, scores it as dealt and shows
//! which cards the auto-lock advisor would keep. Seeding makes the output
//! reproducible.

use crate::error::CliError;
use crate::formatters::{format_cards, format_positions};
use meltdown_engine::advisor::auto_lock;
use meltdown_engine::paytable::score_hand;
use meltdown_engine::player::STARTING_BALANCE;
use meltdown_engine::session::Session;
use std::io::Write;

/// Handle the deal command.
///
/// # Examples
///
/// ```ignore
/// // Internal command handler - not part of public API
/// let mut out = Vec::new();
/// handle_deal_command(Some(42), &mut out).unwrap();
/// ```
pub fn handle_deal_command(seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    let seed = seed.unwrap_or_else(rand::random);
    let mut session = Session::with_seed(STARTING_BALANCE, seed);
    let bet = session.current_bet();
    let cards = session.place_bet_and_deal()?;
    let result = score_hand(&cards, bet);

    writeln!(out, "Seed: {}", seed)?;
    writeln!(out, "Hand: {}", format_cards(&cards))?;
    writeln!(
        out,
        "Category: {} (pays {} at bet {})",
        result.category, result.payout, bet
    )?;
    writeln!(out, "Auto-lock holds: {}", format_positions(&auto_lock(&cards)))?;
    Ok(())
}
