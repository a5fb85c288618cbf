//! Hand evaluation command handler.

use crate::error::CliError;
use crate::formatters::{format_cards, format_positions};
use crate::ui;
use meltdown_engine::advisor::auto_lock;
use meltdown_engine::cards::parse_cards;
use meltdown_engine::hand::five_cards;
use meltdown_engine::paytable::score_hand;
use meltdown_engine::rules;
use std::io::Write;

/// Handle the eval command: score five cards at `bet`.
///
/// Repeated cards are accepted, since bonus hands can contain them.
pub fn handle_eval_command(
    hand: &str,
    bet: u64,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !rules::is_allowed_bet(bet) {
        let msg = format!("bet {} is not an allowed denomination", bet);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    let cards = match parse_cards(hand) {
        Ok(c) => c,
        Err(e) => {
            ui::write_error(err, &e.to_string())?;
            return Err(e.into());
        }
    };
    let Some(cards) = five_cards(&cards) else {
        let msg = format!("expected 5 cards, got {}", cards.len());
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    };

    let result = score_hand(&cards, bet);
    writeln!(out, "Hand: {}", format_cards(&cards))?;
    writeln!(out, "Category: {}", result.category)?;
    writeln!(out, "Payout: {} (bet {})", result.payout, bet)?;
    writeln!(out, "Auto-lock holds: {}", format_positions(&auto_lock(&cards)))?;
    Ok(())
}
