//! Payout table command handler.

use crate::error::CliError;
use crate::formatters::format_paytable;
use crate::ui;
use meltdown_engine::paytable::payout_table;
use meltdown_engine::rules;
use std::io::Write;

pub fn handle_paytable_command(
    bet: u64,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if !rules::is_allowed_bet(bet) {
        let msg = format!("bet {} is not an allowed denomination", bet);
        ui::write_error(err, &msg)?;
        return Err(CliError::InvalidInput(msg));
    }
    write!(out, "{}", format_paytable(bet, &payout_table(bet)))?;
    Ok(())
}
