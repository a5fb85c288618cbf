//! Statistics over round logs.
//!
//! Reads round records (JSONL, optionally `.zst` compressed, or a directory
//! of them) and prints totals as JSON: rounds, amount wagered and returned,
//! return to player, bonus hands, double-up results and a histogram of hand
//! categories. Lines that do not parse are skipped with a warning.

use crate::error::CliError;
use crate::io_utils::read_text_auto;
use crate::ui;
use meltdown_engine::double_up::Winner;
use meltdown_engine::hand::Category;
use meltdown_engine::logger::RoundRecord;
use std::collections::{BTreeMap, HashSet};
use std::io::Write;
use std::path::Path;

/// Aggregates statistics from round log files.
///
/// # Returns
///
/// `Ok(())` when at least one record was read or the input was empty, otherwise
/// an `Err` that maps to exit code `2`.
pub fn handle_stats_command(
    input: String,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    run_stats(&input, out, err)
}

#[derive(Default)]
struct StatsState {
    rounds: u64,
    wagered: u64,
    returned: u64,
    bonus: u64,
    doubles: u64,
    doubles_won: u64,
    double_net: i64,
    categories: BTreeMap<String, u64>,
    seen: HashSet<(String, String)>,
    duplicates: u64,
    skipped: u64,
    last_balance: Option<u64>,
}

impl StatsState {
    /// Round ids restart at `000001` in every session, so duplicates are
    /// only counted within one source file.
    fn add(&mut self, source: &str, rec: &RoundRecord) {
        if !self.seen.insert((source.to_string(), rec.round_id.clone())) {
            self.duplicates += 1;
        }
        self.rounds += 1;
        self.wagered += rec.bet;
        self.returned += rec.payout;
        if rec.bonus {
            self.bonus += 1;
        }
        if let Some(d) = &rec.double_up {
            self.doubles += 1;
            match d.winner {
                Winner::Player => {
                    self.doubles_won += 1;
                    self.double_net += 2 * d.wager as i64;
                }
                Winner::Dealer => self.double_net -= d.wager as i64,
            }
        }
        *self.categories.entry(category_key(rec.category)).or_default() += 1;
        self.last_balance = Some(rec.final_balance());
    }
}

fn category_key(category: Category) -> String {
    serde_json::to_value(category)
        .ok()
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| category.name().to_string())
}

fn consume_stats_content(
    content: &str,
    source: &str,
    state: &mut StatsState,
    err: &mut dyn Write,
) {
    let mut lines = 0u64;
    let mut parsed = 0u64;
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        lines += 1;
        let rec: RoundRecord =
            parse_json_or_continue!(line, err, format!("{} line {}", source, i + 1));
        parsed += 1;
        state.add(source, &rec);
    }
    state.skipped += lines - parsed;
}

fn run_stats(input: &str, out: &mut dyn Write, err: &mut dyn Write) -> Result<(), CliError> {
    let path = Path::new(input);
    let mut state = StatsState::default();

    if path.is_dir() {
        let mut files = Vec::new();
        let mut stack = vec![path.to_path_buf()];
        while let Some(d) = stack.pop() {
            let rd = match std::fs::read_dir(&d) {
                Ok(v) => v,
                Err(_) => continue,
            };
            for e in rd.filter_map(Result::ok) {
                let p = e.path();
                if p.is_dir() {
                    stack.push(p);
                } else if let Some(fname) = p.file_name().and_then(|f| f.to_str())
                    && (fname.ends_with(".jsonl") || fname.ends_with(".jsonl.zst"))
                {
                    files.push(p);
                }
            }
        }
        files.sort();
        for p in files {
            let name = p.to_string_lossy().to_string();
            match read_text_auto(&name) {
                Ok(content) => consume_stats_content(&content, &name, &mut state, err),
                Err(e) => ui::display_warning(err, &format!("Skipping {}: {}", name, e))?,
            }
        }
    } else {
        match read_text_auto(input) {
            Ok(s) => consume_stats_content(&s, input, &mut state, err),
            Err(e) => {
                ui::write_error(err, &format!("Failed to read {}: {}", input, e))?;
                return Err(CliError::InvalidInput(format!(
                    "Failed to read {}: {}",
                    input, e
                )));
            }
        }
    }

    if state.duplicates > 0 {
        ui::display_warning(
            err,
            &format!("{} duplicate round_id(s)", state.duplicates),
        )?;
    }
    if state.rounds == 0 && state.skipped > 0 {
        ui::write_error(err, "No valid records")?;
        return Err(CliError::InvalidInput("No valid records".to_string()));
    }

    let rtp = if state.wagered == 0 {
        0.0
    } else {
        state.returned as f64 * 100.0 / state.wagered as f64
    };
    let summary = serde_json::json!({
        "rounds": state.rounds,
        "skipped": state.skipped,
        "wagered": state.wagered,
        "returned": state.returned,
        "rtp": (rtp * 100.0).round() / 100.0,
        "bonus_hands": state.bonus,
        "double_up": {
            "played": state.doubles,
            "won": state.doubles_won,
            "lost": state.doubles - state.doubles_won,
            "net": state.double_net,
        },
        "categories": state.categories,
        "final_balance": state.last_balance,
    });
    let json_output = serde_json::to_string_pretty(&summary)
        .map_err(|e| CliError::InvalidInput(format!("Failed to serialize stats: {}", e)))?;
    writeln!(out, "{}", json_output)?;
    Ok(())
}
