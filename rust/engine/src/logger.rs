use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::double_up::{DoubleUpOutcome, Winner};
use crate::hand::Category;

/// Complete record of one resolved round.
/// Serialized as one JSON line per round for history and replay.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// Unique identifier for this round (format: YYYYMMDD-NNNNNN)
    pub round_id: String,
    /// Seed of the session that produced the round, if it was seeded
    pub seed: Option<u64>,
    pub bet: u64,
    /// The five cards as first dealt
    pub dealt: Vec<Card>,
    /// Positions held going into the draw
    pub held: Vec<usize>,
    /// The five cards after the draw
    pub hand: Vec<Card>,
    pub category: Category,
    pub payout: u64,
    /// Whether the deal was a meltdown bonus hand
    #[serde(default)]
    pub bonus: bool,
    /// Balance right after the draw was scored
    pub balance: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub double_up: Option<DoubleUpRecord>,
    /// Timestamp when the round was written (RFC3339 format)
    #[serde(default)]
    pub ts: Option<String>,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct DoubleUpRecord {
    pub dealer: Vec<Card>,
    pub player: Vec<Card>,
    pub winner: Winner,
    pub wager: u64,
    /// Balance after settlement
    pub balance: u64,
}

impl From<&DoubleUpOutcome> for DoubleUpRecord {
    fn from(o: &DoubleUpOutcome) -> Self {
        Self {
            dealer: o.dealer.to_vec(),
            player: o.player.to_vec(),
            winner: o.winner,
            wager: o.wager,
            balance: o.balance,
        }
    }
}

impl RoundRecord {
    /// Balance once any double-up is settled.
    pub fn final_balance(&self) -> u64 {
        self.double_up
            .as_ref()
            .map_or(self.balance, |d| d.balance)
    }
}

pub fn format_round_id(yyyymmdd: &str, seq: u32) -> String {
    format!("{}-{:06}", yyyymmdd, seq)
}

/// Today's date as `YYYYMMDD`, for round ids.
pub fn today() -> String {
    Utc::now().format("%Y%m%d").to_string()
}

/// Appends round records as JSON lines.
pub struct RoundLogger {
    writer: Box<dyn Write>,
}

impl RoundLogger {
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        if let Some(parent) = path.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let f = File::create(path)?;
        Ok(Self::from_writer(BufWriter::new(f)))
    }

    /// Logs into any writer, e.g. a compressing encoder.
    pub fn from_writer<W: Write + 'static>(writer: W) -> Self {
        Self {
            writer: Box::new(writer),
        }
    }

    pub fn write(&mut self, record: &RoundRecord) -> std::io::Result<()> {
        // inject timestamp if missing
        let mut rec = record.clone();
        if rec.ts.is_none() {
            rec.ts = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        }
        let line = serde_json::to_string(&rec).map_err(std::io::Error::other)?;
        self.writer.write_all(line.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}
