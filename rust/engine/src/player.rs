use crate::errors::GameError;
use crate::rules::{self, DEFAULT_BET};

/// Default bankroll for a new session, in currency units.
pub const STARTING_BALANCE: u64 = 1000;

/// The player's bankroll and selected wager.
///
/// The bet is kept within the balance: any balance change steps it down to the
/// largest denomination the balance still covers.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Player {
    balance: u64,
    bet: u64,
}

impl Player {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            bet: rules::clamp_bet(DEFAULT_BET, balance),
        }
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    pub fn bet(&self) -> u64 {
        self.bet
    }

    /// Selects a new wager without staking it.
    pub fn set_bet(&mut self, amount: u64) -> Result<u64, GameError> {
        self.bet = rules::validate_bet(self.balance, amount)?;
        Ok(self.bet)
    }

    /// Steps the bet up one denomination if the balance covers it.
    pub fn increase_bet(&mut self) -> Option<u64> {
        let next = rules::next_bet_up(self.bet, self.balance)?;
        self.bet = next;
        Some(next)
    }

    pub fn decrease_bet(&mut self) -> Option<u64> {
        let next = rules::next_bet_down(self.bet)?;
        self.bet = next;
        Some(next)
    }

    /// Deducts `amount` as a wager.
    pub fn stake(&mut self, amount: u64) -> Result<(), GameError> {
        let amount = rules::validate_bet(self.balance, amount)?;
        self.balance -= amount;
        Ok(())
    }

    pub fn credit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_add(amount);
    }

    /// Removes up to `amount`; the balance never goes below zero.
    pub fn debit(&mut self, amount: u64) {
        self.balance = self.balance.saturating_sub(amount);
    }

    /// Re-applies the bet ceiling after the balance moved.
    pub fn clamp_bet(&mut self) {
        self.bet = rules::clamp_bet(self.bet, self.balance);
    }

    /// Whether the balance still covers the smallest denomination.
    pub fn can_play(&self) -> bool {
        rules::allowed_bets()
            .first()
            .is_some_and(|&min| self.balance >= min)
    }
}
