use thiserror::Error;

use crate::game::RoundState;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("Insufficient balance: bet {bet}, balance {balance}")]
    InsufficientBalance { bet: u64, balance: u64 },
    #[error("Invalid bet amount: {amount} is not an allowed denomination")]
    InvalidBetAmount { amount: u64 },
    #[error("Deck exhausted: requested {requested}, remaining {remaining}")]
    InsufficientCards { requested: usize, remaining: usize },
    #[error("Invalid card index: {0} (expected 0-4)")]
    InvalidIndex(usize),
    #[error("Cannot {operation} while {state}")]
    IllegalState {
        operation: &'static str,
        state: RoundState,
    },
    #[error("Invalid hand: {0}")]
    InvalidHand(String),
}
