use crate::errors::GameError;

/// Largest allowed bet.
pub const MAX_BET: u64 = 1_000_000;

/// Bet selected when a session starts.
pub const DEFAULT_BET: u64 = 10;

/// Allowed bet denominations in ascending order: 1, 5, 10, 50, ... up to [`MAX_BET`].
///
/// ```
/// use meltdown_engine::rules::allowed_bets;
///
/// let bets = allowed_bets();
/// assert_eq!(&bets[..4], &[1, 5, 10, 50]);
/// assert_eq!(bets.last(), Some(&1_000_000));
/// ```
pub fn allowed_bets() -> Vec<u64> {
    let mut bets = Vec::new();
    let mut unit = 1u64;
    while unit <= MAX_BET {
        bets.push(unit);
        if unit * 5 <= MAX_BET {
            bets.push(unit * 5);
        }
        unit *= 10;
    }
    bets
}

pub fn is_allowed_bet(amount: u64) -> bool {
    allowed_bets().contains(&amount)
}

/// Validates a wager against the denomination list and the available balance.
///
/// # Errors
///
/// - [`GameError::InvalidBetAmount`] if `amount` is not an allowed denomination
/// - [`GameError::InsufficientBalance`] if `amount` exceeds `balance`
///
/// ```
/// use meltdown_engine::errors::GameError;
/// use meltdown_engine::rules::validate_bet;
///
/// assert_eq!(validate_bet(1000, 50), Ok(50));
/// assert!(matches!(validate_bet(1000, 20), Err(GameError::InvalidBetAmount { .. })));
/// assert!(matches!(validate_bet(40, 50), Err(GameError::InsufficientBalance { .. })));
/// ```
pub fn validate_bet(balance: u64, amount: u64) -> Result<u64, GameError> {
    if !is_allowed_bet(amount) {
        return Err(GameError::InvalidBetAmount { amount });
    }
    if amount > balance {
        return Err(GameError::InsufficientBalance {
            bet: amount,
            balance,
        });
    }
    Ok(amount)
}

/// Steps `bet` down the denomination list until it fits in `balance`.
/// Never goes below the smallest denomination, even if that still exceeds the balance.
pub fn clamp_bet(bet: u64, balance: u64) -> u64 {
    if bet <= balance {
        return bet;
    }
    let bets = allowed_bets();
    bets.iter()
        .rev()
        .copied()
        .find(|&b| b <= balance && b <= bet)
        .unwrap_or(bets[0])
}

/// Next larger denomination that the balance still covers.
pub fn next_bet_up(bet: u64, balance: u64) -> Option<u64> {
    allowed_bets()
        .into_iter()
        .find(|&b| b > bet)
        .filter(|&b| b <= balance)
}

/// Next smaller denomination.
pub fn next_bet_down(bet: u64) -> Option<u64> {
    allowed_bets().into_iter().rev().find(|&b| b < bet)
}
