//! The round state machine.
//!
//! A [`Session`] owns every piece of mutable game state: deck, hand, bankroll,
//! escalation meter and any pending double-up. Each operation takes
//! `&mut self`, checks the current [`RoundState`], and either applies all of
//! its effects or returns a [`GameError`] having changed nothing.
//!
//! ```
//! use meltdown_engine::game::RoundState;
//! use meltdown_engine::session::Session;
//!
//! let mut session = Session::with_seed(1000, 7);
//! session.place_bet_and_deal().unwrap();
//! session.toggle_hold(0).unwrap();
//! let outcome = session.draw().unwrap();
//! assert_eq!(session.state(), RoundState::Resolved);
//! assert_eq!(outcome.balance, 1000 - 10 + outcome.payout);
//! session.next_round().unwrap();
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::advisor;
use crate::cards::{format_cards, Card};
use crate::deck::Deck;
use crate::double_up::{self, DoubleUpDeal, DoubleUpOutcome, Winner};
use crate::errors::GameError;
use crate::game::{Hand, RoundState};
use crate::hand::Category;
use crate::logger::{format_round_id, today, DoubleUpRecord, RoundRecord};
use crate::meter::{self, EscalationMeter};
use crate::paytable::{self, PayoutLine};
use crate::player::Player;
use crate::rules;

/// Mixed into the seed so the meter stream differs from the deck stream.
const METER_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Result of [`Session::draw`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DrawOutcome {
    pub hand: [Card; 5],
    pub category: Category,
    pub payout: u64,
    /// Balance after the payout was credited.
    pub balance: u64,
}

#[derive(Debug)]
pub struct Session {
    deck: Deck,
    rng: ChaCha20Rng,
    seed: Option<u64>,
    player: Player,
    state: RoundState,
    hand: Option<Hand>,
    dealt: Option<[Card; 5]>,
    round_bet: u64,
    bonus_round: bool,
    meter: EscalationMeter,
    forced: Option<[Card; 5]>,
    auto_lock: bool,
    last_win: u64,
    doubled: bool,
    pending_double: Option<DoubleUpDeal>,
    last_record: Option<RoundRecord>,
    date: String,
    rounds: u32,
}

impl Session {
    /// New session with an unpredictable shuffle.
    pub fn new(starting_balance: u64) -> Self {
        Self::build(starting_balance, rand::random(), None)
    }

    /// New session whose shuffles and meter fills are fully determined by `seed`.
    pub fn with_seed(starting_balance: u64, seed: u64) -> Self {
        Self::build(starting_balance, seed, Some(seed))
    }

    fn build(starting_balance: u64, seed: u64, recorded: Option<u64>) -> Self {
        let mut deck = Deck::new_with_seed(seed);
        deck.shuffle();
        debug!(seed, balance = starting_balance, "session started");
        Self {
            deck,
            rng: ChaCha20Rng::seed_from_u64(seed ^ METER_STREAM),
            seed: recorded,
            player: Player::new(starting_balance),
            state: RoundState::AwaitingBet,
            hand: None,
            dealt: None,
            round_bet: 0,
            bonus_round: false,
            meter: EscalationMeter::new(),
            forced: None,
            auto_lock: false,
            last_win: 0,
            doubled: false,
            pending_double: None,
            last_record: None,
            date: today(),
            rounds: 0,
        }
    }

    pub fn state(&self) -> RoundState {
        self.state
    }

    pub fn balance(&self) -> u64 {
        self.player.balance()
    }

    pub fn current_bet(&self) -> u64 {
        self.player.bet()
    }

    pub fn allowed_bets(&self) -> Vec<u64> {
        rules::allowed_bets()
    }

    /// Payout table priced at the current bet.
    pub fn payout_table(&self) -> Vec<PayoutLine> {
        paytable::payout_table(self.player.bet())
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn hand(&self) -> Option<&Hand> {
        self.hand.as_ref()
    }

    pub fn meter(&self) -> &EscalationMeter {
        &self.meter
    }

    pub fn meter_level(&self) -> u8 {
        self.meter.level()
    }

    /// Sets the meter directly. Values above the cap are clamped.
    pub fn set_meter_level(&mut self, level: u8) {
        self.meter = EscalationMeter::with_level(level);
    }

    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    pub fn auto_lock_enabled(&self) -> bool {
        self.auto_lock
    }

    /// When enabled, the advisor's holds are applied right after every deal.
    pub fn set_auto_lock(&mut self, enabled: bool) {
        self.auto_lock = enabled;
    }

    pub fn forced_hand(&self) -> Option<&[Card; 5]> {
        self.forced.as_ref()
    }

    /// Payout of the most recent draw, zero once a new round starts.
    pub fn last_win(&self) -> u64 {
        self.last_win
    }

    pub fn pending_double_up(&self) -> Option<&DoubleUpDeal> {
        self.pending_double.as_ref()
    }

    /// Whether a double-up may be started right now.
    pub fn can_double_up(&self) -> bool {
        self.state == RoundState::Resolved
            && self.last_win > 0
            && !self.doubled
            && self.pending_double.is_none()
    }

    /// Whether the balance still covers the smallest bet.
    pub fn can_play(&self) -> bool {
        self.player.can_play()
    }

    /// Record of the most recently resolved round.
    pub fn last_record(&self) -> Option<&RoundRecord> {
        self.last_record.as_ref()
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds
    }

    fn illegal(&self, operation: &'static str) -> GameError {
        warn!(operation, state = %self.state, "operation rejected");
        GameError::IllegalState {
            operation,
            state: self.state,
        }
    }

    /// Selects the wager for the next deal.
    ///
    /// # Errors
    ///
    /// - [`GameError::IllegalState`] while cards are on the table
    /// - [`GameError::InvalidBetAmount`] / [`GameError::InsufficientBalance`] from bet validation
    pub fn set_bet(&mut self, amount: u64) -> Result<u64, GameError> {
        if self.state == RoundState::AwaitingDraw {
            return Err(self.illegal("change bet"));
        }
        self.player.set_bet(amount)
    }

    /// Steps the bet up one denomination. Stays put at the top or when the
    /// balance would not cover the next step.
    pub fn increase_bet(&mut self) -> Result<u64, GameError> {
        if self.state == RoundState::AwaitingDraw {
            return Err(self.illegal("change bet"));
        }
        self.player.increase_bet();
        Ok(self.player.bet())
    }

    pub fn decrease_bet(&mut self) -> Result<u64, GameError> {
        if self.state == RoundState::AwaitingDraw {
            return Err(self.illegal("change bet"));
        }
        self.player.decrease_bet();
        Ok(self.player.bet())
    }

    /// Selects `amount` and deals in one step.
    pub fn place_bet(&mut self, amount: u64) -> Result<[Card; 5], GameError> {
        if self.state != RoundState::AwaitingBet {
            return Err(self.illegal("place bet"));
        }
        self.player.set_bet(amount)?;
        self.place_bet_and_deal()
    }

    /// Stakes the current bet and deals five cards.
    ///
    /// A full meter turns the deal into a bonus hand of high cards and empties
    /// the meter. Otherwise a queued forced hand is used, and failing that the
    /// top five cards of the deck.
    pub fn place_bet_and_deal(&mut self) -> Result<[Card; 5], GameError> {
        if self.state != RoundState::AwaitingBet {
            return Err(self.illegal("deal"));
        }
        let bet = rules::validate_bet(self.player.balance(), self.player.bet())?;

        let bonus = self.meter.is_full();
        let cards = if bonus {
            meter::bonus_hand(&mut self.rng)
        } else if let Some(forced) = self.forced {
            forced
        } else {
            self.deck_front5()?
        };

        if bonus {
            self.meter.reset();
            info!(bet, cards = %format_cards(&cards), "meltdown bonus hand");
        } else if self.forced.take().is_some() {
            debug!(bet, cards = %format_cards(&cards), "dealt forced hand");
        } else {
            debug!(bet, cards = %format_cards(&cards), remaining = self.deck.remaining(), "dealt hand");
        }

        self.player.stake(bet)?;
        self.hand = Some(Hand::new(cards));
        self.dealt = Some(cards);
        self.round_bet = bet;
        self.bonus_round = bonus;
        self.last_win = 0;
        self.doubled = false;
        self.state = RoundState::AwaitingDraw;

        if self.auto_lock {
            self.apply_auto_lock()?;
        }
        Ok(cards)
    }

    fn deck_front5(&mut self) -> Result<[Card; 5], GameError> {
        if self.deck.replenish_if_low() {
            debug!("deck reshuffled before deal");
        }
        let remaining = self.deck.remaining();
        if remaining < 5 {
            return Err(GameError::InsufficientCards {
                requested: 5,
                remaining,
            });
        }
        let dealt = self.deck.deal_front(5)?;
        crate::hand::five_cards(&dealt).ok_or(GameError::InsufficientCards {
            requested: 5,
            remaining,
        })
    }

    /// Flips the hold flag on one card. Returns the new flag.
    pub fn toggle_hold(&mut self, index: usize) -> Result<bool, GameError> {
        if self.state != RoundState::AwaitingDraw {
            return Err(self.illegal("toggle hold"));
        }
        let hand = self.hand.as_mut().ok_or(GameError::IllegalState {
            operation: "toggle hold",
            state: self.state,
        })?;
        let held = hand.toggle(index)?;
        debug!(index, held, "hold toggled");
        Ok(held)
    }

    /// Applies the auto-lock advisor to the current hand.
    ///
    /// When the advisor picks at least one card, previous holds are replaced
    /// by its picks. When it picks nothing, holds are left as they were.
    /// Returns the advisor's picks.
    pub fn apply_auto_lock(&mut self) -> Result<Vec<usize>, GameError> {
        if self.state != RoundState::AwaitingDraw {
            return Err(self.illegal("auto-lock"));
        }
        let hand = self.hand.as_mut().ok_or(GameError::IllegalState {
            operation: "auto-lock",
            state: self.state,
        })?;
        let picks = advisor::auto_lock(hand.cards());
        if !picks.is_empty() {
            hand.set_holds(&picks)?;
        }
        debug!(?picks, "auto-lock applied");
        Ok(picks)
    }

    /// Replaces every unheld card, scores the hand and settles the bet.
    pub fn draw(&mut self) -> Result<DrawOutcome, GameError> {
        if self.state != RoundState::AwaitingDraw {
            return Err(self.illegal("draw"));
        }
        let (Some(mut hand), Some(dealt)) = (self.hand, self.dealt) else {
            return Err(self.illegal("draw"));
        };
        let held = hand.held_indices();
        let fresh = self.deck.deal_front(hand.unheld_count())?;
        hand.replace_unheld(fresh);
        let cards = *hand.cards();

        let result = paytable::score_hand(&cards, self.round_bet);
        if result.payout > 0 {
            self.player.credit(result.payout);
            self.meter.reset();
            info!(
                category = %result.category,
                payout = result.payout,
                balance = self.player.balance(),
                "winning hand"
            );
        } else {
            let added = self.meter.fill(&mut self.rng);
            debug!(added, level = self.meter.level(), "meter filled");
        }
        debug!(cards = %format_cards(&cards), ?held, category = %result.category, "drew");

        if self.deck.replenish_if_low() {
            debug!("deck reshuffled after draw");
        }
        hand.clear_holds();
        self.hand = Some(hand);
        self.player.clamp_bet();
        self.last_win = result.payout;
        self.state = RoundState::Resolved;

        self.rounds += 1;
        self.last_record = Some(RoundRecord {
            round_id: format_round_id(&self.date, self.rounds),
            seed: self.seed,
            bet: self.round_bet,
            dealt: dealt.to_vec(),
            held,
            hand: cards.to_vec(),
            category: result.category,
            payout: result.payout,
            bonus: self.bonus_round,
            balance: self.player.balance(),
            double_up: None,
            ts: None,
        });

        Ok(DrawOutcome {
            hand: cards,
            category: result.category,
            payout: result.payout,
            balance: self.player.balance(),
        })
    }

    /// Deals the double-up: two cards each for dealer and player, staking the
    /// whole of the last payout. Only once per winning round.
    pub fn start_double_up(&mut self) -> Result<DoubleUpDeal, GameError> {
        if !self.can_double_up() {
            return Err(self.illegal("start double-up"));
        }
        let dealt = self.deck.deal_front(4)?;
        let four: [Card; 4] = dealt
            .try_into()
            .map_err(|_| GameError::InsufficientCards {
                requested: 4,
                remaining: self.deck.remaining(),
            })?;
        let (dealer, player) = double_up::split_deal(&four);
        let deal = DoubleUpDeal {
            wager: self.last_win,
            dealer,
            player,
        };
        debug!(
            wager = deal.wager,
            dealer = %format_cards(&dealer),
            player = %format_cards(&player),
            "double-up dealt"
        );
        self.doubled = true;
        self.pending_double = Some(deal);
        Ok(deal)
    }

    /// Settles the pending double-up and returns to [`RoundState::AwaitingBet`].
    ///
    /// A player win credits twice the wager; a loss takes the wager back.
    pub fn resolve_double_up(&mut self) -> Result<DoubleUpOutcome, GameError> {
        let Some(deal) = self.pending_double else {
            return Err(self.illegal("resolve double-up"));
        };
        let winner = double_up::resolve(&deal.dealer, &deal.player);
        match winner {
            Winner::Player => self.player.credit(deal.wager.saturating_mul(2)),
            Winner::Dealer => self.player.debit(deal.wager),
        }
        self.pending_double = None;
        self.player.clamp_bet();
        self.state = RoundState::AwaitingBet;
        if self.deck.replenish_if_low() {
            debug!("deck reshuffled after double-up");
        }

        let outcome = DoubleUpOutcome {
            dealer: deal.dealer,
            player: deal.player,
            winner,
            wager: deal.wager,
            balance: self.player.balance(),
        };
        info!(%winner, wager = deal.wager, balance = outcome.balance, "double-up settled");
        if let Some(record) = self.last_record.as_mut() {
            record.double_up = Some(DoubleUpRecord::from(&outcome));
        }
        Ok(outcome)
    }

    /// Queues five specific cards for the next deal. They do not come out of
    /// the deck. A later call replaces the queued hand.
    ///
    /// # Errors
    ///
    /// [`GameError::InvalidHand`] unless `cards` is exactly five distinct cards.
    pub fn inject_forced_hand(&mut self, cards: &[Card]) -> Result<(), GameError> {
        let five = crate::hand::five_cards(cards).ok_or_else(|| {
            GameError::InvalidHand(format!("expected 5 cards, got {}", cards.len()))
        })?;
        for (i, card) in five.iter().enumerate() {
            if five[i + 1..].contains(card) {
                return Err(GameError::InvalidHand(format!("duplicate card {}", card)));
            }
        }
        debug!(cards = %format_cards(&five), "forced hand queued");
        self.forced = Some(five);
        Ok(())
    }

    /// Ends a resolved round and tops the deck back up if it ran low.
    /// Calling it while already awaiting a bet does nothing.
    pub fn next_round(&mut self) -> Result<(), GameError> {
        match self.state {
            RoundState::AwaitingBet => Ok(()),
            RoundState::AwaitingDraw => Err(self.illegal("start next round")),
            RoundState::Resolved if self.pending_double.is_some() => {
                Err(self.illegal("start next round with a double-up pending"))
            }
            RoundState::Resolved => {
                if self.deck.replenish_if_low() {
                    debug!("deck reshuffled between rounds");
                }
                self.state = RoundState::AwaitingBet;
                Ok(())
            }
        }
    }
}
