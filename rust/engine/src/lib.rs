//! # meltdown-engine: Video Poker Core
//!
//! A deterministic five-card draw (Jacks or Better) engine with an auto-lock
//! advisor, a double-or-nothing side game, and an escalation meter that turns
//! a losing streak into a guaranteed bonus hand.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded 52-card deck with Fisher-Yates shuffling
//! - [`hand`] - Five-card hand evaluation
//! - [`paytable`] - Bet-scaled payout table
//! - [`rules`] - Bet denominations and validation
//! - [`advisor`] - Auto-lock hold suggestions
//! - [`meter`] - Escalation meter and bonus hands
//! - [`double_up`] - Two-card double-or-nothing
//! - [`game`] - Round states and the dealt hand with hold flags
//! - [`player`] - Balance and bet
//! - [`session`] - The round state machine tying it together
//! - [`logger`] - RoundRecord serialization to JSONL
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use meltdown_engine::cards::parse_cards;
//! use meltdown_engine::hand::{five_cards, Category};
//! use meltdown_engine::paytable::score_hand;
//!
//! let cards = five_cards(&parse_cards("10s Js Qs Ks As").unwrap()).unwrap();
//! let result = score_hand(&cards, 50);
//! assert_eq!(result.category, Category::RoyalFlush);
//! assert_eq!(result.payout, 4000);
//! ```
//!
//! ## Playing a Round
//!
//! ```rust
//! use meltdown_engine::session::Session;
//!
//! // Same seed, same cards
//! let mut session = Session::with_seed(1000, 42);
//! session.place_bet_and_deal().unwrap();
//! let picks = session.apply_auto_lock().unwrap();
//! let outcome = session.draw().unwrap();
//! println!("held {:?}, got {} for {}", picks, outcome.category, outcome.payout);
//! if session.can_double_up() {
//!     session.start_double_up().unwrap();
//!     session.resolve_double_up().unwrap();
//! } else {
//!     session.next_round().unwrap();
//! }
//! ```

pub mod advisor;
pub mod cards;
pub mod deck;
pub mod double_up;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod meter;
pub mod paytable;
pub mod player;
pub mod rules;
pub mod session;
