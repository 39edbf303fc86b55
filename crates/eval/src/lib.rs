// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draw Poker hand evaluator.
//!
//! Five cards hand evaluator for draw poker. A [Hand] is classified into one of
//! ten categories and scored so that any two hands can be compared:
//!
//! ```
//! # use drawpoker_eval::*;
//! let cards = |s: &str| {
//!     s.split_whitespace()
//!         .map(|c| c.parse::<Card>().unwrap())
//!         .collect::<Vec<_>>()
//! };
//!
//! let h1 = Hand::new(&cards("10C 10D 8H 8C 2C")).unwrap();
//! let h2 = Hand::new(&cards("AH 5D 4C 3S 2H")).unwrap();
//! let v1 = HandValue::eval(&h1).unwrap();
//! let v2 = HandValue::eval(&h2).unwrap();
//! assert_eq!(v1.rank(), HandRank::TwoPair);
//! assert_eq!(v2.rank(), HandRank::Straight);
//! assert!(v2 > v1);
//! ```
//!
//! The [DiscardAdvisor] tells which cards to swap before the draw, and the
//! [DiscardPolicy] swaps them with cards from a [Dealer]:
//!
//! ```
//! # use drawpoker_eval::*;
//! let mut rng = rand::rng();
//! let mut deck = Deck::new_and_shuffled(&mut rng);
//! let mut hand = Hand::deal(&mut deck).unwrap();
//!
//! let outcome = DiscardPolicy::default()
//!     .discard(&mut hand, &mut deck, &mut rng)
//!     .unwrap();
//! assert!(outcome.count() <= MAX_CARDS_TO_DISCARD);
//! assert!(hand.is_complete());
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod discard;
pub mod eval;
pub mod hand;
pub mod policy;

pub use discard::{DiscardAdvisor, DiscardSignal};
pub use eval::{HandRank, HandValue};
pub use hand::Hand;
pub use policy::{DiscardOutcome, DiscardPolicy, MAX_CARDS_TO_DISCARD};

// Reexport cards types.
pub use drawpoker_cards::{Card, Dealer, Deck, Rank, Suit};
