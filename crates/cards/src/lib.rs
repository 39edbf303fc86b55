// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draw Poker cards types.
//!
//! This crate define types to create cards:
//!
//! ```
//! # use drawpoker_cards::{Card, Rank, Suit};
//! let ah = Card::new(Rank::Ace, Suit::Hearts);
//! assert_eq!(ah.game_value(), 14);
//! assert_eq!(ah.face_value(), 1);
//!
//! let tc = "10C".parse::<Card>().unwrap();
//! assert_eq!(tc, Card::new(Rank::Ten, Suit::Clubs));
//! ```
//!
//! and a [Deck] type for shuffling and dealing cards, with a discard pile for
//! cards returned by players:
//!
//! ```
//! # use drawpoker_cards::Deck;
//! let mut deck = Deck::new_and_shuffled(&mut rand::rng());
//! let card = deck.deal_next().unwrap();
//! deck.return_card(card);
//! assert_eq!(deck.remaining(), 51);
//! assert_eq!(deck.discarded(), &[card]);
//! ```
//!
//! The [Dealer] trait is the capability used by draw code to swap cards, so
//! that a fake dealer can stand in for a [Deck].
//!
//! To iterate through all 5 cards hands:
//!
//! ```no_run
//! # use drawpoker_cards::Deck;
//! let mut counter = 0;
//! Deck::default().for_each(5, |hand| {
//!     counter += 1;
//! });
//! assert_eq!(counter, 2_598_960);
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod deck;
pub use deck::{Card, Dealer, Deck, Rank, Suit};
