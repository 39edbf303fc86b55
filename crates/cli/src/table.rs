// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A draw poker table.
use anyhow::{Result, bail};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng};

use drawpoker_eval::{Deck, DiscardOutcome, DiscardPolicy, Hand, HandValue};

/// Table configuration.
#[derive(Debug)]
pub struct Config {
    /// Number of players at the table.
    pub players: usize,
    /// Maximum number of cards a player can swap.
    pub max_discards: usize,
    /// Seed for the deck shuffling, random if not set.
    pub seed: Option<u64>,
}

/// A player hand before and after the draw.
#[derive(Debug)]
pub struct Seat {
    /// The hand dealt to the player.
    pub dealt: Hand,
    /// The dealt hand value and advice, and the cards swapped in the draw.
    pub outcome: DiscardOutcome,
    /// The hand after the draw.
    pub hand: Hand,
    /// The value after the draw, none if the deck ran out of cards.
    pub value: Option<HandValue>,
}

/// A table that deals a round of draw poker.
#[derive(Debug)]
pub struct Table {
    players: usize,
    policy: DiscardPolicy,
    deck: Deck,
    rng: StdRng,
}

impl Table {
    /// The maximum number of players, all players must be dealt a hand.
    pub const MAX_PLAYERS: usize = Deck::SIZE / Hand::SIZE;

    /// Creates a new table.
    pub fn new(config: &Config) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Self::with_rng(
            config.players,
            DiscardPolicy::new(config.max_discards),
            rng,
        )
    }

    /// Creates a new table with user initialized randomness.
    fn with_rng(players: usize, policy: DiscardPolicy, rng: StdRng) -> Result<Self> {
        if players == 0 || players > Self::MAX_PLAYERS {
            bail!("Invalid number of players {players}, max {}", Self::MAX_PLAYERS);
        }

        Ok(Self {
            players,
            policy,
            deck: Deck::default(),
            rng,
        })
    }

    /// Deals a hand to each player and plays the draw.
    ///
    /// All hands are dealt before the first player draws.
    pub fn play_round(&mut self) -> Result<Vec<Seat>> {
        self.deck.reset();
        self.deck.shuffle(&mut self.rng);

        let hands = (0..self.players)
            .map(|_| Hand::deal(&mut self.deck))
            .collect::<Result<Vec<_>>>()?;

        let mut seats = Vec::with_capacity(hands.len());
        for (idx, mut hand) in hands.into_iter().enumerate() {
            let dealt = hand.clone();

            let outcome = self.policy.discard(&mut hand, &mut self.deck, &mut self.rng)?;
            if outcome.is_short() {
                warn!("Player {} hand is short after the draw", idx + 1);
            }

            let value = HandValue::eval(&hand).ok();
            seats.push(Seat {
                dealt,
                outcome,
                hand,
                value,
            });
        }

        info!("Round complete, {} cards left in the deck", self.deck.remaining());
        Ok(seats)
    }
}

/// The seats with the best hand value, more than one for a split.
pub fn winners(seats: &[Seat]) -> Vec<usize> {
    let best = seats.iter().filter_map(|s| s.value).max();
    match best {
        Some(best) => seats
            .iter()
            .enumerate()
            .filter(|(_, s)| s.value == Some(best))
            .map(|(idx, _)| idx)
            .collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drawpoker_eval::{DiscardSignal, MAX_CARDS_TO_DISCARD};

    fn new_table(players: usize) -> Table {
        Table::with_rng(players, DiscardPolicy::default(), StdRng::seed_from_u64(13)).unwrap()
    }

    #[test]
    fn invalid_players() {
        let policy = DiscardPolicy::default();
        assert!(Table::with_rng(0, policy, StdRng::seed_from_u64(1)).is_err());
        assert!(Table::with_rng(11, policy, StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn play_rounds() {
        let mut table = new_table(4);

        for _ in 0..10 {
            let seats = table.play_round().unwrap();
            assert_eq!(seats.len(), 4);

            for seat in &seats {
                assert!(seat.outcome.count() <= MAX_CARDS_TO_DISCARD);
                assert!(!seat.outcome.is_short());
                assert!(seat.hand.is_complete());
                assert!(seat.value.is_some());

                let discards = seat
                    .outcome
                    .signals()
                    .iter()
                    .filter(|s| **s == DiscardSignal::Discard)
                    .count();
                assert_eq!(discards, seat.outcome.count());
            }

            let winners = winners(&seats);
            assert!(!winners.is_empty());
        }
    }

    #[test]
    fn full_table_runs_out_of_cards() {
        let mut table = new_table(Table::MAX_PLAYERS);

        for _ in 0..10 {
            let seats = table.play_round().unwrap();
            let swapped = seats.iter().map(|s| s.outcome.count()).sum::<usize>();
            let replaced = seats.iter().map(|s| s.outcome.replaced()).sum::<usize>();

            // Only 2 cards are left after dealing 10 hands.
            assert_eq!(replaced, swapped.min(Deck::SIZE - Table::MAX_PLAYERS * Hand::SIZE));

            for seat in &seats {
                assert_eq!(seat.value.is_none(), seat.outcome.is_short());
            }
        }
    }

    #[test]
    fn seeded_tables_replay() {
        let mut t1 = new_table(3);
        let mut t2 = new_table(3);

        let s1 = t1.play_round().unwrap();
        let s2 = t2.play_round().unwrap();
        for (a, b) in s1.iter().zip(&s2) {
            assert_eq!(a.dealt, b.dealt);
            assert_eq!(a.outcome, b.outcome);
            assert_eq!(a.hand, b.hand);
        }
    }
}
