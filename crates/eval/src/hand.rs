// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! A five cards draw hand.
use anyhow::{Result, bail};
use std::{cmp::Reverse, fmt};

use drawpoker_cards::{Card, Dealer, Rank, Suit};

/// Per rank count of the cards in a hand, indexed by `game_value - 2`.
pub type RankCounts = [u8; Rank::COUNT];

/// A five cards hand.
///
/// The cards are kept sorted from the highest to the lowest game value, a slot
/// is empty after its card has been returned and until a new card is received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    slots: [Option<Card>; Hand::SIZE],
    counts: RankCounts,
}

impl Hand {
    /// The number of cards in a hand.
    pub const SIZE: usize = 5;

    /// Creates a hand from five distinct cards.
    pub fn new(cards: &[Card]) -> Result<Self> {
        if cards.len() != Self::SIZE {
            bail!("A hand needs {} cards, got {}", Self::SIZE, cards.len());
        }

        for (idx, card) in cards.iter().enumerate() {
            if cards[idx + 1..].contains(card) {
                bail!("Duplicate card {card} in hand");
            }
        }

        let mut hand = Self {
            slots: [None; Self::SIZE],
            counts: RankCounts::default(),
        };

        for (slot, card) in hand.slots.iter_mut().zip(cards) {
            *slot = Some(*card);
        }

        hand.sort();
        Ok(hand)
    }

    /// Deals a hand from a dealer.
    pub fn deal<D: Dealer>(dealer: &mut D) -> Result<Self> {
        let mut cards = Vec::with_capacity(Self::SIZE);
        for _ in 0..Self::SIZE {
            match dealer.deal_next() {
                Some(card) => cards.push(card),
                None => bail!("Deck exhausted after dealing {} cards", cards.len()),
            }
        }

        Self::new(&cards)
    }

    /// Sorts the cards by descending game value, empty slots go last.
    ///
    /// The sort is stable so that cards with the same value keep their order.
    pub fn sort(&mut self) {
        self.slots
            .sort_by_key(|slot| Reverse(slot.map(|c| c.game_value())));
        self.update_counts();
    }

    /// The card at the given position.
    pub fn card(&self, idx: usize) -> Option<Card> {
        self.slots.get(idx).copied().flatten()
    }

    /// Iterates the cards in the hand skipping empty slots.
    pub fn cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// The hand cards if there are no empty slots.
    pub fn full_cards(&self) -> Option<[Card; Hand::SIZE]> {
        let mut cards = [Card::new(Rank::Deuce, Suit::Clubs); Self::SIZE];
        for (card, slot) in cards.iter_mut().zip(&self.slots) {
            *card = (*slot)?;
        }

        Some(cards)
    }

    /// The number of cards in the hand.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    /// Checks if all the slots are empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks if the hand has no empty slots.
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// The rank counts histogram.
    pub fn rank_counts(&self) -> &RankCounts {
        &self.counts
    }

    /// Checks if the hand holds an Ace.
    pub fn has_ace(&self) -> bool {
        self.counts[Rank::Ace as usize] > 0
    }

    /// Takes the card out of a slot, leaving the slot empty.
    pub fn return_card(&mut self, idx: usize) -> Option<Card> {
        let card = self.slots.get_mut(idx)?.take();
        if card.is_some() {
            self.update_counts();
        }
        card
    }

    /// Puts a card in the first empty slot and sorts the hand.
    ///
    /// Returns false if the hand has no empty slot. Positions of the held
    /// cards may change, return all the cards to swap before receiving.
    pub fn receive_card(&mut self, card: Card) -> bool {
        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(slot) => {
                *slot = Some(card);
                self.sort();
                true
            }
            None => false,
        }
    }

    fn update_counts(&mut self) {
        self.counts = RankCounts::default();
        for card in self.slots.iter().flatten() {
            self.counts[card.rank() as usize] += 1;
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, slot) in self.slots.iter().enumerate() {
            if idx > 0 {
                write!(f, " ")?;
            }

            match slot {
                Some(card) => write!(f, "{card}")?,
                None => write!(f, "--")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Parses a hand from a space separated list of cards.
    pub(crate) fn hand(cards: &str) -> Hand {
        let cards = cards
            .split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect::<Vec<_>>();
        Hand::new(&cards).unwrap()
    }

    struct Pile(Vec<Card>);

    impl Dealer for Pile {
        fn deal_next(&mut self) -> Option<Card> {
            self.0.pop()
        }

        fn return_card(&mut self, _card: Card) {}
    }

    #[test]
    fn new_hand_is_sorted() {
        let h = hand("2C 10D AH 7S KC");
        assert_eq!(h.to_string(), "AH KC 10D 7S 2C");
        assert!(h.is_complete());
        assert!(h.has_ace());
        assert_eq!(h.len(), 5);
    }

    #[test]
    fn sort_is_stable() {
        let h = hand("8C 2S 8H 8D 2H");
        assert_eq!(h.to_string(), "8C 8H 8D 2S 2H");
    }

    #[test]
    fn malformed_hands() {
        let cards = ["AH", "KH", "QH", "JH", "10H", "9H"]
            .iter()
            .map(|c| c.parse::<Card>().unwrap())
            .collect::<Vec<_>>();

        assert!(Hand::new(&cards[..4]).is_err());
        assert!(Hand::new(&cards).is_err());

        let mut dup = cards[..5].to_vec();
        dup[4] = dup[0];
        assert!(Hand::new(&dup).is_err());
    }

    #[test]
    fn rank_counts() {
        let h = hand("AH AD 10C 10S 2D");
        let counts = h.rank_counts();
        assert_eq!(counts[Rank::Ace as usize], 2);
        assert_eq!(counts[Rank::Ten as usize], 2);
        assert_eq!(counts[Rank::Deuce as usize], 1);
        assert_eq!(counts.iter().map(|&c| c as usize).sum::<usize>(), 5);
    }

    #[test]
    fn return_and_receive() {
        let mut h = hand("AH KD 9C 5S 2D");
        let card = h.return_card(1).unwrap();
        assert_eq!(card.to_string(), "KD");
        assert_eq!(h.card(1), None);
        assert!(!h.is_complete());
        assert_eq!(h.rank_counts()[Rank::King as usize], 0);
        assert_eq!(h.to_string(), "AH -- 9C 5S 2D");

        // Returning from an empty slot or out of range does nothing.
        assert_eq!(h.return_card(1), None);
        assert_eq!(h.return_card(7), None);

        assert!(h.receive_card("3C".parse().unwrap()));
        assert_eq!(h.to_string(), "AH 9C 5S 3C 2D");
        assert_eq!(h.rank_counts()[Rank::Trey as usize], 1);

        // No empty slot left.
        assert!(!h.receive_card("4C".parse().unwrap()));
        assert_eq!(h.to_string(), "AH 9C 5S 3C 2D");
    }

    #[test]
    fn received_card_is_sorted_in() {
        let mut h = hand("KC QD JH 10S 2C");
        assert!(!h.has_ace());

        h.return_card(4);
        assert!(h.receive_card("AS".parse().unwrap()));
        assert_eq!(h.to_string(), "AS KC QD JH 10S");
        assert!(h.has_ace());

        // Multiple empty slots are filled and kept last.
        h.return_card(1);
        h.return_card(3);
        assert!(h.receive_card("2D".parse().unwrap()));
        assert_eq!(h.to_string(), "AS QD 10S 2D --");
        assert!(h.receive_card("9H".parse().unwrap()));
        assert_eq!(h.to_string(), "AS QD 10S 9H 2D");
    }

    #[test]
    fn sort_moves_empty_slots_last() {
        let mut h = hand("AH KD 9C 5S 2D");
        h.return_card(0);
        h.sort();
        assert_eq!(h.to_string(), "KD 9C 5S 2D --");
        assert_eq!(h.full_cards(), None);
    }

    #[test]
    fn deal_hand() {
        let mut pile = Pile(
            ["2C", "3C", "4C", "5C", "6C"]
                .iter()
                .map(|c| c.parse().unwrap())
                .collect(),
        );
        let h = Hand::deal(&mut pile).unwrap();
        assert_eq!(h.to_string(), "6C 5C 4C 3C 2C");

        assert!(Hand::deal(&mut pile).is_err());
    }
}
