// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker hand classifier and scorer.
//!
//! A hand is classified by checking the category predicates from the strongest
//! to the weakest category, the first match wins. The hand score is the
//! category offset (`ordinal * 1_000_000`) plus a category specific tiebreak
//! that is always lower than 1_000_000, so that a hand of a stronger category
//! always scores higher than a hand of a weaker category.
use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::{cmp::Reverse, fmt};

use drawpoker_cards::{Card, Rank};

use crate::hand::{Hand, RankCounts};

/// The base used to encode cards values in a tiebreak.
const BASE: u32 = 14;

/// The hand category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// No pairs, straights or flushes.
    HighHand = 0,
    /// Two cards of the same rank.
    OnePair,
    /// Two different pairs.
    TwoPair,
    /// Three cards of the same rank.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four cards of the same rank.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
    /// Ace high straight flush.
    RoyalFlush,
}

impl HandRank {
    /// The score distance between two consecutive categories.
    pub const OFFSET: u32 = 1_000_000;

    /// Returns all categories from the weakest to the strongest.
    pub fn ranks() -> impl DoubleEndedIterator<Item = HandRank> {
        use HandRank::*;
        [
            HighHand,
            OnePair,
            TwoPair,
            ThreeOfAKind,
            Straight,
            Flush,
            FullHouse,
            FourOfAKind,
            StraightFlush,
            RoyalFlush,
        ]
        .into_iter()
    }

    /// The lowest score for this category.
    pub fn offset(&self) -> u32 {
        *self as u32 * Self::OFFSET
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandRank::HighHand => "High Hand",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
            HandRank::RoyalFlush => "Royal Flush",
        };

        f.write_str(name)
    }
}

/// A hand category and score.
///
/// Values compare by score, a higher score is a stronger hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandValue {
    // Must be the first field for the derived ordering.
    score: u32,
    rank: HandRank,
}

impl HandValue {
    /// Evaluates a hand.
    ///
    /// Fails if the hand has empty slots.
    pub fn eval(hand: &Hand) -> Result<Self> {
        Shape::new(hand).map(|shape| Self::from_shape(&shape))
    }

    pub(crate) fn from_shape(shape: &Shape) -> Self {
        let rank = shape.rank();
        let score = rank.offset() + shape.tiebreak(rank);
        Self { score, rank }
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.rank
    }

    /// The hand score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// The within category part of the score.
    pub fn tiebreak(&self) -> u32 {
        self.score - self.rank.offset()
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.rank, self.score)
    }
}

/// The sorted cards and rank counts of a complete hand.
#[derive(Debug)]
pub(crate) struct Shape {
    pub(crate) cards: [Card; Hand::SIZE],
    pub(crate) counts: RankCounts,
}

impl Shape {
    pub(crate) fn new(hand: &Hand) -> Result<Self> {
        let Some(mut cards) = hand.full_cards() else {
            bail!("Cannot evaluate hand {hand} with {} cards", hand.len());
        };

        cards.sort_by_key(|c| Reverse(c.game_value()));

        Ok(Self {
            cards,
            counts: *hand.rank_counts(),
        })
    }

    /// Classifies the hand.
    pub(crate) fn rank(&self) -> HandRank {
        if self.is_royal_flush() {
            HandRank::RoyalFlush
        } else if self.is_straight_flush() {
            HandRank::StraightFlush
        } else if self.is_four_of_a_kind() {
            HandRank::FourOfAKind
        } else if self.is_full_house() {
            HandRank::FullHouse
        } else if self.is_flush() {
            HandRank::Flush
        } else if self.is_straight() {
            HandRank::Straight
        } else if self.is_three_of_a_kind() {
            HandRank::ThreeOfAKind
        } else if self.is_two_pair() {
            HandRank::TwoPair
        } else if self.is_one_pair() {
            HandRank::OnePair
        } else {
            HandRank::HighHand
        }
    }

    fn is_royal_flush(&self) -> bool {
        self.is_straight_flush() && self.cards[Hand::SIZE - 1].rank() == Rank::Ten
    }

    fn is_straight_flush(&self) -> bool {
        self.is_run() && self.is_flush()
    }

    fn is_four_of_a_kind(&self) -> bool {
        self.has_count(4)
    }

    fn is_full_house(&self) -> bool {
        self.has_count(3) && self.has_count(2)
    }

    fn is_flush(&self) -> bool {
        let suit = self.cards[0].suit();
        self.cards.iter().all(|c| c.suit() == suit)
    }

    fn is_straight(&self) -> bool {
        self.is_run() && !self.is_flush()
    }

    fn is_three_of_a_kind(&self) -> bool {
        self.has_count(3) && !self.has_count(2)
    }

    fn is_two_pair(&self) -> bool {
        self.pairs() == 2
    }

    fn is_one_pair(&self) -> bool {
        self.pairs() == 1
    }

    /// Checks if each card is one higher than the next, with an Ace followed
    /// by a Five starting a wheel (A 5 4 3 2).
    fn is_run(&self) -> bool {
        self.cards.windows(2).all(|w| {
            let (high, low) = (w[0], w[1]);
            (high.rank() == Rank::Ace && low.face_value() == 5)
                || high.game_value() == low.face_value() + 1
        })
    }

    fn has_count(&self, count: u8) -> bool {
        self.counts.contains(&count)
    }

    fn pairs(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 2).count()
    }

    /// The lowest game value with the given count.
    fn low_value_with_count(&self, count: u8) -> u32 {
        self.counts
            .iter()
            .position(|&c| c == count)
            .map_or(0, |idx| idx as u32 + 2)
    }

    /// The highest game value with the given count.
    fn high_value_with_count(&self, count: u8) -> u32 {
        self.counts
            .iter()
            .rposition(|&c| c == count)
            .map_or(0, |idx| idx as u32 + 2)
    }

    fn tiebreak(&self, rank: HandRank) -> u32 {
        match rank {
            HandRank::RoyalFlush => 0,
            HandRank::StraightFlush | HandRank::Straight => self.cards[0].game_value().pow(5),
            HandRank::FourOfAKind => self.low_value_with_count(4).pow(4),
            HandRank::FullHouse | HandRank::ThreeOfAKind => {
                BASE.pow(3) * self.low_value_with_count(3)
            }
            HandRank::Flush | HandRank::HighHand => {
                polynomial(self.cards.iter().map(Card::game_value))
            }
            HandRank::TwoPair => {
                let high = self.high_value_with_count(2);
                let low = self.low_value_with_count(2);
                let kicker = self
                    .cards
                    .iter()
                    .map(Card::game_value)
                    .find(|&v| v != high && v != low)
                    .unwrap_or(0);
                BASE.pow(2) * high + BASE * low + kicker
            }
            HandRank::OnePair => {
                let pair = self.low_value_with_count(2);
                let kickers = self
                    .cards
                    .iter()
                    .map(Card::game_value)
                    .filter(|&v| v != pair);
                BASE.pow(3) * pair + polynomial(kickers)
            }
        }
    }
}

/// Encodes values as the digits of a base 14 number, most significant first.
fn polynomial(values: impl Iterator<Item = u32>) -> u32 {
    values.fold(0, |acc, v| acc * BASE + v)
}
