// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Discard advice for a draw hand.
//!
//! The advisor looks at a classified hand and tells for each card position if
//! the card should be kept or swapped. Made hands (straights and better) keep
//! all their cards, sets and two pairs throw their odd cards, and weaker hands
//! look for a four cards flush or straight draw before throwing their low cards.
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, ops::Range};

use drawpoker_cards::{Card, Rank, Suit};

use crate::{
    eval::{HandRank, HandValue, Shape},
    hand::{Hand, RankCounts},
};

/// The number of high cards kept from a high hand with no draws.
const HIGH_CARDS_KEPT: usize = 2;

/// The discard advice for a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiscardSignal {
    /// Never discard the card.
    Keep,
    /// Always discard the card.
    Discard,
    /// Discard the card with the given probability in percent.
    Probability(u8),
}

impl DiscardSignal {
    /// The discard probability for a kept card.
    pub const KEEP: u8 = 0;

    /// The discard probability for a discarded card.
    pub const DISCARD: u8 = 100;

    /// The discard probability in percent.
    pub fn probability(&self) -> u8 {
        match self {
            DiscardSignal::Keep => Self::KEEP,
            DiscardSignal::Discard => Self::DISCARD,
            DiscardSignal::Probability(p) => *p,
        }
    }
}

impl fmt::Display for DiscardSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscardSignal::Keep => write!(f, "keep"),
            DiscardSignal::Discard => write!(f, "discard"),
            DiscardSignal::Probability(p) => write!(f, "{p}%"),
        }
    }
}

/// Computes the discard signals for a hand.
///
/// The flush and straight draws are computed once when the advisor is created
/// and reused for each position.
#[derive(Debug)]
pub struct DiscardAdvisor {
    value: HandValue,
    cards: [Card; Hand::SIZE],
    counts: RankCounts,
    flush_buster: Option<usize>,
    straight_breaker: Option<usize>,
}

impl DiscardAdvisor {
    /// Creates an advisor for a complete hand.
    pub fn new(hand: &Hand) -> Result<Self> {
        let shape = Shape::new(hand)?;
        let value = HandValue::from_shape(&shape);
        let Shape { cards, counts } = shape;

        let (mut flush_buster, mut straight_breaker) = (None, None);
        if matches!(value.rank(), HandRank::HighHand | HandRank::OnePair) {
            flush_buster = busted_flush(&cards);
            if let Some(idx) = flush_buster {
                debug!("Hand {hand} busted flush on {}", cards[idx]);
            } else {
                straight_breaker = broken_straight(&cards, &counts, hand.has_ace());
                if let Some(idx) = straight_breaker {
                    debug!("Hand {hand} broken straight on {}", cards[idx]);
                }
            }
        }

        Ok(Self {
            value,
            cards,
            counts,
            flush_buster,
            straight_breaker,
        })
    }

    /// The evaluated hand value.
    pub fn value(&self) -> HandValue {
        self.value
    }

    /// The hand category.
    pub fn rank(&self) -> HandRank {
        self.value.rank()
    }

    /// The position of the off suit card in a four cards flush.
    pub fn flush_buster(&self) -> Option<usize> {
        self.flush_buster
    }

    /// The position of the card breaking a four cards straight.
    pub fn straight_breaker(&self) -> Option<usize> {
        self.straight_breaker
    }

    /// The discard signal for a card position.
    ///
    /// Out of range positions are discarded.
    pub fn signal(&self, position: usize) -> DiscardSignal {
        if position >= Hand::SIZE {
            return DiscardSignal::Discard;
        }

        match self.rank() {
            HandRank::ThreeOfAKind | HandRank::TwoPair => self.singleton_signal(position),
            HandRank::HighHand | HandRank::OnePair => self.draw_signal(position),
            _ => DiscardSignal::Keep,
        }
    }

    /// The discard signals for all positions.
    pub fn signals(&self) -> [DiscardSignal; Hand::SIZE] {
        std::array::from_fn(|position| self.signal(position))
    }

    fn draw_signal(&self, position: usize) -> DiscardSignal {
        if let Some(idx) = self.flush_buster.or(self.straight_breaker) {
            return if idx == position {
                DiscardSignal::Discard
            } else {
                DiscardSignal::Keep
            };
        }

        if self.rank() == HandRank::OnePair {
            self.singleton_signal(position)
        } else if position < HIGH_CARDS_KEPT {
            DiscardSignal::Keep
        } else {
            DiscardSignal::Discard
        }
    }

    fn singleton_signal(&self, position: usize) -> DiscardSignal {
        let rank = self.cards[position].rank();
        if self.counts[rank as usize] == 1 {
            DiscardSignal::Discard
        } else {
            DiscardSignal::Keep
        }
    }
}

/// Returns the position of the odd card if four cards share a suit.
fn busted_flush(cards: &[Card]) -> Option<usize> {
    let mut suits = [0u8; Suit::COUNT];
    for card in cards {
        suits[card.suit() as usize] += 1;
    }

    let suit = Suit::suits().find(|s| suits[*s as usize] == 4)?;
    cards.iter().position(|c| c.suit() != suit)
}

/// Returns the position of the card that breaks a four cards straight.
///
/// Slides a five ranks window over the rank counts looking for four held ranks.
/// With an Ace in hand the first window covers Deuce to Five and needs three
/// held ranks, as the Ace completes the low end.
fn broken_straight(cards: &[Card], counts: &RankCounts, has_ace: bool) -> Option<usize> {
    const WIDTH: usize = 5;

    for start in 0..=(Rank::COUNT - WIDTH) {
        let ace_low = has_ace && start == 0;
        let (width, needed) = if ace_low {
            (WIDTH - 1, WIDTH - 2)
        } else {
            (WIDTH, WIDTH - 1)
        };

        let window = start..start + width;
        let held = counts[window.clone()].iter().filter(|&&c| c > 0).count();
        if held == needed {
            let breaker = straight_breaker(counts, window, ace_low)?;
            return cards.iter().position(|c| c.rank() as usize == breaker);
        }
    }

    None
}

/// Returns the rank index of the card to swap for a straight in `window`.
///
/// A paired rank is the breaker, otherwise the nearest rank held outside the
/// window, looking left first.
fn straight_breaker(counts: &RankCounts, window: Range<usize>, ace_low: bool) -> Option<usize> {
    if let Some(pair) = counts.iter().position(|&c| c == 2) {
        return Some(pair);
    }

    let left = counts[..window.start].iter().rposition(|&c| c > 0);

    // The low Ace is part of the straight.
    let end = if ace_low { Rank::Ace as usize } else { Rank::COUNT };
    let right = counts[window.end..end]
        .iter()
        .position(|&c| c > 0)
        .map(|idx| idx + window.end);

    left.or(right)
}
