// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Draw cards swapping.
use anyhow::Result;
use log::{debug, warn};
use rand::prelude::*;

use drawpoker_cards::{Card, Dealer};

use crate::{
    discard::{DiscardAdvisor, DiscardSignal},
    eval::HandValue,
    hand::Hand,
};

/// The default maximum number of cards swapped in a draw.
pub const MAX_CARDS_TO_DISCARD: usize = 3;

/// Upper bound of the draw used for probabilistic discards.
const MAX_PROBABILITY: u32 = 100;

/// The cards swapped by a draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscardOutcome {
    dealt_value: HandValue,
    signals: [DiscardSignal; Hand::SIZE],
    discarded: Vec<Card>,
    replaced: usize,
}

impl DiscardOutcome {
    /// The hand value before the draw.
    pub fn dealt_value(&self) -> HandValue {
        self.dealt_value
    }

    /// The discard advice for the hand before the draw.
    pub fn signals(&self) -> &[DiscardSignal; Hand::SIZE] {
        &self.signals
    }

    /// The cards taken out of the hand and returned to the dealer.
    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// The number of discarded cards.
    pub fn count(&self) -> usize {
        self.discarded.len()
    }

    /// The number of hand slots that received a new card.
    pub fn replaced(&self) -> usize {
        self.replaced
    }

    /// Checks if the dealer ran out of cards leaving the hand short.
    pub fn is_short(&self) -> bool {
        self.replaced < self.discarded.len()
    }
}

/// Selects and swaps the cards of a hand.
#[derive(Debug, Clone, Copy)]
pub struct DiscardPolicy {
    max_discards: usize,
}

impl Default for DiscardPolicy {
    fn default() -> Self {
        Self {
            max_discards: MAX_CARDS_TO_DISCARD,
        }
    }
}

impl DiscardPolicy {
    /// Creates a policy that swaps at most `max_discards` cards.
    pub fn new(max_discards: usize) -> Self {
        Self {
            max_discards: max_discards.min(Hand::SIZE),
        }
    }

    /// The maximum number of cards swapped in a draw.
    pub fn max_discards(&self) -> usize {
        self.max_discards
    }

    /// Selects the positions to discard given the per position signals.
    ///
    /// Definite discards take precedence, probabilistic signals are used only
    /// if no card has to be discarded.
    pub fn select<R: Rng>(&self, signals: &[DiscardSignal], rng: &mut R) -> Vec<usize> {
        let mut selected = Vec::with_capacity(self.max_discards);
        let mut candidates = Vec::new();

        for (position, signal) in signals.iter().enumerate() {
            match signal {
                DiscardSignal::Keep => {}
                DiscardSignal::Discard if selected.len() < self.max_discards => {
                    selected.push(position)
                }
                signal => candidates.push((position, signal.probability())),
            }
        }

        // TODO: the advisor only emits Keep or Discard so this branch never
        // selects, remove it or teach the advisor speculative draws.
        if selected.is_empty() {
            for (position, probability) in candidates {
                if selected.len() >= self.max_discards {
                    break;
                }

                let scaled = u32::from(probability) * (self.max_discards - selected.len()) as u32;
                let threshold = rng.random_range(0..MAX_PROBABILITY);
                if scaled <= threshold {
                    selected.push(position);
                }
            }
        }

        selected
    }

    /// Swaps the advised cards of a hand with new cards from the dealer.
    ///
    /// All the selected cards are taken out and returned to the dealer before
    /// dealing the replacements, if the dealer runs out of cards the hand is
    /// left with empty slots and the outcome is short. The hand is sorted
    /// after the swap.
    pub fn discard<D, R>(&self, hand: &mut Hand, dealer: &mut D, rng: &mut R) -> Result<DiscardOutcome>
    where
        D: Dealer,
        R: Rng,
    {
        let advisor = DiscardAdvisor::new(hand)?;
        let signals = advisor.signals();
        let selected = self.select(&signals, rng);

        // Positions shift once a card is received.
        let mut discarded = Vec::with_capacity(selected.len());
        for position in selected {
            if let Some(card) = hand.return_card(position) {
                dealer.return_card(card);
                discarded.push(card);
            }
        }

        let mut replaced = 0;
        for card in &discarded {
            match dealer.deal_next() {
                Some(new_card) => {
                    hand.receive_card(new_card);
                    replaced += 1;
                }
                None => warn!("No card left to replace {card}"),
            }
        }

        hand.sort();

        let outcome = DiscardOutcome {
            dealt_value: advisor.value(),
            signals,
            discarded,
            replaced,
        };

        debug!(
            "{} discarded {} cards, new hand {hand}",
            outcome.dealt_value,
            outcome.count()
        );

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval::HandRank, hand::tests::hand};
    use DiscardSignal::*;
    use drawpoker_cards::Deck;

    /// A dealer with a fixed list of cards.
    #[derive(Default)]
    struct FakeDealer {
        cards: Vec<Card>,
        returned: Vec<Card>,
    }

    impl FakeDealer {
        fn with_cards(cards: &str) -> Self {
            Self {
                cards: cards
                    .split_whitespace()
                    .rev()
                    .map(|c| c.parse().unwrap())
                    .collect(),
                returned: Vec::new(),
            }
        }
    }

    impl Dealer for FakeDealer {
        fn deal_next(&mut self) -> Option<Card> {
            self.cards.pop()
        }

        fn return_card(&mut self, card: Card) {
            self.returned.push(card);
        }
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(101)
    }

    #[test]
    fn swap_busted_flush() {
        let mut h = hand("10C 9C 8H 7C 2C");
        let mut dealer = FakeDealer::with_cards("AC");

        let outcome = DiscardPolicy::default()
            .discard(&mut h, &mut dealer, &mut rng())
            .unwrap();

        assert_eq!(outcome.count(), 1);
        assert_eq!(outcome.replaced(), 1);
        assert!(!outcome.is_short());
        assert_eq!(outcome.discarded()[0].to_string(), "8H");
        assert_eq!(dealer.returned, outcome.discarded());

        assert_eq!(h.to_string(), "AC 10C 9C 7C 2C");
        assert_eq!(HandValue::eval(&h).unwrap().rank(), HandRank::Flush);
    }

    #[test]
    fn swap_high_hand_low_cards() {
        let mut h = hand("KC QD 8H 5C 2S");
        let mut dealer = FakeDealer::with_cards("KD QS 3H");

        let outcome = DiscardPolicy::default()
            .discard(&mut h, &mut dealer, &mut rng())
            .unwrap();

        assert_eq!(outcome.count(), 3);
        assert_eq!(outcome.replaced(), 3);
        assert_eq!(outcome.dealt_value().rank(), HandRank::HighHand);
        assert_eq!(
            outcome.signals(),
            &[Keep, Keep, Discard, Discard, Discard]
        );
        assert_eq!(dealer.returned, outcome.discarded());
        assert_eq!(h.to_string(), "KC KD QD QS 3H");
        assert_eq!(HandValue::eval(&h).unwrap().rank(), HandRank::TwoPair);
    }

    #[test]
    fn swap_with_higher_cards() {
        let mut h = hand("KC QD 8H 5C 2S");
        let mut dealer = FakeDealer::with_cards("AD AH AS");

        let outcome = DiscardPolicy::default()
            .discard(&mut h, &mut dealer, &mut rng())
            .unwrap();

        let discarded = outcome
            .discarded()
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>();
        assert_eq!(discarded, ["8H", "5C", "2S"]);
        assert_eq!(h.to_string(), "AD AH AS KC QD");
        assert_eq!(HandValue::eval(&h).unwrap().rank(), HandRank::ThreeOfAKind);
    }

    #[test]
    fn made_hand_keeps_cards() {
        let mut h = hand("AH KD QC JS 10H");
        let mut dealer = FakeDealer::with_cards("2C 3C 4C");

        let outcome = DiscardPolicy::default()
            .discard(&mut h, &mut dealer, &mut rng())
            .unwrap();

        assert_eq!(outcome.count(), 0);
        assert_eq!(outcome.signals(), &[Keep; Hand::SIZE]);
        assert_eq!(outcome.dealt_value().rank(), HandRank::Straight);
        assert_eq!(h.to_string(), "AH KD QC JS 10H");
        assert_eq!(dealer.cards.len(), 3);
    }

    #[test]
    fn exhausted_dealer_leaves_hand_short() {
        let mut h = hand("KC QD 8H 8C 2S");
        let mut dealer = FakeDealer::with_cards("3D");

        let outcome = DiscardPolicy::default()
            .discard(&mut h, &mut dealer, &mut rng())
            .unwrap();

        assert_eq!(outcome.count(), 3);
        assert_eq!(outcome.replaced(), 1);
        assert!(outcome.is_short());
        assert_eq!(h.len(), 3);
        assert_eq!(h.to_string(), "8H 8C 3D -- --");
        assert!(HandValue::eval(&h).is_err());

        // A short hand cannot be drawn again.
        assert!(
            DiscardPolicy::default()
                .discard(&mut h, &mut dealer, &mut rng())
                .is_err()
        );
    }

    #[test]
    fn select_caps_discards() {
        let policy = DiscardPolicy::default();
        let selected = policy.select(&[Discard; Hand::SIZE], &mut rng());
        assert_eq!(selected, vec![0, 1, 2]);

        let policy = DiscardPolicy::new(1);
        let selected = policy.select(&[Keep, Discard, Discard, Keep, Keep], &mut rng());
        assert_eq!(selected, vec![1]);

        let policy = DiscardPolicy::new(10);
        assert_eq!(policy.max_discards(), Hand::SIZE);
    }

    #[test]
    fn select_definite_discards_skip_probabilities() {
        let policy = DiscardPolicy::default();
        let signals = [Probability(1), Discard, Probability(1), Keep, Probability(1)];
        for _ in 0..100 {
            assert_eq!(policy.select(&signals, &mut rng()), vec![1]);
        }
    }

    #[test]
    fn select_probabilities() {
        let policy = DiscardPolicy::default();

        // Scaled probabilities above the draw range are never selected.
        let signals = [Keep, Probability(34), Probability(50), Keep, Probability(99)];
        assert!(policy.select(&signals, &mut rng()).is_empty());

        // Low probabilities are selected up to the maximum.
        let mut rng = rng();
        let signals = [Probability(1); Hand::SIZE];
        for _ in 0..100 {
            let selected = policy.select(&signals, &mut rng);
            assert!(selected.len() <= MAX_CARDS_TO_DISCARD);
            assert!(selected.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn draw_from_deck() {
        let policy = DiscardPolicy::default();
        let mut rng = rng();
        let mut deck = Deck::new_and_shuffled(&mut rng);

        for _ in 0..5 {
            let mut h = Hand::deal(&mut deck).unwrap();
            let before = HandValue::eval(&h).unwrap();
            let remaining = deck.remaining();
            let returned = deck.discarded().len();

            let outcome = policy.discard(&mut h, &mut deck, &mut rng).unwrap();
            assert!(outcome.count() <= MAX_CARDS_TO_DISCARD);
            assert_eq!(outcome.replaced(), outcome.count());
            assert_eq!(deck.remaining(), remaining - outcome.count());
            assert_eq!(deck.discarded().len(), returned + outcome.count());
            assert!(h.is_complete());

            for card in outcome.discarded() {
                assert!(h.cards().all(|c| c != *card));
            }

            // Made hands are kept as they are.
            if before.rank() >= HandRank::Straight {
                assert_eq!(outcome.count(), 0);
            }
        }
    }
}
