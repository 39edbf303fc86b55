// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use anyhow::{Result, anyhow};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// A Poker card.
///
/// A card has a rank and a suit, its value can be read either as a face value
/// where the Ace is the lowest card (1..=13) or as a game value where the Ace
/// is the highest card (2..=14).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    /// Create a card given a suit and rank.
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    /// Returns the card rank.
    pub fn rank(&self) -> Rank {
        self.rank
    }

    /// The card value with the Ace counting as 1.
    #[inline]
    pub fn face_value(&self) -> u32 {
        self.rank.face_value()
    }

    /// The card value with the Ace counting as 14.
    #[inline]
    pub fn game_value(&self) -> u32 {
        self.rank.game_value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = anyhow::Error;

    /// Parses a card from its rank label followed by the suit letter, for
    /// example `AH`, `10C` or `TC`.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        let suit = chars
            .next_back()
            .ok_or_else(|| anyhow!("Empty card string"))?;
        let suit = Suit::from_letter(suit).ok_or_else(|| anyhow!("Invalid suit in card {s}"))?;
        let rank =
            Rank::from_label(chars.as_str()).ok_or_else(|| anyhow!("Invalid rank in card {s}"))?;
        Ok(Card::new(rank, suit))
    }
}

/// Card rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rank {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Rank {
    /// The number of ranks.
    pub const COUNT: usize = 13;

    /// Returns all ranks.
    pub fn ranks() -> impl DoubleEndedIterator<Item = Rank> {
        use Rank::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
        .into_iter()
    }

    /// The rank label as printed on the card.
    pub fn label(&self) -> &'static str {
        match self {
            Rank::Deuce => "2",
            Rank::Trey => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        }
    }

    /// Parses a rank label, `T` is accepted for ten.
    pub fn from_label(label: &str) -> Option<Rank> {
        let rank = match label.to_ascii_uppercase().as_str() {
            "2" => Rank::Deuce,
            "3" => Rank::Trey,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "T" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return None,
        };

        Some(rank)
    }

    /// Returns the rank with the given game value (2..=14).
    pub fn from_game_value(value: u32) -> Option<Rank> {
        Rank::ranks().find(|r| r.game_value() == value)
    }

    /// The rank value with the Ace counting as 1.
    #[inline]
    pub fn face_value(&self) -> u32 {
        match self {
            Rank::Ace => 1,
            r => *r as u32 + 2,
        }
    }

    /// The rank value with the Ace counting as 14.
    #[inline]
    pub fn game_value(&self) -> u32 {
        *self as u32 + 2
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Clubs suit.
    Clubs = 0,
    /// Diamonds suit.
    Diamonds,
    /// Hearts suit.
    Hearts,
    /// Spades suit.
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suit = match self {
            Suit::Clubs => 'C',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
            Suit::Spades => 'S',
        };

        write!(f, "{suit}")
    }
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades].into_iter()
    }

    fn from_letter(letter: char) -> Option<Suit> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Deals and takes back cards.
///
/// Draw code depends on this trait instead of a concrete [Deck].
pub trait Dealer {
    /// Deals the next card, returns `None` when no cards are left.
    fn deal_next(&mut self) -> Option<Card>;

    /// Takes back a discarded card.
    fn return_card(&mut self, card: Card);
}

/// A cards Deck
///
/// Cards are dealt from a cursor, dealt and returned cards are not dealt again
/// until the deck is [reset](Deck::reset).
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    next: usize,
    discarded: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a new shuffled deck.
    pub fn new_and_shuffled<R: Rng>(rng: &mut R) -> Self {
        let mut deck = Self::default();
        deck.shuffle(rng);
        deck
    }

    /// Shuffles the cards that have not been dealt yet.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        self.cards[self.next..].shuffle(rng);
    }

    /// Deals the next card from the deck.
    pub fn deal_next(&mut self) -> Option<Card> {
        let card = self.cards.get(self.next).copied()?;
        self.next += 1;
        Some(card)
    }

    /// Adds a card to the discard pile.
    pub fn return_card(&mut self, card: Card) {
        self.discarded.push(card);
    }

    /// Makes all cards available for dealing and clears the discard pile.
    pub fn reset(&mut self) {
        self.next = 0;
        self.discarded.clear();
    }

    /// Checks if all cards have been dealt.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Number of cards left to deal.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.next
    }

    /// The cards returned to the deck since the last reset.
    pub fn discarded(&self) -> &[Card] {
        &self.discarded
    }

    /// Calls the `f` closure for each k-cards hand from the cards left to deal.
    ///
    /// Panics if k is not 1 <= k <= 5.
    pub fn for_each<F>(&self, k: usize, mut f: F)
    where
        F: FnMut(&[Card]),
    {
        assert!((1..=5).contains(&k), "1 <= k <= 5");

        let mut hand = Vec::with_capacity(k);
        for_each_ksubset(&self.cards[self.next..], k, &mut hand, &mut f);
    }
}

fn for_each_ksubset<F>(cards: &[Card], k: usize, hand: &mut Vec<Card>, f: &mut F)
where
    F: FnMut(&[Card]),
{
    let needed = k - hand.len();
    if needed == 0 {
        f(hand);
        return;
    }

    if cards.len() < needed {
        return;
    }

    for idx in 0..=(cards.len() - needed) {
        hand.push(cards[idx]);
        for_each_ksubset(&cards[idx + 1..], k, hand, f);
        hand.pop();
    }
}

impl Dealer for Deck {
    fn deal_next(&mut self) -> Option<Card> {
        Deck::deal_next(self)
    }

    fn return_card(&mut self, card: Card) {
        Deck::return_card(self, card)
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Suit::suits()
            .flat_map(|s| Rank::ranks().map(move |r| Card::new(r, s)))
            .collect::<Vec<_>>();
        Self {
            cards,
            next: 0,
            discarded: Vec::new(),
        }
    }
}
