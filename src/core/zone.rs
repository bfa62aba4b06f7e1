//! Card zones: deck, hand, and discard are ordered piles.
//!
//! The top of a pile is the back of the sequence; drawing pops the back.
//! Piles use a persistent vector so a detached copy shares structure with
//! the snapshot it came from.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;

/// An ordered pile of cards.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Pile {
    cards: Vector<Card>,
}

impl Pile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            cards: cards.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Add a card on top.
    pub fn push_top(&mut self, card: Card) {
        self.cards.push_back(card);
    }

    /// Remove and return the top card.
    pub fn pop_top(&mut self) -> Option<Card> {
        self.cards.pop_back()
    }

    /// Peek the top card.
    #[must_use]
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.back()
    }

    /// Card at `idx`, bottom first.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<&Card> {
        self.cards.get(idx)
    }

    /// Remove and return the card at `idx`.
    pub fn remove(&mut self, idx: usize) -> Option<Card> {
        if idx < self.cards.len() {
            Some(self.cards.remove(idx))
        } else {
            None
        }
    }

    /// Replace the whole pile order (used by shuffling).
    pub fn set_cards(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.cards = cards.into_iter().collect();
    }

    /// Iterate bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}
