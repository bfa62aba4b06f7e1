//! Cards: a card is one action to execute when played.

use serde::{Deserialize, Serialize};

use crate::actions::Action;

/// A card bound to a single action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    action: Action,
}

impl Card {
    #[must_use]
    pub fn new(action: Action) -> Self {
        Self { action }
    }

    /// The action executed when this card is played.
    #[must_use]
    pub fn action(&self) -> &Action {
        &self.action
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_holds_action() {
        let card = Card::new(Action::Draw);
        assert_eq!(card.action(), &Action::Draw);
    }

    #[test]
    fn test_serde_round_trip() {
        let card = Card::new(Action::ApplyPoison);
        let json = serde_json::to_string(&card).unwrap();
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(card, back);
    }
}
