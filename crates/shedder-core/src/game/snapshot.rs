use crate::model::card::Card;
use crate::model::combination::Combination;
use crate::model::deck::Deck;
use crate::probability::counts::RankCounts;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Everything the decision core is told about the game before it moves.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub own_hand: Vec<Card>,
    #[serde(default)]
    pub own_played: Vec<Card>,
    #[serde(default)]
    pub opponent_played: Vec<Card>,
    #[serde(default)]
    pub table: Combination,
    #[serde(default = "standard_deck")]
    pub deck: Vec<Card>,
}

fn standard_deck() -> Vec<Card> {
    Deck::standard().cards().to_vec()
}

impl StateSnapshot {
    pub fn new(own_hand: Vec<Card>, table: Combination) -> Self {
        Self {
            own_hand,
            own_played: Vec::new(),
            opponent_played: Vec::new(),
            table,
            deck: standard_deck(),
        }
    }

    pub fn with_own_played(mut self, cards: Vec<Card>) -> Self {
        self.own_played = cards;
        self
    }

    pub fn with_opponent_played(mut self, cards: Vec<Card>) -> Self {
        self.opponent_played = cards;
        self
    }

    pub fn with_deck(mut self, deck: Vec<Card>) -> Self {
        self.deck = deck;
        self
    }

    pub fn is_free_table(&self) -> bool {
        self.table.is_pass()
    }

    /// Deck minus everything the AI has seen: its hand, its own plays and the
    /// opponent's plays. The dead group always stays in here.
    pub fn unseen_cards(&self) -> Vec<Card> {
        let mut seen: HashMap<Card, usize> = HashMap::new();
        for card in self
            .own_hand
            .iter()
            .chain(&self.own_played)
            .chain(&self.opponent_played)
        {
            *seen.entry(*card).or_default() += 1;
        }
        self.deck
            .iter()
            .copied()
            .filter(|card| match seen.get_mut(card) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    false
                }
                _ => true,
            })
            .collect()
    }

    pub fn unseen_pool(&self) -> RankCounts {
        RankCounts::from_cards(&self.unseen_cards())
    }

    /// Both players are dealt the same number of cards, so the opponent holds
    /// what the AI was dealt minus what the opponent has already shed.
    pub fn opponent_hand_size(&self) -> usize {
        (self.own_hand.len() + self.own_played.len()).saturating_sub(self.opponent_played.len())
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
