use crate::model::card::Card;
use crate::model::combination::Combination;
use crate::model::player::PlayerId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub combination: Combination,
    pub player: PlayerId,
    pub round: u32,
}

/// Append-only log of every move of a game, passes included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    entries: Vec<HistoryEntry>,
    round: u32,
}

impl History {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            round: 1,
        }
    }

    /// Logs a move under the current round; a pass closes the round.
    pub fn record(&mut self, combination: Combination, player: PlayerId) {
        let closes_round = combination.is_pass();
        self.entries.push(HistoryEntry {
            combination,
            player,
            round: self.round,
        });
        if closes_round {
            self.round += 1;
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn last_play(&self) -> Combination {
        self.entries
            .last()
            .map(|entry| entry.combination.clone())
            .unwrap_or_default()
    }

    pub fn plays_by(&self, player: PlayerId) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().filter(move |entry| entry.player == player)
    }

    pub fn cards_played_by(&self, player: PlayerId) -> Vec<Card> {
        let mut cards: Vec<Card> = self
            .plays_by(player)
            .flat_map(|entry| entry.combination.cards().iter().copied())
            .collect();
        cards.sort();
        cards
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.round = 1;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::History;
    use crate::model::card::parse_cards;
    use crate::model::combination::Combination;
    use crate::model::player::PlayerId;

    fn combo(text: &str) -> Combination {
        Combination::new(parse_cards(text).unwrap())
    }

    #[test]
    fn empty_history_reports_pass() {
        let history = History::new();
        assert!(history.last_play().is_pass());
        assert_eq!(history.round(), 1);
        assert!(history.is_empty());
    }

    #[test]
    fn pass_advances_round() {
        let mut history = History::new();
        history.record(combo("3C"), PlayerId::Ai);
        history.record(combo("5H"), PlayerId::Opponent);
        assert_eq!(history.round(), 1);
        history.record(Combination::pass(), PlayerId::Ai);
        assert_eq!(history.round(), 2);
        history.record(combo("7S 7D"), PlayerId::Opponent);

        let rounds: Vec<u32> = history.entries().iter().map(|e| e.round).collect();
        assert_eq!(rounds, vec![1, 1, 1, 2]);
        assert_eq!(history.last_play(), combo("7D 7S"));
    }

    #[test]
    fn collects_cards_per_player() {
        let mut history = History::new();
        history.record(combo("4C 4H"), PlayerId::Ai);
        history.record(combo("9C 9S"), PlayerId::Opponent);
        history.record(Combination::pass(), PlayerId::Ai);
        history.record(combo("3D"), PlayerId::Opponent);

        assert_eq!(history.plays_by(PlayerId::Opponent).count(), 2);
        assert_eq!(
            history.cards_played_by(PlayerId::Opponent),
            parse_cards("3D 9C 9S").unwrap()
        );
        assert_eq!(
            history.cards_played_by(PlayerId::Ai),
            parse_cards("4C 4H").unwrap()
        );
    }

    #[test]
    fn clear_resets_round() {
        let mut history = History::new();
        history.record(Combination::pass(), PlayerId::Opponent);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.round(), 1);
    }
}
