use rand::Rng;
use shedder_core::game::snapshot::StateSnapshot;
use shedder_core::model::card::Card;
use shedder_core::model::combination::Combination;
use shedder_core::model::deck::Deck;
use shedder_core::model::hand::Hand;
use shedder_core::model::player::PlayerId;
use thiserror::Error;

/// Two-seat shedding table. Seat indices follow [`PlayerId::index`]; agent 0
/// always sits at `PlayerId::Ai`.
#[derive(Debug, Clone)]
pub struct Table {
    hands: [Hand; 2],
    played: [Vec<Card>; 2],
    deck: Vec<Card>,
    table: Combination,
    turn: PlayerId,
    moves: usize,
    passes: usize,
    winner: Option<PlayerId>,
}

/// What happened when a move was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub player: PlayerId,
    pub combination: Combination,
    pub finished: bool,
}

impl Table {
    /// Deals a fresh game from `rng`: shuffle, three-way deal, random starter.
    pub fn deal<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let deck = Deck::shuffled(rng);
        let deal = deck.deal();
        let turn = if rng.gen_bool(0.5) {
            PlayerId::Ai
        } else {
            PlayerId::Opponent
        };
        Self::from_hands(deal.first, deal.second, turn)
    }

    pub fn from_hands(first: Vec<Card>, second: Vec<Card>, starter: PlayerId) -> Self {
        Self {
            hands: [Hand::with_cards(first), Hand::with_cards(second)],
            played: [Vec::new(), Vec::new()],
            deck: Deck::standard().cards().to_vec(),
            table: Combination::pass(),
            turn: starter,
            moves: 0,
            passes: 0,
            winner: None,
        }
    }

    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    pub fn table(&self) -> &Combination {
        &self.table
    }

    pub fn hand(&self, player: PlayerId) -> &Hand {
        &self.hands[player.index()]
    }

    pub fn moves(&self) -> usize {
        self.moves
    }

    pub fn passes(&self) -> usize {
        self.passes
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.winner.is_some()
    }

    /// What `player` is allowed to know: its own cards, both discard piles
    /// and the table.
    pub fn snapshot_for(&self, player: PlayerId) -> StateSnapshot {
        StateSnapshot::new(self.hand(player).cards().to_vec(), self.table.clone())
            .with_own_played(self.played[player.index()].clone())
            .with_opponent_played(self.played[player.other().index()].clone())
            .with_deck(self.deck.clone())
    }

    /// Applies the move of the player whose turn it is. A pass clears the
    /// table; a play must beat whatever is on it.
    pub fn apply(&mut self, combination: Combination) -> Result<MoveRecord, GameError> {
        let player = self.turn;
        if self.winner.is_some() {
            return Err(GameError::Finished);
        }

        if combination.is_pass() {
            self.passes += 1;
            self.table = Combination::pass();
        } else {
            if !combination.can_follow(&self.table) {
                return Err(GameError::IllegalMove {
                    player,
                    combination: combination.to_string(),
                    table: self.table.to_string(),
                });
            }
            let index = player.index();
            if !self.hands[index].remove_all(combination.cards()) {
                return Err(GameError::NotHeld {
                    player,
                    combination: combination.to_string(),
                });
            }
            self.played[index].extend_from_slice(combination.cards());
            self.table = combination.clone();
            if self.hands[index].is_empty() {
                self.winner = Some(player);
            }
        }

        self.moves += 1;
        self.turn = player.other();
        Ok(MoveRecord {
            player,
            combination,
            finished: self.winner.is_some(),
        })
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GameError {
    #[error("{player} played {combination}, which cannot follow {table}")]
    IllegalMove {
        player: PlayerId,
        combination: String,
        table: String,
    },
    #[error("{player} played {combination} without holding those cards")]
    NotHeld {
        player: PlayerId,
        combination: String,
    },
    #[error("the game is already over")]
    Finished,
}
