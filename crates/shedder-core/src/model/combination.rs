use crate::model::card::Card;
use crate::model::rank::Rank;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Combination categories, declared in classifier priority order. The derived
/// ordering is also the primary sort key of a seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Shape {
    Single,
    Pair,
    Triple,
    Bomb,
    MultiPair,
    MultiTriple,
    TripleWithPair,
    Straight,
    Invalid,
}

impl Shape {
    pub const PLAYABLE: [Shape; 8] = [
        Shape::Single,
        Shape::Pair,
        Shape::Triple,
        Shape::Bomb,
        Shape::MultiPair,
        Shape::MultiTriple,
        Shape::TripleWithPair,
        Shape::Straight,
    ];

    /// Shapes whose length is part of their identity when comparing.
    pub const fn is_variable_length(self) -> bool {
        matches!(self, Shape::MultiPair | Shape::MultiTriple | Shape::Straight)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Shape::Single => "single",
            Shape::Pair => "pair",
            Shape::Triple => "triple",
            Shape::Bomb => "bomb",
            Shape::MultiPair => "multi_pair",
            Shape::MultiTriple => "multi_triple",
            Shape::TripleWithPair => "triple_with_pair",
            Shape::Straight => "straight",
            Shape::Invalid => "invalid",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a multiset of cards. The rules are tried in [`Shape`] order and
/// the first match wins; `(Shape::Invalid, 0)` when nothing matches. No rank
/// has value 0, so an invalid or empty combination never maps to a [`Rank`].
pub fn classify(cards: &[Card]) -> (Shape, u8) {
    let mut sorted = cards.to_vec();
    sorted.sort();
    classify_sorted(&sorted)
}

fn classify_sorted(cards: &[Card]) -> (Shape, u8) {
    let len = cards.len();
    if len == 0 {
        return (Shape::Invalid, 0);
    }
    let first = cards[0].rank;

    if len == 1 {
        return (Shape::Single, first.value());
    }
    if len == 2 && same_rank(cards) {
        return (Shape::Pair, first.value());
    }
    if len == 3 && first != Rank::Ace && same_rank(cards) {
        return (Shape::Triple, first.value());
    }
    if (len == 3 && first == Rank::Ace && same_rank(cards)) || (len == 4 && same_rank(cards)) {
        return (Shape::Bomb, first.value());
    }
    if len > 2 && len % 2 == 0 && is_chain_of_groups(cards, 2) {
        return (Shape::MultiPair, first.value());
    }
    if len > 3 && len % 3 == 0 && is_chain_of_groups(cards, 3) {
        return (Shape::MultiTriple, first.value());
    }
    if len == 5 {
        if same_rank(&cards[..3]) && same_rank(&cards[3..]) && first != Rank::Ace {
            return (Shape::TripleWithPair, first.value());
        }
        if same_rank(&cards[..2]) && same_rank(&cards[2..]) && cards[2].rank != Rank::Ace {
            return (Shape::TripleWithPair, cards[4].rank.value());
        }
    }
    if len >= 5 && is_chain_of_groups(cards, 1) {
        return (Shape::Straight, first.value());
    }
    (Shape::Invalid, 0)
}

fn same_rank(cards: &[Card]) -> bool {
    match cards.split_first() {
        Some((head, tail)) => tail.iter().all(|card| card.rank == head.rank),
        None => false,
    }
}

/// Sorted cards split into equal same-rank groups whose ranks step up by one.
fn is_chain_of_groups(cards: &[Card], group: usize) -> bool {
    if !cards.chunks(group).all(|chunk| chunk.len() == group && same_rank(chunk)) {
        return false;
    }
    cards
        .chunks(group)
        .map(|chunk| chunk[0].rank)
        .collect::<Vec<_>>()
        .windows(2)
        .all(|pair| pair[0].is_straight_adjacent(pair[1]) && pair[0] < pair[1])
}

/// A classified, immutable multiset of cards. Shape and Value are computed once
/// at construction; an empty combination is a pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Vec<Card>", into = "Vec<Card>")]
pub struct Combination {
    cards: Vec<Card>,
    shape: Shape,
    value: u8,
}

impl Combination {
    pub fn new(mut cards: Vec<Card>) -> Self {
        cards.sort();
        let (shape, value) = classify_sorted(&cards);
        Self {
            cards,
            shape,
            value,
        }
    }

    pub fn from_slice(cards: &[Card]) -> Self {
        Self::new(cards.to_vec())
    }

    pub fn single(card: Card) -> Self {
        Self::new(vec![card])
    }

    pub fn pass() -> Self {
        Self::new(Vec::new())
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Rank of the group that defines [`Combination::value`]; `None` for a
    /// pass or an invalid combination.
    pub fn rank(&self) -> Option<Rank> {
        Rank::from_value(self.value)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_pass(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_valid(&self) -> bool {
        self.shape != Shape::Invalid
    }

    /// One rank per chained group for multi-pairs and multi-triples, the
    /// defining rank otherwise.
    pub fn defining_ranks(&self) -> Vec<Rank> {
        match self.shape {
            Shape::MultiPair => self.cards.chunks(2).map(|c| c[0].rank).collect(),
            Shape::MultiTriple => self.cards.chunks(3).map(|c| c[0].rank).collect(),
            Shape::Invalid => Vec::new(),
            _ => self.rank().into_iter().collect(),
        }
    }

    pub fn merge(&self, other: &Combination) -> Combination {
        let mut cards = Vec::with_capacity(self.len() + other.len());
        cards.extend_from_slice(&self.cards);
        cards.extend_from_slice(&other.cards);
        Combination::new(cards)
    }

    /// Whether this combination wins against `other` under the table rules.
    pub fn beats(&self, other: &Combination) -> bool {
        if !self.is_valid() || !other.is_valid() {
            return false;
        }
        if self.shape == Shape::Bomb {
            return other.shape != Shape::Bomb || self.value > other.value;
        }
        if self.shape != other.shape {
            return false;
        }
        if self.shape.is_variable_length() && self.len() != other.len() {
            return false;
        }
        self.value > other.value
    }

    /// Legal as the next play on `table`: anything valid opens an empty table.
    pub fn can_follow(&self, table: &Combination) -> bool {
        if table.is_pass() {
            self.is_valid()
        } else {
            self.beats(table)
        }
    }
}

impl From<Vec<Card>> for Combination {
    fn from(cards: Vec<Card>) -> Self {
        Combination::new(cards)
    }
}

impl From<Combination> for Vec<Card> {
    fn from(combination: Combination) -> Self {
        combination.cards
    }
}

impl Default for Combination {
    fn default() -> Self {
        Combination::pass()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return f.write_str("pass");
        }
        write!(f, "{}(", self.shape)?;
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str(")")
    }
}

#[cfg(test)]
mod tests {
    use super::{Combination, Shape, classify};
    use crate::model::card::parse_cards;
    use crate::model::rank::Rank;

    fn combo(text: &str) -> Combination {
        Combination::new(parse_cards(text).unwrap())
    }

    fn shape_of(text: &str) -> (Shape, u8) {
        classify(&parse_cards(text).unwrap())
    }

    #[test]
    fn classifies_basic_groups() {
        assert_eq!(shape_of("7H"), (Shape::Single, 7));
        assert_eq!(shape_of("9C 9S"), (Shape::Pair, 9));
        assert_eq!(shape_of("JD JC JH"), (Shape::Triple, 11));
        assert_eq!(shape_of("5D 5C 5H 5S"), (Shape::Bomb, 5));
        assert_eq!(shape_of("9C 8S"), (Shape::Invalid, 0));
        assert_eq!(shape_of(""), (Shape::Invalid, 0));
    }

    #[test]
    fn three_aces_are_a_bomb() {
        assert_eq!(shape_of("AC AH AS"), (Shape::Bomb, 14));
    }

    #[test]
    fn classifies_chains() {
        assert_eq!(shape_of("3C 3H 4C 4H 5C 5H"), (Shape::MultiPair, 3));
        assert_eq!(shape_of("QC QH KC KH AC AH"), (Shape::MultiPair, 12));
        assert_eq!(shape_of("3C 3H 3S 4C 4H 4S"), (Shape::MultiTriple, 3));
        assert_eq!(shape_of("3C 3H 5C 5H"), (Shape::Invalid, 0));
        assert_eq!(shape_of("KC KH AC AH 2S 2S"), (Shape::Invalid, 0));
    }

    #[test]
    fn classifies_triple_with_pair_in_either_order() {
        assert_eq!(shape_of("6C 6H 6S 9C 9H"), (Shape::TripleWithPair, 6));
        assert_eq!(shape_of("4C 4H 9C 9H 9S"), (Shape::TripleWithPair, 9));
        assert_eq!(shape_of("AC AH AS 9C 9H"), (Shape::Invalid, 0));
    }

    #[test]
    fn classifies_straights() {
        assert_eq!(shape_of("3C 4H 5S 6D 7C"), (Shape::Straight, 3));
        assert_eq!(shape_of("10C JH QS KD AC"), (Shape::Straight, 10));
        assert_eq!(shape_of("JH QS KD AC 2S"), (Shape::Invalid, 0));
        assert_eq!(shape_of("3C 4H 5S 6D"), (Shape::Invalid, 0));
        assert_eq!(shape_of("3C 4H 5S 6D 6C"), (Shape::Invalid, 0));
    }

    #[test]
    fn classification_ignores_input_order() {
        assert_eq!(shape_of("7C 5H 3S 6D 4C"), (Shape::Straight, 3));
        assert_eq!(shape_of("9C 4C 9H 4H 9S"), (Shape::TripleWithPair, 9));
    }

    #[test]
    fn reclassifying_is_idempotent() {
        for text in ["3C 3H 4C 4H", "AC AH AS", "6C 6H 6S 9C 9H", "9C 8S"] {
            let first = combo(text);
            let again = Combination::from_slice(first.cards());
            assert_eq!((first.shape(), first.value()), (again.shape(), again.value()));
        }
    }

    #[test]
    fn bombs_beat_everything_else() {
        let bomb = combo("4D 4C 4H 4S");
        let big_bomb = combo("AC AH AS");
        for text in ["2S", "KC KH", "QC QH QS", "3C 4H 5S 6D 7C", "6C 6H 6S 9C 9H"] {
            let other = combo(text);
            assert!(bomb.beats(&other));
            assert!(!other.beats(&bomb));
        }
        assert!(big_bomb.beats(&bomb));
        assert!(!bomb.beats(&big_bomb));
    }

    #[test]
    fn same_shape_compares_by_value() {
        assert!(combo("2S").beats(&combo("AC")));
        assert!(combo("KC KH").beats(&combo("QC QS")));
        assert!(!combo("QC QH").beats(&combo("QD QS")));
        assert!(!combo("KC KH").beats(&combo("3C")));
    }

    #[test]
    fn variable_length_shapes_need_equal_length() {
        let short = combo("4C 5H 6S 7D 8C");
        let long = combo("3C 4H 5S 6D 7C 8D");
        assert!(!short.beats(&long));
        assert!(!long.beats(&short));
        assert!(combo("5C 6H 7S 8D 9C").beats(&short));
    }

    #[test]
    fn invalid_and_pass_never_win() {
        let invalid = combo("9C 8S");
        let pass = Combination::pass();
        let single = combo("3C");
        assert!(!invalid.beats(&single));
        assert!(!single.beats(&invalid));
        assert!(!pass.beats(&single));
        assert!(!single.beats(&pass));
        assert!(single.can_follow(&pass));
        assert!(!invalid.can_follow(&pass));
    }

    #[test]
    fn invalid_and_pass_carry_no_rank() {
        assert_eq!(classify(&parse_cards("9C 8S").unwrap()), (Shape::Invalid, 0));
        assert_eq!(combo("9C 8S").rank(), None);
        assert_eq!(Combination::pass().rank(), None);
        assert_eq!(combo("9C").rank(), Some(Rank::Nine));
    }

    #[test]
    fn defining_ranks_follow_groups() {
        assert_eq!(
            combo("3C 3H 4C 4H 5C 5H").defining_ranks(),
            vec![Rank::Three, Rank::Four, Rank::Five]
        );
        assert_eq!(combo("4C 4H 9C 9H 9S").defining_ranks(), vec![Rank::Nine]);
        assert!(combo("9C 8S").defining_ranks().is_empty());
    }

    #[test]
    fn merge_reclassifies() {
        let pair = combo("8C 8H");
        let merged = pair.merge(&combo("8S"));
        assert_eq!(merged.shape(), Shape::Triple);
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn serde_roundtrip_reclassifies() {
        let original = combo("6C 6H 6S 9C 9H");
        let json = serde_json::to_string(&original).unwrap();
        assert!(json.starts_with('['));
        let restored: Combination = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, original);
        assert_eq!(restored.shape(), Shape::TripleWithPair);
    }

    #[test]
    fn display_lists_cards() {
        assert_eq!(combo("9H 9C").to_string(), "pair(9C 9H)");
        assert_eq!(Combination::pass().to_string(), "pass");
    }
}
