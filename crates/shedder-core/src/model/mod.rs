pub mod card;
pub mod combination;
pub mod deck;
pub mod hand;
pub mod player;
pub mod rank;
pub mod suit;
