pub mod card;
pub mod hand;
pub mod rank;
pub mod suit;
