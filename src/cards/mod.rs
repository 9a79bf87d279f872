pub mod card;
pub mod deck;
pub mod hand;
pub mod hole;
pub mod rank;
pub mod street;
pub mod suit;
