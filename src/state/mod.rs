pub mod card;
pub mod deck;
pub mod pan;
pub mod tuning;

pub use card::CardSurface;
pub use deck::{Deck, DeckAction};
pub use pan::PanRecognizer;
