// Deck generation: turns parsed tracks into code pages and card-face pages.
// CPU-bound composition runs inside tokio::task::spawn_blocking.

pub mod deck;

pub use deck::{DeckGenerator, DeckSettings, DeckSummary};
