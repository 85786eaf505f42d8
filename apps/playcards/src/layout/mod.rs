// Text-fitting layout engine for the card faces, plus the page grid.
// Everything here is synchronous and pure. The PDF pass runs it inside
// tokio::task::spawn_blocking.

pub mod card;
pub mod centerer;
pub mod fitter;
pub mod font_metrics;
pub mod grid;
pub mod instructions;
pub mod wrap;

#[cfg(test)]
mod proptests;

// Re-export the public API consumed by the deck generator and the renderers.
pub use card::{layout_card, CardStyle};
pub use font_metrics::{StandardFont, StandardMetrics, TextMeasure};
pub use grid::{ColumnOrder, GridLayout};
pub use instructions::{DrawInstruction, Region};
