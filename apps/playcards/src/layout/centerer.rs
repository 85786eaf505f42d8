//! Single-Line Centerer — the largest size at which an unwrapped string fits,
//! centered on both axes. Used for the year.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{StandardFont, TextMeasure};
use crate::layout::instructions::{visible_text, DrawInstruction, FitOutcome, FitResult, Region};

/// Styling for a centered single-line field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub font: StandardFont,
    pub min_size: u16,
    pub max_size: u16,
}

/// Fits `text` on one line inside `region`, whose `y` is the bottom edge.
///
/// The text height is taken to be the font size (no ascender/descender
/// modelling). If no size fits, `min_size` is used and the run is still
/// centered, which may place it partly outside the region.
pub fn fit_single_line<M: TextMeasure + ?Sized>(
    measure: &M,
    text: Option<&str>,
    style: &LineStyle,
    region: &Region,
) -> FitResult {
    let Some(text) = visible_text(text) else {
        return FitResult::empty();
    };

    for size in (style.min_size..=style.max_size).rev() {
        let size_pt = f32::from(size);
        let width = measure.text_width(text, style.font, size_pt);
        let height = measure.line_height(style.font, size_pt);
        if width <= region.width && height <= region.height {
            return FitResult {
                runs: vec![centered(text, style.font, size_pt, width, height, region)],
                outcome: FitOutcome::Fitted { font_size: size },
            };
        }
    }

    let size_pt = f32::from(style.min_size);
    let width = measure.text_width(text, style.font, size_pt);
    let height = measure.line_height(style.font, size_pt);
    FitResult {
        runs: vec![centered(text, style.font, size_pt, width, height, region)],
        outcome: FitOutcome::Overflowed {
            font_size: style.min_size,
        },
    }
}

fn centered(
    text: &str,
    font: StandardFont,
    size: f32,
    width: f32,
    height: f32,
    region: &Region,
) -> DrawInstruction {
    DrawInstruction {
        text: text.to_string(),
        x: region.x + (region.width - width) / 2.0,
        y: region.y + (region.height - height) / 2.0,
        font,
        font_size: size,
    }
}
