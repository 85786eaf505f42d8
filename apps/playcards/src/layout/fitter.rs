//! Box Text Fitter — largest font size at which wrapped text fits a region.
//!
//! # Algorithm
//! Sizes are tried from `max_size` down to `min_size`. At each size the text is
//! wrapped at an approximate character count (region width / width of "M"),
//! every line is hard-clipped to the region width, and the block is accepted
//! when `lines × line_height × line_spacing` fits the region height.
//!
//! The search is linear. The line count jumps at wrap boundaries, so "fits" is
//! not monotone in the size.
//!
//! When no size fits, the text is laid out at `min_size` anyway and spills below
//! the region. The result reports this as `FitOutcome::Overflowed`.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::{StandardFont, TextMeasure};
use crate::layout::instructions::{visible_text, DrawInstruction, FitOutcome, FitResult, Region};
use crate::layout::wrap::{chars_per_line, wrap_and_clip};

/// Styling for a wrapped, auto-sized text field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WrapStyle {
    pub font: StandardFont,
    /// Smallest size tried, and the size used when nothing fits.
    pub min_size: u16,
    /// Largest size tried.
    pub max_size: u16,
    /// Multiplier applied to the line height between baselines.
    pub line_spacing: f32,
    /// Center each line inside the region instead of flushing it left.
    pub center_horizontally: bool,
}

/// Fits `text` into `region`, wrapping on word boundaries.
///
/// `region.y` is the baseline of the first line; following lines go downward.
/// Blank or absent text yields an empty result.
pub fn fit_wrapped<M: TextMeasure + ?Sized>(
    measure: &M,
    text: Option<&str>,
    style: &WrapStyle,
    region: &Region,
) -> FitResult {
    let Some(text) = visible_text(text) else {
        return FitResult::empty();
    };

    for size in (style.min_size..=style.max_size).rev() {
        let size_pt = f32::from(size);
        let Some(per_line) = chars_per_line(measure, style.font, size_pt, region.width) else {
            continue;
        };

        let lines = wrap_and_clip(measure, text, style.font, size_pt, region.width, per_line);
        let line_advance = measure.line_height(style.font, size_pt) * style.line_spacing;
        let block_height = lines.len() as f32 * line_advance;

        if block_height <= region.height {
            return FitResult {
                runs: place_lines(measure, lines, style, size_pt, line_advance, region),
                outcome: FitOutcome::Fitted { font_size: size },
            };
        }
    }

    // Nothing in range fits: lay out at the minimum size and let it overflow.
    let size_pt = f32::from(style.min_size);
    let per_line = chars_per_line(measure, style.font, size_pt, region.width).unwrap_or(1);
    let lines = wrap_and_clip(measure, text, style.font, size_pt, region.width, per_line);
    let line_advance = measure.line_height(style.font, size_pt) * style.line_spacing;

    FitResult {
        runs: place_lines(measure, lines, style, size_pt, line_advance, region),
        outcome: FitOutcome::Overflowed {
            font_size: style.min_size,
        },
    }
}

/// Stacks `lines` downward from `region.y`, one `line_advance` apart.
fn place_lines<M: TextMeasure + ?Sized>(
    measure: &M,
    lines: Vec<String>,
    style: &WrapStyle,
    size: f32,
    line_advance: f32,
    region: &Region,
) -> Vec<DrawInstruction> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            let x = if style.center_horizontally {
                let line_width = measure.text_width(&line, style.font, size);
                region.x + (region.width - line_width) / 2.0
            } else {
                region.x
            };
            DrawInstruction {
                text: line,
                x,
                y: region.y - i as f32 * line_advance,
                font: style.font,
                font_size: size,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
