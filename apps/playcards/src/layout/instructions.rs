//! Geometry and output types shared by the text fitters.
//!
//! Coordinates are PDF user-space points: origin at the bottom-left of the page,
//! y grows upward.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::StandardFont;

/// An axis-aligned rectangle a field is fitted into.
///
/// For wrapped text `y` is the baseline of the first line (top anchor). For
/// centered single-line text and for borders `y` is the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Region {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One run of text to place on the page. `(x, y)` is the start of the baseline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawInstruction {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub font: StandardFont,
    pub font_size: f32,
}

/// How a fitter arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FitOutcome {
    /// Blank or absent text. Nothing is drawn.
    Empty,
    /// The text fits the region at `font_size`, the largest size in range that does.
    Fitted { font_size: u16 },
    /// Nothing in range fits; the text is drawn at the minimum size and spills
    /// out of the region.
    Overflowed { font_size: u16 },
}

/// Draw instructions produced for one field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub runs: Vec<DrawInstruction>,
    pub outcome: FitOutcome,
}

impl FitResult {
    pub fn empty() -> Self {
        Self {
            runs: Vec::new(),
            outcome: FitOutcome::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// True unless the minimum-size fallback was used.
    pub fn fitted(&self) -> bool {
        !matches!(self.outcome, FitOutcome::Overflowed { .. })
    }

    /// Font size the runs were laid out at, if anything was laid out.
    pub fn font_size(&self) -> Option<u16> {
        match self.outcome {
            FitOutcome::Empty => None,
            FitOutcome::Fitted { font_size } | FitOutcome::Overflowed { font_size } => {
                Some(font_size)
            }
        }
    }
}

/// Returns the trimmed text, or `None` when there is nothing to draw.
pub(crate) fn visible_text(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}
