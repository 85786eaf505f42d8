//! Card face layout — splits a square card into artist, year and title bands.
//!
//! ```text
//! ┌──────────────────┐
//! │  artist   (40%)  │  wrapped, bold
//! ├──────────────────┤
//! │  year     (20%)  │  single line, centered
//! ├──────────────────┤
//! │  title    (40%)  │  wrapped, regular
//! └──────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::layout::centerer::{fit_single_line, LineStyle};
use crate::layout::fitter::{fit_wrapped, WrapStyle};
use crate::layout::font_metrics::{StandardFont, TextMeasure};
use crate::layout::instructions::{DrawInstruction, FitResult, Region};
use crate::models::TrackRecord;

/// Proportions, margins and font ranges of a card face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardStyle {
    pub border_width: f32,
    /// Inset from the card edge on every side of a band.
    pub margin: f32,
    /// Drop from the top of a wrapped band to its first baseline.
    pub top_margin: f32,
    pub artist_share: f32,
    pub year_share: f32,
    pub title_share: f32,
    pub artist: WrapStyle,
    pub year: LineStyle,
    pub title: WrapStyle,
}

impl Default for CardStyle {
    fn default() -> Self {
        Self {
            border_width: 3.0,
            margin: 3.0,
            top_margin: 20.0,
            artist_share: 0.40,
            year_share: 0.20,
            title_share: 0.40,
            artist: WrapStyle {
                font: StandardFont::HelveticaBold,
                min_size: 6,
                max_size: 16,
                line_spacing: 1.1,
                center_horizontally: true,
            },
            year: LineStyle {
                font: StandardFont::HelveticaBold,
                min_size: 8,
                max_size: 50,
            },
            title: WrapStyle {
                font: StandardFont::Helvetica,
                min_size: 6,
                max_size: 16,
                line_spacing: 1.1,
                center_horizontally: true,
            },
        }
    }
}

/// Everything drawn on the text side of one card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    pub border: Region,
    pub border_width: f32,
    pub artist: FitResult,
    pub year: FitResult,
    pub title: FitResult,
}

impl CardFace {
    /// All text runs, artist first.
    pub fn runs(&self) -> impl Iterator<Item = &DrawInstruction> {
        self.artist
            .runs
            .iter()
            .chain(&self.year.runs)
            .chain(&self.title.runs)
    }

    /// Names of the fields that had to fall back to the minimum size.
    pub fn overflowed_fields(&self) -> Vec<&'static str> {
        [
            ("artist", &self.artist),
            ("year", &self.year),
            ("title", &self.title),
        ]
        .into_iter()
        .filter(|(_, fit)| !fit.fitted())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Lays out the text side of a card whose bottom-left corner is `(x, y)`.
pub fn layout_card<M: TextMeasure + ?Sized>(
    measure: &M,
    track: &TrackRecord,
    x: f32,
    y: f32,
    size: f32,
    style: &CardStyle,
) -> CardFace {
    let inner_x = x + style.margin;
    let inner_width = size - 2.0 * style.margin;

    let artist_height = style.artist_share * size;
    let year_height = style.year_share * size;
    let title_height = style.title_share * size;

    let artist_top = y + size;
    let year_top = artist_top - artist_height;
    let title_top = year_top - year_height;

    let artist_region = Region::new(
        inner_x,
        artist_top - style.top_margin,
        inner_width,
        artist_height - 2.0 * style.margin,
    );
    let year_region = Region::new(
        inner_x,
        year_top - year_height + style.margin,
        inner_width,
        year_height - 2.0 * style.margin,
    );
    let title_region = Region::new(
        inner_x,
        title_top - style.top_margin,
        inner_width,
        title_height - 2.0 * style.margin,
    );

    CardFace {
        border: Region::new(x, y, size, size),
        border_width: style.border_width,
        artist: fit_wrapped(measure, track.artist.as_deref(), &style.artist, &artist_region),
        year: fit_single_line(measure, track.year_label(), &style.year, &year_region),
        title: fit_wrapped(measure, track.title.as_deref(), &style.title, &title_region),
    }
}
