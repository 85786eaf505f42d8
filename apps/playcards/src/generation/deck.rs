//! Deck composition — alternating code and text pages.
//!
//! Flow: chunk tracks by page capacity → code page (left-to-right) →
//!       text page (mirrored unless asked otherwise) → repeat.
//!
//! Composition only talks to a `PageSurface`, so one pass can produce the PDF
//! and the recorded layout dump together.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::codes::{CodeImageGenerator, IconCache, IconSource};
use crate::errors::AppError;
use crate::layout::{layout_card, CardStyle, ColumnOrder, GridLayout};
use crate::models::TrackRecord;
use crate::render::{PageSurface, PdfSurface, SurfaceOp, TeeSurface};

/// Geometry and styling for a whole deck.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSettings {
    pub grid: GridLayout,
    pub card: CardStyle,
    /// Column order of the text pages. Code pages are always left-to-right.
    pub text_order: ColumnOrder,
}

impl DeckSettings {
    /// A4 sheets of 6.5cm cards with the default card style.
    pub fn a4(text_order: ColumnOrder) -> Result<Self, AppError> {
        Ok(Self {
            grid: GridLayout::default_a4()?,
            card: CardStyle::default(),
            text_order,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeckSummary {
    pub cards: usize,
    pub pages: usize,
    /// Card fields that fell back to the minimum font size.
    pub overflowed_fields: usize,
}

/// Draws every track onto `surface`, two pages per chunk of `per_page` tracks.
pub fn compose_deck<S: PageSurface>(
    tracks: &[TrackRecord],
    settings: &DeckSettings,
    codes: &CodeImageGenerator,
    surface: &mut S,
) -> Result<DeckSummary, AppError> {
    let grid = &settings.grid;
    let mut summary = DeckSummary::default();

    for (chunk_index, chunk) in tracks.chunks(grid.per_page()).enumerate() {
        let first = chunk_index * grid.per_page();

        for (slot, track) in chunk.iter().enumerate() {
            if track.track_id.is_none() {
                warn!(row = first + slot, "Track has no identifier; encoding an empty id");
            }
            let payload = codes.payload(track.track_id.as_deref());
            let image = codes.render(&payload)?;
            surface.draw_image(&image, &grid.cell(slot, ColumnOrder::LeftToRight))?;
        }
        surface.show_page();

        for (slot, track) in chunk.iter().enumerate() {
            let (x, y) = grid.origin(slot, settings.text_order);
            let face = layout_card(&*surface, track, x, y, grid.box_size, &settings.card);
            if face.artist.is_empty() && face.title.is_empty() {
                debug!(row = first + slot, "Card has neither artist nor title");
            }
            debug!(
                row = first + slot,
                artist = ?face.artist.font_size(),
                year = ?face.year.font_size(),
                title = ?face.title.font_size(),
                "Laid out card"
            );

            for field in face.overflowed_fields() {
                warn!(
                    row = first + slot,
                    field, "Text does not fit its band; drawing at the minimum size"
                );
                summary.overflowed_fields += 1;
            }

            surface.stroke_rect(&face.border, face.border_width);
            for run in face.runs() {
                surface.draw_text(run);
            }
        }
        surface.show_page();

        summary.cards += chunk.len();
        summary.pages += 2;
        debug!(chunk = chunk_index, cards = chunk.len(), "Composed sheet");
    }

    Ok(summary)
}

/// A finished PDF plus what went into it.
#[derive(Debug)]
pub struct RenderedDeck {
    pub pdf: Vec<u8>,
    pub summary: DeckSummary,
    /// Every drawing operation, when recording was requested.
    pub layout: Option<Vec<SurfaceOp>>,
}

/// Settings and code generator for one run, shareable with blocking tasks.
#[derive(Clone)]
pub struct DeckGenerator {
    settings: Arc<DeckSettings>,
    codes: Arc<CodeImageGenerator>,
}

impl DeckGenerator {
    pub fn new(settings: DeckSettings, codes: CodeImageGenerator) -> Self {
        Self {
            settings: Arc::new(settings),
            codes: Arc::new(codes),
        }
    }

    /// Resolves the optional icon through `icons` and builds the generator.
    pub async fn prepare<S: IconSource>(
        settings: DeckSettings,
        scheme: &str,
        icon: Option<&str>,
        icons: &mut IconCache<S>,
    ) -> Result<Self, AppError> {
        let icon = match icon {
            Some(location) => Some(icons.resolve(location).await?),
            None => None,
        };
        Ok(Self::new(settings, CodeImageGenerator::new(scheme, icon)))
    }

    pub fn settings(&self) -> &DeckSettings {
        &self.settings
    }

    /// Composes the PDF on the blocking pool. With `record_layout` the same
    /// pass also records every drawing operation.
    pub async fn render_pdf(
        &self,
        tracks: Arc<Vec<TrackRecord>>,
        record_layout: bool,
    ) -> Result<RenderedDeck, AppError> {
        let settings = Arc::clone(&self.settings);
        let codes = Arc::clone(&self.codes);

        let rendered = tokio::task::spawn_blocking(move || {
            let pdf = PdfSurface::new(settings.grid.page);
            let mut surface = TeeSurface::new(pdf, record_layout);
            let summary = compose_deck(&tracks, &settings, &codes, &mut surface)?;
            let (pdf, layout) = surface.into_parts();
            Ok::<_, AppError>(RenderedDeck {
                pdf: pdf.finish(),
                summary,
                layout,
            })
        })
        .await
        .map_err(|e| {
            AppError::Internal(anyhow::anyhow!("spawn_blocking failed in deck rendering: {e}"))
        })??;

        info!(
            cards = rendered.summary.cards,
            pages = rendered.summary.pages,
            bytes = rendered.pdf.len(),
            "Rendered deck"
        );
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use bytes::Bytes;

    use super::*;
    use crate::codes::DEFAULT_SCHEME;
    use crate::layout::Region;
    use crate::render::recording::RecordingSurface;

    fn track(n: usize) -> TrackRecord {
        TrackRecord {
            artist: Some(format!("Artist {n}")),
            title: Some(format!("Song number {n}")),
            release_date: Some(format!("{}-01-01", 1960 + n)),
            track_id: Some(format!("id{n}")),
        }
    }

    fn generator(order: ColumnOrder) -> DeckGenerator {
        DeckGenerator::new(
            DeckSettings::a4(order).unwrap(),
            CodeImageGenerator::new(DEFAULT_SCHEME, None),
        )
    }

    fn record(gen: &DeckGenerator, tracks: &[TrackRecord]) -> (Vec<SurfaceOp>, DeckSummary) {
        let mut surface = RecordingSurface::new();
        let summary = compose_deck(tracks, &gen.settings, &gen.codes, &mut surface).unwrap();
        (surface.into_ops(), summary)
    }

    fn image_rects(ops: &[SurfaceOp]) -> Vec<(String, Region)> {
        ops.iter()
            .filter_map(|op| match op {
                SurfaceOp::Image { payload, rect } => Some((payload.clone(), *rect)),
                _ => None,
            })
            .collect()
    }

    fn border_rects(ops: &[SurfaceOp]) -> Vec<Region> {
        ops.iter()
            .filter_map(|op| match op {
                SurfaceOp::Rect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_thirteen_tracks_make_two_sheets() {
        let tracks: Vec<_> = (0..13).map(track).collect();
        let (ops, summary) = record(&generator(ColumnOrder::Mirrored), &tracks);

        assert_eq!(summary.cards, 13);
        assert_eq!(summary.pages, 4);
        assert_eq!(summary.overflowed_fields, 0);

        let pages = ops.iter().filter(|op| **op == SurfaceOp::ShowPage).count();
        assert_eq!(pages, 4);
        assert_eq!(image_rects(&ops).len(), 13);
        assert_eq!(border_rects(&ops).len(), 13);
        assert_eq!(ops.last(), Some(&SurfaceOp::ShowPage));
    }

    #[test]
    fn test_code_page_precedes_text_page() {
        let tracks: Vec<_> = (0..2).map(track).collect();
        let (ops, _) = record(&generator(ColumnOrder::Mirrored), &tracks);

        let first_break = ops.iter().position(|op| *op == SurfaceOp::ShowPage).unwrap();
        assert!(ops[..first_break]
            .iter()
            .all(|op| matches!(op, SurfaceOp::Image { .. })));
        assert!(ops[first_break + 1..]
            .iter()
            .all(|op| !matches!(op, SurfaceOp::Image { .. })));
    }

    #[test]
    fn test_text_page_mirrors_code_page() {
        let gen = generator(ColumnOrder::Mirrored);
        let tracks: Vec<_> = (0..3).map(track).collect();
        let (ops, _) = record(&gen, &tracks);

        let codes = image_rects(&ops);
        let borders = border_rects(&ops);
        assert_eq!(codes[0].0, "spotify:track:id0");
        // Track 0's code is in the left column; its face is in the right one.
        assert_eq!(borders[0].x, codes[2].1.x);
        assert_eq!(borders[2].x, codes[0].1.x);
        assert_eq!(borders[0].y, codes[0].1.y);
    }

    #[test]
    fn test_left_to_right_text_page_matches_code_page() {
        let tracks: Vec<_> = (0..3).map(track).collect();
        let (ops, _) = record(&generator(ColumnOrder::LeftToRight), &tracks);

        let codes = image_rects(&ops);
        let borders = border_rects(&ops);
        for (code, border) in codes.iter().zip(&borders) {
            assert_eq!(code.1, *border);
        }
    }

    #[test]
    fn test_missing_id_still_gets_a_code() {
        let tracks = vec![TrackRecord {
            track_id: None,
            ..track(0)
        }];
        let (ops, summary) = record(&generator(ColumnOrder::Mirrored), &tracks);
        assert_eq!(summary.cards, 1);
        assert_eq!(image_rects(&ops)[0].0, "spotify:track:");
    }

    #[test]
    fn test_empty_deck_composes_nothing() {
        let (ops, summary) = record(&generator(ColumnOrder::Mirrored), &[]);
        assert!(ops.is_empty());
        assert_eq!(summary, DeckSummary::default());
    }

    #[tokio::test]
    async fn test_render_pdf_produces_a_document() {
        let tracks = Arc::new((0..5).map(track).collect::<Vec<_>>());
        let rendered = generator(ColumnOrder::Mirrored)
            .render_pdf(tracks, false)
            .await
            .unwrap();

        assert!(rendered.pdf.starts_with(b"%PDF-"));
        assert_eq!(rendered.summary.cards, 5);
        assert_eq!(rendered.summary.pages, 2);
        assert!(rendered.layout.is_none());
    }

    #[tokio::test]
    async fn test_render_pdf_records_layout_in_the_same_pass() {
        let gen = generator(ColumnOrder::Mirrored);
        let tracks: Vec<_> = (0..5).map(track).collect();
        let rendered = gen
            .render_pdf(Arc::new(tracks.clone()), true)
            .await
            .unwrap();

        let layout = rendered.layout.expect("layout was requested");
        let (expected, summary) = record(&gen, &tracks);
        assert_eq!(layout, expected);
        assert_eq!(rendered.summary, summary);
        assert!(rendered.pdf.starts_with(b"%PDF-"));
    }

    struct NoNetwork;

    #[async_trait]
    impl IconSource for NoNetwork {
        async fn fetch(&self, url: &str) -> Result<Bytes, AppError> {
            Err(AppError::IconStatus {
                url: url.to_string(),
                status: 503,
            })
        }
    }

    #[tokio::test]
    async fn test_prepare_surfaces_icon_failures() {
        let mut icons = IconCache::new(NoNetwork);
        let result = DeckGenerator::prepare(
            DeckSettings::a4(ColumnOrder::Mirrored).unwrap(),
            DEFAULT_SCHEME,
            Some("https://example.com/icon.png"),
            &mut icons,
        )
        .await;
        assert!(matches!(result, Err(AppError::IconStatus { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_prepare_without_icon() {
        let mut icons = IconCache::new(NoNetwork);
        let gen = DeckGenerator::prepare(
            DeckSettings::a4(ColumnOrder::LeftToRight).unwrap(),
            "custom:scheme",
            None,
            &mut icons,
        )
        .await
        .unwrap();
        assert_eq!(gen.settings().text_order, ColumnOrder::LeftToRight);
        let (ops, _) = record(&gen, &[track(1)]);
        assert_eq!(image_rects(&ops)[0].0, "custom:scheme:id1");
    }
}
