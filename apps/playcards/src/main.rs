mod codes;
mod config;
mod errors;
mod generation;
mod ingest;
mod layout;
mod models;
mod output;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::codes::{HttpIconSource, IconCache};
use crate::config::Config;
use crate::generation::{DeckGenerator, DeckSettings, DeckSummary};
use crate::layout::ColumnOrder;
use crate::render::SurfaceOp;

/// Printable music-quiz cards: a QR code on one side, artist, year and title
/// on the other.
#[derive(Parser, Debug)]
#[command(name = "playcards")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Playlist export with Track ID, Track Name, Artist Name(s) and Release Date columns
    csv_file: PathBuf,

    /// Where to write the PDF
    output_pdf: PathBuf,

    /// Image (path or http(s) URL) embedded in the middle of every QR code
    #[arg(long)]
    icon: Option<String>,

    /// Prefix of the encoded payload, e.g. "spotify:track"
    #[arg(long)]
    scheme: Option<String>,

    /// Lay out the text pages in the same column order as the code pages
    #[arg(long)]
    left_to_right: bool,

    /// Also write the computed layout as JSON
    #[arg(long)]
    layout_json: Option<PathBuf>,
}

#[derive(Serialize)]
struct LayoutDump<'a> {
    settings: &'a DeckSettings,
    summary: &'a DeckSummary,
    ops: &'a [SurfaceOp],
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?.with_overrides(cli.scheme.clone(), cli.icon.clone());

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting playcards v{}", env!("CARGO_PKG_VERSION"));

    let tracks = ingest::read_tracks(&cli.csv_file)
        .with_context(|| format!("failed to read tracks from {}", cli.csv_file.display()))?;
    let tracks = Arc::new(tracks);

    let order = if cli.left_to_right {
        ColumnOrder::LeftToRight
    } else {
        ColumnOrder::Mirrored
    };
    let settings = DeckSettings::a4(order)?;
    info!(
        "Grid: {}x{} cards of {:.1}pt, text pages {:?}",
        settings.grid.columns, settings.grid.rows, settings.grid.box_size, order
    );

    let mut icons = IconCache::new(HttpIconSource::new(config.fetch_timeout)?);
    let generator = DeckGenerator::prepare(
        settings,
        &config.code_scheme,
        config.icon.as_deref(),
        &mut icons,
    )
    .await
    .context("failed to load the QR icon")?;

    let rendered = generator
        .render_pdf(tracks, cli.layout_json.is_some())
        .await?;
    output::write_atomically(&cli.output_pdf, &rendered.pdf)
        .with_context(|| format!("failed to write {}", cli.output_pdf.display()))?;
    info!(
        "Wrote {} cards on {} pages to {}",
        rendered.summary.cards,
        rendered.summary.pages,
        cli.output_pdf.display()
    );

    if rendered.summary.overflowed_fields > 0 {
        warn!(
            "{} card fields were drawn at their minimum size and may not fit",
            rendered.summary.overflowed_fields
        );
    }

    if let (Some(path), Some(ops)) = (&cli.layout_json, &rendered.layout) {
        let dump = LayoutDump {
            settings: generator.settings(),
            summary: &rendered.summary,
            ops,
        };
        let json = serde_json::to_vec_pretty(&dump)?;
        output::write_atomically(path, &json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("Wrote layout to {}", path.display());
    }

    Ok(())
}
