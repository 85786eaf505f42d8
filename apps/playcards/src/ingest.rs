//! CSV ingestion — reads a playlist export into `TrackRecord`s.

use std::io::Read;
use std::path::Path;

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{TrackRecord, TrackRow};

/// Reads every record from the CSV file at `path`.
pub fn read_tracks(path: &Path) -> Result<Vec<TrackRecord>, AppError> {
    let file = std::fs::File::open(path)?;
    let tracks = parse_tracks(file)?;
    info!(path = %path.display(), tracks = tracks.len(), "Loaded track list");
    Ok(tracks)
}

/// Parses CSV with a header row. Surrounding whitespace is trimmed from every
/// cell; unknown columns are ignored.
pub fn parse_tracks<R: Read>(reader: R) -> Result<Vec<TrackRecord>, AppError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut tracks = Vec::new();
    for (row, record) in csv_reader.deserialize::<TrackRow>().enumerate() {
        let track = TrackRecord::from(record?);
        if track.track_id.is_none() {
            debug!(row = row + 1, "Track has no identifier");
        }
        tracks.push(track);
    }
    Ok(tracks)
}
