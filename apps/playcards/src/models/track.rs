use serde::{Deserialize, Serialize};

/// One track as it appears on a card. Absent or empty fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackRecord {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub release_date: Option<String>,
    pub track_id: Option<String>,
}

impl TrackRecord {
    /// The year shown on the card: the release date up to its first `-`.
    /// `"1975-10-31"` → `"1975"`, `"1975"` → `"1975"`.
    pub fn year_label(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .and_then(|date| date.split('-').next())
            .map(str::trim)
            .filter(|year| !year.is_empty())
    }
}

/// One CSV row of a playlist export.
///
/// Each field can come from the export's column or from its short name. When
/// a file has both, the export column wins unless its cell is empty.
#[derive(Debug, Default, Deserialize)]
pub struct TrackRow {
    #[serde(rename = "Artist Name(s)", default)]
    artist_names: Option<String>,
    #[serde(rename = "Artist", default)]
    artist: Option<String>,
    #[serde(rename = "Track Name", default)]
    track_name: Option<String>,
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Release Date", default)]
    release_date: Option<String>,
    #[serde(rename = "Year", default)]
    year: Option<String>,
    #[serde(rename = "Track ID", default)]
    track_id: Option<String>,
    #[serde(rename = "Track Identifier", default)]
    track_identifier: Option<String>,
}

impl From<TrackRow> for TrackRecord {
    fn from(row: TrackRow) -> Self {
        TrackRecord {
            artist: row.artist_names.or(row.artist),
            title: row.track_name.or(row.title),
            release_date: row.release_date.or(row.year),
            track_id: row.track_id.or(row.track_identifier),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_date(date: Option<&str>) -> TrackRecord {
        TrackRecord {
            release_date: date.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_year_label_from_full_date() {
        assert_eq!(with_date(Some("1975-10-31")).year_label(), Some("1975"));
    }

    #[test]
    fn test_year_label_from_year_only() {
        assert_eq!(with_date(Some("1975")).year_label(), Some("1975"));
    }

    #[test]
    fn test_year_label_missing_or_malformed() {
        assert_eq!(with_date(None).year_label(), None);
        assert_eq!(with_date(Some("-06-10")).year_label(), None);
    }

    #[test]
    fn test_export_column_wins_over_short_name() {
        let row = TrackRow {
            artist_names: Some("Queen".to_string()),
            artist: Some("Freddie".to_string()),
            title: Some("Title only".to_string()),
            ..Default::default()
        };
        let track = TrackRecord::from(row);
        assert_eq!(track.artist.as_deref(), Some("Queen"));
        assert_eq!(track.title.as_deref(), Some("Title only"));
        assert_eq!(track.track_id, None);
    }
}
