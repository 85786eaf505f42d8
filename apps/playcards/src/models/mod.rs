pub mod track;

pub use track::{TrackRecord, TrackRow};
