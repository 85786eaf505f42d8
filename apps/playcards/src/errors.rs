use thiserror::Error;

/// Application-level error type.
///
/// The text fitters never fail; everything here comes from the environment the
/// deck is generated in (files, network, image data, configuration).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to fetch icon from {url}: {source}")]
    IconFetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Icon request to {url} returned status {status}")]
    IconStatus { url: String, status: u16 },

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("QR encoding failed for '{payload}': {source}")]
    QrEncode {
        payload: String,
        #[source]
        source: qrcode::types::QrError,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
