//! Icon loading for the code images.
//!
//! An icon is either a local path or an `http(s)` URL. `IconCache` resolves
//! each distinct location once and hands out the decoded image; one cache
//! lives for one deck generation run.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use image::RgbaImage;
use reqwest::Client;
use tracing::{debug, info};

use crate::errors::AppError;

/// Where remote icon bytes come from. Swapped out in tests.
#[async_trait]
pub trait IconSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Bytes, AppError>;
}

/// Fetches icons over HTTP.
#[derive(Clone)]
pub struct HttpIconSource {
    client: Client,
}

impl HttpIconSource {
    pub fn new(timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl IconSource for HttpIconSource {
    async fn fetch(&self, url: &str) -> Result<Bytes, AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| AppError::IconFetch {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::IconStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| AppError::IconFetch {
                url: url.to_string(),
                source,
            })?;
        debug!(url, bytes = body.len(), "Fetched icon");
        Ok(body)
    }
}

/// True for locations that must be fetched rather than read from disk.
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Decoded icons keyed by the location they were loaded from.
pub struct IconCache<S> {
    source: S,
    icons: HashMap<String, Arc<RgbaImage>>,
}

impl<S: IconSource> IconCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            icons: HashMap::new(),
        }
    }

    /// Returns the decoded icon at `location`, loading it on first use.
    ///
    /// Failures are not cached; a later call retries the load.
    pub async fn resolve(&mut self, location: &str) -> Result<Arc<RgbaImage>, AppError> {
        if let Some(icon) = self.icons.get(location) {
            return Ok(Arc::clone(icon));
        }

        let raw = if is_remote(location) {
            self.source.fetch(location).await?
        } else {
            Bytes::from(tokio::fs::read(location).await?)
        };
        let icon = Arc::new(image::load_from_memory(&raw)?.into_rgba8());
        info!(
            location,
            width = icon.width(),
            height = icon.height(),
            "Loaded icon"
        );

        self.icons.insert(location.to_string(), Arc::clone(&icon));
        Ok(icon)
    }
}
