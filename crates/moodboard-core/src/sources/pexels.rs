//! Pexels photo search (primary source).

use async_trait::async_trait;
use serde::Deserialize;

use super::ImageSource;
use crate::config::{resolve_credential, PexelsConfig};
use crate::error::{SourceError, SourceResult};
use crate::types::{ImageRecord, PHOTOGRAPHER_UNKNOWN, SOURCE_PEXELS};

/// Pexels `/v1/search` client.
pub struct PexelsSource {
    api_key: Option<String>,
    config: PexelsConfig,
    client: reqwest::Client,
}

impl PexelsSource {
    pub fn new(config: &PexelsConfig, client: reqwest::Client) -> Self {
        Self {
            api_key: resolve_credential(&config.api_key),
            config: config.clone(),
            client,
        }
    }

    fn request(&self, api_key: &str, keywords: &str, limit: usize) -> reqwest::RequestBuilder {
        let per_page = limit.to_string();
        self.client
            .get(&self.config.endpoint)
            .header("Authorization", api_key)
            .query(&[
                ("query", keywords),
                ("per_page", per_page.as_str()),
                ("orientation", self.config.orientation.as_str()),
                ("size", self.config.size.as_str()),
            ])
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct SearchResponse {
    photos: Vec<Photo>,
}

#[derive(Deserialize)]
struct Photo {
    id: u64,
    width: Option<u32>,
    height: Option<u32>,
    photographer: Option<String>,
    alt: Option<String>,
    src: PhotoSrc,
}

#[derive(Deserialize)]
struct PhotoSrc {
    original: String,
    large: Option<String>,
}

fn map_photo(photo: Photo) -> Option<ImageRecord> {
    if photo.src.original.is_empty() {
        return None;
    }
    let photographer = photo
        .photographer
        .filter(|p| !p.trim().is_empty())
        .unwrap_or_else(|| PHOTOGRAPHER_UNKNOWN.to_string());

    Some(
        ImageRecord::new(photo.id.to_string(), photo.src.original, SOURCE_PEXELS)
            .with_thumbnail(photo.src.large)
            .with_title(photo.alt.unwrap_or_default())
            .with_photographer(photographer)
            .with_dimensions(photo.width, photo.height),
    )
}

/// Map a raw search body to records.
fn parse_response(body: &str) -> SourceResult<Vec<ImageRecord>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed {
            provider: SOURCE_PEXELS.to_string(),
            message: e.to_string(),
        })?;
    Ok(response.photos.into_iter().filter_map(map_photo).collect())
}

#[async_trait]
impl ImageSource for PexelsSource {
    fn name(&self) -> &str {
        SOURCE_PEXELS
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn search(&self, keywords: &str, limit: usize) -> SourceResult<Vec<ImageRecord>> {
        let api_key = self.api_key.as_deref().ok_or_else(|| SourceError::NotConfigured {
            provider: SOURCE_PEXELS.to_string(),
        })?;

        tracing::debug!("Searching Pexels for \"{keywords}\"");
        let resp = self
            .request(api_key, keywords, limit)
            .send()
            .await
            .map_err(|e| SourceError::Request {
                provider: SOURCE_PEXELS.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                provider: SOURCE_PEXELS.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| SourceError::Request {
            provider: SOURCE_PEXELS.to_string(),
            message: e.to_string(),
        })?;
        parse_response(&body)
    }
}
