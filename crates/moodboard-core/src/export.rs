//! Downloading a chosen image for insertion into a design tool or a file.

use base64::Engine;
use serde::Serialize;
use std::time::Duration;

use crate::error::ExportError;
use crate::types::{unix_millis, ImageRecord};

/// Downloaded bytes of one board image.
#[derive(Debug, Clone)]
pub struct ExportPayload {
    pub record: ImageRecord,
    pub bytes: Vec<u8>,
    /// `Content-Type` reported by the server, if any
    pub content_type: Option<String>,
}

/// The `insert-image` message a design-tool host consumes.
#[derive(Debug, Serialize)]
pub struct HostMessage<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// Base64-encoded image bytes
    pub bytes: String,
    pub name: &'a str,
    pub source: &'a str,
    pub photographer: &'a str,
}

impl ExportPayload {
    /// Canvas node name: `<title> (<source>)`, plus ` by <photographer>`
    /// when attribution applies.
    pub fn node_name(&self) -> String {
        let title = if self.record.title.trim().is_empty() {
            "Mood Board Image"
        } else {
            self.record.title.as_str()
        };
        let mut name = format!("{title} ({})", self.record.source);
        if self.record.shows_attribution() {
            name.push_str(" by ");
            name.push_str(&self.record.photographer);
        }
        name
    }

    pub fn host_message(&self) -> HostMessage<'_> {
        HostMessage {
            kind: "insert-image",
            bytes: base64::engine::general_purpose::STANDARD.encode(&self.bytes),
            name: &self.record.title,
            source: &self.record.source,
            photographer: &self.record.photographer,
        }
    }

    /// File extension derived from the content type, then the URL.
    pub fn file_extension(&self) -> &'static str {
        let mime = self
            .content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());
        match mime.as_deref() {
            Some("image/png") => return "png",
            Some("image/webp") => return "webp",
            Some("image/gif") => return "gif",
            Some("image/jpeg") | Some("image/jpg") => return "jpg",
            _ => {}
        }

        let path = self.record.url.split(['?', '#']).next().unwrap_or_default();
        match path.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
            Some("png") => "png",
            Some("webp") => "webp",
            Some("gif") => "gif",
            _ => "jpg",
        }
    }
}

/// Default download name: `<prefix>-<keywords, whitespace as '-'>-<millis>.<ext>`.
pub fn download_file_name(prefix: &str, keywords: &str, ext: &str) -> String {
    let slug = keywords.split_whitespace().collect::<Vec<_>>().join("-");
    format!("{prefix}-{slug}-{}.{ext}", unix_millis())
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches full-resolution image bytes, falling back to the thumbnail.
#[derive(Clone)]
pub struct ImageDownloader {
    client: reqwest::Client,
    /// Bound on each fetch, headers and body together
    timeout: Duration,
}

impl ImageDownloader {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn download(&self, record: &ImageRecord) -> Result<ExportPayload, ExportError> {
        match self.fetch(&record.url).await {
            Ok((bytes, content_type)) => Ok(ExportPayload {
                record: record.clone(),
                bytes,
                content_type,
            }),
            Err(e) if record.thumbnail != record.url => {
                tracing::warn!("{e}, trying thumbnail");
                let (bytes, content_type) = self.fetch(&record.thumbnail).await?;
                Ok(ExportPayload {
                    record: record.clone(),
                    bytes,
                    content_type,
                })
            }
            Err(e) => Err(e),
        }
    }

    async fn fetch(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ExportError> {
        tracing::debug!("Downloading {url}");
        match tokio::time::timeout(self.timeout, self.fetch_unbounded(url)).await {
            Ok(result) => result,
            Err(_) => Err(ExportError::Timeout {
                url: url.to_string(),
                timeout_ms: self.timeout.as_millis() as u64,
            }),
        }
    }

    async fn fetch_unbounded(&self, url: &str) -> Result<(Vec<u8>, Option<String>), ExportError> {
        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ExportError::Download {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ExportError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(String::from);
        let bytes = resp.bytes().await.map_err(|e| ExportError::Download {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        if bytes.is_empty() {
            return Err(ExportError::EmptyBody {
                url: url.to_string(),
            });
        }
        Ok((bytes.to_vec(), content_type))
    }
}

impl Default for ImageDownloader {
    fn default() -> Self {
        Self::new(crate::sources::http_client())
    }
}
