//! Pinterest images via Google Custom Search (secondary source).
//!
//! Pinterest has no public search API, so we run a site-restricted image
//! search instead. Yield per call is lower than Pexels, which is why the
//! aggregator calls this source more than once by default.

use async_trait::async_trait;
use serde::Deserialize;

use super::ImageSource;
use crate::config::{resolve_credential, PinterestConfig};
use crate::error::{SourceError, SourceResult};
use crate::types::{call_stamp, ImageRecord, PHOTOGRAPHER_UNKNOWN, SOURCE_PINTEREST};

/// Google Custom Search client restricted to one site.
pub struct PinterestSource {
    credentials: Option<(String, String)>,
    config: PinterestConfig,
    client: reqwest::Client,
}

impl PinterestSource {
    pub fn new(config: &PinterestConfig, client: reqwest::Client) -> Self {
        let credentials = resolve_credential(&config.api_key)
            .zip(resolve_credential(&config.engine_id));
        Self {
            credentials,
            config: config.clone(),
            client,
        }
    }

    fn query(&self, keywords: &str) -> String {
        format!("{} site:{}", keywords.trim(), self.config.site)
    }

    fn request(
        &self,
        api_key: &str,
        engine_id: &str,
        keywords: &str,
        limit: usize,
    ) -> reqwest::RequestBuilder {
        let query = self.query(keywords);
        let num = limit.to_string();
        self.client.get(&self.config.endpoint).query(&[
            ("key", api_key),
            ("cx", engine_id),
            ("q", query.as_str()),
            ("searchType", "image"),
            ("num", num.as_str()),
            ("imgSize", self.config.img_size.as_str()),
            ("safe", self.config.safe.as_str()),
            ("imgType", self.config.img_type.as_str()),
        ])
    }
}

// --- Response types ---

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    link: Option<String>,
    title: Option<String>,
    image: Option<ItemImage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemImage {
    thumbnail_link: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
}

/// Map a raw search body to records; `stamp` makes ids unique per call.
fn parse_response(body: &str, stamp: &str) -> SourceResult<Vec<ImageRecord>> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| SourceError::Malformed {
            provider: SOURCE_PINTEREST.to_string(),
            message: e.to_string(),
        })?;

    let records: Vec<ImageRecord> = response
        .items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let link = item.link.filter(|l| !l.is_empty())?;
            let (thumbnail, width, height) = match item.image {
                Some(image) => (image.thumbnail_link, image.width, image.height),
                None => (None, None, None),
            };
            Some(
                ImageRecord::new(format!("pinterest-google-{stamp}-{index}"), link, SOURCE_PINTEREST)
                    .with_thumbnail(thumbnail)
                    .with_title(item.title.unwrap_or_default())
                    .with_photographer(PHOTOGRAPHER_UNKNOWN)
                    .with_dimensions(width, height),
            )
        })
        .collect();

    if records.is_empty() {
        return Err(SourceError::Empty {
            provider: SOURCE_PINTEREST.to_string(),
        });
    }
    Ok(records)
}

#[async_trait]
impl ImageSource for PinterestSource {
    fn name(&self) -> &str {
        SOURCE_PINTEREST
    }

    fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    async fn search(&self, keywords: &str, limit: usize) -> SourceResult<Vec<ImageRecord>> {
        let (api_key, engine_id) =
            self.credentials
                .as_ref()
                .ok_or_else(|| SourceError::NotConfigured {
                    provider: SOURCE_PINTEREST.to_string(),
                })?;

        tracing::debug!("Searching Pinterest via Google for \"{}\"", self.query(keywords));
        let stamp = call_stamp();
        let resp = self
            .request(api_key, engine_id, keywords, limit)
            .send()
            .await
            .map_err(|e| SourceError::Request {
                provider: SOURCE_PINTEREST.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                provider: SOURCE_PINTEREST.to_string(),
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| SourceError::Request {
            provider: SOURCE_PINTEREST.to_string(),
            message: e.to_string(),
        })?;
        parse_response(&body, &stamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &str = r#"{
        "kind": "customsearch#search",
        "items": [
            {
                "title": "Minimal sunset palette | Pinterest",
                "link": "https://i.pinimg.com/originals/aa/bb/cc.jpg",
                "displayLink": "www.pinterest.com",
                "image": {
                    "thumbnailLink": "https://encrypted-tbn0.gstatic.com/images?q=tbn:1",
                    "width": 736,
                    "height": 1104
                }
            },
            { "title": "No image block", "link": "https://i.pinimg.com/originals/dd.jpg" },
            { "title": "Missing link" }
        ]
    }"#;

    fn source(api_key: &str, engine_id: &str) -> PinterestSource {
        let config = PinterestConfig {
            api_key: api_key.to_string(),
            engine_id: engine_id.to_string(),
            ..PinterestConfig::default()
        };
        PinterestSource::new(&config, reqwest::Client::new())
    }

    #[test]
    fn test_parse_maps_fields() {
        let records = parse_response(BODY, "42-0").unwrap();
        assert_eq!(records.len(), 2); // item without a link is skipped

        let first = &records[0];
        assert_eq!(first.id, "pinterest-google-42-0-0");
        assert_eq!(first.url, "https://i.pinimg.com/originals/aa/bb/cc.jpg");
        assert_eq!(first.thumbnail, "https://encrypted-tbn0.gstatic.com/images?q=tbn:1");
        assert_eq!(first.title, "Minimal sunset palette | Pinterest");
        assert_eq!(first.photographer, PHOTOGRAPHER_UNKNOWN);
        assert_eq!((first.width, first.height), (Some(736), Some(1104)));
    }

    #[test]
    fn test_parse_thumbnail_falls_back_to_link() {
        let records = parse_response(BODY, "42-0").unwrap();
        assert_eq!(records[1].thumbnail, "https://i.pinimg.com/originals/dd.jpg");
        assert_eq!(records[1].id, "pinterest-google-42-0-1");
    }

    #[test]
    fn test_parse_empty_items_is_failure() {
        let err = parse_response(r#"{"kind": "customsearch#search"}"#, "1-0").unwrap_err();
        assert!(matches!(err, SourceError::Empty { .. }));

        let err = parse_response(r#"{"items": []}"#, "1-0").unwrap_err();
        assert!(matches!(err, SourceError::Empty { .. }));
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = parse_response("not json", "1-0").unwrap_err();
        assert!(matches!(err, SourceError::Malformed { .. }));
    }

    #[test]
    fn test_request_shape() {
        let source = source("g-key", "cse-id");
        let request = source
            .request("g-key", "cse-id", "sunset beach", 4)
            .build()
            .unwrap();
        let url = request.url().as_str();

        assert!(url.starts_with("https://www.googleapis.com/customsearch/v1?"));
        assert!(url.contains("key=g-key"));
        assert!(url.contains("cx=cse-id"));
        assert!(url.contains("q=sunset+beach+site%3Apinterest.com"));
        assert!(url.contains("searchType=image"));
        assert!(url.contains("num=4"));
        assert!(url.contains("imgSize=xlarge"));
        assert!(url.contains("safe=active"));
        assert!(url.contains("imgType=photo"));
    }

    #[test]
    fn test_both_credentials_required() {
        assert!(source("g-key", "cse-id").is_configured());
        assert!(!source("g-key", "YOUR_CUSTOM_SEARCH_ENGINE_ID").is_configured());
        assert!(!source("YOUR_GOOGLE_API_KEY", "cse-id").is_configured());
    }
}
