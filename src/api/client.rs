use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{ApiError, ApiResult, ContentSource, Item, Section};

pub const DEFAULT_BASE_URL: &str = "https://hacker-news.firebaseio.com/v0";

/// HTTP client for the Hacker News Firebase API.
#[derive(Debug, Clone)]
pub struct HnClient {
    client: Client,
    base_url: String,
}

impl HnClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("frontpage/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|source| ApiError::Request {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn listing_url(&self, section: Section) -> String {
        format!("{}/{}.json", self.base_url, section.endpoint())
    }

    fn item_url(&self, id: u64) -> String {
        format!("{}/item/{id}.json", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ApiResult<T> {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Request {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "content API returned an error status");
            return Err(ApiError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| ApiError::Request {
            url: url.clone(),
            source,
        })?;
        decode(&url, &body)
    }
}

#[async_trait]
impl ContentSource for HnClient {
    async fn list_ids(&self, section: Section) -> ApiResult<Vec<u64>> {
        let url = self.listing_url(section);
        debug!(%url, "fetching listing");
        let ids: Option<Vec<u64>> = self.get_json(url).await?;
        Ok(ids.unwrap_or_default())
    }

    async fn get_item(&self, id: u64) -> ApiResult<Option<Item>> {
        self.get_json(self.item_url(id)).await
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &[u8]) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|source| ApiError::Decode {
        url: url.to_string(),
        source,
    })
}

/// Validate `base_url` and strip any trailing slash.
fn normalize_base_url(base_url: &str) -> ApiResult<String> {
    let trimmed = base_url.trim().trim_end_matches('/');
    match Url::parse(trimmed) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(trimmed.to_string()),
        _ => Err(ApiError::BaseUrl(base_url.to_string())),
    }
}
