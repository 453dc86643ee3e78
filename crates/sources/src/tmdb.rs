//! TMDB v3 provider
//!
//! Endpoints used:
//! - `/{movie|tv}/{id}`: detail record with authoritative genres
//! - `/{movie|tv}/{id}/similar`: provider-ranked similar items
//! - `/trending/{movie|tv}/week`: weekly trending list
//!
//! Every request carries `api_key` and `language` query parameters.
//! Response bodies are normalized by `catalog::wire`.

use crate::error::{ProviderError, Result};
use crate::provider::CatalogProvider;
use async_trait::async_trait;
use catalog::{CatalogDetail, CatalogItem, ItemKey, MediaKind, wire};
use reqwest::{Client as HttpClient, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    language: String,
}

impl TmdbProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            api_url: DEFAULT_API_URL.to_string(),
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    /// Point the provider at another base URL (trailing slash is ignored)
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Per-request timeout on the underlying HTTP client
    pub fn with_request_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// GET `path` and return the body of a successful response.
    ///
    /// `key` is only used to report a 404 as `NotFound`.
    async fn fetch(&self, path: &str, key: Option<ItemKey>) -> Result<String> {
        let url = format!("{}{}", self.api_url, path);
        debug!(%url, "Requesting catalog provider");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            if let Some(key) = key {
                return Err(ProviderError::NotFound { key });
            }
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl CatalogProvider for TmdbProvider {
    #[instrument(skip(self), fields(key = %key))]
    async fn get_detail(&self, key: ItemKey) -> Result<CatalogDetail> {
        let path = format!("/{}/{}", key.kind.provider_segment(), key.id);
        let body = self.fetch(&path, Some(key)).await?;
        Ok(wire::parse_detail(&body, key.kind)?)
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn get_candidates(&self, key: ItemKey) -> Result<Vec<CatalogItem>> {
        let path = format!("/{}/{}/similar", key.kind.provider_segment(), key.id);
        let body = self.fetch(&path, Some(key)).await?;
        let items = wire::parse_page(&body, key.kind)?;
        debug!(count = items.len(), "Fetched similar items");
        Ok(items)
    }

    #[instrument(skip(self), fields(kind = %kind))]
    async fn get_trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
        let path = format!("/trending/{}/week", kind.provider_segment());
        let body = self.fetch(&path, None).await?;
        let items = wire::parse_page(&body, kind)?;
        debug!(count = items.len(), "Fetched trending items");
        Ok(items)
    }

    fn clone_for_task(&self) -> Arc<dyn CatalogProvider> {
        Arc::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
