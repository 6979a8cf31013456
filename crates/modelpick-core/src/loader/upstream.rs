//! Direct OpenRouter catalog source with a TTL cache.
//!
//! Used instead of the `/api/models` backend. The listing is cached for
//! `cache_ttl`; when a refresh fails the last good listing is served, however
//! old. Only when nothing was ever fetched does the failure reach the loader.

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::Result;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;
use url::Url;

use super::error::CatalogError;
use super::source::{CatalogSource, endpoint_url, get_json, http_client};
use crate::catalog::{ModelDescriptor, normalize_entries};

#[derive(Debug)]
struct CachedCatalog {
    models: Vec<ModelDescriptor>,
    fetched_at: Instant,
}

#[derive(Debug)]
pub struct OpenRouterSource {
    client: Client,
    endpoint: Url,
    cache_ttl: Duration,
    cache: Mutex<Option<CachedCatalog>>,
}

impl OpenRouterSource {
    pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
    pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

    pub fn new(base_url: &str, timeout: Duration, cache_ttl: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint_url(base_url, "models")?,
            cache_ttl,
            cache: Mutex::new(None),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Returns the cached listing if fresh, otherwise refreshes it.
    pub async fn models(&self) -> Result<Vec<ModelDescriptor>, CatalogError> {
        {
            let cache = self.cache.lock().await;
            if let Some(cached) = cache
                .as_ref()
                .filter(|c| c.fetched_at.elapsed() < self.cache_ttl)
            {
                tracing::debug!(count = cached.models.len(), "Returning cached models");
                return Ok(cached.models.clone());
            }
        }

        match self.fetch_listing().await {
            Ok(models) => {
                tracing::info!(count = models.len(), "Fetched models from OpenRouter");
                *self.cache.lock().await = Some(CachedCatalog {
                    models: models.clone(),
                    fetched_at: Instant::now(),
                });
                Ok(models)
            }
            Err(err) => {
                let cache = self.cache.lock().await;
                if let Some(cached) = cache.as_ref() {
                    tracing::warn!(error = %err, "OpenRouter refresh failed; returning cached models");
                    return Ok(cached.models.clone());
                }
                Err(err)
            }
        }
    }

    async fn fetch_listing(&self) -> Result<Vec<ModelDescriptor>, CatalogError> {
        tracing::debug!(url = %self.endpoint, "Fetching models from OpenRouter");
        let payload = get_json(&self.client, &self.endpoint).await?;
        let Some(entries) = payload.get("data").and_then(Value::as_array) else {
            return Err(CatalogError::Parse(
                "expected an object with a `data` array".to_string(),
            ));
        };
        let models = normalize_entries(entries);
        if models.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(models)
    }
}

impl CatalogSource for OpenRouterSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>, CatalogError>> + Send {
        self.models()
    }
}
