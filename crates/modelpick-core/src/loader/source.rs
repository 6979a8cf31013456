//! Catalog sources.

use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::error::CatalogError;
use super::upstream::OpenRouterSource;
use crate::catalog::{ModelDescriptor, normalize_entries};
use crate::config::{Config, SourceKind};

/// Something that can produce a catalog snapshot.
pub trait CatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>, CatalogError>> + Send;
}

/// Fetches `GET {base}/api/models`, which returns a JSON array of models.
#[derive(Debug, Clone)]
pub struct HttpCatalogSource {
    client: Client,
    endpoint: Url,
}

impl HttpCatalogSource {
    const MODELS_PATH: &str = "api/models";

    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            endpoint: endpoint_url(base_url, Self::MODELS_PATH)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl CatalogSource for HttpCatalogSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>, CatalogError>> + Send {
        async move {
            tracing::debug!(url = %self.endpoint, "Fetching model catalog");
            let payload = get_json(&self.client, &self.endpoint).await?;
            let Value::Array(entries) = payload else {
                return Err(CatalogError::Parse(
                    "expected a JSON array of models".to_string(),
                ));
            };
            let models = normalize_entries(&entries);
            tracing::debug!(
                received = entries.len(),
                kept = models.len(),
                "Model catalog fetched"
            );
            if models.is_empty() {
                return Err(CatalogError::Empty);
            }
            Ok(models)
        }
    }
}

/// The source selected by configuration.
#[derive(Debug)]
pub enum ConfiguredSource {
    Backend(HttpCatalogSource),
    OpenRouter(OpenRouterSource),
}

impl ConfiguredSource {
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.request_timeout();
        match config.source {
            SourceKind::Backend => HttpCatalogSource::new(&config.catalog_url, timeout)
                .map(Self::Backend)
                .with_context(|| format!("invalid catalog_url '{}'", config.catalog_url)),
            SourceKind::OpenRouter => OpenRouterSource::new(
                &config.openrouter.base_url,
                timeout,
                config.openrouter.cache_ttl(),
            )
            .map(Self::OpenRouter)
            .with_context(|| {
                format!(
                    "invalid openrouter.base_url '{}'",
                    config.openrouter.base_url
                )
            }),
        }
    }

    /// The URL this source requests, for display.
    pub fn endpoint(&self) -> &Url {
        match self {
            Self::Backend(source) => source.endpoint(),
            Self::OpenRouter(source) => source.endpoint(),
        }
    }
}

impl CatalogSource for ConfiguredSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>, CatalogError>> + Send {
        async move {
            match self {
                Self::Backend(source) => source.fetch().await,
                Self::OpenRouter(source) => source.fetch().await,
            }
        }
    }
}

pub(crate) fn http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

/// Joins `path` onto `base_url`, treating the base as a directory.
pub(crate) fn endpoint_url(base_url: &str, path: &str) -> Result<Url> {
    let mut base = Url::parse(base_url.trim()).context("Failed to parse URL")?;
    if !base.path().ends_with('/') {
        let dir = format!("{}/", base.path());
        base.set_path(&dir);
    }
    base.join(path)
        .with_context(|| format!("Failed to join '{path}' onto {base}"))
}

pub(crate) async fn get_json(client: &Client, url: &Url) -> Result<Value, CatalogError> {
    let response = client.get(url.clone()).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        });
    }

    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url_joins_onto_root_and_subpaths() {
        assert_eq!(
            endpoint_url("http://localhost:2024", "api/models")
                .unwrap()
                .as_str(),
            "http://localhost:2024/api/models"
        );
        assert_eq!(
            endpoint_url("http://localhost:2024/", "api/models")
                .unwrap()
                .as_str(),
            "http://localhost:2024/api/models"
        );
        assert_eq!(
            endpoint_url("https://openrouter.ai/api/v1", "models")
                .unwrap()
                .as_str(),
            "https://openrouter.ai/api/v1/models"
        );
    }

    #[test]
    fn test_endpoint_url_rejects_garbage() {
        assert!(endpoint_url("not a url", "api/models").is_err());
    }

    #[test]
    fn test_configured_source_follows_config() {
        let mut config = Config::default();
        config.catalog_url = "http://127.0.0.1:9/".to_string();
        let source = ConfiguredSource::from_config(&config).unwrap();
        assert!(matches!(source, ConfiguredSource::Backend(_)));
        assert_eq!(source.endpoint().as_str(), "http://127.0.0.1:9/api/models");

        config.source = SourceKind::OpenRouter;
        let source = ConfiguredSource::from_config(&config).unwrap();
        assert!(matches!(source, ConfiguredSource::OpenRouter(_)));
        assert_eq!(
            source.endpoint().as_str(),
            "https://openrouter.ai/api/v1/models"
        );
    }
}
