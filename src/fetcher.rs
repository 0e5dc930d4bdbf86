//! HTTP proxy source backed by reqwest.

use crate::config::FetcherConfig;
use crate::error::FetchError;
use crate::filter::ProxyFilter;
use crate::source::ProxySource;
use crate::utils;

use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use url::Url;

/// Fetches proxy lists from the configured listing endpoint.
#[derive(Debug, Clone)]
pub struct ProxyFetcher {
    client: Client,
    api_url: Url,
    config: FetcherConfig,
}

impl ProxyFetcher {
    /// Create a fetcher from the given configuration.
    pub fn new(config: FetcherConfig) -> Result<Self, FetchError> {
        let api_url = Url::parse(&config.api_url)?;

        let mut headers = HeaderMap::new();
        for (name, value) in &config.headers {
            let header_name =
                HeaderName::from_bytes(name.as_bytes()).map_err(|e| FetchError::InvalidHeader {
                    name: name.clone(),
                    reason: e.to_string(),
                })?;
            let header_value = HeaderValue::from_str(value).map_err(|e| FetchError::InvalidHeader {
                name: name.clone(),
                reason: e.to_string(),
            })?;
            headers.insert(header_name, header_value);
        }

        let mut builder = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_url,
            config,
        })
    }

    /// Create a fetcher with the default endpoint and headers.
    pub fn with_defaults() -> Result<Self, FetchError> {
        Self::new(FetcherConfig::default())
    }

    /// The configuration this fetcher was built from.
    pub fn config(&self) -> &FetcherConfig {
        &self.config
    }
}

#[async_trait]
impl ProxySource for ProxyFetcher {
    async fn try_fetch(&self, filter: &ProxyFilter) -> Result<Vec<String>, FetchError> {
        let params = filter.query_params(&self.config.country_aliases);
        debug!("Requesting proxy list from {} with {:?}", self.api_url, params);

        let response = self
            .client
            .get(self.api_url.clone())
            .query(&params)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UpstreamStatus(status));
        }

        let body = response.text().await?;
        let proxies = utils::parse_proxy_list(&body, filter)?;
        info!("Fetched {} proxies from {}", proxies.len(), self.api_url);
        Ok(proxies)
    }
}
