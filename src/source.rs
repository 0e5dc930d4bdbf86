//! The proxy source abstraction and its convenience queries.

use crate::error::FetchError;
use crate::filter::{Protocol, ProxyFilter, FAST_PROXY_MAX_SPEED_MS};

use async_trait::async_trait;
use log::warn;

/// Something that can list proxy addresses for a filter.
///
/// Only [`try_fetch`](ProxySource::try_fetch) has to be implemented. Every
/// other method is a fail-soft composition of it: failures are logged and
/// reported as an empty result.
#[async_trait]
pub trait ProxySource: Send + Sync {
    /// Fetch addresses matching `filter`, in source order.
    ///
    /// `Ok(vec![])` means nothing matched; `Err` means the fetch itself failed.
    async fn try_fetch(&self, filter: &ProxyFilter) -> Result<Vec<String>, FetchError>;

    /// Fetch addresses matching `filter`, returning an empty list on failure.
    async fn fetch(&self, filter: &ProxyFilter) -> Vec<String> {
        match self.try_fetch(filter).await {
            Ok(proxies) => proxies,
            Err(e) => {
                warn!("Error fetching proxies: {}", e);
                Vec::new()
            }
        }
    }

    /// Up to `limit` proxies answering within 1000 ms.
    async fn fastest(&self, limit: usize, protocol: Option<Protocol>) -> Vec<String> {
        let filter = ProxyFilter {
            max_speed_ms: Some(FAST_PROXY_MAX_SPEED_MS),
            protocol,
            ..ProxyFilter::default()
        };
        self.take(limit, &filter).await
    }

    /// HTTP proxies, optionally capped by speed.
    async fn http_only(&self, max_speed_ms: Option<u32>) -> Vec<String> {
        let filter = ProxyFilter {
            max_speed_ms,
            protocol: Some(Protocol::Http),
            ..ProxyFilter::default()
        };
        self.fetch(&filter).await
    }

    /// HTTPS proxies, optionally capped by speed.
    async fn https_only(&self, max_speed_ms: Option<u32>) -> Vec<String> {
        let filter = ProxyFilter {
            max_speed_ms,
            protocol: Some(Protocol::Https),
            ..ProxyFilter::default()
        };
        self.fetch(&filter).await
    }

    /// Proxies located in `country` (e.g. `US`, `GB`, `UK`).
    async fn by_country(
        &self,
        country: &str,
        max_speed_ms: Option<u32>,
        protocol: Option<Protocol>,
    ) -> Vec<String> {
        let filter = ProxyFilter {
            max_speed_ms,
            country: Some(country.to_string()),
            protocol,
        };
        self.fetch(&filter).await
    }

    /// Every proxy the source lists.
    async fn all(&self) -> Vec<String> {
        self.fetch(&ProxyFilter::default()).await
    }

    /// The first proxy matching `filter`, if any.
    async fn one(&self, filter: &ProxyFilter) -> Option<String> {
        self.fetch(filter).await.into_iter().next()
    }

    /// The first `n` proxies matching `filter`.
    async fn take(&self, n: usize, filter: &ProxyFilter) -> Vec<String> {
        let mut proxies = self.fetch(filter).await;
        proxies.truncate(n);
        proxies
    }
}
