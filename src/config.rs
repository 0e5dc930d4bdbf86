//! Configuration for the proxy fetcher and the proxy pool.

use crate::filter::ProxyFilter;

use std::collections::HashMap;
use std::time::Duration;

/// Default proxy listing endpoint.
pub const DEFAULT_API_URL: &str = "https://papi.proxiware.com/proxies";

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Configuration for the HTTP proxy fetcher.
#[derive(Debug, Clone)]
pub struct FetcherConfig {
    /// Endpoint returning the JSON proxy list.
    pub api_url: String,
    /// Headers sent with every request. The upstream API rejects clients
    /// that do not look like a browser.
    pub headers: Vec<(String, String)>,
    /// Timeout for a single fetch.
    pub timeout: Duration,
    /// Country code aliases, keyed by uppercase code.
    pub country_aliases: HashMap<String, String>,
    /// Whether to honour system proxy settings for the listing request.
    pub system_proxy: bool,
}

impl FetcherConfig {
    /// Create a new configuration builder.
    pub fn builder() -> FetcherConfigBuilder {
        FetcherConfigBuilder::new()
    }
}

impl Default for FetcherConfig {
    fn default() -> Self {
        FetcherConfigBuilder::new().build()
    }
}

/// Builder for `FetcherConfig`.
pub struct FetcherConfigBuilder {
    api_url: Option<String>,
    headers: Vec<(String, String)>,
    timeout: Option<Duration>,
    country_aliases: HashMap<String, String>,
    system_proxy: Option<bool>,
}

impl FetcherConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            api_url: None,
            headers: default_headers(),
            timeout: None,
            country_aliases: HashMap::from([("UK".to_string(), "GB".to_string())]),
            system_proxy: None,
        }
    }

    /// Set the proxy listing endpoint.
    pub fn api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    /// Set a request header. A default header of the same name (compared
    /// case-insensitively) is replaced; other defaults are kept.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(existing, _)| existing.eq_ignore_ascii_case(&name))
        {
            Some(slot) => slot.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Replace the whole header set, defaults included.
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = headers;
        self
    }

    /// Set the timeout for a single fetch.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Map country code `from` to `to` before it is sent.
    pub fn country_alias(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.country_aliases.insert(
            from.into().to_ascii_uppercase(),
            to.into().to_ascii_uppercase(),
        );
        self
    }

    /// Honour (or ignore) `HTTP_PROXY`-style environment settings.
    pub fn system_proxy(mut self, enabled: bool) -> Self {
        self.system_proxy = Some(enabled);
        self
    }

    /// Build the configuration.
    pub fn build(self) -> FetcherConfig {
        FetcherConfig {
            api_url: self.api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            headers: self.headers,
            timeout: self.timeout.unwrap_or(Duration::from_secs(30)),
            country_aliases: self.country_aliases,
            system_proxy: self.system_proxy.unwrap_or(true),
        }
    }
}

impl Default for FetcherConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("accept".to_string(), "*/*".to_string()),
        ("user-agent".to_string(), DEFAULT_USER_AGENT.to_string()),
        ("accept-language".to_string(), "en-US,en;q=0.8".to_string()),
    ]
}

/// Configuration for a refreshing proxy pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of addresses kept per snapshot.
    pub size: usize,
    /// Time between refresh cycles.
    pub refresh_interval: Duration,
    /// Filter used for every refresh and for direct fallback fetches.
    pub filter: ProxyFilter,
}

impl PoolConfig {
    /// Create a new configuration builder.
    pub fn builder() -> PoolConfigBuilder {
        PoolConfigBuilder::new()
    }
}

/// Builder for `PoolConfig`.
pub struct PoolConfigBuilder {
    size: Option<usize>,
    refresh_interval: Option<Duration>,
    filter: ProxyFilter,
}

impl PoolConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self {
            size: None,
            refresh_interval: None,
            filter: ProxyFilter::default(),
        }
    }

    /// Set the number of addresses kept per snapshot.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the time between refresh cycles.
    pub fn refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = Some(interval);
        self
    }

    /// Set the time between refresh cycles in whole seconds.
    pub fn refresh_interval_secs(self, secs: u64) -> Self {
        self.refresh_interval(Duration::from_secs(secs))
    }

    /// Set the filter used to populate the pool.
    pub fn filter(mut self, filter: ProxyFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> PoolConfig {
        PoolConfig {
            size: self.size.unwrap_or(10),
            refresh_interval: self.refresh_interval.unwrap_or(Duration::from_secs(300)),
            filter: self.filter,
        }
    }
}

impl Default for PoolConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Protocol;

    #[test]
    fn fetcher_defaults_look_like_a_browser() {
        let config = FetcherConfig::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config
            .headers
            .iter()
            .any(|(name, value)| name == "user-agent" && value.starts_with("Mozilla/5.0")));
        assert!(config.headers.iter().any(|(name, _)| name == "accept"));
        assert_eq!(config.country_aliases.get("UK").map(String::as_str), Some("GB"));
        assert!(config.system_proxy);
    }

    #[test]
    fn extra_header_keeps_browser_defaults() {
        let config = FetcherConfig::builder().header("x-client", "proxyfox").build();
        assert_eq!(config.headers.len(), 4);
        assert!(config
            .headers
            .iter()
            .any(|(name, value)| name == "user-agent" && value.starts_with("Mozilla/5.0")));
        assert!(config
            .headers
            .iter()
            .any(|(name, value)| name == "x-client" && value == "proxyfox"));
    }

    #[test]
    fn same_name_header_overrides_default() {
        let config = FetcherConfig::builder().header("User-Agent", "fox/1.0").build();
        let agents: Vec<_> = config
            .headers
            .iter()
            .filter(|(name, _)| name.eq_ignore_ascii_case("user-agent"))
            .collect();
        assert_eq!(agents.len(), 1);
        assert_eq!(agents[0].1, "fox/1.0");
        assert_eq!(config.headers.len(), 3);
    }

    #[test]
    fn headers_replaces_the_whole_set() {
        let config = FetcherConfig::builder()
            .headers(vec![("accept".to_string(), "application/json".to_string())])
            .build();
        assert_eq!(
            config.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn system_proxy_can_be_disabled() {
        let config = FetcherConfig::builder().system_proxy(false).build();
        assert!(!config.system_proxy);
    }

    #[test]
    fn aliases_are_stored_uppercase() {
        let config = FetcherConfig::builder().country_alias("en", "gb").build();
        assert_eq!(config.country_aliases.get("EN").map(String::as_str), Some("GB"));
        assert_eq!(config.country_aliases.get("UK").map(String::as_str), Some("GB"));
    }

    #[test]
    fn pool_builder_applies_defaults() {
        let config = PoolConfig::builder()
            .refresh_interval_secs(60)
            .filter(ProxyFilter::new().protocol(Protocol::Http))
            .build();
        assert_eq!(config.size, 10);
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
        assert_eq!(config.filter.protocol, Some(Protocol::Http));
    }
}
