//! Filter criteria sent to (and applied after) the proxy source.

use crate::error::ParseProtocolError;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Speed cutoff used for "fast" proxies, in milliseconds.
pub const FAST_PROXY_MAX_SPEED_MS: u32 = 1000;

/// Protocol spoken by a listed proxy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    /// Plain HTTP proxy.
    Http,
    /// HTTPS (CONNECT capable) proxy.
    Https,
}

impl Protocol {
    /// Lowercase name as understood by the proxy source.
    pub fn as_str(&self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Protocol {
    type Err = ParseProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "http" => Ok(Protocol::Http),
            "https" => Ok(Protocol::Https),
            _ => Err(ParseProtocolError(s.to_string())),
        }
    }
}

/// Uppercase a country code and resolve it through the alias table.
pub fn normalize_country(code: &str, aliases: &HashMap<String, String>) -> String {
    let upper = code.trim().to_ascii_uppercase();
    match aliases.get(&upper) {
        Some(alias) => alias.clone(),
        None => upper,
    }
}

/// Optional constraints on a proxy list. An unset field means no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyFilter {
    /// Maximum reported speed in milliseconds. Applied client-side.
    pub max_speed_ms: Option<u32>,
    /// Country code, normalized before it is sent.
    pub country: Option<String>,
    /// Proxy protocol.
    pub protocol: Option<Protocol>,
}

impl ProxyFilter {
    /// A filter with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_speed_ms(mut self, max_speed_ms: u32) -> Self {
        self.max_speed_ms = Some(max_speed_ms);
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn protocol(mut self, protocol: Protocol) -> Self {
        self.protocol = Some(protocol);
        self
    }

    /// Effective speed limit. Zero counts as unset.
    pub fn speed_limit(&self) -> Option<u32> {
        self.max_speed_ms.filter(|ms| *ms > 0)
    }

    /// Whether a record reporting `speed_ms` passes the speed limit.
    pub fn accepts_speed(&self, speed_ms: f64) -> bool {
        match self.speed_limit() {
            Some(limit) => speed_ms <= f64::from(limit),
            None => true,
        }
    }

    /// Query parameters for the proxy source. Speed is never sent.
    pub fn query_params(&self, aliases: &HashMap<String, String>) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(country) = self.country.as_deref().filter(|c| !c.trim().is_empty()) {
            params.push(("country", normalize_country(country, aliases)));
        }
        if let Some(protocol) = self.protocol {
            params.push(("protocol", protocol.as_str().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uk_alias() -> HashMap<String, String> {
        HashMap::from([("UK".to_string(), "GB".to_string())])
    }

    #[test]
    fn protocol_parses_case_insensitively() {
        assert_eq!("HTTP".parse::<Protocol>(), Ok(Protocol::Http));
        assert_eq!("Https".parse::<Protocol>(), Ok(Protocol::Https));
        assert_eq!(
            "socks5".parse::<Protocol>(),
            Err(ParseProtocolError("socks5".to_string()))
        );
    }

    #[test]
    fn country_is_uppercased_and_aliased() {
        let aliases = uk_alias();
        assert_eq!(normalize_country("us", &aliases), "US");
        assert_eq!(normalize_country("uk", &aliases), "GB");
        assert_eq!(normalize_country("GB", &aliases), "GB");
    }

    #[test]
    fn uk_and_gb_produce_the_same_query() {
        let aliases = uk_alias();
        let uk = ProxyFilter::new().country("UK").protocol(Protocol::Https);
        let gb = ProxyFilter::new().country("gb").protocol(Protocol::Https);
        assert_eq!(uk.query_params(&aliases), gb.query_params(&aliases));
        assert_eq!(
            uk.query_params(&aliases),
            vec![("country", "GB".to_string()), ("protocol", "https".to_string())]
        );
    }

    #[test]
    fn speed_is_not_sent_upstream() {
        let filter = ProxyFilter::new().max_speed_ms(500);
        assert!(filter.query_params(&uk_alias()).is_empty());
    }

    #[test]
    fn speed_limit_is_inclusive_and_zero_means_unset() {
        let filter = ProxyFilter::new().max_speed_ms(1000);
        assert!(filter.accepts_speed(1000.0));
        assert!(!filter.accepts_speed(1000.5));

        let unset = ProxyFilter::new().max_speed_ms(0);
        assert_eq!(unset.speed_limit(), None);
        assert!(unset.accepts_speed(99_999.0));
    }
}
