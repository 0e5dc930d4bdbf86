//! Proxy records as reported by the proxy source.

use serde::Deserialize;
use std::fmt;

/// Port of a listed proxy. The source is inconsistent about sending it as a
/// number or a string, so both are accepted and rendered verbatim.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Port {
    Number(u64),
    Text(String),
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Port::Number(n) => write!(f, "{}", n),
            Port::Text(s) => f.write_str(s),
        }
    }
}

/// A single proxy entry. Fields other than these are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProxyRecord {
    /// Host or IP of the proxy.
    pub addr: String,
    /// Port of the proxy.
    pub port: Port,
    /// Measured speed in milliseconds.
    pub speed_ms: f64,
}

impl ProxyRecord {
    /// The `host:port` address of this proxy.
    pub fn address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

/// Body returned by the proxy listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProxyListResponse {
    pub proxies: Vec<ProxyRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_accepts_numeric_and_string_ports() {
        let numeric: ProxyRecord =
            serde_json::from_str(r#"{"addr": "1.2.3.4", "port": 8080, "speed_ms": 120}"#).unwrap();
        assert_eq!(numeric.address(), "1.2.3.4:8080");

        let text: ProxyRecord =
            serde_json::from_str(r#"{"addr": "proxy.local", "port": "3128", "speed_ms": 9.5}"#)
                .unwrap();
        assert_eq!(text.address(), "proxy.local:3128");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let record: ProxyRecord = serde_json::from_str(
            r#"{"addr": "5.6.7.8", "port": 80, "speed_ms": 300, "country": "US", "anonymity": "elite"}"#,
        )
        .unwrap();
        assert_eq!(record.speed_ms, 300.0);
    }

    #[test]
    fn missing_speed_is_rejected() {
        let result = serde_json::from_str::<ProxyRecord>(r#"{"addr": "5.6.7.8", "port": 80}"#);
        assert!(result.is_err());
    }
}
