//! Utility functions for turning source responses into address lists.

use crate::error::FetchError;
use crate::filter::ProxyFilter;
use crate::proxy::ProxyListResponse;

/// Parse a proxy list body, keeping source order and dropping records slower
/// than the filter's speed limit.
pub(crate) fn parse_proxy_list(body: &str, filter: &ProxyFilter) -> Result<Vec<String>, FetchError> {
    let response: ProxyListResponse = serde_json::from_str(body)?;
    Ok(response
        .proxies
        .iter()
        .filter(|record| filter.accepts_speed(record.speed_ms))
        .map(|record| record.address())
        .collect())
}
