//! # proxyfox
//!
//! Fetch lists of public proxies, filtered by speed, protocol and country.
//!
//! [`ProxyFetcher`] queries the proxy listing API and implements
//! [`ProxySource`], which carries the convenience queries (`fastest`,
//! `http_only`, `by_country`, ...). [`ProxyPool`] keeps a snapshot of
//! addresses that a background task replaces on a fixed interval.

pub mod config;
pub mod error;
pub mod fetcher;
pub mod filter;
pub mod pool;
pub mod proxy;
pub mod source;
mod utils;

pub use config::{FetcherConfig, FetcherConfigBuilder, PoolConfig, PoolConfigBuilder};
pub use error::{FetchError, ParseProtocolError};
pub use fetcher::ProxyFetcher;
pub use filter::{Protocol, ProxyFilter, FAST_PROXY_MAX_SPEED_MS};
pub use pool::{PoolState, ProxyPool};
pub use proxy::{Port, ProxyRecord};
pub use source::ProxySource;
