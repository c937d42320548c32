//! Typed HTTP client for the PII detection admin API.
//!
//! Layers, leaf-first:
//! - [`endpoints`]: logical operations and their paths
//! - [`credentials`]: the injectable bearer-token store
//! - [`api_client`]: request execution, JSON decoding, and the per-domain
//!   query builders
//! - [`query`]: deterministic query-string serialization
//! - [`config`]: origin resolution, `.env` loading, config file

pub mod api_client;
pub mod config;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod query;

pub use api_client::{ApiClient, RequestOptions};
pub use credentials::CredentialStore;
pub use endpoints::Endpoint;
pub use query::{DateRange, IpStatisticsFilter, LogFilter, QueryFilter, TimelineFilter};

#[cfg(test)]
mod tests;

pub const DEFAULT_API_HOSTNAME: &str = "localhost";
pub const DEFAULT_API_PORT: u16 = 8000;
pub const DEFAULT_API_BASE_URL: &str =
    const_format::concatcp!("http://", DEFAULT_API_HOSTNAME, ":", DEFAULT_API_PORT);
