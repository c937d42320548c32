//! Shared primitives for the PII admin client.
//!
//! Everything here is dependency-light and used by both the client layer
//! and the command-line front end:
//!
//! - **ErrorLocation**: file/line/column captured at error construction
//! - **HttpStatusCode**: status categorization without string parsing
//! - **RedactedToken**: bearer token that never leaks through Debug or serde

pub mod error;
pub mod http_status;
pub mod redacted_token;

pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;
pub use redacted_token::RedactedToken;

#[cfg(test)]
mod tests;
