//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Malformed caller input or stored plan parameters. Never reaches generation.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Plan store error: {0}")]
    Store(String),

    /// Generic transport failure talking to the model. Retryable by the caller.
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Failure classification reported by a model client.
///
/// `RateLimited`, `Quota` and `Malformed` are recovered by degrading to the
/// template engine; `Transport` is surfaced to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("quota exceeded: {0}")]
    Quota(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("transport failure: {0}")]
    Transport(String),
}
