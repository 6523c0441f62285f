//! Crate-level error types.
//!
//! [`OpsPilotError`] unifies every error source (configuration, terminal,
//! TLS, remote calls, input validation) behind a single enum so callers can
//! match on the variant they care about while still using `?` for
//! propagation.

use std::fmt;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OpsPilotError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OpsPilotError {
    /// A configuration value is missing or malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// TLS configuration could not be built.
    #[error("tls error: {0}")]
    Tls(String),

    /// A call to the reconciliation service failed.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// User input was rejected before any request was made.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Remote resource a request was addressed to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Trades,
    Issues,
    Reconciliation,
    Explanation,
    Copilot,
    Health,
}

impl Resource {
    /// Returns the name attached to errors and log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Resource::Trades => "trades",
            Resource::Issues => "issues",
            Resource::Reconciliation => "reconciliation",
            Resource::Explanation => "explanation",
            Resource::Copilot => "copilot",
            Resource::Health => "health",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A request failed in transit, returned a non-success status, or carried
/// a body that could not be decoded.
#[derive(Debug, thiserror::Error)]
#[error("{resource} request failed: {kind}")]
pub struct TransportError {
    pub resource: Resource,
    pub kind: TransportErrorKind,
}

impl TransportError {
    pub fn new(resource: Resource, kind: TransportErrorKind) -> Self {
        Self { resource, kind }
    }
}

/// What went wrong with a request.
#[derive(Debug, thiserror::Error)]
pub enum TransportErrorKind {
    /// Connection, DNS or timeout failure.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("unexpected status {0}")]
    Status(u16),

    /// The body was not the expected JSON shape.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Input rejected on the client side.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The copilot query was empty once surrounding whitespace was removed.
    #[error("Please enter a question")]
    EmptyQuery,
}
