//! Upstream error taxonomy
//!
//! Errors talking to quote providers are never propagated past the
//! provider layer; they are folded into `QuoteResult::failure`. The enum
//! exists so the fold sites produce consistent, human-readable messages.

use crate::quote::SourceId;

/// Failure modes of an upstream quote fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamError {
    /// Network-level failure: connect error, broken transport, or timeout.
    Transport { source: SourceId, message: String },

    /// Well-formed HTTP exchange with a non-2xx status.
    Status {
        source: SourceId,
        status: u16,
        body: String,
    },

    /// 2xx response whose body is missing the expected fields.
    Shape { source: SourceId, body: String },

    /// Login/token handshake failure for the authenticating provider.
    Auth { source: SourceId, message: String },
}

// `Display`/`Error` are implemented by hand: thiserror's derive treats any
// field named `source` as the error source and requires it to be a
// `std::error::Error`, which `SourceId` is not.
impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Transport { source, message } => {
                write!(f, "request to {} failed: {message}", source.display_name())
            }
            UpstreamError::Status {
                source,
                status,
                body,
            } => {
                write!(
                    f,
                    "{} API error: HTTP {status} - {body}",
                    source.display_name()
                )
            }
            UpstreamError::Shape { source, body } => {
                write!(
                    f,
                    "Invalid response from {} API: {body}",
                    source.display_name()
                )
            }
            UpstreamError::Auth { source, message } => {
                write!(
                    f,
                    "Failed to authenticate with {} API: {message}",
                    source.display_name()
                )
            }
        }
    }
}

impl std::error::Error for UpstreamError {}

impl UpstreamError {
    /// The provider the error came from.
    pub fn source_id(&self) -> SourceId {
        match self {
            UpstreamError::Transport { source, .. }
            | UpstreamError::Status { source, .. }
            | UpstreamError::Shape { source, .. }
            | UpstreamError::Auth { source, .. } => *source,
        }
    }
}
