//! Error types for upstream calls and the lookup pipeline

use thiserror::Error;

/// Failure of a single upstream HTTP call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The upstream answered with a non-success status code
    #[error("{0}")]
    Status(u16),
    #[error("timeout")]
    Timeout,
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    Decode(String),
    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            return UpstreamError::Timeout;
        }
        if let Some(status) = error.status() {
            return UpstreamError::Status(status.as_u16());
        }
        if error.is_decode() {
            return UpstreamError::Decode(error.to_string());
        }
        UpstreamError::Transport(error.to_string())
    }
}

impl From<url::ParseError> for UpstreamError {
    fn from(error: url::ParseError) -> Self {
        UpstreamError::InvalidUrl(error.to_string())
    }
}

/// Terminal failure of a lookup request.
///
/// The `Display` text of each variant is the `error` string returned to
/// API clients.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("Empty query")]
    EmptyQuery,
    #[error("Query too long")]
    QueryTooLong,
    #[error("Missing ?q=")]
    MissingDebugQuery,
    #[error("Roblox search error: {0}")]
    Search(UpstreamError),
    #[error("No matching titles in results")]
    NoMatchingTitles { sample_titles: Vec<String> },
    #[error("Could not resolve universeIds")]
    UnresolvedUniverses,
    #[error("Roblox games info error: {0}")]
    GameInfo(UpstreamError),
    #[error("No game info returned")]
    NoGameInfo,
    #[error("Not found (no created dates matched)")]
    NotFound,
}

impl LookupError {
    /// Diagnostic titles attached to the error, if any
    pub fn sample_titles(&self) -> Option<&[String]> {
        match self {
            LookupError::NoMatchingTitles { sample_titles } => Some(sample_titles),
            _ => None,
        }
    }
}
