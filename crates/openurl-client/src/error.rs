//! Error types for the OpenURL client

use std::fmt;

/// Errors that can occur when querying the link resolver
///
/// Only transport-level faults (DNS, connect, timeout) are errors; a
/// non-200 status or an unparseable body degrades to an empty result
/// instead.
#[derive(Debug)]
pub enum ResolverError {
    /// HTTP request failed
    Http(reqwest::Error),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "resolver HTTP error: {e}"),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Http(e) => Some(e),
        }
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

/// Result type for resolver operations
pub type Result<T> = std::result::Result<T, ResolverError>;
