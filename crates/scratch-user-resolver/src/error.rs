//! Error types for the Scratch user resolver

use std::fmt;

use reqwest::StatusCode;

/// Errors raised while setting up a resolver
#[derive(Debug)]
pub enum ResolverError {
    Http(Box<reqwest::Error>),
    InvalidBaseUrl(String),
}

impl fmt::Display for ResolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolverError::Http(err) => write!(f, "HTTP client error: {}", err),
            ResolverError::InvalidBaseUrl(url) => write!(f, "Invalid base URL: {}", url),
        }
    }
}

impl std::error::Error for ResolverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ResolverError::Http(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ResolverError {
    fn from(err: reqwest::Error) -> Self {
        ResolverError::Http(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;

/// Why a single Scratch API lookup could not be completed.
///
/// Only used for diagnostics; callers see `LookupResult::TransientFailure`.
#[derive(Debug)]
pub enum FetchFailure {
    Transport(Box<reqwest::Error>),
    UnexpectedStatus(StatusCode),
    MalformedBody(String),
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Transport(err) => write!(f, "transport error: {}", err),
            FetchFailure::UnexpectedStatus(status) => write!(f, "unexpected status {}", status),
            FetchFailure::MalformedBody(msg) => write!(f, "malformed response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FetchFailure::Transport(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for FetchFailure {
    fn from(err: reqwest::Error) -> Self {
        FetchFailure::Transport(Box::new(err))
    }
}
