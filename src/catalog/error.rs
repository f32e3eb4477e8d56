//! Catalog error types

use thiserror::Error;

/// Catalog error with classification
#[derive(Debug, Error)]
#[error("{message}")]
pub struct CatalogError {
    pub kind: CatalogErrorKind,
    pub message: String,
}

impl CatalogError {
    pub fn new(kind: CatalogErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(CatalogErrorKind::Decode, message)
    }

    /// Classify a non-success HTTP status
    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let kind = match status.as_u16() {
            401 | 403 => CatalogErrorKind::Auth,
            429 => CatalogErrorKind::RateLimit,
            400 => CatalogErrorKind::InvalidRequest,
            500..=599 => CatalogErrorKind::ServerError,
            _ => CatalogErrorKind::Unknown,
        };
        let message = if body.is_empty() {
            format!("catalog returned {status}")
        } else {
            format!("catalog returned {status}: {body}")
        };
        Self::new(kind, message)
    }
}

/// Error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogErrorKind {
    /// Network issues, timeouts
    Network,
    /// Rate limited (429)
    RateLimit,
    /// Server error (5xx)
    ServerError,
    /// Authentication failed (401, 403)
    Auth,
    /// Bad request (400)
    InvalidRequest,
    /// Response body could not be decoded
    Decode,
    /// Unknown error
    Unknown,
}
