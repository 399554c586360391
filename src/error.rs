// src/error.rs
//! Error types shared across the pipeline.
//!
//! Missing HTML elements are never errors; they resolve to `None` on the
//! affected field. Everything here is a network, pagination, config or sink
//! failure.

use std::io;

use thiserror::Error;

use crate::specs::search::ListingId;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure of a single Gateway call.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Still receiving 429 after the whole retry budget was spent.
    #[error("rate limited on {url} after {attempts} attempt(s)")]
    RateLimited { url: String, attempts: u32 },

    /// Any other non-2xx status. Never retried.
    #[error("HTTP {status} for {url}")]
    Http { url: String, status: u16 },

    /// Connection, timeout or body read failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: BoxError,
    },

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl FetchError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, FetchError::RateLimited { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            FetchError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }
}

/// A page fetch failed; the pass stopped there.
///
/// `collected` holds every id gathered from the pages before `page`, so a
/// caller can salvage them if it wants to.
#[derive(Debug, Error)]
#[error("pagination failed on page {page} (start={offset}) after collecting {} id(s): {source}", collected.len())]
pub struct PaginationError {
    pub page: usize,
    pub offset: usize,
    pub collected: Vec<ListingId>,
    #[source]
    pub source: FetchError,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: invalid value for `{key}`: {value}")]
    InvalidValue { line: usize, key: String, value: String },

    #[error("invalid value for --{flag}: {value}")]
    InvalidFlag { flag: String, value: String },

    #[error("invalid filter `{0}` (expected name=v1,v2)")]
    InvalidFilter(String),

    #[error("invalid endpoint {url}: {source}")]
    Endpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(String),

    #[error("malformed export {path}: {reason}")]
    Malformed { path: String, reason: String },
}

/// Terminal failures of a whole run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("cannot build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    #[error(transparent)]
    Pagination(#[from] PaginationError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
