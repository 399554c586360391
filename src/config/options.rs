// src/config/options.rs
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use url::Url;

use super::consts::*;
use crate::error::ConfigError;
use crate::specs::search::SearchQuery;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// Where the guest API lives. Overridable so tests can point at a local server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub api_base: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { api_base: s!(API_BASE) }
    }
}

impl Endpoints {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self { api_base: api_base.into() }
    }

    pub fn search_base(&self) -> Result<Url, ConfigError> {
        let raw = join!(self.api_base.trim_end_matches('/'), SEARCH_PATH);
        Url::parse(&raw).map_err(|source| ConfigError::Endpoint { url: raw, source })
    }

    pub fn posting_url(&self, job_id: &str) -> String {
        join!(self.api_base.trim_end_matches('/'), POSTING_PATH, job_id)
    }
}

/// Bounded linear backoff: attempt `n` (0-based) waits `backoff * (n + 1)` on 429.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            backoff: Duration::from_secs(BACKOFF_SECS),
        }
    }
}

impl RetryPolicy {
    pub fn wait_for(&self, attempt: u32) -> Duration {
        self.backoff * (attempt + 1)
    }
}

/// What to do with listing ids that show up on more than one page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Dedup {
    /// Keep every id in fetch order, repeats included.
    #[default]
    Keep,
    /// Drop later repeats; first-seen order is preserved.
    FirstSeen,
}

impl FromStr for Dedup {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep" | "none" | "off" => Ok(Dedup::Keep),
            "first" | "first-seen" | "first_seen" | "on" => Ok(Dedup::FirstSeen),
            other => Err(format!("unknown dedup policy: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub query: SearchQuery,
    /// Pre-built search URL; when set, `query` is not used to build one.
    pub search_url: Option<String>,
    pub total_estimate: usize,
    pub per_page: usize,
    pub dedup: Dedup,
    pub retry: RetryPolicy,
    pub timeout: Duration,
    pub workers: usize,
    /// Pause after each detail fetch, per worker.
    pub pause: Duration,
    pub endpoints: Endpoints,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            query: SearchQuery::default(),
            search_url: None,
            total_estimate: DEFAULT_TOTAL_ESTIMATE,
            per_page: PER_PAGE,
            dedup: Dedup::default(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            workers: WORKERS,
            pause: Duration::from_millis(REQUEST_PAUSE_MS),
            endpoints: Endpoints::default(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Tsv,
    /// One JSON object per line; carries real newlines.
    Jsonl,
    /// Single-sheet workbook; carries real newlines.
    Xlsx,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Jsonl => "jsonl",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "tsv" => Ok(ExportFormat::Tsv),
            "jsonl" | "ndjson" => Ok(ExportFormat::Jsonl),
            "xlsx" | "excel" => Ok(ExportFormat::Xlsx),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub formats: Vec<ExportFormat>,
    pub out_dir: PathBuf,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            formats: vec![ExportFormat::Csv, ExportFormat::Jsonl, ExportFormat::Xlsx],
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl ExportOptions {
    /// `<out_dir>/linkedin_jobs_<safe location>.<ext>`
    pub fn out_path(&self, location: Option<&str>, format: ExportFormat) -> PathBuf {
        let stem = crate::core::sanitize::output_stem(location);
        self.out_dir.join(join!(&stem, ".", format.ext()))
    }
}
