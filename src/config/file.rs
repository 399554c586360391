// src/config/file.rs
//! Optional `key = value` config file, applied on top of the defaults and
//! under any CLI flags.
//!
//! ```text
//! # job_scrape.conf
//! location = Berlin, Germany
//! keywords = Rust
//! filter.experience = 2,3
//! formats = csv,jsonl
//! ```
use std::{fs, path::Path, time::Duration};

use tracing::debug;

use super::options::AppOptions;
use crate::error::ConfigError;

/// Load `path` into `opts`. A missing file leaves `opts` untouched.
pub fn load(path: &Path, opts: &mut AppOptions) -> Result<bool, ConfigError> {
    if !path.exists() {
        return Ok(false);
    }
    let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse(&text, opts)?;
    debug!("Loaded config from {}", path.display());
    Ok(true)
}

pub fn parse(text: &str, opts: &mut AppOptions) -> Result<(), ConfigError> {
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') { continue; }
        let Some(eq) = line.find('=') else { continue };
        let key = line[..eq].trim();
        let val = line[eq + 1..].trim();

        let bad = || ConfigError::InvalidValue {
            line: idx + 1,
            key: key.to_string(),
            value: val.to_string(),
        };

        let scrape = &mut opts.scrape;
        match key {
            "location" => scrape.query.location = non_empty(val),
            "keywords" => scrape.query.keywords = non_empty(val),
            "geo_id" => scrape.query.geo_id = non_empty(val),
            "search_url" => scrape.search_url = non_empty(val),
            "total" => scrape.total_estimate = val.parse().map_err(|_| bad())?,
            "per_page" => {
                scrape.per_page = val.parse().ok().filter(|n| *n > 0).ok_or_else(bad)?
            }
            "dedup" => scrape.dedup = val.parse().map_err(|_| bad())?,
            "workers" => scrape.workers = val.parse().map_err(|_| bad())?,
            "retries" => scrape.retry.max_retries = val.parse().map_err(|_| bad())?,
            "backoff_secs" => {
                scrape.retry.backoff = Duration::from_secs(val.parse().map_err(|_| bad())?)
            }
            "timeout_secs" => {
                scrape.timeout = Duration::from_secs(val.parse().map_err(|_| bad())?)
            }
            "pause_ms" => scrape.pause = Duration::from_millis(val.parse().map_err(|_| bad())?),
            "api_base" => scrape.endpoints.api_base = val.to_string(),
            "formats" => {
                opts.export.formats = split_list(val)
                    .iter()
                    .map(|f| f.parse())
                    .collect::<Result<_, _>>()
                    .map_err(|_| bad())?;
            }
            "out_dir" => opts.export.out_dir = val.into(),
            _ => {
                if let Some(name) = key.strip_prefix("filter.") {
                    scrape.query.filters.insert(name.trim().to_string(), split_list(val));
                } else {
                    debug!("Ignoring unknown config key `{key}`");
                }
            }
        }
    }
    Ok(())
}

/// `name=v1,v2` as given on the command line.
pub fn parse_filter_arg(arg: &str) -> Result<(String, Vec<String>), ConfigError> {
    let (name, vals) = arg
        .split_once('=')
        .ok_or_else(|| ConfigError::InvalidFilter(arg.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(ConfigError::InvalidFilter(arg.to_string()));
    }
    Ok((name.to_string(), split_list(vals)))
}

fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}
