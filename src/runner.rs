// src/runner.rs
// One end-to-end batch: build URL -> paginate -> details -> export.

use std::path::PathBuf;

use tracing::info;

use crate::{
    config::options::AppOptions,
    core::net::{Gateway, HttpClient, Transport},
    error::{RunError, PaginationError},
    file,
    progress::Progress,
    scrape::{self, RecordFailure},
    specs::search::{ListingId, build_search_url},
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub ids_found: usize,
    pub records: usize,
    pub failures: Vec<RecordFailure>,
    pub files_written: Vec<PathBuf>,
}

/// The search URL this run pages through: the explicit one if given,
/// otherwise one built from the query.
pub fn search_url(opts: &AppOptions) -> Result<String, RunError> {
    if let Some(url) = &opts.scrape.search_url {
        return Ok(url.clone());
    }
    let base = opts.scrape.endpoints.search_base()?;
    Ok(build_search_url(&base, &opts.scrape.query).into())
}

/// Paginate only.
pub fn collect_ids<T: Transport>(
    gateway: &Gateway<T>,
    opts: &AppOptions,
) -> Result<Vec<ListingId>, RunError> {
    let url = search_url(opts)?;
    info!("Searching {url}");
    let s = &opts.scrape;
    let ids = scrape::extract_job_ids(gateway, &url, s.total_estimate, s.per_page, s.dedup)?;
    Ok(ids)
}

/// Top-level runner over the real HTTP client.
pub fn run(
    opts: &AppOptions,
    progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, RunError> {
    let gateway = Gateway::new(HttpClient::new(opts.scrape.timeout)?, opts.scrape.retry);
    run_with(&gateway, opts, progress)
}

/// Same as [`run`], over any transport.
///
/// A pagination failure ends the run (the error names the page and how many
/// ids were collected); detail failures are reported and skipped.
pub fn run_with<T: Transport>(
    gateway: &Gateway<T>,
    opts: &AppOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, RunError> {
    let ids = collect_ids(gateway, opts).inspect_err(|e| {
        if let (RunError::Pagination(PaginationError { page, collected, .. }), Some(p)) =
            (e, progress.as_deref_mut())
        {
            p.log(&format!("Stopped on page {page}; {} id(s) collected before the failure", collected.len()));
        }
    })?;

    let query = &opts.scrape.query;
    if let Some(p) = progress.as_deref_mut() {
        p.log(&format!(
            "Found {} job(s) for location '{}'",
            ids.len(),
            query.location.as_deref().unwrap_or("")
        ));
    }

    let outcome = scrape::collect_details(
        gateway,
        &opts.scrape.endpoints,
        &ids,
        opts.scrape.workers,
        opts.scrape.pause,
        progress.as_deref_mut(),
    );

    let files_written = file::export_batch(&outcome.batch, &opts.export, query.location.as_deref())?;
    if let Some(p) = progress.as_deref_mut() {
        for path in &files_written {
            p.log(&format!("Saved details to {}", path.display()));
        }
    }

    Ok(RunSummary {
        ids_found: ids.len(),
        records: outcome.batch.len(),
        failures: outcome.failures,
        files_written,
    })
}
