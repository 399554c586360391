// src/scrape/details.rs
// Detail Extractor fetch + batch collection over a small worker pool.

use std::{
    sync::{
        atomic::{AtomicUsize, Ordering},
        mpsc,
    },
    thread,
    time::Duration,
};

use tracing::{error, info, warn};

use crate::config::consts::JITTER_MS;
use crate::config::options::Endpoints;
use crate::core::net::{Gateway, Transport};
use crate::error::FetchError;
use crate::progress::Progress;
use crate::specs::job_posting;
use crate::specs::search::ListingId;
use crate::store::{Batch, JobRecord};

/// Fetch one posting and extract its record.
///
/// Only the fetch can fail; extraction degrades field by field.
pub fn parse_job_details<T: Transport>(
    gateway: &Gateway<T>,
    endpoints: &Endpoints,
    job_id: &str,
) -> Result<JobRecord, FetchError> {
    let url = endpoints.posting_url(job_id);
    let body = gateway.get_with_retry(&url)?;
    Ok(job_posting::parse_document(job_id, &body))
}

#[derive(Debug)]
pub struct RecordFailure {
    pub job_id: ListingId,
    pub error: FetchError,
}

#[derive(Debug, Default)]
pub struct CollectOutcome {
    /// Successful records, in the order of the input ids.
    pub batch: Batch,
    pub failures: Vec<RecordFailure>,
}

/// Fetch details for every id, skipping (and reporting) the ones that fail.
///
/// `workers` threads pull ids off a shared index; each call keeps its own
/// retry counter, so one worker's backoff never stalls another. Results are
/// put back into input order once all workers are done.
pub fn collect_details<T: Transport>(
    gateway: &Gateway<T>,
    endpoints: &Endpoints,
    ids: &[ListingId],
    workers: usize,
    pause: Duration,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> CollectOutcome {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
    }
    if ids.is_empty() {
        if let Some(p) = progress.as_deref_mut() {
            p.finish();
        }
        return CollectOutcome::default();
    }

    type FetchResult = (usize, Result<JobRecord, FetchError>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<FetchResult>();
    let workers = workers.min(ids.len()).max(1);

    let mut slots: Vec<Option<JobRecord>> = vec![None; ids.len()];
    let mut failures: Vec<(usize, RecordFailure)> = Vec::new();

    thread::scope(|s| {
        // Spawn workers
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            s.spawn(move || {
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let result = parse_job_details(gateway, endpoints, &ids[i]);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                    if !pause.is_zero() {
                        let jitter = (i as u64 * 37) % JITTER_MS;
                        thread::sleep(pause + Duration::from_millis(jitter)); // be polite
                    }
                }
            });
        }
        drop(res_tx); // this thread is the sole receiver now

        // Aggregate results
        for (i, result) in res_rx {
            let job_id = &ids[i];
            match result {
                Ok(record) => {
                    slots[i] = Some(record);
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(job_id);
                    }
                }
                Err(e) => {
                    if e.is_rate_limited() {
                        warn!("Job {job_id}: rate limit exhausted; skipping");
                    } else {
                        error!("Job {job_id}: {e}");
                    }
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(job_id, &e.to_string());
                    }
                    failures.push((i, RecordFailure { job_id: job_id.clone(), error: e }));
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    failures.sort_by_key(|(i, _)| *i);
    let batch = Batch::new(slots.into_iter().flatten().collect());
    info!("Extracted {} of {} posting(s); {} failed", batch.len(), ids.len(), failures.len());

    CollectOutcome {
        batch,
        failures: failures.into_iter().map(|(_, f)| f).collect(),
    }
}
