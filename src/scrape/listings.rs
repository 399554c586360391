// src/scrape/listings.rs
// Listing Paginator: walk result pages and collect listing ids.

use std::collections::HashSet;

use tracing::{debug, error, info, warn};
use url::Url;

use crate::config::options::Dedup;
use crate::core::net::{Gateway, Transport};
use crate::error::{FetchError, PaginationError};
use crate::specs::search::{ListingId, parse_listing_ids, with_page_offset};

/// ceil(total / per_page). A zero page size has no pages.
pub fn page_count(total_estimate: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    total_estimate.div_ceil(per_page)
}

/// Fetch pages `0..ceil(total/per_page)` of `search_url` and collect ids.
///
/// Page `n` is requested with `start = n * per_page`; every other query pair
/// of `search_url` is kept. Ids come back in fetch order. With
/// [`Dedup::Keep`] repeats across pages stay in (an overshooting estimate can
/// make the last pages overlap); [`Dedup::FirstSeen`] keeps only the first.
///
/// The first failing page stops the pass. The error carries the page index
/// and the ids collected so far.
pub fn extract_job_ids<T: Transport>(
    gateway: &Gateway<T>,
    search_url: &str,
    total_estimate: usize,
    per_page: usize,
    dedup: Dedup,
) -> Result<Vec<ListingId>, PaginationError> {
    let pages = page_count(total_estimate, per_page);
    if per_page == 0 {
        warn!("Page size is 0; no pages requested");
    }

    let mut ids: Vec<ListingId> = Vec::new();
    let mut seen: HashSet<ListingId> = HashSet::new();

    let base = Url::parse(search_url).map_err(|source| PaginationError {
        page: 0,
        offset: 0,
        collected: Vec::new(),
        source: FetchError::InvalidUrl { url: search_url.to_string(), source },
    })?;

    for page in 0..pages {
        let offset = page * per_page;
        let paged = with_page_offset(&base, offset);

        let body = match gateway.get_with_retry(paged.as_str()) {
            Ok(body) => body,
            Err(source) => {
                error!("Page {page} (start={offset}) failed after {} id(s): {source}", ids.len());
                return Err(PaginationError { page, offset, collected: ids, source });
            }
        };

        let found = parse_listing_ids(&body);
        debug!("Page {page} (start={offset}): {} id(s)", found.len());
        for id in found {
            match dedup {
                Dedup::Keep => ids.push(id),
                Dedup::FirstSeen => {
                    if seen.insert(id.clone()) {
                        ids.push(id);
                    }
                }
            }
        }
    }

    info!("Collected {} listing id(s) from {pages} page(s)", ids.len());
    Ok(ids)
}
