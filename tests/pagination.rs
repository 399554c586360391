// tests/pagination.rs
//
// Listing Paginator over a scripted transport.
//
mod common;

use std::time::Duration;

use job_scrape::FetchError;
use job_scrape::config::options::{Dedup, RetryPolicy};
use job_scrape::core::net::Gateway;
use job_scrape::scrape::extract_job_ids;
use url::Url;

use common::{Scripted, ok, search_page, status};

const SEARCH: &str = "https://example.test/api/seeMoreJobPostings/search?keywords=Rust&location=Berlin&start=0";

fn policy() -> RetryPolicy {
    RetryPolicy { max_retries: 3, backoff: Duration::ZERO }
}

fn offsets(urls: &[String]) -> Vec<String> {
    urls.iter()
        .map(|u| {
            Url::parse(u)
                .unwrap()
                .query_pairs()
                .find(|(k, _)| k == "start")
                .map(|(_, v)| v.into_owned())
                .unwrap()
        })
        .collect()
}

#[test]
fn requests_ceil_total_over_per_page_pages() {
    let pages = (0..5).map(|p| ok(search_page(&[&format!("{p}1"), &format!("{p}2")])));
    let gw = Gateway::new(Scripted::new(pages), policy());

    let ids = extract_job_ids(&gw, SEARCH, 117, 25, Dedup::Keep).unwrap();

    let requested = gw.transport().requested();
    assert_eq!(requested.len(), 5);
    assert_eq!(offsets(&requested), ["0", "25", "50", "75", "100"]);
    assert!(requested.iter().all(|u| u.contains("keywords=Rust") && u.contains("location=Berlin")));
    assert_eq!(ids.len(), 10);
    assert_eq!(ids[0], "01");
    assert_eq!(ids[9], "42");
}

#[test]
fn items_without_identity_are_skipped() {
    let gw = Gateway::new(Scripted::new([ok(common::SEARCH_PAGE)]), policy());
    let ids = extract_job_ids(&gw, SEARCH, 25, 25, Dedup::Keep).unwrap();
    assert_eq!(ids, ["3912345678", "3987654321"]);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[test]
fn zero_estimate_requests_nothing() {
    let gw = Gateway::new(Scripted::default(), policy());
    let ids = extract_job_ids(&gw, SEARCH, 0, 25, Dedup::Keep).unwrap();
    assert!(ids.is_empty());
    assert!(gw.transport().requested().is_empty());
}

#[test]
fn zero_page_size_requests_nothing() {
    let gw = Gateway::new(Scripted::new([ok(search_page(&["1"]))]), policy());
    let ids = extract_job_ids(&gw, SEARCH, 1000, 0, Dedup::Keep).unwrap();
    assert!(ids.is_empty());
    assert!(gw.transport().requested().is_empty());
}

#[test]
fn overlapping_pages_keep_repeats_by_default() {
    let script = [ok(search_page(&["1", "2"])), ok(search_page(&["2", "3"]))];
    let gw = Gateway::new(Scripted::new(script), policy());
    let ids = extract_job_ids(&gw, SEARCH, 50, 25, Dedup::Keep).unwrap();
    assert_eq!(ids, ["1", "2", "2", "3"]);
}

#[test]
fn first_seen_dedup_drops_later_repeats() {
    let script = [ok(search_page(&["1", "2"])), ok(search_page(&["2", "3", "1"]))];
    let gw = Gateway::new(Scripted::new(script), policy());
    let ids = extract_job_ids(&gw, SEARCH, 50, 25, Dedup::FirstSeen).unwrap();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn failing_page_aborts_with_collected_ids() {
    let script = [ok(search_page(&["1", "2"])), ok(search_page(&["3"])), status(503)];
    let gw = Gateway::new(Scripted::new(script), policy());

    let err = extract_job_ids(&gw, SEARCH, 100, 25, Dedup::Keep).unwrap_err();
    assert_eq!(err.page, 2);
    assert_eq!(err.offset, 50);
    assert_eq!(err.collected, ["1", "2", "3"]);
    assert!(matches!(err.source, FetchError::Http { status: 503, .. }));
    // no request past the failing page
    assert_eq!(gw.transport().requested().len(), 3);
}

#[test]
fn invalid_search_url_fails_before_any_request() {
    let gw = Gateway::new(Scripted::default(), policy());
    let err = extract_job_ids(&gw, "not a url", 50, 25, Dedup::Keep).unwrap_err();
    assert!(matches!(err.source, FetchError::InvalidUrl { .. }));
    assert!(gw.transport().requested().is_empty());
}
