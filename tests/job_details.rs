// tests/job_details.rs
//
// Detail Extractor against saved posting pages, plus the batch collector.
//
mod common;

use std::time::Duration;

use job_scrape::config::options::{Endpoints, RetryPolicy};
use job_scrape::core::net::Gateway;
use job_scrape::progress::Progress;
use job_scrape::scrape::{collect_details, parse_job_details};
use job_scrape::specs::job_posting::parse_document;
use job_scrape::store::FIXED_COLUMNS;

use common::{JOB_POSTING, JOB_POSTING_BARE, Routed, Scripted, ok, status};

fn policy() -> RetryPolicy {
    RetryPolicy { max_retries: 2, backoff: Duration::ZERO }
}

#[test]
fn full_posting_fields() {
    let rec = parse_document("3912345678", JOB_POSTING);
    assert_eq!(rec.job_id, "3912345678");
    assert_eq!(rec.company.as_deref(), Some("Acme Robotics"));
    assert_eq!(rec.title.as_deref(), Some("Senior Rust Engineer"));
    assert_eq!(rec.location.as_deref(), Some("Las Vegas, NV"));
    assert_eq!(rec.date_posted.as_deref(), Some("2 weeks ago"));
    assert_eq!(rec.applicants.as_deref(), Some("Over 200 applicants"));
    assert_eq!(rec.company_website.as_deref(), Some("https://acme-robotics.example.com/careers"));
    assert_eq!(rec.workplace_type.as_deref(), Some("Hybrid"));
}

#[test]
fn criteria_keys_in_page_order() {
    let rec = parse_document("1", JOB_POSTING);
    let keys: Vec<&str> = rec.criteria.keys().map(String::as_str).collect();
    assert_eq!(keys, ["seniority_level", "employment_type", "job_function", "industries"]);
    assert_eq!(rec.get("employment_type"), Some("Full-time"));
    assert_eq!(rec.get("seniority_level"), Some("Mid-Senior level"));
    assert_eq!(rec.get("industries"), Some("Robotics Engineering"));
}

#[test]
fn description_and_details_text() {
    let rec = parse_document("1", JOB_POSTING);
    assert_eq!(
        rec.description.as_deref(),
        Some("We build autonomous warehouse robots.\nOwn the motion-planning service\nShip safe, fast Rust\n5+ years of systems programming")
    );
    assert_eq!(
        rec.all_details.as_deref(),
        Some("We build autonomous warehouse robots.\n\n**What you'll do**\n- Own the motion-planning service\n- Ship safe, fast Rust\n\n**Requirements**\n- 5+ years of systems programming")
    );
}

#[test]
fn bare_posting_keeps_fixed_columns_as_null() {
    let rec = parse_document("77", JOB_POSTING_BARE);
    assert_eq!(rec.title.as_deref(), Some("Warehouse Associate"));
    assert!(rec.criteria.is_empty());

    let json = serde_json::to_value(&rec).unwrap();
    let obj = json.as_object().unwrap();
    let keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    assert_eq!(keys.len(), FIXED_COLUMNS.len());
    for col in FIXED_COLUMNS {
        assert!(obj.contains_key(col), "missing {col}");
    }
    assert!(obj["company"].is_null());
    assert!(obj["all_details"].is_null());
    assert_eq!(obj["job_id"], "77");
}

#[test]
fn empty_document_still_yields_a_record() {
    let rec = parse_document("5", "");
    assert_eq!(rec.job_id, "5");
    assert_eq!(rec.title, None);
    assert_eq!(rec.description, None);
}

#[test]
fn details_fetch_hits_posting_url() {
    let endpoints = Endpoints::new("https://jobs.test/api");
    let gw = Gateway::new(Scripted::new([ok(JOB_POSTING)]), policy());

    let rec = parse_job_details(&gw, &endpoints, "3912345678").unwrap();
    assert_eq!(rec.title.as_deref(), Some("Senior Rust Engineer"));
    assert_eq!(gw.transport().requested(), ["https://jobs.test/api/jobPosting/3912345678"]);
}

#[derive(Default)]
struct Recorder {
    total: usize,
    done: Vec<String>,
    failed: Vec<String>,
    finished: bool,
}

impl Progress for Recorder {
    fn begin(&mut self, total: usize) { self.total = total; }
    fn item_done(&mut self, job_id: &str) { self.done.push(job_id.to_string()); }
    fn item_failed(&mut self, job_id: &str, _reason: &str) { self.failed.push(job_id.to_string()); }
    fn finish(&mut self) { self.finished = true; }
}

#[test]
fn collect_keeps_input_order_and_skips_failures() {
    let endpoints = Endpoints::new("https://jobs.test/api");
    let gw = Gateway::new(
        Routed::new(|url: &str| {
            if url.ends_with("/bad") {
                status(404)
            } else if url.ends_with("/limited") {
                status(429)
            } else {
                ok(JOB_POSTING)
            }
        }),
        policy(),
    );

    let ids: Vec<String> = ["a", "bad", "b", "limited", "c", "d"].map(String::from).into();
    let mut rec = Recorder::default();
    let out = collect_details(&gw, &endpoints, &ids, 3, Duration::ZERO, Some(&mut rec));

    let got: Vec<&str> = out.batch.records.iter().map(|r| r.job_id.as_str()).collect();
    assert_eq!(got, ["a", "b", "c", "d"]);

    let failed: Vec<&str> = out.failures.iter().map(|f| f.job_id.as_str()).collect();
    assert_eq!(failed, ["bad", "limited"]);
    assert_eq!(out.failures[0].error.status(), Some(404));
    assert!(out.failures[1].error.is_rate_limited());

    assert_eq!(rec.total, 6);
    assert_eq!(rec.done.len(), 4);
    assert_eq!(rec.failed.len(), 2);
    assert!(rec.finished);

    // 404 once, 429 twice (budget of 2), four successes
    assert_eq!(gw.transport().requested().len(), 7);
}

#[test]
fn collect_with_no_ids_requests_nothing() {
    let gw = Gateway::new(Scripted::default(), policy());
    let out = collect_details(&gw, &Endpoints::default(), &[], 4, Duration::ZERO, None);
    assert!(out.batch.is_empty());
    assert!(out.failures.is_empty());
    assert!(gw.transport().requested().is_empty());
}
