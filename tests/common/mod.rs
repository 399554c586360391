// tests/common/mod.rs
//
// Offline transports and fixtures shared by the integration tests.
//
#![allow(dead_code)]

use std::collections::VecDeque;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use job_scrape::FetchError;
use job_scrape::core::net::{Response, Transport};

pub const SEARCH_PAGE: &str = include_str!("../fixtures/search_page.html");
pub const JOB_POSTING: &str = include_str!("../fixtures/job_posting.html");
pub const JOB_POSTING_BARE: &str = include_str!("../fixtures/job_posting_bare.html");

/// Replays canned responses in order and records every requested URL.
/// Once the script runs out, every further request gets a 500.
#[derive(Default)]
pub struct Scripted {
    script: Mutex<VecDeque<Response>>,
    pub requests: Mutex<Vec<String>>,
}

impl Scripted {
    pub fn new(responses: impl IntoIterator<Item = Response>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for Scripted {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok(self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Response::new(500, "script exhausted")))
    }
}

/// Answers by URL: `route(url)` decides the response.
pub struct Routed<F: Fn(&str) -> Response + Sync> {
    route: F,
    pub requests: Mutex<Vec<String>>,
}

impl<F: Fn(&str) -> Response + Sync> Routed<F> {
    pub fn new(route: F) -> Self {
        Self { route, requests: Mutex::new(Vec::new()) }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl<F: Fn(&str) -> Response + Sync> Transport for Routed<F> {
    fn get(&self, url: &str) -> Result<Response, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());
        Ok((self.route)(url))
    }
}

/// Search fragment with one card per id.
pub fn search_page(ids: &[&str]) -> String {
    ids.iter()
        .map(|id| {
            format!(
                r#"<li><div class="base-card job-search-card" data-entity-urn="urn:li:jobPosting:{id}"></div></li>"#
            )
        })
        .collect()
}

pub fn ok(body: impl Into<String>) -> Response {
    Response::new(200, body)
}

pub fn status(code: u16) -> Response {
    Response::new(code, "")
}

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("job_scrape_{}", name));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}
