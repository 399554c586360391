// src/config/consts.rs

// Net config
pub const API_BASE: &str = "https://www.linkedin.com/jobs-guest/jobs/api";
pub const SEARCH_PATH: &str = "/seeMoreJobPostings/search";
pub const POSTING_PATH: &str = "/jobPosting/";

// The guest endpoints reject requests without a believable browser identity.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/107.0.0.0 Safari/537.36";

pub const REQUEST_TIMEOUT_SECS: u64 = 30;
pub const MAX_RETRIES: u32 = 3;
pub const BACKOFF_SECS: u64 = 5;

// Paging
pub const PAGE_PARAM: &str = "start";
pub const PER_PAGE: usize = 25;
pub const DEFAULT_TOTAL_ESTIMATE: usize = 100;

// Search
pub const DEFAULT_KEYWORDS: &str = "Python (Programming Language)";

/// Logical filter name -> provider query key.
pub const FILTER_CATALOG: [(&str, &str); 6] = [
    ("experience", "f_E"),     // e.g. 2,3 for Associate, Mid-Senior
    ("job_type", "f_JT"),      // F, P, C, I
    ("job_function", "f_JC"),
    ("company_size", "f_SB"),
    ("remote", "f_WT"),        // 1 on-site, 2 remote, 3 hybrid
    ("posted", "f_TPR"),       // r2592000 = past 30 days
];

// Concurrency
pub const WORKERS: usize = 1;
pub const REQUEST_PAUSE_MS: u64 = 250; // be polite
pub const JITTER_MS: u64 = 100; // extra 0..100 ms

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const FILE_PREFIX: &str = "linkedin_jobs";
pub const DEFAULT_CONFIG_FILE: &str = "job_scrape.conf";
pub const XLSX_SHEET: &str = "Jobs";

// Local state
pub const STORE_DIR: &str = ".store";
pub const LOG_FILE: &str = "debug.log";

/// Provider key for a logical filter name, if it is one we forward.
pub fn provider_key(name: &str) -> Option<&'static str> {
    FILTER_CATALOG
        .iter()
        .find(|(logical, _)| *logical == name)
        .map(|(_, key)| *key)
}
