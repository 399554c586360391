// src/scrape/mod.rs
mod details;
mod listings;

pub use details::{CollectOutcome, RecordFailure, collect_details, parse_job_details};
pub use listings::{extract_job_ids, page_count};
