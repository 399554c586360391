// src/specs/mod.rs
//! # Page "specs"
//!
//! One module per remote page, each encoding *where the data lives in the
//! HTML* and *how to extract it*:
//!
//! - `search` – the paged search-results fragment: query construction and
//!   listing-id extraction.
//! - `job_posting` – the per-listing detail document: fixed fields, the
//!   criteria list, and the description blocks.
//!
//! Specs are pure: they take HTML text (or query inputs) and return values.
//! Fetching, retries, paging and export live in `core::net`, `scrape` and
//! `file`. Specs should stay testable offline against saved fixtures.
pub mod job_posting;
pub mod search;
