// src/lib.rs

#[macro_use]
pub mod macros;

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod file;
pub mod log;
pub mod progress;
pub mod runner;
pub mod scrape;
pub mod specs;
pub mod store;

pub use error::{FetchError, PaginationError, RunError};
pub use store::{Batch, JobRecord};
