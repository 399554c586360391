// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, bail};

use crate::config::{
    consts::{DEFAULT_CONFIG_FILE, DEFAULT_KEYWORDS},
    file as config_file,
    options::{AppOptions, Dedup, ExportFormat},
};
use crate::core::net::Gateway;
use crate::error::ConfigError;
use crate::progress::ConsoleProgress;
use crate::{file, runner};

/// Scrape public guest job listings into CSV/TSV/JSONL/XLSX.
#[derive(Debug, Parser)]
#[command(name = "job_scrape", version, about)]
pub struct Args {
    /// Free-text location, e.g. "Las Vegas, Nevada, United States"
    #[arg(short, long)]
    pub location: Option<String>,

    /// Search keywords [default: "Python (Programming Language)"]
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Provider geographic id
    #[arg(long)]
    pub geo_id: Option<String>,

    /// Filter as name=v1,v2 (experience, job_type, job_function,
    /// company_size, remote, posted). Repeatable.
    #[arg(short, long = "filter", value_name = "NAME=CODES")]
    pub filters: Vec<String>,

    /// Page through this search URL instead of building one
    #[arg(long, conflicts_with_all = ["keywords", "location", "geo_id", "filters"])]
    pub url: Option<String>,

    /// Estimated result count; decides how many pages are requested
    #[arg(short, long)]
    pub total: Option<usize>,

    #[arg(long)]
    pub per_page: Option<usize>,

    /// Duplicate ids across pages: keep | first
    #[arg(long)]
    pub dedup: Option<Dedup>,

    /// Parallel detail fetches
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Attempts per request while rate limited
    #[arg(long)]
    pub retries: Option<u32>,

    #[arg(long)]
    pub backoff_secs: Option<u64>,

    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Output format: csv | tsv | jsonl | xlsx. Repeatable
    /// [default: csv, jsonl, xlsx]
    #[arg(long = "format")]
    pub formats: Vec<ExportFormat>,

    /// Output directory
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// key = value config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Print listing ids and exit
    #[arg(long)]
    pub ids_only: bool,

    /// Re-read an escaped CSV/TSV export and write it as JSONL and XLSX
    #[arg(long, value_name = "FILE")]
    pub convert: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Defaults, then the config file, then flags.
    pub fn to_options(&self) -> Result<AppOptions> {
        let mut opts = AppOptions::default();

        let (path, explicit) = match &self.config {
            Some(p) => (p.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let loaded = config_file::load(&path, &mut opts)?;
        if explicit && !loaded {
            bail!("config file not found: {}", path.display());
        }

        let s = &mut opts.scrape;
        if let Some(v) = &self.location { s.query.location = Some(v.clone()); }
        if let Some(v) = &self.keywords { s.query.keywords = Some(v.clone()); }
        if let Some(v) = &self.geo_id { s.query.geo_id = Some(v.clone()); }
        for f in &self.filters {
            let (name, vals) = config_file::parse_filter_arg(f)?;
            s.query.filters.insert(name, vals);
        }
        if self.url.is_some() { s.search_url = self.url.clone(); }
        if let Some(v) = self.total { s.total_estimate = v; }
        if let Some(v) = self.per_page {
            if v == 0 {
                return Err(ConfigError::InvalidFlag { flag: s!("per-page"), value: v.to_string() }.into());
            }
            s.per_page = v;
        }
        if let Some(v) = self.dedup { s.dedup = v; }
        if let Some(v) = self.workers { s.workers = v; }
        if let Some(v) = self.retries { s.retry.max_retries = v; }
        if let Some(v) = self.backoff_secs { s.retry.backoff = std::time::Duration::from_secs(v); }
        if let Some(v) = self.timeout_secs { s.timeout = std::time::Duration::from_secs(v); }
        if s.query.keywords.is_none() {
            s.query.keywords = Some(s!(DEFAULT_KEYWORDS));
        }

        if !self.formats.is_empty() { opts.export.formats = self.formats.clone(); }
        if let Some(v) = &self.out { opts.export.out_dir = v.clone(); }
        Ok(opts)
    }
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    crate::log::init(args.verbose);

    if let Some(src) = &args.convert {
        let written = file::convert(src, &[ExportFormat::Jsonl, ExportFormat::Xlsx])
            .wrap_err_with(|| format!("converting {}", src.display()))?;
        for dest in written {
            println!("Wrote {}", dest.display());
        }
        return Ok(());
    }

    let opts = args.to_options()?;

    if args.ids_only {
        let gateway = Gateway::http(opts.scrape.timeout, opts.scrape.retry)?;
        for id in runner::collect_ids(&gateway, &opts)? {
            println!("{id}");
        }
        return Ok(());
    }

    let mut progress = ConsoleProgress::default();
    let summary = runner::run(&opts, Some(&mut progress))?;

    for f in &summary.failures {
        eprintln!("Skipped {}: {}", f.job_id, f.error);
    }
    println!(
        "{} id(s), {} record(s), {} failure(s)",
        summary.ids_found,
        summary.records,
        summary.failures.len()
    );
    for path in &summary.files_written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
