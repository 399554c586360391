// src/store.rs
//! In-memory records and the batch they are collected into.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Fixed columns, in export order. Criteria columns follow these.
pub const FIXED_COLUMNS: [&str; 10] = [
    "job_id",
    "company",
    "title",
    "location",
    "date_posted",
    "applicants",
    "company_website",
    "workplace_type",
    "description",
    "all_details",
];

/// One extracted posting. Immutable once built by the extractor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    pub job_id: String,
    pub company: Option<String>,
    pub title: Option<String>,
    pub location: Option<String>,
    pub date_posted: Option<String>,
    pub applicants: Option<String>,
    pub company_website: Option<String>,
    pub workplace_type: Option<String>,
    pub description: Option<String>,
    pub all_details: Option<String>,
    /// Per-record criteria discovered by label, in page order.
    #[serde(flatten)]
    pub criteria: IndexMap<String, String>,
}

impl JobRecord {
    pub fn new(job_id: impl Into<String>) -> Self {
        Self { job_id: job_id.into(), ..Default::default() }
    }

    /// Add a criterion. Keys naming a fixed column are refused (`false`);
    /// a repeated key keeps its first position and takes the new value.
    pub fn insert_criterion(&mut self, key: &str, value: String) -> bool {
        if FIXED_COLUMNS.contains(&key) {
            return false;
        }
        self.criteria.insert(key.to_string(), value);
        true
    }

    /// Cell value for `column`, fixed or criterion.
    pub fn get(&self, column: &str) -> Option<&str> {
        let fixed = match column {
            "job_id" => return Some(self.job_id.as_str()),
            "company" => &self.company,
            "title" => &self.title,
            "location" => &self.location,
            "date_posted" => &self.date_posted,
            "applicants" => &self.applicants,
            "company_website" => &self.company_website,
            "workplace_type" => &self.workplace_type,
            "description" => &self.description,
            "all_details" => &self.all_details,
            other => return self.criteria.get(other).map(String::as_str),
        };
        fixed.as_deref()
    }

    /// Inverse of [`get`](Self::get): set a column from a cell read back
    /// from a table. Empty cells leave the column unset.
    pub fn set(&mut self, column: &str, value: String) {
        if value.is_empty() && column != "job_id" {
            return;
        }
        let slot = match column {
            "job_id" => { self.job_id = value; return; }
            "company" => &mut self.company,
            "title" => &mut self.title,
            "location" => &mut self.location,
            "date_posted" => &mut self.date_posted,
            "applicants" => &mut self.applicants,
            "company_website" => &mut self.company_website,
            "workplace_type" => &mut self.workplace_type,
            "description" => &mut self.description,
            "all_details" => &mut self.all_details,
            other => { self.criteria.insert(other.to_string(), value); return; }
        };
        *slot = Some(value);
    }
}

/// Headers plus rows of plain cells, ready for a delimited writer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// All records of one run, in fetch order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Batch {
    pub records: Vec<JobRecord>,
}

impl Batch {
    pub fn new(records: Vec<JobRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn push(&mut self, record: JobRecord) {
        self.records.push(record);
    }

    /// Column union over the batch: fixed columns, then criteria keys in
    /// first-seen order.
    pub fn columns(&self) -> Vec<String> {
        let mut cols: IndexSet<String> = FIXED_COLUMNS.iter().map(|c| s!(*c)).collect();
        for rec in &self.records {
            for key in rec.criteria.keys() {
                if !cols.contains(key) {
                    cols.insert(key.clone());
                }
            }
        }
        cols.into_iter().collect()
    }

    /// Flatten to a table over [`columns`](Self::columns); missing cells are empty.
    pub fn to_table(&self) -> Table {
        let headers = self.columns();
        let rows = self
            .records
            .iter()
            .map(|rec| {
                headers
                    .iter()
                    .map(|col| rec.get(col).unwrap_or_default().to_string())
                    .collect()
            })
            .collect();
        Table { headers, rows }
    }

    /// Rebuild records from a table written by [`to_table`](Self::to_table).
    pub fn from_table(table: Table) -> Self {
        let records = table
            .rows
            .into_iter()
            .map(|row| {
                let mut rec = JobRecord::default();
                for (col, cell) in table.headers.iter().zip(row) {
                    rec.set(col, cell);
                }
                rec
            })
            .collect();
        Self { records }
    }
}
