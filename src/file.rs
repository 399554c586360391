// src/file.rs
// Record Sink: write a batch to CSV/TSV/JSONL/XLSX, and read an escaped export back.

use std::{
    fs::{self, File},
    io::{BufRead, BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use rust_xlsxwriter::Workbook;
use tracing::info;

use crate::config::consts::XLSX_SHEET;
use crate::config::options::{ExportFormat, ExportOptions};
use crate::csv;
use crate::error::ExportError;
use crate::store::{Batch, JobRecord};

/// Write `batch` once per requested format. Returns the paths written.
pub fn export_batch(
    batch: &Batch,
    export: &ExportOptions,
    location: Option<&str>,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut written = Vec::with_capacity(export.formats.len());
    for &format in &export.formats {
        let path = export.out_path(location, format);
        write_batch(&path, batch, format)?;
        info!("Saved {} record(s) to {}", batch.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

pub fn write_batch(path: &Path, batch: &Batch, format: ExportFormat) -> Result<(), ExportError> {
    ensure_parent(path)?;
    match format {
        ExportFormat::Csv => write_delimited(path, batch, ','),
        ExportFormat::Tsv => write_delimited(path, batch, '\t'),
        ExportFormat::Jsonl => write_jsonl(path, batch),
        ExportFormat::Xlsx => write_xlsx(path, batch),
    }
}

/// Header row = column union of the batch; cell newlines escaped.
pub fn write_delimited(path: &Path, batch: &Batch, sep: char) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    csv::write_table(&mut out, &batch.to_table(), sep)?;
    out.flush()?;
    Ok(())
}

/// One JSON object per record; real newlines, missing fields as null.
pub fn write_jsonl(path: &Path, batch: &Batch) -> Result<(), ExportError> {
    let mut out = BufWriter::new(File::create(path)?);
    for rec in &batch.records {
        serde_json::to_writer(&mut out, rec)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// One `Jobs` sheet: header row = column union, then one row per record.
/// Cells hold real newlines; missing cells stay blank.
pub fn write_xlsx(path: &Path, batch: &Batch) -> Result<(), ExportError> {
    let table = batch.to_table();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(XLSX_SHEET)?;

    for (col, header) in table.headers.iter().enumerate() {
        sheet.write_string(0, col as u16, header)?;
    }
    for (row, cells) in table.rows.iter().enumerate() {
        for (col, cell) in cells.iter().enumerate() {
            if cell.is_empty() { continue; }
            sheet.write_string(row as u32 + 1, col as u16, cell)?;
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// Read a CSV/TSV export back, restoring escaped newlines.
pub fn read_delimited(path: &Path, sep: char) -> Result<Batch, ExportError> {
    let text = fs::read_to_string(path)?;
    let table = csv::parse_table(&text, sep).ok_or_else(|| ExportError::Malformed {
        path: path.display().to_string(),
        reason: s!("missing header row"),
    })?;
    if !table.headers.iter().any(|h| h == "job_id") {
        return Err(ExportError::Malformed {
            path: path.display().to_string(),
            reason: s!("no job_id column"),
        });
    }
    Ok(Batch::from_table(table))
}

pub fn read_jsonl(path: &Path) -> Result<Batch, ExportError> {
    let reader = BufReader::new(File::open(path)?);
    let mut batch = Batch::default();
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: JobRecord = serde_json::from_str(&line)?;
        batch.push(rec);
    }
    Ok(batch)
}

/// Re-emit an escaped CSV/TSV export next to it, once per target format.
/// Returns the paths written.
pub fn convert(src: &Path, targets: &[ExportFormat]) -> Result<Vec<PathBuf>, ExportError> {
    let sep = match src.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => '\t',
        _ => ',',
    };
    let batch = read_delimited(src, sep)?;

    let mut written = Vec::with_capacity(targets.len());
    for &format in targets {
        let dest = src.with_extension(format.ext());
        if dest == src {
            continue;
        }
        write_batch(&dest, &batch, format)?;
        info!("Converted {} -> {}", src.display(), dest.display());
        written.push(dest);
    }
    Ok(written)
}

fn ensure_parent(path: &Path) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            ensure_directory(parent)?;
        }
    }
    Ok(())
}

pub fn ensure_directory(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ExportError::NotADirectory(dir.display().to_string()));
    }
    if !dir.exists() { fs::create_dir_all(dir)?; }
    Ok(())
}
