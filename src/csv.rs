// src/csv.rs
// Delimited text codec (CSV/TSV). Cells never carry raw newlines: they are
// escaped to `\n` on write and restored on read.
use std::io::{self, Write};
use std::mem::take;

use crate::core::sanitize::{escape_newlines, unescape_newlines};
use crate::store::Table;

/* ---------------- Parsing ---------------- */

/// Minimal CSV/TSV parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush any trailing field/row even if quotes were unterminated.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Parse an exported table: first row is the header, cells are unescaped.
pub fn parse_table(text: &str, sep: char) -> Option<Table> {
    let mut rows = parse_rows(text, sep).into_iter();
    let headers = rows.next()?;
    let rows = rows
        .map(|r| r.iter().map(|c| unescape_newlines(c)).collect())
        .collect();
    Some(Table { headers, rows })
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer. Cells go out as given.
pub fn write_row<W: Write>(mut w: W, row: &[String], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        if needs_quotes(cell, sep) {
            let escaped = cell.replace('"', "\"\"");
            write!(w, "\"{}\"", escaped)?;
        } else {
            write!(w, "{}", cell)?;
        }
    }
    writeln!(w)
}

/// Header row plus every data row, newlines escaped in each cell.
pub fn write_table<W: Write>(mut w: W, table: &Table, sep: char) -> io::Result<()> {
    write_row(&mut w, &table.headers, sep)?;
    for r in &table.rows {
        let escaped: Vec<String> = r.iter().map(|c| escape_newlines(c)).collect();
        write_row(&mut w, &escaped, sep)?;
    }
    Ok(())
}
