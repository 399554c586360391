// src/core/sanitize.rs

use crate::config::consts::FILE_PREFIX;

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "Seniority level" -> "seniority_level"
pub fn criterion_key(heading: &str) -> String {
    heading.to_lowercase().replace(' ', "_")
}

/// Output file stem for a location: spaces become `_`, commas are dropped.
pub fn output_stem(location: Option<&str>) -> String {
    let safe: String = location
        .unwrap_or("")
        .trim()
        .replace(' ', "_")
        .chars()
        .filter(|c| *c != ',' && !matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|'))
        .collect();
    if safe.is_empty() {
        join!(FILE_PREFIX, "_all")
    } else {
        join!(FILE_PREFIX, "_", &safe)
    }
}

/// Escape a cell for formats that cannot hold embedded newlines.
/// `\` -> `\\`, LF -> `\n`, CR -> `\r`.
pub fn escape_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out
}

/// Inverse of [`escape_newlines`]. Unknown escapes are kept as written.
pub fn unescape_newlines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('\\') => out.push('\\'),
            Some(other) => { out.push('\\'); out.push(other); }
            None => out.push('\\'),
        }
    }
    out
}
