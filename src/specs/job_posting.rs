// src/specs/job_posting.rs
//! Scraping *spec* for a single job posting (detail document).
//!
//! Every field has its own extractor: a pure function from the parsed
//! document to `Option<String>`. A missing element only blanks that field;
//! nothing here can fail a record. The fetch itself lives in
//! `scrape::details`.
//!
//! Criteria (`Seniority level`, `Employment type`, ...) are discovered by
//! label, so the set of keys differs from posting to posting.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::core::html::{self, first_attr, first_text, select_all, select_first, text_of};
use crate::core::sanitize::criterion_key;
use crate::store::JobRecord;

const COMPANY: &str = ".top-card-layout__card a img";
const TITLE: &str = ".top-card-layout__entity-info a";
const LOCATION: &str = ".topcard__flavor-row .topcard__flavor--bullet";
const DATE_POSTED: &str = ".posted-time-ago__text";
const APPLICANTS: &str = ".num-applicants__caption";
const COMPANY_SITE: &str = ".topcard__org-url a";
const WORKPLACE_TYPE: &str = ".jobs-unified-top-card__workplace-type";
const CRITERIA_ITEMS: &str = "ul.description__job-criteria-list li";
const DESCRIPTION: &str = ".description__text";
const DETAILS: &str = "section.show-more-less-html";

/// Parse a fetched detail document into a record.
pub fn parse_document(job_id: &str, doc: &str) -> JobRecord {
    let doc = html::parse(doc);

    let mut record = JobRecord {
        job_id: job_id.to_string(),
        company: company(&doc),
        title: title(&doc),
        location: location(&doc),
        date_posted: date_posted(&doc),
        applicants: applicants(&doc),
        company_website: company_website(&doc),
        workplace_type: workplace_type(&doc),
        description: description(&doc),
        all_details: all_details(&doc),
        ..Default::default()
    };

    for (key, value) in criteria(&doc) {
        if !record.insert_criterion(&key, value) {
            debug!("Job {job_id}: criterion `{key}` shadows a fixed field; dropped");
        }
    }
    record
}

pub fn company(doc: &Html) -> Option<String> {
    first_attr(doc.root_element(), COMPANY, "alt")
}

pub fn title(doc: &Html) -> Option<String> {
    first_text(doc.root_element(), TITLE)
}

pub fn location(doc: &Html) -> Option<String> {
    first_text(doc.root_element(), LOCATION)
}

pub fn date_posted(doc: &Html) -> Option<String> {
    first_text(doc.root_element(), DATE_POSTED)
}

pub fn applicants(doc: &Html) -> Option<String> {
    first_text(doc.root_element(), APPLICANTS)
}

pub fn company_website(doc: &Html) -> Option<String> {
    first_attr(doc.root_element(), COMPANY_SITE, "href")
}

pub fn workplace_type(doc: &Html) -> Option<String> {
    first_text(doc.root_element(), WORKPLACE_TYPE)
}

/// Labelled criteria in page order: (`seniority_level`, `Mid-Senior level`), ...
/// Items missing either the heading or the value are skipped.
pub fn criteria(doc: &Html) -> Vec<(String, String)> {
    select_all(doc.root_element(), CRITERIA_ITEMS)
        .into_iter()
        .filter_map(|li| {
            let heading = select_first(li, "h3").and_then(text_of)?;
            let value = select_first(li, "span").and_then(text_of)?;
            Some((criterion_key(&heading), value))
        })
        .collect()
}

/// Paragraph and list-item text of the description block, one per line.
pub fn description(doc: &Html) -> Option<String> {
    let block = select_first(doc.root_element(), DESCRIPTION)?;
    let lines: Vec<String> = select_all(block, "p, li")
        .into_iter()
        .filter_map(text_of)
        .collect();
    join_lines(&lines)
}

/// Light markdown rendering of the "show more" block: headings as
/// `\n**text**`, list items as `- text`, paragraphs as-is.
pub fn all_details(doc: &Html) -> Option<String> {
    let section = select_first(doc.root_element(), DETAILS)?;
    let lines: Vec<String> = select_all(section, "h1, h2, h3, h4, h5, h6, p, li")
        .into_iter()
        .filter_map(render_detail)
        .collect();
    join_lines(&lines)
}

fn render_detail(el: ElementRef<'_>) -> Option<String> {
    let text = text_of(el)?;
    let line = match el.value().name() {
        "li" => format!("- {text}"),
        "p" => text,
        _ => format!("\n**{text}**"),
    };
    Some(line)
}

fn join_lines(lines: &[String]) -> Option<String> {
    let joined = lines.join("\n");
    let trimmed = joined.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_render_bold_on_their_own_line() {
        let doc = Html::parse_document(
            r#"<section class="show-more-less-html">
                 <p>Intro</p><h3>Duties</h3><ul><li>Write Rust</li><li> </li></ul>
               </section>"#,
        );
        assert_eq!(all_details(&doc).as_deref(), Some("Intro\n\n**Duties**\n- Write Rust"));
    }

    #[test]
    fn leading_heading_is_trimmed() {
        let doc = Html::parse_document(
            r#"<section class="show-more-less-html"><h2>About</h2><p>Us</p></section>"#,
        );
        assert_eq!(all_details(&doc).as_deref(), Some("**About**\nUs"));
    }

    #[test]
    fn empty_description_block_is_none() {
        let doc = Html::parse_document(r#"<div class="description__text"><p>  </p></div>"#);
        assert_eq!(description(&doc), None);
    }

    #[test]
    fn criteria_need_heading_and_value() {
        let doc = Html::parse_document(
            r#"<ul class="description__job-criteria-list">
                 <li><h3>Employment Type</h3><span>Full-time</span></li>
                 <li><h3>Industries</h3></li>
                 <li><span>orphan</span></li>
               </ul>"#,
        );
        assert_eq!(criteria(&doc), vec![(s!("employment_type"), s!("Full-time"))]);
    }
}
