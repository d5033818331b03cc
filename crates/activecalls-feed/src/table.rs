//! Regex-based extraction of the incident table.
//!
//! The upstream page is a single server-rendered table; closing `</tr>` and
//! `</td>` tags are optional in HTML, so rows and cells are delimited by
//! their opening tags and trimmed at a closing tag when one is present.

use std::sync::LazyLock;

use activecalls_core::IncidentRow;
use regex::Regex;

use crate::error::FeedError;

/// Rows with fewer cells than this are skipped.
pub const MIN_CELLS: usize = 7;

static TABLE_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<table\b[^>]*>").expect("valid regex"));
static TABLE_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</table\s*>").expect("valid regex"));
static ROW_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>").expect("valid regex"));
static ROW_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</tr\s*>").expect("valid regex"));
static CELL_OPEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>").expect("valid regex"));
static CELL_CLOSE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</td\s*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid regex"));

/// Extracts incident rows from the first `<table>` in `html`.
///
/// The first `<tr>` is the header and is always skipped. Cell order is
/// dispatch time, general type, box number, (unused), specific type,
/// street, status.
///
/// # Errors
///
/// Returns [`FeedError::TableNotFound`] if the document has no `<table>`.
pub fn parse_incident_rows(html: &str) -> Result<Vec<IncidentRow>, FeedError> {
    let table = extract_first_table(html).ok_or(FeedError::TableNotFound)?;

    let mut rows = Vec::new();
    for (index, row_html) in split_on_open_tag(table, &ROW_OPEN_RE, &ROW_CLOSE_RE)
        .into_iter()
        .enumerate()
        .skip(1)
    {
        let cells: Vec<String> = split_on_open_tag(row_html, &CELL_OPEN_RE, &CELL_CLOSE_RE)
            .into_iter()
            .map(cell_text)
            .collect();

        if cells.len() < MIN_CELLS {
            tracing::debug!(
                row = index,
                cells = cells.len(),
                "skipping table row with too few cells"
            );
            continue;
        }

        let mut cells = cells.into_iter();
        let mut next = || cells.next().unwrap_or_default();
        let dispatch_time = next();
        let type_general = next();
        let box_no = next();
        let _unused = next();
        let type_specific = next();
        let street = next();
        let status = next();

        rows.push(IncidentRow {
            dispatch_time,
            type_general,
            box_no,
            type_specific,
            street,
            status,
        });
    }

    tracing::debug!(rows = rows.len(), "parsed incident table");
    Ok(rows)
}

fn extract_first_table(html: &str) -> Option<&str> {
    let open = TABLE_OPEN_RE.find(html)?;
    let rest = &html[open.end()..];
    let end = TABLE_CLOSE_RE.find(rest).map_or(rest.len(), |m| m.start());
    Some(&rest[..end])
}

/// Splits `html` into the segments following each opening tag, each cut at
/// the first matching closing tag.
fn split_on_open_tag<'a>(html: &'a str, open: &Regex, close: &Regex) -> Vec<&'a str> {
    open.split(html)
        .skip(1)
        .map(|segment| {
            close
                .find(segment)
                .map_or(segment, |m| &segment[..m.start()])
        })
        .collect()
}

fn cell_text(cell_html: &str) -> String {
    let no_tags = TAG_RE.replace_all(cell_html, "");
    html_escape::decode_html_entities(&no_tags).trim().to_string()
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
