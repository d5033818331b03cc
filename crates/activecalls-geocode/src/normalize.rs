//! Address normalization for the table's free-text location field.
//!
//! [`normalize`] first applies [`clean_location`], then walks [`RULES`] in
//! order; the first rule whose matcher accepts the cleaned text produces the
//! result. New location formats go in as new rules at the right precedence
//! without touching the others.

use std::sync::LazyLock;

use activecalls_core::Coordinates;
use regex::Regex;

use crate::coordinates::decode_ll;

static TRAILING_CITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s+RICH)+$").expect("valid regex"));
static TRAILING_DIRECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s(?:NB|SB)$").expect("valid regex"));

const BLOCK_MARKER: &str = "-BLK";
const INTERSECTION_SEPARATOR: &str = " and ";
const BETWEEN_PREFIX: &str = "RICH: @";
const BETWEEN_KEYWORD: &str = "BETWEEN";

/// Result of normalizing one location string.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedQuery {
    /// The location carried its own coordinates; no forward geocoding needed.
    DirectCoordinates(Coordinates),
    /// A street reference to submit to forward geocoding.
    AddressFragment(String),
}

/// One step of the classification ladder.
pub(crate) struct Rule {
    pub(crate) name: &'static str,
    matches: fn(&str) -> bool,
    apply: fn(&str) -> NormalizedQuery,
}

/// Classification rules, highest precedence first. The last rule always
/// matches.
pub(crate) static RULES: &[Rule] = &[
    Rule {
        name: "ll-tag",
        matches: is_ll_tagged,
        apply: apply_ll_tag,
    },
    Rule {
        name: "intersection",
        matches: is_intersection,
        apply: apply_intersection,
    },
    Rule {
        name: "between-clause",
        matches: is_between_clause,
        apply: apply_between_clause,
    },
    Rule {
        name: "verbatim",
        matches: always,
        apply: apply_verbatim,
    },
];

/// Cleans and classifies a raw location string. Total: every input yields
/// exactly one variant.
#[must_use]
pub fn normalize(raw: &str) -> NormalizedQuery {
    let cleaned = clean_location(raw);
    classify(&cleaned)
}

/// Applies the rule ladder to already-cleaned text.
pub(crate) fn classify(cleaned: &str) -> NormalizedQuery {
    match RULES.iter().find(|rule| (rule.matches)(cleaned)) {
        Some(rule) => {
            tracing::debug!(rule = rule.name, location = cleaned, "classified location");
            (rule.apply)(cleaned)
        }
        None => apply_verbatim(cleaned),
    }
}

/// Removes block markers, spells out `/` as ` and `, drops trailing ` RICH`
/// city suffixes and trims.
///
/// Idempotent: `clean_location(&clean_location(s)) == clean_location(s)`.
#[must_use]
pub fn clean_location(raw: &str) -> String {
    let mut text = raw.to_owned();
    // Removing one marker can splice together another, e.g. "--BLKBLK".
    while text.contains(BLOCK_MARKER) {
        text = text.replace(BLOCK_MARKER, "");
    }
    let text = text.replace('/', INTERSECTION_SEPARATOR);
    let text = TRAILING_CITY_RE.replace(text.trim_end(), "");
    text.trim().to_owned()
}

fn is_ll_tagged(cleaned: &str) -> bool {
    cleaned.starts_with("LL(")
}

/// On a decode failure the cleaned text goes to forward geocoding as is; the
/// geocoder will most likely miss, which is accepted.
fn apply_ll_tag(cleaned: &str) -> NormalizedQuery {
    match decode_ll(cleaned) {
        Ok(coordinates) => {
            tracing::info!(
                lat = coordinates.latitude,
                lng = coordinates.longitude,
                "parsed coordinates from LL tag"
            );
            NormalizedQuery::DirectCoordinates(coordinates)
        }
        Err(e) => {
            tracing::warn!(location = cleaned, error = %e, "could not parse LL address");
            NormalizedQuery::AddressFragment(cleaned.to_owned())
        }
    }
}

fn is_intersection(cleaned: &str) -> bool {
    cleaned.contains(INTERSECTION_SEPARATOR)
}

/// Keeps the primary street; the cross street is discarded.
fn apply_intersection(cleaned: &str) -> NormalizedQuery {
    let primary = cleaned
        .split(INTERSECTION_SEPARATOR)
        .next()
        .unwrap_or(cleaned)
        .trim();
    NormalizedQuery::AddressFragment(primary.to_owned())
}

fn is_between_clause(cleaned: &str) -> bool {
    cleaned.contains(BETWEEN_PREFIX) && cleaned.contains(BETWEEN_KEYWORD)
}

fn apply_between_clause(cleaned: &str) -> NormalizedQuery {
    let fragment = between_main_street(cleaned).unwrap_or_else(|| {
        tracing::debug!(location = cleaned, "unexpected BETWEEN layout; using full text");
        cleaned.to_owned()
    });
    NormalizedQuery::AddressFragment(fragment)
}

/// Extracts `<street>` from `RICH: @<street> [NB|SB] BETWEEN <a> & <b>`.
///
/// Only a direction token at the very end of the street is removed. Returns
/// `None` when `BETWEEN` does not follow the `@`; an empty street is returned
/// as is.
fn between_main_street(cleaned: &str) -> Option<String> {
    let start = cleaned.find(BETWEEN_PREFIX)? + BETWEEN_PREFIX.len();
    let after_at = &cleaned[start..];
    let end = after_at.find(BETWEEN_KEYWORD)?;
    let street = after_at[..end].trim();
    let street = TRAILING_DIRECTION_RE.replace(street, "");
    Some(street.trim_end().to_owned())
}

fn always(_: &str) -> bool {
    true
}

fn apply_verbatim(cleaned: &str) -> NormalizedQuery {
    NormalizedQuery::AddressFragment(cleaned.to_owned())
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
