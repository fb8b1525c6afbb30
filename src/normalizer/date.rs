use std::fmt::Write;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::Article;

use super::UNKNOWN_DATE_PLACEHOLDER;

/// Timestamps containing this value mean "no real date".
pub const INVALID_DATE_PREFIX: &str = "0001-01-01";

pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

const NAIVE_FORMATS: [&str; 5] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Publication date for display. `data` wins over `time`; empty or sentinel
/// values resolve to the placeholder.
pub fn resolve_date(article: &Article, format: &str) -> String {
    let timestamp = article
        .date
        .as_deref()
        .or(article.time.as_deref())
        .unwrap_or("");

    if timestamp.is_empty() || timestamp.contains(INVALID_DATE_PREFIX) {
        return UNKNOWN_DATE_PLACEHOLDER.to_string();
    }

    format_timestamp(timestamp, format)
}

/// Format a provider timestamp. Unparseable input is shown as received.
pub fn format_timestamp(timestamp: &str, format: &str) -> String {
    match parse_timestamp(timestamp) {
        Some(dt) => {
            let mut out = String::new();
            if write!(out, "{}", dt.format(format)).is_err() {
                tracing::debug!(%format, "Invalid date format, using default");
                return dt.format(DEFAULT_DATE_FORMAT).to_string();
            }
            out
        }
        None => {
            tracing::debug!(%timestamp, "Unrecognised timestamp format");
            timestamp.to_string()
        }
    }
}

/// Parse into the wall-clock time the provider reported, keeping any offset's
/// local time rather than converting.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}
