//! Display formatting for timestamps and sizes.

use std::fmt::Write;

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};

/// Default `strftime` pattern for list cells and detail reports.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Placeholder for values that do not apply (folders, missing timestamps).
pub const PLACEHOLDER: &str = "-";

/// Whether `format` parses as a `strftime` pattern.
pub fn is_valid_date_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Format `dt` with `format`, or [`PLACEHOLDER`] when absent.
///
/// An unusable `format` falls back to [`DEFAULT_DATE_FORMAT`].
pub fn format_datetime(dt: Option<&DateTime<Utc>>, format: &str) -> String {
    let Some(dt) = dt else {
        return PLACEHOLDER.to_string();
    };
    let mut text = String::new();
    if write!(text, "{}", dt.format(format)).is_err() {
        text.clear();
        let _ = write!(text, "{}", dt.format(DEFAULT_DATE_FORMAT));
    }
    text
}

/// Date-only rendering, used for certificate expiry.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d").to_string()
}

/// Human readable size with binary units (`512 B`, `1.5 KB`, `3.0 GB`).
pub fn format_size(size: u64) -> String {
    const UNIT: u64 = 1024;
    const SUFFIXES: [char; 6] = ['K', 'M', 'G', 'T', 'P', 'E'];

    if size < UNIT {
        return format!("{size} B");
    }
    let mut div = UNIT;
    let mut exp = 0;
    let mut n = size / UNIT;
    while n >= UNIT {
        div *= UNIT;
        exp += 1;
        n /= UNIT;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = size as f64 / div as f64;
    format!("{value:.1} {}B", SUFFIXES[exp])
}
