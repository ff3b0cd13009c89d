//! Datetime format-scan helpers.
//!
//! Formats are strings in the `time` crate's `format_description` syntax
//! (e.g. `[year]-[month]-[day]`), parsed on every call. A date-only format
//! parses to midnight, so callers can pass either date or datetime formats
//! interchangeably.

use anyhow::Context;
use time::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

pub(crate) fn parse_datetime(data: &str, fmt: &str) -> anyhow::Result<PrimitiveDateTime> {
    let items = format_description::parse(fmt).with_context(|| format!("invalid datetime format `{fmt}`"))?;
    if let Ok(parsed) = PrimitiveDateTime::parse(data, &items) {
        return Ok(parsed);
    }
    let date = Date::parse(data, &items).with_context(|| format!("`{data}` does not match format `{fmt}`"))?;
    Ok(date.midnight())
}

/// Tries each format in order and returns the first successful parse.
/// All per-attempt errors, including invalid format descriptions, are
/// swallowed; `None` means no format matched.
pub fn try_strptime(data: &str, fmts: &[&str]) -> Option<PrimitiveDateTime> {
    for fmt in fmts {
        let Ok(items) = format_description::parse(fmt) else {
            continue;
        };
        if let Ok(parsed) = PrimitiveDateTime::parse(data, &items) {
            return Some(parsed);
        }
        if let Ok(date) = Date::parse(data, &items) {
            return Some(date.midnight());
        }
    }
    None
}

/// Formats an aware datetime with the first format that succeeds, or `None`
/// when no candidate format is usable.
pub fn try_strftime(dt: OffsetDateTime, fmts: &[&str]) -> Option<String> {
    for fmt in fmts {
        let Ok(items) = format_description::parse(fmt) else {
            continue;
        };
        if let Ok(value) = dt.format(&items) {
            return Some(value);
        }
    }
    None
}

/// [`try_strftime`] for naive datetimes. Formats requiring offset
/// information fail and are skipped.
pub fn try_strftime_naive(dt: PrimitiveDateTime, fmts: &[&str]) -> Option<String> {
    for fmt in fmts {
        let Ok(items) = format_description::parse(fmt) else {
            continue;
        };
        if let Ok(value) = dt.format(&items) {
            return Some(value);
        }
    }
    None
}

/// Converts an aware datetime to its UTC-equivalent naive value. Used to
/// normalize timestamps before storage or comparison.
pub fn to_utc_naive(dt: Option<OffsetDateTime>) -> Option<PrimitiveDateTime> {
    dt.map(|dt| {
        let utc = dt.to_offset(UtcOffset::UTC);
        PrimitiveDateTime::new(utc.date(), utc.time())
    })
}
