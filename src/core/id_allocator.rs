//! Year-scoped sequential quote ids (`2026-001`, `2026-002`, ...).
//!
//! Allocation is a pure function of the ids passed in. Two callers working
//! from the same snapshot get the same id; the store's uniqueness check is
//! what catches that.

use crate::domain::model::QuoteId;
use chrono::{Datelike, NaiveDate};

fn digits(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Sequence number of an id suffix. No digits reads as 0; digit strings
/// beyond `u64` saturate.
fn sequence_of(suffix: &str) -> u64 {
    let digits = digits(suffix);
    if digits.is_empty() {
        return 0;
    }
    digits.parse::<u64>().unwrap_or(u64::MAX)
}

/// Next id for the year of `reference`, given every id issued so far.
pub fn next_id<I, S>(existing: I, reference: NaiveDate) -> QuoteId
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let year = reference.year();
    let prefix = format!("{}-", year);

    let highest = existing
        .into_iter()
        .filter_map(|id| {
            id.as_ref()
                .trim()
                .strip_prefix(prefix.as_str())
                .map(sequence_of)
        })
        .max();

    let next = highest.map_or(1, |seq| seq.saturating_add(1));
    tracing::debug!(year, next, "allocated quote sequence");
    QuoteId::new(year, next)
}

/// `"2026-003"` becomes `"003/26"`.
///
/// Text without a `-`, or whose part before the first `-` is not a year,
/// comes back unchanged. A suffix without digits is kept as written.
pub fn display_form(id: &str) -> String {
    let Some((year, rest)) = id.split_once('-') else {
        return id.to_string();
    };
    if year.is_empty() || !year.chars().all(|c| c.is_ascii_digit()) {
        return id.to_string();
    }

    let seq = digits(rest);
    let seq = if seq.is_empty() { rest.to_string() } else { seq };
    let short_year: String = {
        let chars: Vec<char> = year.chars().collect();
        chars[chars.len().saturating_sub(2)..].iter().collect()
    };
    format!("{}/{}", seq, short_year)
}

/// `(year, seq)` ordering key; `None` for ids that do not parse.
///
/// `Option` orders `None` first, so a descending sort lists malformed ids
/// last.
pub fn id_sort_key(id: &str) -> Option<(i64, u64)> {
    let (year, rest) = id.trim().split_once('-')?;
    let year = year.parse::<i64>().ok()?;
    Some((year, sequence_of(rest)))
}
