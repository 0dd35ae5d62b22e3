//! How the store orders stored wire values.
//!
//! Strings that carry one of the canonical time forms are ordered by the time
//! they denote, not by their text: `"2.00:00:00"` is longer than
//! `"23:00:00"`, and `"…05.5Z"` is later than `"…05Z"`.

use crate::core::instant::ISO_INSTANT_FORMAT;
use crate::core::local_date::ISO_DATE_FORMAT;
use crate::core::local_date_time::ISO_DATE_TIME_FORMAT;
use crate::core::local_time::ISO_TIME_FORMAT;
use crate::core::offset_date_time::ISO_OFFSET_DATE_TIME_FORMAT;
use crate::core::time_span::{TimeSpan, NANOS_PER_TICK};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};
use serde_json::{Number, Value};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq)]
enum SortKey<'v> {
    Null,
    Bool(bool),
    Number(&'v Number),
    /// Intervals and times of day, in nanoseconds.
    Elapsed(i128),
    Instant(DateTime<Utc>),
    LocalDateTime(NaiveDateTime),
    Date(NaiveDate),
    Text(&'v str),
}

impl<'v> SortKey<'v> {
    fn of(value: &'v Value) -> Option<Self> {
        match value {
            Value::Null => Some(SortKey::Null),
            Value::Bool(b) => Some(SortKey::Bool(*b)),
            Value::Number(n) => Some(SortKey::Number(n)),
            Value::String(s) => Some(Self::of_text(s)),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    fn of_text(text: &'v str) -> Self {
        if let Ok(span) = text.parse::<TimeSpan>() {
            return SortKey::Elapsed(span.ticks() as i128 * NANOS_PER_TICK as i128);
        }
        if let Ok(time) = NaiveTime::parse_from_str(text, ISO_TIME_FORMAT) {
            let nanos = time.num_seconds_from_midnight() as i128 * 1_000_000_000 + time.nanosecond() as i128;
            return SortKey::Elapsed(nanos);
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, ISO_INSTANT_FORMAT) {
            return SortKey::Instant(naive.and_utc());
        }
        if let Ok(with_offset) = DateTime::parse_from_str(text, ISO_OFFSET_DATE_TIME_FORMAT) {
            return SortKey::Instant(with_offset.with_timezone(&Utc));
        }
        if let Ok(local) = NaiveDateTime::parse_from_str(text, ISO_DATE_TIME_FORMAT) {
            return SortKey::LocalDateTime(local);
        }
        if let Ok(date) = NaiveDate::parse_from_str(text, ISO_DATE_FORMAT) {
            return SortKey::Date(date);
        }
        SortKey::Text(text)
    }

    fn compare(&self, other: &SortKey<'_>) -> Option<Ordering> {
        match (self, other) {
            (SortKey::Null, SortKey::Null) => Some(Ordering::Equal),
            (SortKey::Bool(a), SortKey::Bool(b)) => Some(a.cmp(b)),
            (SortKey::Number(a), SortKey::Number(b)) => match (a.as_i64(), b.as_i64()) {
                (Some(a), Some(b)) => Some(a.cmp(&b)),
                _ => a.as_f64()?.partial_cmp(&b.as_f64()?),
            },
            (SortKey::Elapsed(a), SortKey::Elapsed(b)) => Some(a.cmp(b)),
            (SortKey::Instant(a), SortKey::Instant(b)) => Some(a.cmp(b)),
            (SortKey::LocalDateTime(a), SortKey::LocalDateTime(b)) => Some(a.cmp(b)),
            (SortKey::Date(a), SortKey::Date(b)) => Some(a.cmp(b)),
            (SortKey::Text(a), SortKey::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

/// Numbers compare numerically, time strings by the time they denote, other
/// strings lexicographically. Values of different JSON kinds, arrays and
/// objects are not comparable.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    let ordering = SortKey::of(left)?.compare(&SortKey::of(right)?);
    match (ordering, left, right) {
        (Some(ordering), _, _) => Some(ordering),
        // 不同格式的字串退回文字比較
        (None, Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Equality under the same ordering; structured values fall back to JSON
/// equality.
pub(crate) fn values_equal(left: &Value, right: &Value) -> bool {
    match compare_values(left, right) {
        Some(ordering) => ordering == Ordering::Equal,
        None => left == right,
    }
}
