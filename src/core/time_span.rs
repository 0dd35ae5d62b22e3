//! The store's built-in interval primitive.
//!
//! A signed count of 100 ns ticks. Its text form is the constant
//! `[-][d.]hh:mm:ss[.fffffff]` layout, which is what the store writes for any
//! interval-typed field.

use crate::domain::model::ValueKind;
use crate::utils::error::ConvertError;
use chrono::TimeDelta;
use regex::Regex;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

pub const NANOS_PER_TICK: i64 = 100;
pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MINUTE: i64 = TICKS_PER_SECOND * 60;
pub const TICKS_PER_HOUR: i64 = TICKS_PER_MINUTE * 60;
pub const TICKS_PER_DAY: i64 = TICKS_PER_HOUR * 24;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const FRACTION_DIGITS: usize = 7;

static TIME_SPAN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(-)?(?:(\d+)\.)?(\d{2}):(\d{2}):(\d{2})(?:\.(\d{1,7}))?$")
        .expect("time span pattern is a valid regex")
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeSpan {
    ticks: i64,
}

impl TimeSpan {
    pub const ZERO: TimeSpan = TimeSpan { ticks: 0 };
    pub const MIN: TimeSpan = TimeSpan { ticks: i64::MIN };
    pub const MAX: TimeSpan = TimeSpan { ticks: i64::MAX };

    pub const fn from_ticks(ticks: i64) -> Self {
        Self { ticks }
    }

    pub const fn ticks(&self) -> i64 {
        self.ticks
    }

    /// Fails when the delta is longer than the tick range or not a whole
    /// number of ticks.
    pub fn from_time_delta(delta: TimeDelta) -> Result<Self, ConvertError> {
        let (secs, nanos) = split_time_delta(&delta);
        let total_nanos = secs as i128 * NANOS_PER_SECOND + nanos as i128;

        if total_nanos % NANOS_PER_TICK as i128 != 0 {
            return Err(ConvertError::out_of_range(
                ValueKind::Duration,
                format!("{} has sub-tick precision ({} ns)", delta, total_nanos % 100),
            ));
        }

        let ticks = i64::try_from(total_nanos / NANOS_PER_TICK as i128).map_err(|_| {
            ConvertError::out_of_range(
                ValueKind::Duration,
                format!("{} exceeds the interval range", delta),
            )
        })?;

        Ok(Self { ticks })
    }

    pub fn to_time_delta(&self) -> Result<TimeDelta, ConvertError> {
        let total_nanos = self.ticks as i128 * NANOS_PER_TICK as i128;
        let secs = total_nanos.div_euclid(NANOS_PER_SECOND) as i64;
        let nanos = total_nanos.rem_euclid(NANOS_PER_SECOND) as u32;

        TimeDelta::new(secs, nanos).ok_or_else(|| {
            ConvertError::out_of_range(
                ValueKind::Duration,
                format!("{} ticks exceed the duration range", self.ticks),
            )
        })
    }
}

/// Floor-based seconds and a non-negative nanosecond remainder, the layout
/// chrono keeps internally.
pub(crate) fn split_time_delta(delta: &TimeDelta) -> (i64, u32) {
    let secs = delta.num_seconds();
    let nanos = delta.subsec_nanos();
    if nanos < 0 {
        (secs - 1, (nanos + 1_000_000_000) as u32)
    } else {
        (secs, nanos as u32)
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.ticks.unsigned_abs();
        let days = abs / TICKS_PER_DAY as u64;
        let hours = abs / TICKS_PER_HOUR as u64 % 24;
        let minutes = abs / TICKS_PER_MINUTE as u64 % 60;
        let seconds = abs / TICKS_PER_SECOND as u64 % 60;
        let fraction = abs % TICKS_PER_SECOND as u64;

        if self.ticks < 0 {
            f.write_str("-")?;
        }
        if days > 0 {
            write!(f, "{}.", days)?;
        }
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)?;
        if fraction > 0 {
            write!(f, ".{:07}", fraction)?;
        }
        Ok(())
    }
}

impl FromStr for TimeSpan {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "time span [-][d.]hh:mm:ss[.fffffff]";
        let malformed = || ConvertError::malformed(ValueKind::Duration, EXPECTED, format!("\"{}\"", s));
        let out_of_range =
            || ConvertError::out_of_range(ValueKind::Duration, format!("\"{}\" exceeds the interval range", s));

        let caps = TIME_SPAN_PATTERN.captures(s).ok_or_else(malformed)?;
        // 數字只含 ASCII 位數，解析失敗只可能是溢位
        let number = |index: usize| -> Result<i128, ConvertError> {
            match caps.get(index) {
                Some(m) => m.as_str().parse::<i128>().map_err(|_| out_of_range()),
                None => Ok(0),
            }
        };

        let days = number(2)?;
        let (hours, minutes, seconds) = (number(3)?, number(4)?, number(5)?);
        if hours > 23 || minutes > 59 || seconds > 59 {
            return Err(malformed());
        }

        let fraction = match caps.get(6) {
            Some(m) => {
                let padded = format!("{:0<width$}", m.as_str(), width = FRACTION_DIGITS);
                padded.parse::<i128>().map_err(|_| malformed())?
            }
            None => 0,
        };

        let magnitude = days
            .checked_mul(TICKS_PER_DAY as i128)
            .and_then(|ticks| ticks.checked_add(hours * TICKS_PER_HOUR as i128))
            .and_then(|ticks| ticks.checked_add(minutes * TICKS_PER_MINUTE as i128))
            .and_then(|ticks| ticks.checked_add(seconds * TICKS_PER_SECOND as i128))
            .and_then(|ticks| ticks.checked_add(fraction))
            .ok_or_else(out_of_range)?;
        let signed = if caps.get(1).is_some() { -magnitude } else { magnitude };

        let ticks = i64::try_from(signed).map_err(|_| out_of_range())?;
        Ok(Self { ticks })
    }
}

impl Serialize for TimeSpan {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for TimeSpan {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(de::Error::custom)
    }
}
