use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The chrono value types the converter layer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Duration,
    LocalDate,
    LocalTime,
    LocalDateTime,
    Instant,
    OffsetDateTime,
}

impl ValueKind {
    pub const ALL: [ValueKind; 6] = [
        ValueKind::Duration,
        ValueKind::LocalDate,
        ValueKind::LocalTime,
        ValueKind::LocalDateTime,
        ValueKind::Instant,
        ValueKind::OffsetDateTime,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValueKind::Duration => "duration",
            ValueKind::LocalDate => "local_date",
            ValueKind::LocalTime => "local_time",
            ValueKind::LocalDateTime => "local_date_time",
            ValueKind::Instant => "instant",
            ValueKind::OffsetDateTime => "offset_date_time",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("unknown value kind '{}'", s))
    }
}

/// Whether a converter accepts the legacy structured form on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    #[default]
    Strict,
    Relaxed,
}

impl fmt::Display for Strictness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strictness::Strict => f.write_str("strict"),
            Strictness::Relaxed => f.write_str("relaxed"),
        }
    }
}
