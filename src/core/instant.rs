use crate::core::wire::{decode_legacy, encode_legacy, expect_str, unparsable};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// UTC timestamp with a literal `Z`; years outside 0..=9999 carry a sign.
pub const ISO_INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.fZ";

const CANONICAL: &str = "ISO UTC timestamp string";
const LEGACY: &str = "instant object {secs, nanos}";

#[derive(Serialize, Deserialize)]
struct InstantLayout {
    secs: i64,
    nanos: u32,
}

impl TimeValue for DateTime<Utc> {
    const KIND: ValueKind = ValueKind::Instant;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        encode_legacy(
            Self::KIND,
            &InstantLayout {
                secs: self.timestamp(),
                nanos: self.timestamp_subsec_nanos(),
            },
        )
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        let layout: InstantLayout = decode_legacy(Self::KIND, LEGACY, wire)?;
        DateTime::from_timestamp(layout.secs, layout.nanos).ok_or_else(|| {
            ConvertError::out_of_range(
                Self::KIND,
                format!("{}s {}ns after the epoch", layout.secs, layout.nanos),
            )
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstantConverter;

impl Converter for InstantConverter {
    type Value = DateTime<Utc>;

    fn kind(&self) -> ValueKind {
        ValueKind::Instant
    }

    fn write(&self, value: &DateTime<Utc>) -> Result<Value, ConvertError> {
        Ok(Value::String(value.format(ISO_INSTANT_FORMAT).to_string()))
    }

    fn read(&self, wire: &Value) -> Result<DateTime<Utc>, ConvertError> {
        let text = expect_str(ValueKind::Instant, CANONICAL, wire)?;
        NaiveDateTime::parse_from_str(text, ISO_INSTANT_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(|e| unparsable(ValueKind::Instant, CANONICAL, wire, e))
    }
}
