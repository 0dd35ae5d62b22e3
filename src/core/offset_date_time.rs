use crate::core::local_date_time::DateTimeLayout;
use crate::core::wire::{decode_legacy, encode_legacy, expect_str, unparsable};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ISO_OFFSET_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";

const CANONICAL: &str = "ISO date-time string with offset";
const LEGACY: &str = "offset date-time object {local, offset_seconds}";

#[derive(Serialize, Deserialize)]
struct OffsetDateTimeLayout {
    local: DateTimeLayout,
    offset_seconds: i32,
}

impl TimeValue for DateTime<FixedOffset> {
    const KIND: ValueKind = ValueKind::OffsetDateTime;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        encode_legacy(
            Self::KIND,
            &OffsetDateTimeLayout {
                local: DateTimeLayout::of(&self.naive_local()),
                offset_seconds: self.offset().local_minus_utc(),
            },
        )
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        let layout: OffsetDateTimeLayout = decode_legacy(Self::KIND, LEGACY, wire)?;
        let offset = FixedOffset::east_opt(layout.offset_seconds).ok_or_else(|| {
            ConvertError::out_of_range(Self::KIND, format!("offset of {}s", layout.offset_seconds))
        })?;
        let local = layout.local.to_date_time(Self::KIND)?;
        offset.from_local_datetime(&local).single().ok_or_else(|| {
            ConvertError::out_of_range(Self::KIND, format!("{} at offset {}", local, offset))
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetDateTimeConverter;

impl Converter for OffsetDateTimeConverter {
    type Value = DateTime<FixedOffset>;

    fn kind(&self) -> ValueKind {
        ValueKind::OffsetDateTime
    }

    fn write(&self, value: &DateTime<FixedOffset>) -> Result<Value, ConvertError> {
        Ok(Value::String(value.format(ISO_OFFSET_DATE_TIME_FORMAT).to_string()))
    }

    fn read(&self, wire: &Value) -> Result<DateTime<FixedOffset>, ConvertError> {
        let text = expect_str(ValueKind::OffsetDateTime, CANONICAL, wire)?;
        DateTime::parse_from_str(text, ISO_OFFSET_DATE_TIME_FORMAT)
            .map_err(|e| unparsable(ValueKind::OffsetDateTime, CANONICAL, wire, e))
    }
}
