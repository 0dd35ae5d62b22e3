use crate::core::local_date::DateLayout;
use crate::core::local_time::TimeLayout;
use crate::core::wire::{decode_legacy, encode_legacy, expect_str, unparsable};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ISO_DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

const CANONICAL: &str = "ISO local date-time string";
const LEGACY: &str = "date-time object {date, time}";

#[derive(Serialize, Deserialize)]
pub(crate) struct DateTimeLayout {
    date: DateLayout,
    time: TimeLayout,
}

impl DateTimeLayout {
    pub(crate) fn of(value: &NaiveDateTime) -> Self {
        Self {
            date: DateLayout::of(&value.date()),
            time: TimeLayout::of(&value.time()),
        }
    }

    pub(crate) fn to_date_time(&self, kind: ValueKind) -> Result<NaiveDateTime, ConvertError> {
        Ok(self.date.to_date(kind)?.and_time(self.time.to_time(kind)?))
    }
}

impl TimeValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::LocalDateTime;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        encode_legacy(Self::KIND, &DateTimeLayout::of(self))
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        decode_legacy::<DateTimeLayout>(Self::KIND, LEGACY, wire)?.to_date_time(Self::KIND)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateTimeConverter;

impl Converter for LocalDateTimeConverter {
    type Value = NaiveDateTime;

    fn kind(&self) -> ValueKind {
        ValueKind::LocalDateTime
    }

    fn write(&self, value: &NaiveDateTime) -> Result<Value, ConvertError> {
        Ok(Value::String(value.format(ISO_DATE_TIME_FORMAT).to_string()))
    }

    fn read(&self, wire: &Value) -> Result<NaiveDateTime, ConvertError> {
        let text = expect_str(ValueKind::LocalDateTime, CANONICAL, wire)?;
        NaiveDateTime::parse_from_str(text, ISO_DATE_TIME_FORMAT)
            .map_err(|e| unparsable(ValueKind::LocalDateTime, CANONICAL, wire, e))
    }
}
