//! `NaiveTime` stored as an extended ISO time of day.

use crate::core::wire::{decode_legacy, encode_legacy, expect_str, unparsable};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fraction is written only when non-zero, with 3, 6 or 9 digits.
pub const ISO_TIME_FORMAT: &str = "%H:%M:%S%.f";

const CANONICAL: &str = "ISO time string";
const LEGACY: &str = "time object {hour, minute, second, nanosecond}";

#[derive(Serialize, Deserialize)]
pub(crate) struct TimeLayout {
    hour: u32,
    minute: u32,
    second: u32,
    nanosecond: u32,
}

impl TimeLayout {
    pub(crate) fn of(time: &NaiveTime) -> Self {
        Self {
            hour: time.hour(),
            minute: time.minute(),
            second: time.second(),
            nanosecond: time.nanosecond(),
        }
    }

    pub(crate) fn to_time(&self, kind: ValueKind) -> Result<NaiveTime, ConvertError> {
        NaiveTime::from_hms_nano_opt(self.hour, self.minute, self.second, self.nanosecond).ok_or_else(|| {
            ConvertError::out_of_range(
                kind,
                format!(
                    "{:02}:{:02}:{:02} +{}ns is not a valid time",
                    self.hour, self.minute, self.second, self.nanosecond
                ),
            )
        })
    }
}

impl TimeValue for NaiveTime {
    const KIND: ValueKind = ValueKind::LocalTime;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        encode_legacy(Self::KIND, &TimeLayout::of(self))
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        decode_legacy::<TimeLayout>(Self::KIND, LEGACY, wire)?.to_time(Self::KIND)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalTimeConverter;

impl Converter for LocalTimeConverter {
    type Value = NaiveTime;

    fn kind(&self) -> ValueKind {
        ValueKind::LocalTime
    }

    fn write(&self, value: &NaiveTime) -> Result<Value, ConvertError> {
        Ok(Value::String(value.format(ISO_TIME_FORMAT).to_string()))
    }

    fn read(&self, wire: &Value) -> Result<NaiveTime, ConvertError> {
        let text = expect_str(ValueKind::LocalTime, CANONICAL, wire)?;
        NaiveTime::parse_from_str(text, ISO_TIME_FORMAT)
            .map_err(|e| unparsable(ValueKind::LocalTime, CANONICAL, wire, e))
    }
}
