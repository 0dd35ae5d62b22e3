//! `TimeDelta` stored as the store's interval primitive.

use crate::core::time_span::{split_time_delta, TimeSpan};
use crate::core::wire::{decode_legacy, encode_legacy, expect_str};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const CANONICAL: &str = "time span string";
const LEGACY: &str = "duration object {secs, nanos}";

#[derive(Serialize, Deserialize)]
struct DurationLayout {
    secs: i64,
    nanos: u32,
}

impl TimeValue for TimeDelta {
    const KIND: ValueKind = ValueKind::Duration;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        let (secs, nanos) = split_time_delta(self);
        encode_legacy(Self::KIND, &DurationLayout { secs, nanos })
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        let layout: DurationLayout = decode_legacy(Self::KIND, LEGACY, wire)?;
        TimeDelta::new(layout.secs, layout.nanos).ok_or_else(|| {
            ConvertError::out_of_range(
                Self::KIND,
                format!("{}s {}ns is not a valid duration", layout.secs, layout.nanos),
            )
        })
    }
}

/// Treats a `TimeDelta` as a [`TimeSpan`] on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationConverter;

impl Converter for DurationConverter {
    type Value = TimeDelta;

    fn kind(&self) -> ValueKind {
        ValueKind::Duration
    }

    fn write(&self, value: &TimeDelta) -> Result<Value, ConvertError> {
        let span = TimeSpan::from_time_delta(*value)?;
        Ok(Value::String(span.to_string()))
    }

    fn read(&self, wire: &Value) -> Result<TimeDelta, ConvertError> {
        let span: TimeSpan = expect_str(ValueKind::Duration, CANONICAL, wire)?.parse()?;
        span.to_time_delta()
    }
}
