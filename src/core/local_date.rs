//! `NaiveDate` stored as an ISO calendar date string.

use crate::core::wire::{decode_legacy, encode_legacy, expect_str, unparsable};
use crate::domain::model::ValueKind;
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// ISO calendar date; years outside 0..=9999 carry an explicit sign.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const CANONICAL: &str = "ISO date string";
const LEGACY: &str = "date object {year, month, day}";

#[derive(Serialize, Deserialize)]
pub(crate) struct DateLayout {
    year: i32,
    month: u32,
    day: u32,
}

impl DateLayout {
    pub(crate) fn of(date: &NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    pub(crate) fn to_date(&self, kind: ValueKind) -> Result<NaiveDate, ConvertError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).ok_or_else(|| {
            ConvertError::out_of_range(
                kind,
                format!("{}-{}-{} is not a valid date", self.year, self.month, self.day),
            )
        })
    }
}

impl TimeValue for NaiveDate {
    const KIND: ValueKind = ValueKind::LocalDate;

    fn to_legacy(&self) -> Result<Value, ConvertError> {
        encode_legacy(Self::KIND, &DateLayout::of(self))
    }

    fn from_legacy(wire: &Value) -> Result<Self, ConvertError> {
        decode_legacy::<DateLayout>(Self::KIND, LEGACY, wire)?.to_date(Self::KIND)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDateConverter;

impl Converter for LocalDateConverter {
    type Value = NaiveDate;

    fn kind(&self) -> ValueKind {
        ValueKind::LocalDate
    }

    fn write(&self, value: &NaiveDate) -> Result<Value, ConvertError> {
        Ok(Value::String(value.format(ISO_DATE_FORMAT).to_string()))
    }

    fn read(&self, wire: &Value) -> Result<NaiveDate, ConvertError> {
        let text = expect_str(ValueKind::LocalDate, CANONICAL, wire)?;
        NaiveDate::parse_from_str(text, ISO_DATE_FORMAT)
            .map_err(|e| unparsable(ValueKind::LocalDate, CANONICAL, wire, e))
    }
}
