//! serde adapters that route a document field through the active converters.
//!
//! ```
//! use chrono::NaiveDate;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Foo {
//!     id: String,
//!     #[serde(with = "docstore_chrono::field")]
//!     local_date: NaiveDate,
//! }
//! ```
//!
//! Outside a `DocumentSerializer` call, or when no converter is registered for
//! the field's type, the value is written and read in its legacy form.

use crate::core::context;
use crate::domain::ports::TimeValue;
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: TimeValue,
    S: Serializer,
{
    let wire = match context::active() {
        Some(converters) => converters.encode(value),
        None => value.to_legacy(),
    }
    .map_err(ser::Error::custom)?;

    wire.serialize(serializer)
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: TimeValue,
    D: Deserializer<'de>,
{
    let wire = Value::deserialize(deserializer)?;
    let value = match context::active() {
        Some(converters) => converters.decode(&wire),
        None => T::from_legacy(&wire),
    };
    value.map_err(de::Error::custom)
}

/// For `Option<T>` fields; `None` is written as `null`.
pub mod option {
    use super::*;

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: TimeValue,
        S: Serializer,
    {
        match value {
            Some(inner) => super::serialize(inner, serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: TimeValue,
        D: Deserializer<'de>,
    {
        let wire = Value::deserialize(deserializer)?;
        if wire.is_null() {
            return Ok(None);
        }
        super::deserialize(wire).map(Some).map_err(de::Error::custom)
    }
}
