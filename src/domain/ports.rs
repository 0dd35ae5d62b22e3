use crate::domain::model::{Strictness, ValueKind};
use crate::utils::error::ConvertError;
use serde_json::Value;

/// Maps one domain value type to its canonical wire form and back.
///
/// `write` is deterministic and never produces the legacy form. `read` of a
/// plain converter accepts only the canonical form.
pub trait Converter: Send + Sync + 'static {
    type Value: 'static;

    fn kind(&self) -> ValueKind;

    /// Plain converters are strict; wrappers that accept extra wire forms
    /// report otherwise.
    fn strictness(&self) -> Strictness {
        Strictness::Strict
    }

    fn write(&self, value: &Self::Value) -> Result<Value, ConvertError>;
    fn read(&self, wire: &Value) -> Result<Self::Value, ConvertError>;
}

/// A chrono type the converter layer can bind to documents.
///
/// The legacy codec is the type's own structured JSON layout: what an
/// unconfigured client writes, and what relaxed converters still accept.
pub trait TimeValue: Sized + Send + Sync + 'static {
    const KIND: ValueKind;

    fn to_legacy(&self) -> Result<Value, ConvertError>;
    fn from_legacy(wire: &Value) -> Result<Self, ConvertError>;
}
