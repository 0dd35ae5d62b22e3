use crate::domain::model::{Strictness, ValueKind};
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use serde_json::Value;

/// As the wrapped converter, but also reads values stored in the legacy
/// structured form. Always writes the canonical form.
#[derive(Debug, Clone, Copy, Default)]
pub struct Relaxed<C> {
    inner: C,
}

impl<C> Relaxed<C> {
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> Converter for Relaxed<C>
where
    C: Converter,
    C::Value: TimeValue,
{
    type Value = C::Value;

    fn kind(&self) -> ValueKind {
        self.inner.kind()
    }

    fn strictness(&self) -> Strictness {
        Strictness::Relaxed
    }

    fn write(&self, value: &Self::Value) -> Result<Value, ConvertError> {
        self.inner.write(value)
    }

    fn read(&self, wire: &Value) -> Result<Self::Value, ConvertError> {
        match wire {
            Value::Object(_) => {
                tracing::debug!("Reading {} from legacy structured form", self.kind());
                C::Value::from_legacy(wire)
            }
            _ => self.inner.read(wire),
        }
    }
}
