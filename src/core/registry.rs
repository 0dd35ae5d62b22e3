use crate::domain::model::{Strictness, ValueKind};
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::ConvertError;
use serde_json::Value;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

#[derive(Clone)]
struct Entry {
    kind: ValueKind,
    strictness: Strictness,
    // Holds an `Arc<dyn Converter<Value = T>>` for the keyed `T`.
    converter: Arc<dyn Any + Send + Sync>,
}

/// The converters a serializer applies, at most one per domain value type.
#[derive(Clone, Default)]
pub struct ConverterSet {
    entries: HashMap<TypeId, Entry>,
}

impl ConverterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs `converter` for its value type, replacing any previous one.
    /// Returns the strictness of the replaced converter.
    pub fn insert<C: Converter>(&mut self, converter: C) -> Option<Strictness> {
        let kind = converter.kind();
        let strictness = converter.strictness();
        let shared: Arc<dyn Converter<Value = C::Value>> = Arc::new(converter);
        let entry = Entry {
            kind,
            strictness,
            converter: Arc::new(shared),
        };

        self.entries
            .insert(TypeId::of::<C::Value>(), entry)
            .map(|previous| previous.strictness)
    }

    pub fn remove<T: 'static>(&mut self) -> bool {
        self.entries.remove(&TypeId::of::<T>()).is_some()
    }

    pub fn get<T: 'static>(&self) -> Option<&dyn Converter<Value = T>> {
        self.entries
            .get(&TypeId::of::<T>())?
            .converter
            .downcast_ref::<Arc<dyn Converter<Value = T>>>()
            .map(|converter| converter.as_ref())
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.entries.contains_key(&TypeId::of::<T>())
    }

    pub fn strictness_of(&self, kind: ValueKind) -> Option<Strictness> {
        self.entries
            .values()
            .find(|entry| entry.kind == kind)
            .map(|entry| entry.strictness)
    }

    pub fn kinds(&self) -> Vec<ValueKind> {
        let mut kinds: Vec<ValueKind> = self.entries.values().map(|entry| entry.kind).collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes through the registered converter, or the legacy form when the
    /// type has none.
    pub fn encode<T: TimeValue>(&self, value: &T) -> Result<Value, ConvertError> {
        match self.get::<T>() {
            Some(converter) => converter.write(value),
            None => value.to_legacy(),
        }
    }

    pub fn decode<T: TimeValue>(&self, wire: &Value) -> Result<T, ConvertError> {
        match self.get::<T>() {
            Some(converter) => converter.read(wire),
            None => T::from_legacy(wire),
        }
    }
}

impl fmt::Debug for ConverterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<(ValueKind, Strictness)> = self
            .entries
            .values()
            .map(|entry| (entry.kind, entry.strictness))
            .collect();
        entries.sort_by_key(|(kind, _)| *kind);
        f.debug_struct("ConverterSet").field("entries", &entries).finish()
    }
}
