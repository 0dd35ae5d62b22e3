use crate::core::context;
use crate::core::registry::ConverterSet;
use crate::utils::error::Result;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Turns entities into JSON documents and back with an explicit converter set.
#[derive(Debug, Clone, Default)]
pub struct DocumentSerializer {
    converters: Arc<ConverterSet>,
}

impl DocumentSerializer {
    pub fn new(converters: ConverterSet) -> Self {
        Self::from_shared(Arc::new(converters))
    }

    pub fn from_shared(converters: Arc<ConverterSet>) -> Self {
        Self { converters }
    }

    pub fn converters(&self) -> &ConverterSet {
        &self.converters
    }

    pub fn to_document<T: Serialize + ?Sized>(&self, entity: &T) -> Result<Value> {
        let _scope = context::enter(Arc::clone(&self.converters));
        Ok(serde_json::to_value(entity)?)
    }

    pub fn from_document<T: DeserializeOwned>(&self, document: &Value) -> Result<T> {
        let _scope = context::enter(Arc::clone(&self.converters));
        Ok(T::deserialize(document)?)
    }
}
