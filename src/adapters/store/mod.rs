//! In-memory document store that hosts the converters.
//!
//! Documents are kept as JSON values keyed by id. Queries scan a collection
//! and compare stored wire values, ordering canonical time strings by the
//! time they denote; there is no persistence and no background indexing.

mod collation;
pub mod index;
pub mod query;
pub mod serializer;
pub mod session;

use crate::config::ConverterConfig;
use crate::core::registration::register_time_converters;
use crate::core::registry::ConverterSet;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

pub use index::IndexDefinition;
pub use query::{Operand, Query};
pub use serializer::DocumentSerializer;
pub use session::Session;

/// A document type the store can persist.
pub trait Entity: Serialize + DeserializeOwned {
    const COLLECTION: &'static str;

    fn id(&self) -> &str;
}

#[derive(Debug, Clone)]
pub(crate) struct StoredDocument {
    pub(crate) collection: String,
    pub(crate) data: Value,
}

pub struct DocumentStore {
    documents: RwLock<BTreeMap<String, StoredDocument>>,
    converters: RwLock<Arc<ConverterSet>>,
    indexes: RwLock<HashMap<String, IndexDefinition>>,
}

impl DocumentStore {
    /// 未註冊任何轉換器的 store，時間型別以 legacy 結構寫入
    pub fn new() -> Self {
        Self::with_converters(ConverterSet::new())
    }

    pub fn with_converters(converters: ConverterSet) -> Self {
        Self {
            documents: RwLock::new(BTreeMap::new()),
            converters: RwLock::new(Arc::new(converters)),
            indexes: RwLock::new(HashMap::new()),
        }
    }

    pub fn converters(&self) -> Arc<ConverterSet> {
        self.converters.read().clone()
    }

    /// Registers the chrono converters into this store's serializer.
    ///
    /// Call during setup, before sessions are shared across threads. Sessions
    /// opened afterwards see the new converters.
    pub fn configure_time_converters(&self, config: &ConverterConfig) -> Result<()> {
        let mut guard = self.converters.write();
        let mut converters = (**guard).clone();
        register_time_converters(&mut converters, config)?;

        tracing::info!(
            "Configured time converters: mode={}, registered={:?}",
            config.mode,
            converters.kinds()
        );
        *guard = Arc::new(converters);
        Ok(())
    }

    /// 建立或取代同名的靜態索引
    pub fn execute_index(&self, definition: IndexDefinition) -> Result<()> {
        definition.validate()?;
        tracing::debug!(
            "Index '{}' on {} maps {:?}",
            definition.name,
            definition.collection,
            definition.fields
        );
        self.indexes
            .write()
            .insert(definition.name.clone(), definition);
        Ok(())
    }

    /// The stored JSON exactly as written, bypassing any converters.
    pub fn get_raw(&self, id: &str) -> Option<Value> {
        self.documents.read().get(id).map(|document| document.data.clone())
    }

    pub fn document_count(&self) -> usize {
        self.documents.read().len()
    }

    pub fn open_session(&self) -> Session<'_> {
        Session::new(self)
    }

    pub(crate) fn get(&self, id: &str) -> Option<StoredDocument> {
        self.documents.read().get(id).cloned()
    }

    pub(crate) fn index(&self, name: &str) -> Option<IndexDefinition> {
        self.indexes.read().get(name).cloned()
    }

    pub(crate) fn collection(&self, collection: &str) -> Vec<StoredDocument> {
        self.documents
            .read()
            .values()
            .filter(|document| document.collection == collection)
            .cloned()
            .collect()
    }

    pub(crate) fn commit(&self, changes: Vec<(String, StoredDocument)>) -> usize {
        let mut documents = self.documents.write();
        let count = changes.len();
        for (id, document) in changes {
            documents.insert(id, document);
        }
        count
    }
}

impl Default for DocumentStore {
    fn default() -> Self {
        Self::new()
    }
}
