use crate::adapters::store::query::Query;
use crate::adapters::store::serializer::DocumentSerializer;
use crate::adapters::store::{DocumentStore, Entity, StoredDocument};
use crate::utils::error::{DocStoreError, Result};
use crate::utils::validation::validate_non_empty_string;

/// A unit of work against the store.
///
/// The session takes a snapshot of the store's converters when it is opened;
/// reconfiguring the store does not affect sessions that are already open.
pub struct Session<'a> {
    store: &'a DocumentStore,
    serializer: DocumentSerializer,
    pending: Vec<(String, StoredDocument)>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self {
            store,
            serializer: DocumentSerializer::from_shared(store.converters()),
            pending: Vec::new(),
        }
    }

    pub fn serializer(&self) -> &DocumentSerializer {
        &self.serializer
    }

    /// 序列化實體並加入待儲存清單，同一 id 以最後一次為準
    pub fn store<T: Entity>(&mut self, entity: &T) -> Result<()> {
        let id = entity.id();
        validate_non_empty_string("id", id)?;

        let data = self.serializer.to_document(entity)?;
        self.pending.retain(|(pending_id, _)| pending_id != id);
        self.pending.push((
            id.to_string(),
            StoredDocument {
                collection: T::COLLECTION.to_string(),
                data,
            },
        ));
        Ok(())
    }

    /// Pending changes of this session win over the committed document.
    pub fn load<T: Entity>(&self, id: &str) -> Result<Option<T>> {
        let pending = self
            .pending
            .iter()
            .rev()
            .find(|(pending_id, _)| pending_id == id)
            .map(|(_, document)| document.clone());

        let document = match pending.or_else(|| self.store.get(id)) {
            Some(document) if document.collection == T::COLLECTION => document,
            _ => return Ok(None),
        };

        self.serializer.from_document(&document.data).map(Some)
    }

    pub fn save_changes(&mut self) -> Result<usize> {
        let changes = std::mem::take(&mut self.pending);
        let saved = self.store.commit(changes);
        tracing::debug!("Saved {} documents", saved);
        Ok(saved)
    }

    pub fn query<T: Entity>(&self) -> Query<'_, T> {
        Query::new(self.store, &self.serializer, None)
    }

    pub fn query_index<T: Entity>(&self, index_name: &str) -> Result<Query<'_, T>> {
        let index = self
            .store
            .index(index_name)
            .ok_or_else(|| DocStoreError::IndexNotFound {
                name: index_name.to_string(),
            })?;

        if index.collection != T::COLLECTION {
            return Err(DocStoreError::QueryError {
                message: format!(
                    "Index '{}' covers collection '{}', not '{}'",
                    index.name,
                    index.collection,
                    T::COLLECTION
                ),
            });
        }

        Ok(Query::new(self.store, &self.serializer, Some(index)))
    }
}
