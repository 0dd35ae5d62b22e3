use crate::adapters::store::Entity;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty, validate_non_empty_string, validate_unique, Validate};
use serde::{Deserialize, Serialize};

/// A static index: the fields of one collection that queries may filter and
/// sort on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDefinition {
    pub name: String,
    pub collection: String,
    pub fields: Vec<String>,
}

impl IndexDefinition {
    pub fn new(name: impl Into<String>, collection: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            collection: collection.into(),
            fields: Vec::new(),
        }
    }

    /// 以實體型別的 collection 建立索引
    pub fn for_entity<T: Entity>(name: impl Into<String>) -> Self {
        Self::new(name, T::COLLECTION)
    }

    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.fields.push(field.into());
        self
    }

    pub fn maps(&self, field: &str) -> bool {
        self.fields.iter().any(|mapped| mapped == field)
    }
}

impl Validate for IndexDefinition {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("index.name", &self.name)?;
        validate_non_empty_string("index.collection", &self.collection)?;
        validate_non_empty("index.fields", &self.fields)?;
        validate_unique("index.fields", &self.fields)?;
        Ok(())
    }
}
