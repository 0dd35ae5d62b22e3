use crate::adapters::store::collation::{compare_values, values_equal};
use crate::adapters::store::index::IndexDefinition;
use crate::adapters::store::serializer::DocumentSerializer;
use crate::adapters::store::{DocumentStore, Entity, StoredDocument};
use crate::core::registry::ConverterSet;
use crate::utils::error::{ConvertError, DocStoreError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use serde_json::Value;
use std::cmp::Ordering;
use std::marker::PhantomData;

/// A value a query can compare a document field against. Time values are
/// encoded with the session's converters, so comparisons run on the same wire
/// form the documents were stored in.
pub trait Operand {
    fn to_operand(&self, converters: &ConverterSet) -> std::result::Result<Value, ConvertError>;
}

macro_rules! time_operand {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Operand for $ty {
                fn to_operand(&self, converters: &ConverterSet) -> std::result::Result<Value, ConvertError> {
                    converters.encode(self)
                }
            }
        )*
    };
}

time_operand!(
    TimeDelta,
    NaiveDate,
    NaiveTime,
    NaiveDateTime,
    DateTime<Utc>,
    DateTime<FixedOffset>,
);

impl Operand for str {
    fn to_operand(&self, _: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        Ok(Value::String(self.to_string()))
    }
}

impl Operand for String {
    fn to_operand(&self, converters: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        self.as_str().to_operand(converters)
    }
}

impl Operand for i64 {
    fn to_operand(&self, _: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        Ok(Value::from(*self))
    }
}

impl Operand for f64 {
    fn to_operand(&self, _: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        Ok(Value::from(*self))
    }
}

impl Operand for bool {
    fn to_operand(&self, _: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        Ok(Value::Bool(*self))
    }
}

impl Operand for Value {
    fn to_operand(&self, _: &ConverterSet) -> std::result::Result<Value, ConvertError> {
        Ok(self.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Comparison {
    Eq,
    Gt,
    Ge,
    Lt,
    Le,
}

impl Comparison {
    fn matches(self, field: &Value, operand: &Value) -> bool {
        if self == Comparison::Eq {
            return values_equal(field, operand);
        }
        match compare_values(field, operand) {
            Some(ordering) => match self {
                Comparison::Gt => ordering == Ordering::Greater,
                Comparison::Ge => ordering != Ordering::Less,
                Comparison::Lt => ordering == Ordering::Less,
                Comparison::Le => ordering != Ordering::Greater,
                Comparison::Eq => ordering == Ordering::Equal,
            },
            None => false,
        }
    }
}

#[derive(Debug, Clone)]
struct Condition {
    field: String,
    comparison: Comparison,
    operand: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ascending,
    Descending,
}

/// `a.b` addresses nested fields.
fn field_value<'v>(document: &'v Value, field: &str) -> Option<&'v Value> {
    field
        .split('.')
        .try_fold(document, |current, segment| current.get(segment))
}

pub struct Query<'s, T> {
    store: &'s DocumentStore,
    serializer: &'s DocumentSerializer,
    index: Option<IndexDefinition>,
    conditions: Vec<Condition>,
    ordering: Option<(String, Direction)>,
    _entity: PhantomData<fn() -> T>,
}

impl<'s, T: Entity> Query<'s, T> {
    pub(crate) fn new(
        store: &'s DocumentStore,
        serializer: &'s DocumentSerializer,
        index: Option<IndexDefinition>,
    ) -> Self {
        Self {
            store,
            serializer,
            index,
            conditions: Vec::new(),
            ordering: None,
            _entity: PhantomData,
        }
    }

    pub fn where_eq<V: Operand + ?Sized>(self, field: &str, operand: &V) -> Result<Self> {
        self.filter(field, Comparison::Eq, operand)
    }

    pub fn where_gt<V: Operand + ?Sized>(self, field: &str, operand: &V) -> Result<Self> {
        self.filter(field, Comparison::Gt, operand)
    }

    pub fn where_ge<V: Operand + ?Sized>(self, field: &str, operand: &V) -> Result<Self> {
        self.filter(field, Comparison::Ge, operand)
    }

    pub fn where_lt<V: Operand + ?Sized>(self, field: &str, operand: &V) -> Result<Self> {
        self.filter(field, Comparison::Lt, operand)
    }

    pub fn where_le<V: Operand + ?Sized>(self, field: &str, operand: &V) -> Result<Self> {
        self.filter(field, Comparison::Le, operand)
    }

    pub fn order_by(mut self, field: &str) -> Self {
        self.ordering = Some((field.to_string(), Direction::Ascending));
        self
    }

    pub fn order_by_descending(mut self, field: &str) -> Self {
        self.ordering = Some((field.to_string(), Direction::Descending));
        self
    }

    fn filter<V: Operand + ?Sized>(mut self, field: &str, comparison: Comparison, operand: &V) -> Result<Self> {
        self.check_indexed(field)?;
        let operand = operand.to_operand(self.serializer.converters())?;
        self.conditions.push(Condition {
            field: field.to_string(),
            comparison,
            operand,
        });
        Ok(self)
    }

    fn check_indexed(&self, field: &str) -> Result<()> {
        match &self.index {
            Some(index) if !index.maps(field) => Err(DocStoreError::QueryError {
                message: format!("Field '{}' is not mapped by index '{}'", field, index.name),
            }),
            _ => Ok(()),
        }
    }

    fn matching_documents(&self) -> Result<Vec<StoredDocument>> {
        if let Some((field, _)) = &self.ordering {
            self.check_indexed(field)?;
        }

        let mut documents: Vec<StoredDocument> = self
            .store
            .collection(T::COLLECTION)
            .into_iter()
            .filter(|document| {
                self.conditions.iter().all(|condition| {
                    field_value(&document.data, &condition.field)
                        .is_some_and(|value| condition.comparison.matches(value, &condition.operand))
                })
            })
            .collect();

        if let Some((field, direction)) = &self.ordering {
            documents.sort_by(|a, b| {
                let ordering = match (field_value(&a.data, field), field_value(&b.data, field)) {
                    (Some(a), Some(b)) => compare_values(a, b).unwrap_or(Ordering::Equal),
                    (Some(_), None) => Ordering::Less,
                    (None, Some(_)) => Ordering::Greater,
                    (None, None) => Ordering::Equal,
                };
                match direction {
                    Direction::Ascending => ordering,
                    Direction::Descending => ordering.reverse(),
                }
            });
        }

        tracing::debug!(
            "Query on {} ({} conditions) matched {} documents",
            T::COLLECTION,
            self.conditions.len(),
            documents.len()
        );
        Ok(documents)
    }

    pub fn to_list(&self) -> Result<Vec<T>> {
        self.matching_documents()?
            .iter()
            .map(|document| self.serializer.from_document(&document.data))
            .collect()
    }

    pub fn count(&self) -> Result<usize> {
        Ok(self.matching_documents()?.len())
    }
}
