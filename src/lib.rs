pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::store::{DocumentSerializer, DocumentStore, Entity, IndexDefinition, Operand, Query, Session};
pub use config::ConverterConfig;
pub use core::field;
pub use core::{register_time_converters, ConverterSet, Relaxed};
pub use domain::model::{Strictness, ValueKind};
pub use domain::ports::{Converter, TimeValue};
pub use utils::error::{ConvertError, DocStoreError, Result};
