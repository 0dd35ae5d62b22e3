pub mod context;
pub mod duration;
pub mod field;
pub mod instant;
pub mod local_date;
pub mod local_date_time;
pub mod local_time;
pub mod offset_date_time;
pub mod registration;
pub mod registry;
pub mod relaxed;
pub mod time_span;
pub mod wire;

pub use crate::domain::model::{Strictness, ValueKind};
pub use crate::domain::ports::{Converter, TimeValue};
pub use crate::utils::error::{ConvertError, Result};
pub use registration::register_time_converters;
pub use registry::ConverterSet;
pub use relaxed::Relaxed;
