use crate::config::ConverterConfig;
use crate::core::duration::DurationConverter;
use crate::core::instant::InstantConverter;
use crate::core::local_date::LocalDateConverter;
use crate::core::local_date_time::LocalDateTimeConverter;
use crate::core::local_time::LocalTimeConverter;
use crate::core::offset_date_time::OffsetDateTimeConverter;
use crate::core::registry::ConverterSet;
use crate::core::relaxed::Relaxed;
use crate::domain::model::{Strictness, ValueKind};
use crate::domain::ports::{Converter, TimeValue};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Installs the chrono converters named by `config` into `converters`.
///
/// Existing entries for those types are replaced; entries for any other type
/// are left alone.
pub fn register_time_converters(converters: &mut ConverterSet, config: &ConverterConfig) -> Result<()> {
    config.validate()?;

    for kind in config.registered_kinds() {
        let mode = config.mode_for(kind);
        match kind {
            ValueKind::Duration => install(converters, DurationConverter, mode),
            ValueKind::LocalDate => install(converters, LocalDateConverter, mode),
            ValueKind::LocalTime => install(converters, LocalTimeConverter, mode),
            ValueKind::LocalDateTime => install(converters, LocalDateTimeConverter, mode),
            ValueKind::Instant => install(converters, InstantConverter, mode),
            ValueKind::OffsetDateTime => install(converters, OffsetDateTimeConverter, mode),
        }
    }

    Ok(())
}

fn install<C>(converters: &mut ConverterSet, converter: C, mode: Strictness)
where
    C: Converter,
    C::Value: TimeValue,
{
    let kind = converter.kind();
    let replaced = match mode {
        Strictness::Strict => converters.insert(converter),
        Strictness::Relaxed => converters.insert(Relaxed::new(converter)),
    };

    match replaced {
        Some(previous) => tracing::debug!("Replaced {} converter ({} -> {})", kind, previous, mode),
        None => tracing::debug!("Registered {} converter ({})", kind, mode),
    }
}
