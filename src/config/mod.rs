pub mod converter_config;

pub use converter_config::ConverterConfig;
