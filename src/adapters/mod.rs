// Adapters layer: concrete hosts for the converters.

pub mod store;
