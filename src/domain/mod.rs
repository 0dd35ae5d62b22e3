// Domain layer: value kinds and the converter ports. No dependency on the store.

pub mod model;
pub mod ports;
