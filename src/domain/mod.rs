// Domain layer: submission/report models and ports (interfaces).

pub mod model;
pub mod ports;
