// Domain layer: election result models and ports (interfaces).

pub mod model;
pub mod ports;
