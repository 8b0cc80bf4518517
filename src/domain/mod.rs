// Domain layer: models and ports. Transport and provider details live in adapters.

pub mod model;
pub mod ports;
