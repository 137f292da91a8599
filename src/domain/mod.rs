// Domain layer: models and ports (traits). Concrete adapters live under config/ and utils/.

pub mod model;
pub mod ports;
