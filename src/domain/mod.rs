// Domain layer: models and ports. Adapters implement the ports; app services consume them.

pub mod model;
pub mod ports;
