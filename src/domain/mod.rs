// Domain layer: data model and ports. Adapters live under core/ and config/.

pub mod model;
pub mod ports;
