// Domain layer: component/rule model, the per-run registry and the ports.

pub mod model;
pub mod ports;
pub mod registry;
