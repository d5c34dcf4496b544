// Domain layer: the package entity and the ports the service depends on.

pub mod model;
pub mod ports;
