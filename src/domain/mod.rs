// Domain layer: the endpoint model and the ports the client depends on.

pub mod model;
pub mod ports;
