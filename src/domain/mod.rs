// Domain layer: roster models, handle parsing and the ports the pipeline is
// generic over.

pub mod handle;
pub mod model;
pub mod ports;
