// Domain layer: the coordinate value type and the Locatable port.

pub mod model;
pub mod ports;
