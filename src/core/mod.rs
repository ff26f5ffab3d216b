pub mod geo;
pub mod proximity;

pub use crate::domain::model::{Coordinate, LocationSlot, NamedPoint};
pub use crate::domain::ports::Locatable;
pub use crate::utils::error::Result;
