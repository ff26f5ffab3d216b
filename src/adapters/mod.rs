// Adapters layer: the ways a coordinate enters or leaves the crate (stored fields, point files).

pub mod points;
pub mod storage;
