//! Coordinate handling: user-input parsing and regional bounds checks.

pub mod parse;
pub mod region;

pub use parse::parse_coordinate;
pub use region::{RegionBounds, RegionViolation};
