//! Geographic coordinate type shared across all geomark crates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A WGS 84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Six decimal places matches the precision shown in coordinate inputs
        write!(f, "{:.6}, {:.6}", self.latitude, self.longitude)
    }
}
