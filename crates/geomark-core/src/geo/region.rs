//! Regional bounding-box validation.
//!
//! Uploads are restricted to a fixed geographic region as a business rule.
//! The check runs before any network call and again immediately before
//! persistence, since coordinates may change in between (async GPS
//! extraction writes into the same request).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::Coordinate;

/// A rejected coordinate, carrying the offending axis and value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RegionViolation {
    Latitude { value: f64, min: f64, max: f64 },
    Longitude { value: f64, min: f64, max: f64 },
}

impl fmt::Display for RegionViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionViolation::Latitude { value, min, max } => {
                write!(f, "Latitude {value} must be between {min} and {max}")
            }
            RegionViolation::Longitude { value, min, max } => {
                write!(f, "Longitude {value} must be between {min} and {max}")
            }
        }
    }
}

/// Fixed rectangular latitude/longitude acceptance region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lng_min: f64,
    pub lng_max: f64,
}

impl RegionBounds {
    /// South Africa: lat -35 to -22, lng 16 to 33
    pub const SOUTH_AFRICA: RegionBounds = RegionBounds {
        lat_min: -35.0,
        lat_max: -22.0,
        lng_min: 16.0,
        lng_max: 33.0,
    };

    /// Check a coordinate against the region. Pure and deterministic;
    /// latitude is reported before longitude when both are out of range.
    pub fn check(&self, coordinate: Coordinate) -> Result<(), RegionViolation> {
        let Coordinate { latitude, longitude } = coordinate;
        if latitude < self.lat_min || latitude > self.lat_max {
            return Err(RegionViolation::Latitude {
                value: latitude,
                min: self.lat_min,
                max: self.lat_max,
            });
        }
        if longitude < self.lng_min || longitude > self.lng_max {
            return Err(RegionViolation::Longitude {
                value: longitude,
                min: self.lng_min,
                max: self.lng_max,
            });
        }
        Ok(())
    }
}

impl Default for RegionBounds {
    fn default() -> Self {
        Self::SOUTH_AFRICA
    }
}
