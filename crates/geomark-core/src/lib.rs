//! GeoMark Core - Domain models, coordinate handling, and port definitions
//!
//! This crate contains the domain logic shared by every GeoMark crate:
//! coordinate parsing and region validation, EXIF GPS extraction, the
//! record models, and the port traits adapters must implement.

pub mod config;
pub mod error;
pub mod exif;
pub mod geo;
pub mod models;
pub mod ports;

pub use error::{GeomarkError, Result, StoreError, StoreErrorKind, StoreResult};
