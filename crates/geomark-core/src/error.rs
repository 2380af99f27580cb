//! Error types for GeoMark

use thiserror::Error;

use crate::geo::region::RegionViolation;

#[derive(Debug, Error)]
pub enum GeomarkError {
    // Upload validation errors, resolved locally before any remote call
    #[error("Sign in to upload locations")]
    NotAuthenticated,

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Provide coordinates or attach an image with GPS data")]
    MissingCoordinates,

    #[error("No GPS coordinates found in image. Enter coordinates manually")]
    NoGpsData,

    #[error("{0}")]
    OutOfRegion(RegionViolation),

    #[error("File size {size} exceeds the {limit} byte upload limit")]
    FileTooLarge { size: u64, limit: u64 },

    // Remote-store errors, mapped at the adapter boundary
    #[error("File upload failed: {0}")]
    Upload(StoreError),

    #[error("Location was not saved: {0}")]
    Persist(StoreError),

    #[error("Media link was not saved: {0}")]
    MediaLink(StoreError),

    #[error(transparent)]
    Store(#[from] StoreError),

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GeomarkError>;

/// Category of a remote-store failure.
///
/// Provider-specific errors are mapped into this enum once, inside the
/// adapter, so callers pattern-match instead of probing message substrings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    NotFound,
    AlreadyExists,
    PermissionDenied,
    BucketMissing,
    Unavailable,
    Invalid,
    Other,
}

/// An error returned by a remote-store or blob-storage adapter.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::NotFound, message)
    }

    pub fn bucket_missing(bucket: &str) -> Self {
        Self::new(
            StoreErrorKind::BucketMissing,
            format!("Storage bucket \"{bucket}\" not found"),
        )
    }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
