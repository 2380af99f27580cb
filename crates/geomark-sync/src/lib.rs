//! GeoMark Sync - Keeping the map in step with the remote store
//!
//! The marker registry owns every displayed pin, the map session serializes
//! reloads, and the upload controller drives the validate → extract →
//! upload → persist → sync pipeline. Annotation and directory services wrap
//! the remaining store tables.

pub mod annotations;
pub mod controller;
pub mod directory;
pub mod registry;
pub mod session;

pub use annotations::AnnotationService;
pub use controller::{
    CoordinateSource, LocationSyncController, UploadOutcome, UploadPhase, UploadRequest,
};
pub use registry::{MarkerHandle, MarkerRegistry};
pub use session::{MapSession, ReloadOutcome, ReloadTicket};
