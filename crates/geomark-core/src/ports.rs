//! Port trait definitions
//!
//! These traits define the interfaces that adapters must implement. The
//! remote store, blob storage, authentication provider, and map rendering
//! surface are all external collaborators; only the consumed contract lives
//! here.

pub mod auth;
pub mod blob;
pub mod map;
pub mod storage;

pub use auth::AuthProvider;
pub use blob::BlobStorage;
pub use map::{MapSurface, PinId, PopupContent};
pub use storage::{AnnotationStore, DirectoryStore, LocationStore};
