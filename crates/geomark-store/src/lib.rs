//! GeoMark Store - Adapters for the core ports
//!
//! In-memory implementations of the remote store, blob storage, auth
//! provider, and map surface ports, for development and testing.

pub mod memory;

pub use memory::{
    MemoryAnnotationStore, MemoryBlobStorage, MemoryDirectoryStore, MemoryLocationStore,
    MemoryMapSurface, StaticAuthProvider, SurfaceEvent,
};
