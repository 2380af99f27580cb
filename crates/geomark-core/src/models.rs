pub mod annotation;
pub mod coordinate;
pub mod hierarchy;
pub mod location;
pub mod media;
pub mod user;

pub use annotation::{Annotation, AnnotationId, NewAnnotation};
pub use coordinate::Coordinate;
pub use hierarchy::{
    Asset, AssetId, NewAsset, NewOrganization, NewProperty, NewSpace, Organization,
    OrganizationId, Property, PropertyId, Space, SpaceId,
};
pub use location::{HierarchyLinks, LocationId, LocationRecord, NewLocation};
pub use media::{LocationMedia, MediaId, MediaKind, NewLocationMedia, UploadFile};
pub use user::{User, UserId};
