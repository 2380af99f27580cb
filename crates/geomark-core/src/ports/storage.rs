use async_trait::async_trait;

use crate::error::StoreResult;
use crate::models::{
    Annotation, AnnotationId, Asset, AssetId, LocationId, LocationMedia, LocationRecord,
    NewAnnotation, NewAsset, NewLocation, NewLocationMedia, NewOrganization, NewProperty,
    NewSpace, Organization, OrganizationId, Property, PropertyId, Space, SpaceId, UserId,
};

/// Port for the `locations` and `location_media` tables.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Insert a location; the store assigns the id and timestamp.
    async fn insert_location(&self, location: NewLocation) -> StoreResult<LocationRecord>;

    /// All locations, newest first.
    async fn list_locations(&self) -> StoreResult<Vec<LocationRecord>>;

    async fn update_location(&self, record: &LocationRecord) -> StoreResult<()>;

    async fn delete_location(&self, id: LocationId) -> StoreResult<()>;

    /// Insert a secondary media entry keyed by location id.
    async fn insert_media(&self, media: NewLocationMedia) -> StoreResult<LocationMedia>;

    /// Media entries for one location, newest first.
    async fn list_media(&self, location_id: LocationId) -> StoreResult<Vec<LocationMedia>>;
}

/// Port for the `annotations` table.
#[async_trait]
pub trait AnnotationStore: Send + Sync {
    async fn insert_annotation(&self, annotation: NewAnnotation) -> StoreResult<Annotation>;

    async fn update_annotation(
        &self,
        id: AnnotationId,
        geo_json: serde_json::Value,
    ) -> StoreResult<()>;

    async fn delete_annotation(&self, id: AnnotationId) -> StoreResult<()>;

    /// Delete every annotation owned by one user.
    async fn delete_annotations_for(&self, owner: UserId) -> StoreResult<()>;

    async fn list_annotations(&self) -> StoreResult<Vec<Annotation>>;
}

/// Port for the relational hierarchy tables: organizations, properties,
/// spaces, and assets.
#[async_trait]
pub trait DirectoryStore: Send + Sync {
    async fn insert_organization(&self, org: NewOrganization) -> StoreResult<Organization>;
    async fn list_organizations(&self) -> StoreResult<Vec<Organization>>;
    async fn update_organization(&self, org: &Organization) -> StoreResult<()>;
    async fn delete_organization(&self, id: OrganizationId) -> StoreResult<()>;

    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property>;
    async fn list_properties(&self) -> StoreResult<Vec<Property>>;
    async fn update_property(&self, property: &Property) -> StoreResult<()>;
    async fn delete_property(&self, id: PropertyId) -> StoreResult<()>;

    async fn insert_space(&self, space: NewSpace) -> StoreResult<Space>;
    async fn list_spaces(&self) -> StoreResult<Vec<Space>>;
    async fn update_space(&self, space: &Space) -> StoreResult<()>;
    async fn delete_space(&self, id: SpaceId) -> StoreResult<()>;

    async fn insert_asset(&self, asset: NewAsset) -> StoreResult<Asset>;
    async fn list_assets(&self) -> StoreResult<Vec<Asset>>;
    async fn update_asset(&self, asset: &Asset) -> StoreResult<()>;
    async fn delete_asset(&self, id: AssetId) -> StoreResult<()>;
}
