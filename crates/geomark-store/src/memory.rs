//! In-memory adapter implementations for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state. Production deployments wire the
//! ports to a hosted backend instead.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

use geomark_core::error::{StoreError, StoreErrorKind, StoreResult};
use geomark_core::models::{
    Annotation, AnnotationId, Asset, AssetId, Coordinate, LocationId, LocationMedia,
    LocationRecord, MediaId, NewAnnotation, NewAsset, NewLocation, NewLocationMedia,
    NewOrganization, NewProperty, NewSpace, Organization, OrganizationId, Property, PropertyId,
    Space, SpaceId, User, UserId,
};
use geomark_core::ports::{
    AnnotationStore, AuthProvider, BlobStorage, DirectoryStore, LocationStore, MapSurface, PinId,
    PopupContent,
};

/// In-memory implementation of LocationStore
#[derive(Debug, Clone, Default)]
pub struct MemoryLocationStore {
    inner: Arc<RwLock<LocationInner>>,
}

#[derive(Debug, Default)]
struct LocationInner {
    locations: Vec<LocationRecord>,
    media: Vec<LocationMedia>,
    location_failure: Option<StoreError>,
    media_failure: Option<StoreError>,
}

impl MemoryLocationStore {
    /// Create a new in-memory location store
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent location insert fail with the given error
    pub fn fail_location_inserts(&self, error: StoreError) {
        self.inner.write().unwrap().location_failure = Some(error);
    }

    /// Make every subsequent media insert fail with the given error
    pub fn fail_media_inserts(&self, error: StoreError) {
        self.inner.write().unwrap().media_failure = Some(error);
    }

    pub fn location_count(&self) -> usize {
        self.inner.read().unwrap().locations.len()
    }

    pub fn media_count(&self) -> usize {
        self.inner.read().unwrap().media.len()
    }
}

#[async_trait]
impl LocationStore for MemoryLocationStore {
    async fn insert_location(&self, location: NewLocation) -> StoreResult<LocationRecord> {
        let mut inner = self.inner.write().unwrap();
        if let Some(error) = &inner.location_failure {
            return Err(error.clone());
        }

        let record = LocationRecord {
            id: LocationId(Uuid::new_v4()),
            name: location.name,
            description: location.description,
            category: location.category,
            coordinate: location.coordinate,
            file_url: location.file_url,
            media_type: location.media_type,
            owner_id: location.owner_id,
            hierarchy: location.hierarchy,
            created_at: Utc::now(),
        };
        inner.locations.push(record.clone());
        Ok(record)
    }

    async fn list_locations(&self) -> StoreResult<Vec<LocationRecord>> {
        // Insertion order reversed: newest first
        let inner = self.inner.read().unwrap();
        Ok(inner.locations.iter().rev().cloned().collect())
    }

    async fn update_location(&self, record: &LocationRecord) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.locations.iter_mut().find(|l| l.id == record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("location {:?}", record.id.0))),
        }
    }

    async fn delete_location(&self, id: LocationId) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.locations.len();
        inner.locations.retain(|l| l.id != id);
        if inner.locations.len() == before {
            return Err(StoreError::not_found(format!("location {:?}", id.0)));
        }
        inner.media.retain(|m| m.location_id != id);
        Ok(())
    }

    async fn insert_media(&self, media: NewLocationMedia) -> StoreResult<LocationMedia> {
        let mut inner = self.inner.write().unwrap();
        if let Some(error) = &inner.media_failure {
            return Err(error.clone());
        }

        let entry = LocationMedia {
            id: MediaId(Uuid::new_v4()),
            location_id: media.location_id,
            file_url: media.file_url,
            media_type: media.media_type,
            created_at: Utc::now(),
        };
        inner.media.push(entry.clone());
        Ok(entry)
    }

    async fn list_media(&self, location_id: LocationId) -> StoreResult<Vec<LocationMedia>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .media
            .iter()
            .filter(|m| m.location_id == location_id)
            .rev()
            .cloned()
            .collect())
    }
}

/// In-memory implementation of AnnotationStore
#[derive(Debug, Clone, Default)]
pub struct MemoryAnnotationStore {
    annotations: Arc<RwLock<Vec<Annotation>>>,
}

impl MemoryAnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn annotation_count(&self) -> usize {
        self.annotations.read().unwrap().len()
    }
}

#[async_trait]
impl AnnotationStore for MemoryAnnotationStore {
    async fn insert_annotation(&self, annotation: NewAnnotation) -> StoreResult<Annotation> {
        let entry = Annotation {
            id: AnnotationId(Uuid::new_v4()),
            owner_id: annotation.owner_id,
            geo_json: annotation.geo_json,
            color: annotation.color,
            created_at: Utc::now(),
        };
        self.annotations.write().unwrap().push(entry.clone());
        Ok(entry)
    }

    async fn update_annotation(
        &self,
        id: AnnotationId,
        geo_json: serde_json::Value,
    ) -> StoreResult<()> {
        let mut annotations = self.annotations.write().unwrap();
        match annotations.iter_mut().find(|a| a.id == id) {
            Some(annotation) => {
                annotation.geo_json = geo_json;
                Ok(())
            }
            None => Err(StoreError::not_found(format!("annotation {:?}", id.0))),
        }
    }

    async fn delete_annotation(&self, id: AnnotationId) -> StoreResult<()> {
        let mut annotations = self.annotations.write().unwrap();
        let before = annotations.len();
        annotations.retain(|a| a.id != id);
        if annotations.len() == before {
            return Err(StoreError::not_found(format!("annotation {:?}", id.0)));
        }
        Ok(())
    }

    async fn delete_annotations_for(&self, owner: UserId) -> StoreResult<()> {
        self.annotations.write().unwrap().retain(|a| a.owner_id != owner);
        Ok(())
    }

    async fn list_annotations(&self) -> StoreResult<Vec<Annotation>> {
        let annotations = self.annotations.read().unwrap();
        Ok(annotations.iter().rev().cloned().collect())
    }
}

/// In-memory implementation of DirectoryStore.
///
/// Parent links are validated on insert; a dangling parent id is an
/// `Invalid` store error.
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectoryStore {
    inner: Arc<RwLock<DirectoryInner>>,
}

#[derive(Debug, Default)]
struct DirectoryInner {
    organizations: Vec<Organization>,
    properties: Vec<Property>,
    spaces: Vec<Space>,
    assets: Vec<Asset>,
}

impl MemoryDirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn invalid_parent(table: &str, id: Uuid) -> StoreError {
    StoreError::new(StoreErrorKind::Invalid, format!("unknown {table} id {id}"))
}

#[async_trait]
impl DirectoryStore for MemoryDirectoryStore {
    async fn insert_organization(&self, org: NewOrganization) -> StoreResult<Organization> {
        let entry = Organization {
            id: OrganizationId(Uuid::new_v4()),
            name: org.name,
            description: org.description,
            contact_email: org.contact_email,
            contact_phone: org.contact_phone,
            created_at: Utc::now(),
        };
        self.inner.write().unwrap().organizations.push(entry.clone());
        Ok(entry)
    }

    async fn list_organizations(&self) -> StoreResult<Vec<Organization>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.organizations.iter().rev().cloned().collect())
    }

    async fn update_organization(&self, org: &Organization) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.organizations.iter_mut().find(|o| o.id == org.id) {
            Some(existing) => {
                *existing = org.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("organization {:?}", org.id.0))),
        }
    }

    async fn delete_organization(&self, id: OrganizationId) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.organizations.len();
        inner.organizations.retain(|o| o.id != id);
        if inner.organizations.len() == before {
            return Err(StoreError::not_found(format!("organization {:?}", id.0)));
        }
        Ok(())
    }

    async fn insert_property(&self, property: NewProperty) -> StoreResult<Property> {
        let mut inner = self.inner.write().unwrap();
        if !inner.organizations.iter().any(|o| o.id == property.organization_id) {
            return Err(invalid_parent("organization", property.organization_id.0));
        }
        let entry = Property {
            id: PropertyId(Uuid::new_v4()),
            organization_id: property.organization_id,
            name: property.name,
            address: property.address,
            coordinate: property.coordinate,
            created_at: Utc::now(),
        };
        inner.properties.push(entry.clone());
        Ok(entry)
    }

    async fn list_properties(&self) -> StoreResult<Vec<Property>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.properties.iter().rev().cloned().collect())
    }

    async fn update_property(&self, property: &Property) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.properties.iter_mut().find(|p| p.id == property.id) {
            Some(existing) => {
                *existing = property.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("property {:?}", property.id.0))),
        }
    }

    async fn delete_property(&self, id: PropertyId) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.properties.len();
        inner.properties.retain(|p| p.id != id);
        if inner.properties.len() == before {
            return Err(StoreError::not_found(format!("property {:?}", id.0)));
        }
        Ok(())
    }

    async fn insert_space(&self, space: NewSpace) -> StoreResult<Space> {
        let mut inner = self.inner.write().unwrap();
        if !inner.properties.iter().any(|p| p.id == space.property_id) {
            return Err(invalid_parent("property", space.property_id.0));
        }
        let entry = Space {
            id: SpaceId(Uuid::new_v4()),
            property_id: space.property_id,
            name: space.name,
            space_type: space.space_type,
            coordinate: space.coordinate,
            created_at: Utc::now(),
        };
        inner.spaces.push(entry.clone());
        Ok(entry)
    }

    async fn list_spaces(&self) -> StoreResult<Vec<Space>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.spaces.iter().rev().cloned().collect())
    }

    async fn update_space(&self, space: &Space) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.spaces.iter_mut().find(|s| s.id == space.id) {
            Some(existing) => {
                *existing = space.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("space {:?}", space.id.0))),
        }
    }

    async fn delete_space(&self, id: SpaceId) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.spaces.len();
        inner.spaces.retain(|s| s.id != id);
        if inner.spaces.len() == before {
            return Err(StoreError::not_found(format!("space {:?}", id.0)));
        }
        Ok(())
    }

    async fn insert_asset(&self, asset: NewAsset) -> StoreResult<Asset> {
        let mut inner = self.inner.write().unwrap();
        if !inner.spaces.iter().any(|s| s.id == asset.space_id) {
            return Err(invalid_parent("space", asset.space_id.0));
        }
        if let Some(property_id) = asset.property_id {
            if !inner.properties.iter().any(|p| p.id == property_id) {
                return Err(invalid_parent("property", property_id.0));
            }
        }
        let entry = Asset {
            id: AssetId(Uuid::new_v4()),
            space_id: asset.space_id,
            property_id: asset.property_id,
            name: asset.name,
            asset_type: asset.asset_type,
            created_at: Utc::now(),
        };
        inner.assets.push(entry.clone());
        Ok(entry)
    }

    async fn list_assets(&self) -> StoreResult<Vec<Asset>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.assets.iter().rev().cloned().collect())
    }

    async fn update_asset(&self, asset: &Asset) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        match inner.assets.iter_mut().find(|a| a.id == asset.id) {
            Some(existing) => {
                *existing = asset.clone();
                Ok(())
            }
            None => Err(StoreError::not_found(format!("asset {:?}", asset.id.0))),
        }
    }

    async fn delete_asset(&self, id: AssetId) -> StoreResult<()> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.assets.len();
        inner.assets.retain(|a| a.id != id);
        if inner.assets.len() == before {
            return Err(StoreError::not_found(format!("asset {:?}", id.0)));
        }
        Ok(())
    }
}

/// In-memory implementation of BlobStorage
#[derive(Debug, Clone)]
pub struct MemoryBlobStorage {
    bucket: String,
    available: bool,
    objects: Arc<RwLock<HashMap<String, StoredBlob>>>,
}

#[derive(Debug, Clone)]
struct StoredBlob {
    content_type: String,
    size: u64,
}

impl MemoryBlobStorage {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            available: true,
            objects: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// A storage adapter whose bucket was never provisioned; every upload
    /// fails with `BucketMissing`.
    pub fn without_bucket(bucket: impl Into<String>) -> Self {
        Self { available: false, ..Self::new(bucket) }
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().unwrap().len()
    }

    pub fn contains(&self, path: &str) -> bool {
        self.objects.read().unwrap().contains_key(path)
    }

    pub fn content_type_of(&self, path: &str) -> Option<String> {
        self.objects.read().unwrap().get(path).map(|b| b.content_type.clone())
    }
}

#[async_trait]
impl BlobStorage for MemoryBlobStorage {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> StoreResult<()> {
        if !self.available {
            return Err(StoreError::bucket_missing(&self.bucket));
        }
        let blob = StoredBlob { content_type: content_type.to_string(), size: bytes.len() as u64 };
        tracing::debug!(path, size = blob.size, "stored blob");
        self.objects.write().unwrap().insert(path.to_string(), blob);
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.local/{}/{}", self.bucket, path)
    }
}

/// Auth provider with a fixed session, for development and testing
#[derive(Debug, Clone, Default)]
pub struct StaticAuthProvider {
    user: Option<User>,
}

impl StaticAuthProvider {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }
}

impl AuthProvider for StaticAuthProvider {
    fn current_user(&self) -> Option<User> {
        self.user.clone()
    }
}

/// Calls recorded by [`MemoryMapSurface`], in issue order.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    PinAdded(PinId),
    PinRemoved(PinId),
    PopupOpened(PinId),
    ViewSet { center: Coordinate, zoom: u8 },
    BoundsFit { count: usize },
}

/// Map surface that renders nothing and records every call.
#[derive(Debug, Default)]
pub struct MemoryMapSurface {
    next_id: u64,
    pins: HashMap<PinId, (Coordinate, PopupContent)>,
    events: Vec<SurfaceEvent>,
}

impl MemoryMapSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    pub fn pin(&self, id: PinId) -> Option<&(Coordinate, PopupContent)> {
        self.pins.get(&id)
    }

    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Pins whose popup title matches, for test assertions
    pub fn pins_titled(&self, title: &str) -> Vec<PinId> {
        self.pins
            .iter()
            .filter(|(_, (_, popup))| popup.title == title)
            .map(|(id, _)| *id)
            .collect()
    }
}

impl MapSurface for MemoryMapSurface {
    fn add_pin(&mut self, coordinate: Coordinate, popup: PopupContent) -> PinId {
        let id = PinId(self.next_id);
        self.next_id += 1;
        self.pins.insert(id, (coordinate, popup));
        self.events.push(SurfaceEvent::PinAdded(id));
        id
    }

    fn remove_pin(&mut self, pin: PinId) {
        if self.pins.remove(&pin).is_some() {
            self.events.push(SurfaceEvent::PinRemoved(pin));
        }
    }

    fn open_popup(&mut self, pin: PinId) {
        if self.pins.contains_key(&pin) {
            self.events.push(SurfaceEvent::PopupOpened(pin));
        }
    }

    fn set_view(&mut self, center: Coordinate, zoom: u8) {
        self.events.push(SurfaceEvent::ViewSet { center, zoom });
    }

    fn fit_bounds(&mut self, coordinates: &[Coordinate]) {
        self.events.push(SurfaceEvent::BoundsFit { count: coordinates.len() });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomark_core::models::HierarchyLinks;

    fn new_location(name: &str) -> NewLocation {
        NewLocation {
            name: name.to_string(),
            description: None,
            category: "property".to_string(),
            coordinate: Coordinate::new(-26.1, 28.2),
            file_url: None,
            media_type: None,
            owner_id: UserId(Uuid::new_v4()),
            hierarchy: HierarchyLinks::default(),
        }
    }

    #[tokio::test]
    async fn locations_list_newest_first() {
        let store = MemoryLocationStore::new();
        store.insert_location(new_location("first")).await.unwrap();
        store.insert_location(new_location("second")).await.unwrap();

        let listed = store.list_locations().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].name, "second");
        assert_eq!(listed[1].name, "first");
    }

    #[tokio::test]
    async fn deleting_a_location_drops_its_media() {
        let store = MemoryLocationStore::new();
        let record = store.insert_location(new_location("with media")).await.unwrap();
        store
            .insert_media(NewLocationMedia {
                location_id: record.id,
                file_url: "https://storage.local/location-files/x.jpg".to_string(),
                media_type: None,
            })
            .await
            .unwrap();

        store.delete_location(record.id).await.unwrap();
        assert_eq!(store.media_count(), 0);
    }

    #[tokio::test]
    async fn updating_a_missing_location_is_not_found() {
        let store = MemoryLocationStore::new();
        let record = store.insert_location(new_location("orphan")).await.unwrap();
        store.delete_location(record.id).await.unwrap();

        let err = store.update_location(&record).await.unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::NotFound);
    }

    #[tokio::test]
    async fn property_insert_requires_a_known_organization() {
        let store = MemoryDirectoryStore::new();
        let err = store
            .insert_property(NewProperty {
                organization_id: OrganizationId(Uuid::new_v4()),
                name: "dangling".to_string(),
                address: None,
                coordinate: None,
            })
            .await
            .unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::Invalid);
    }

    #[tokio::test]
    async fn missing_bucket_rejects_uploads() {
        let storage = MemoryBlobStorage::without_bucket("location-files");
        let err = storage.upload("locations/a.jpg", vec![1, 2, 3], "image/jpeg").await.unwrap_err();
        assert_eq!(err.kind, StoreErrorKind::BucketMissing);
    }

    #[test]
    fn surface_records_pin_lifecycle() {
        let mut surface = MemoryMapSurface::new();
        let popup = PopupContent {
            title: "Warehouse A".to_string(),
            category: "property".to_string(),
            description: None,
            media_url: None,
            media_type: None,
        };
        let pin = surface.add_pin(Coordinate::new(-26.1, 28.2), popup);
        surface.open_popup(pin);
        surface.remove_pin(pin);

        assert_eq!(surface.pin_count(), 0);
        assert_eq!(
            surface.events(),
            &[
                SurfaceEvent::PinAdded(pin),
                SurfaceEvent::PopupOpened(pin),
                SurfaceEvent::PinRemoved(pin),
            ]
        );
    }
}
