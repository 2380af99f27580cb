//! CRUD over the organization → property → space → asset hierarchy.
//!
//! Thin typed wrappers around the directory store: reads are open, writes
//! require a session, and every entity needs a non-empty name.

use std::sync::Arc;

use geomark_core::error::{GeomarkError, Result};
use geomark_core::models::{
    Asset, AssetId, NewAsset, NewOrganization, NewProperty, NewSpace, Organization,
    OrganizationId, Property, PropertyId, Space, SpaceId,
};
use geomark_core::ports::{AuthProvider, DirectoryStore};

pub struct DirectoryService {
    store: Arc<dyn DirectoryStore>,
    auth: Arc<dyn AuthProvider>,
}

impl DirectoryService {
    pub fn new(store: Arc<dyn DirectoryStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    fn require_session(&self) -> Result<()> {
        if self.auth.is_authenticated() {
            Ok(())
        } else {
            Err(GeomarkError::NotAuthenticated)
        }
    }

    fn require_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            Err(GeomarkError::MissingField { field: "name" })
        } else {
            Ok(())
        }
    }

    pub async fn create_organization(&self, org: NewOrganization) -> Result<Organization> {
        self.require_session()?;
        Self::require_name(&org.name)?;
        let created = self.store.insert_organization(org).await?;
        tracing::info!(organization = %created.id.0, "organization created");
        Ok(created)
    }

    pub async fn organizations(&self) -> Result<Vec<Organization>> {
        Ok(self.store.list_organizations().await?)
    }

    pub async fn update_organization(&self, org: &Organization) -> Result<()> {
        self.require_session()?;
        Self::require_name(&org.name)?;
        Ok(self.store.update_organization(org).await?)
    }

    pub async fn delete_organization(&self, id: OrganizationId) -> Result<()> {
        self.require_session()?;
        Ok(self.store.delete_organization(id).await?)
    }

    pub async fn create_property(&self, property: NewProperty) -> Result<Property> {
        self.require_session()?;
        Self::require_name(&property.name)?;
        let created = self.store.insert_property(property).await?;
        tracing::info!(property = %created.id.0, "property created");
        Ok(created)
    }

    pub async fn properties(&self) -> Result<Vec<Property>> {
        Ok(self.store.list_properties().await?)
    }

    pub async fn update_property(&self, property: &Property) -> Result<()> {
        self.require_session()?;
        Self::require_name(&property.name)?;
        Ok(self.store.update_property(property).await?)
    }

    pub async fn delete_property(&self, id: PropertyId) -> Result<()> {
        self.require_session()?;
        Ok(self.store.delete_property(id).await?)
    }

    pub async fn create_space(&self, space: NewSpace) -> Result<Space> {
        self.require_session()?;
        Self::require_name(&space.name)?;
        let created = self.store.insert_space(space).await?;
        tracing::info!(space = %created.id.0, "space created");
        Ok(created)
    }

    pub async fn spaces(&self) -> Result<Vec<Space>> {
        Ok(self.store.list_spaces().await?)
    }

    pub async fn update_space(&self, space: &Space) -> Result<()> {
        self.require_session()?;
        Self::require_name(&space.name)?;
        Ok(self.store.update_space(space).await?)
    }

    pub async fn delete_space(&self, id: SpaceId) -> Result<()> {
        self.require_session()?;
        Ok(self.store.delete_space(id).await?)
    }

    pub async fn create_asset(&self, asset: NewAsset) -> Result<Asset> {
        self.require_session()?;
        Self::require_name(&asset.name)?;
        let created = self.store.insert_asset(asset).await?;
        tracing::info!(asset = %created.id.0, "asset created");
        Ok(created)
    }

    pub async fn assets(&self) -> Result<Vec<Asset>> {
        Ok(self.store.list_assets().await?)
    }

    pub async fn update_asset(&self, asset: &Asset) -> Result<()> {
        self.require_session()?;
        Self::require_name(&asset.name)?;
        Ok(self.store.update_asset(asset).await?)
    }

    pub async fn delete_asset(&self, id: AssetId) -> Result<()> {
        self.require_session()?;
        Ok(self.store.delete_asset(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomark_core::models::{User, UserId};
    use geomark_store::{MemoryDirectoryStore, StaticAuthProvider};
    use uuid::Uuid;

    fn signed_in_service() -> DirectoryService {
        let user = User { id: UserId(Uuid::new_v4()), email: "admin@example.com".to_string() };
        DirectoryService::new(
            Arc::new(MemoryDirectoryStore::new()),
            Arc::new(StaticAuthProvider::signed_in(user)),
        )
    }

    #[tokio::test]
    async fn hierarchy_builds_top_down() {
        let service = signed_in_service();

        let org = service
            .create_organization(NewOrganization {
                name: "Acme Estates".to_string(),
                description: None,
                contact_email: None,
                contact_phone: None,
            })
            .await
            .unwrap();

        let property = service
            .create_property(NewProperty {
                organization_id: org.id,
                name: "Warehouse A".to_string(),
                address: None,
                coordinate: None,
            })
            .await
            .unwrap();

        let space = service
            .create_space(NewSpace {
                property_id: property.id,
                name: "Loading Bay".to_string(),
                space_type: None,
                coordinate: None,
            })
            .await
            .unwrap();

        service
            .create_asset(NewAsset {
                space_id: space.id,
                property_id: Some(property.id),
                name: "Forklift 3".to_string(),
                asset_type: None,
            })
            .await
            .unwrap();

        assert_eq!(service.assets().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn writes_require_a_session() {
        let service = DirectoryService::new(
            Arc::new(MemoryDirectoryStore::new()),
            Arc::new(StaticAuthProvider::signed_out()),
        );
        let result = service
            .create_organization(NewOrganization {
                name: "Acme".to_string(),
                description: None,
                contact_email: None,
                contact_phone: None,
            })
            .await;
        assert!(matches!(result, Err(GeomarkError::NotAuthenticated)));
        // Reads stay open for the public map view
        assert!(service.organizations().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn blank_names_are_rejected() {
        let service = signed_in_service();
        let result = service
            .create_organization(NewOrganization {
                name: "   ".to_string(),
                description: None,
                contact_email: None,
                contact_phone: None,
            })
            .await;
        assert!(matches!(result, Err(GeomarkError::MissingField { field: "name" })));
    }
}
