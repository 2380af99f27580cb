//! Drawn-annotation persistence for the signed-in user.

use std::sync::Arc;

use geomark_core::error::{GeomarkError, Result};
use geomark_core::models::{Annotation, AnnotationId, NewAnnotation};
use geomark_core::ports::{AnnotationStore, AuthProvider};

pub struct AnnotationService {
    store: Arc<dyn AnnotationStore>,
    auth: Arc<dyn AuthProvider>,
}

impl AnnotationService {
    pub fn new(store: Arc<dyn AnnotationStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self { store, auth }
    }

    /// Persist a freshly drawn shape with the color it was drawn in.
    pub async fn save(&self, geo_json: serde_json::Value, color: &str) -> Result<Annotation> {
        let user = self.auth.current_user().ok_or(GeomarkError::NotAuthenticated)?;
        let annotation = self
            .store
            .insert_annotation(NewAnnotation {
                owner_id: user.id,
                geo_json,
                color: color.to_string(),
            })
            .await?;
        tracing::debug!(annotation = %annotation.id.0, "annotation saved");
        Ok(annotation)
    }

    /// Replace an annotation's geometry after an edit.
    pub async fn update(&self, id: AnnotationId, geo_json: serde_json::Value) -> Result<()> {
        if !self.auth.is_authenticated() {
            return Err(GeomarkError::NotAuthenticated);
        }
        self.store.update_annotation(id, geo_json).await?;
        Ok(())
    }

    pub async fn delete(&self, id: AnnotationId) -> Result<()> {
        if !self.auth.is_authenticated() {
            return Err(GeomarkError::NotAuthenticated);
        }
        self.store.delete_annotation(id).await?;
        Ok(())
    }

    /// Delete every annotation owned by the signed-in user.
    pub async fn clear_all(&self) -> Result<()> {
        let user = self.auth.current_user().ok_or(GeomarkError::NotAuthenticated)?;
        self.store.delete_annotations_for(user.id).await?;
        tracing::debug!(owner = %user.id.0, "annotations cleared");
        Ok(())
    }

    /// Viewing annotations does not require a session.
    pub async fn list(&self) -> Result<Vec<Annotation>> {
        Ok(self.store.list_annotations().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geomark_core::models::{User, UserId};
    use geomark_store::{MemoryAnnotationStore, StaticAuthProvider};
    use serde_json::json;
    use uuid::Uuid;

    fn user() -> User {
        User { id: UserId(Uuid::new_v4()), email: "surveyor@example.com".to_string() }
    }

    fn service(auth: StaticAuthProvider) -> (AnnotationService, MemoryAnnotationStore) {
        let store = MemoryAnnotationStore::new();
        (AnnotationService::new(Arc::new(store.clone()), Arc::new(auth)), store)
    }

    #[tokio::test]
    async fn save_requires_a_session() {
        let (service, store) = service(StaticAuthProvider::signed_out());
        let result = service.save(json!({"type": "Point"}), "#FF0000").await;
        assert!(matches!(result, Err(GeomarkError::NotAuthenticated)));
        assert_eq!(store.annotation_count(), 0);
    }

    #[tokio::test]
    async fn clear_all_only_removes_the_owners_annotations() {
        let owner = user();
        let (service, store) = service(StaticAuthProvider::signed_in(owner.clone()));
        service.save(json!({"type": "Point"}), "#FF0000").await.unwrap();

        // Another user's annotation goes in behind the service's back
        store
            .insert_annotation(NewAnnotation {
                owner_id: UserId(Uuid::new_v4()),
                geo_json: json!({"type": "Polygon"}),
                color: "#00FF00".to_string(),
            })
            .await
            .unwrap();

        service.clear_all().await.unwrap();
        assert_eq!(store.annotation_count(), 1);
    }

    #[tokio::test]
    async fn update_round_trips_geometry() {
        let (service, _store) = service(StaticAuthProvider::signed_in(user()));
        let saved = service.save(json!({"type": "Point"}), "#FF0000").await.unwrap();

        service.update(saved.id, json!({"type": "Polygon"})).await.unwrap();
        let listed = service.list().await.unwrap();
        assert_eq!(listed[0].geo_json, json!({"type": "Polygon"}));
    }
}
