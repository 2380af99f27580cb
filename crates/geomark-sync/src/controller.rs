//! The upload pipeline: validate → extract GPS → upload blob → persist →
//! sync markers.
//!
//! Each step suspends without blocking the caller's event loop, and
//! ordering is enforced by sequential awaits. A failure at any step is
//! terminal for the attempt; nothing is retried automatically.

use std::sync::Arc;
use uuid::Uuid;

use geomark_core::config::LayeredConfig;
use geomark_core::error::{GeomarkError, Result};
use geomark_core::exif;
use geomark_core::geo::parse_coordinate;
use geomark_core::models::{
    Coordinate, HierarchyLinks, LocationRecord, MediaKind, NewLocation, NewLocationMedia,
    UploadFile,
};
use geomark_core::ports::{AuthProvider, BlobStorage, LocationStore, MapSurface};

use crate::session::{MapSession, ReloadOutcome};

/// One upload attempt, as gathered from the upload form.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    /// Raw coordinate inputs; decimal or degree;minute;second notation
    pub latitude: String,
    pub longitude: String,
    pub file: Option<UploadFile>,
    /// Externally hosted media link, used instead of an inline file URL
    pub link_url: Option<String>,
    pub hierarchy: HierarchyLinks,
}

/// Step the pipeline is in, carried on log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Validating,
    ExtractingGps,
    Uploading,
    Persisting,
    Syncing,
    Done,
}

impl UploadPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            UploadPhase::Idle => "idle",
            UploadPhase::Validating => "validating",
            UploadPhase::ExtractingGps => "extracting_gps",
            UploadPhase::Uploading => "uploading",
            UploadPhase::Persisting => "persisting",
            UploadPhase::Syncing => "syncing",
            UploadPhase::Done => "done",
        }
    }
}

/// Where the persisted coordinate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateSource {
    Manual,
    ExifGps,
}

#[derive(Debug)]
pub struct UploadOutcome {
    pub record: LocationRecord,
    pub coordinate_source: CoordinateSource,
    /// False when the secondary media entry failed to persist; the upload
    /// still succeeded because the location itself was saved.
    pub media_linked: bool,
    pub reload: ReloadOutcome,
}

pub struct LocationSyncController {
    store: Arc<dyn LocationStore>,
    storage: Arc<dyn BlobStorage>,
    auth: Arc<dyn AuthProvider>,
    config: LayeredConfig,
}

impl LocationSyncController {
    pub fn new(
        store: Arc<dyn LocationStore>,
        storage: Arc<dyn BlobStorage>,
        auth: Arc<dyn AuthProvider>,
        config: LayeredConfig,
    ) -> Self {
        Self { store, storage, auth, config }
    }

    /// Run one upload attempt end to end.
    pub async fn upload(
        &self,
        session: &mut MapSession,
        surface: &mut dyn MapSurface,
        request: UploadRequest,
    ) -> Result<UploadOutcome> {
        let mut phase = UploadPhase::Idle;
        match self.run(&mut phase, session, surface, request).await {
            Ok(outcome) => {
                tracing::info!(
                    location = %outcome.record.id.0,
                    media_linked = outcome.media_linked,
                    "location upload complete"
                );
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(phase = phase.as_str(), error = %err, "location upload failed");
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        phase: &mut UploadPhase,
        session: &mut MapSession,
        surface: &mut dyn MapSurface,
        request: UploadRequest,
    ) -> Result<UploadOutcome> {
        let user = self.auth.current_user().ok_or(GeomarkError::NotAuthenticated)?;
        let region = self.config.region.value;

        enter(phase, UploadPhase::Validating);
        let name = request.name.trim();
        if name.is_empty() {
            return Err(GeomarkError::MissingField { field: "name" });
        }
        let category = request.category.trim();
        if category.is_empty() {
            return Err(GeomarkError::MissingField { field: "category" });
        }

        let explicit = match (
            parse_coordinate(&request.latitude),
            parse_coordinate(&request.longitude),
        ) {
            (Some(latitude), Some(longitude)) => Some(Coordinate::new(latitude, longitude)),
            _ => None,
        };

        let (coordinate, coordinate_source) = match explicit {
            // Fail fast, before any network call
            Some(coordinate) => {
                region.check(coordinate).map_err(GeomarkError::OutOfRegion)?;
                (coordinate, CoordinateSource::Manual)
            }
            None => {
                let image = request
                    .file
                    .as_ref()
                    .filter(|f| f.is_image())
                    .ok_or(GeomarkError::MissingCoordinates)?;

                enter(phase, UploadPhase::ExtractingGps);
                let coordinate = exif::extract_gps(image.bytes.clone())
                    .await
                    .ok_or(GeomarkError::NoGpsData)?;
                region.check(coordinate).map_err(GeomarkError::OutOfRegion)?;
                session.focus(surface, coordinate);
                (coordinate, CoordinateSource::ExifGps)
            }
        };

        let mut file_url = None;
        let mut media_type = None;
        if let Some(file) = &request.file {
            enter(phase, UploadPhase::Uploading);
            let limit = self.config.upload_limit_bytes.value;
            if file.size() > limit {
                return Err(GeomarkError::FileTooLarge { size: file.size(), limit });
            }

            let path = blob_path(file);
            self.storage
                .upload(&path, file.bytes.clone(), &file.content_type)
                .await
                .map_err(GeomarkError::Upload)?;
            file_url = Some(self.storage.public_url(&path));
            media_type = MediaKind::from_upload(&file.content_type, &file.name);
        }

        enter(phase, UploadPhase::Persisting);
        // Extraction may have rewritten the coordinate since the first
        // check, so validate again before touching the locations table.
        region.check(coordinate).map_err(GeomarkError::OutOfRegion)?;

        let link_url = request
            .link_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from);

        // The record carries the file URL inline only when no separate
        // link is attached; otherwise all media lives in location_media.
        let (inline_url, inline_type) = match (&file_url, &link_url) {
            (Some(url), None) => (Some(url.clone()), media_type),
            _ => (None, None),
        };

        let record = self
            .store
            .insert_location(NewLocation {
                name: name.to_string(),
                description: request.description.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(String::from),
                category: category.to_string(),
                coordinate,
                file_url: inline_url,
                media_type: inline_type,
                owner_id: user.id,
                hierarchy: request.hierarchy,
            })
            .await
            .map_err(GeomarkError::Persist)?;

        let mut media_linked = false;
        if let Some(media_url) = file_url.clone().or_else(|| link_url.clone()) {
            let kind = media_type.or_else(|| link_url.as_deref().map(MediaKind::from_link));
            match self
                .store
                .insert_media(NewLocationMedia {
                    location_id: record.id,
                    file_url: media_url,
                    media_type: kind,
                })
                .await
            {
                Ok(_) => media_linked = true,
                // Tolerated: the location itself is already persisted
                Err(err) => {
                    tracing::warn!(
                        location = %record.id.0,
                        error = %GeomarkError::MediaLink(err),
                        "media entry not saved"
                    );
                }
            }
        }

        enter(phase, UploadPhase::Syncing);
        session.show_new_location(surface, &record);
        let reload = session.reload_from(self.store.as_ref(), surface).await?;

        enter(phase, UploadPhase::Done);
        Ok(UploadOutcome { record, coordinate_source, media_linked, reload })
    }
}

fn enter(phase: &mut UploadPhase, next: UploadPhase) {
    *phase = next;
    tracing::debug!(phase = next.as_str(), "upload phase");
}

/// Storage path for an uploaded file, unique per upload.
fn blob_path(file: &UploadFile) -> String {
    let ext = file.extension().unwrap_or("bin");
    format!("locations/{}.{ext}", Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_paths_keep_the_extension_and_never_collide() {
        let file = UploadFile {
            name: "site photo.JPG".to_string(),
            content_type: "image/jpeg".to_string(),
            bytes: vec![0xff, 0xd8],
        };
        let a = blob_path(&file);
        let b = blob_path(&file);
        assert!(a.starts_with("locations/"));
        assert!(a.ends_with(".JPG"));
        assert_ne!(a, b);
    }

    #[test]
    fn extensionless_files_fall_back_to_bin() {
        let file = UploadFile {
            name: "capture".to_string(),
            content_type: "application/octet-stream".to_string(),
            bytes: Vec::new(),
        };
        assert!(blob_path(&file).ends_with(".bin"));
    }
}
