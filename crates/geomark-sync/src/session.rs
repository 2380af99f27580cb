//! The map session: explicit context replacing ad hoc shared state.
//!
//! Owns the marker registry and the viewport defaults, and serializes
//! overlapping reloads with a generation ticket: a reload begun before a
//! newer one may fetch to completion, but its result is discarded.

use geomark_core::config::{LayeredConfig, MapView};
use geomark_core::error::{GeomarkError, Result};
use geomark_core::models::{Coordinate, LocationRecord};
use geomark_core::ports::{LocationStore, MapSurface};

use crate::registry::{MarkerHandle, MarkerRegistry};

/// Token identifying one reload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// The fetched records are now displayed.
    Applied { markers: usize },
    /// A newer reload started while this one was fetching; nothing changed.
    Superseded,
}

pub struct MapSession {
    registry: MarkerRegistry,
    view: MapView,
    focus_zoom: u8,
    generation: u64,
}

impl MapSession {
    pub fn new(config: &LayeredConfig) -> Self {
        Self {
            registry: MarkerRegistry::new(),
            view: config.default_view.value,
            focus_zoom: config.focus_zoom.value,
            generation: 0,
        }
    }

    pub fn registry(&self) -> &MarkerRegistry {
        &self.registry
    }

    /// Point the surface at the configured default viewport.
    pub fn initialize(&self, surface: &mut dyn MapSurface) {
        surface.set_view(self.view.center, self.view.zoom);
    }

    /// Center on a coordinate at the focus zoom level.
    pub fn focus(&self, surface: &mut dyn MapSurface, coordinate: Coordinate) {
        surface.set_view(coordinate, self.focus_zoom);
    }

    /// Fit the viewport around every displayed marker.
    pub fn fit_all(&self, surface: &mut dyn MapSurface) {
        let coordinates = self.registry.coordinates();
        if !coordinates.is_empty() {
            surface.fit_bounds(&coordinates);
        }
    }

    /// Display a freshly persisted record: upsert its marker, center on it,
    /// and open its popup.
    pub fn show_new_location(
        &mut self,
        surface: &mut dyn MapSurface,
        record: &LocationRecord,
    ) -> MarkerHandle {
        let handle = self.registry.upsert(surface, record);
        surface.set_view(record.coordinate, self.focus_zoom);
        surface.open_popup(handle.pin);
        handle
    }

    /// Start a reload, invalidating any reload still in flight.
    pub fn begin_reload(&mut self) -> ReloadTicket {
        self.generation += 1;
        ReloadTicket(self.generation)
    }

    /// Apply fetched records if the ticket is still current.
    pub fn apply_reload(
        &mut self,
        surface: &mut dyn MapSurface,
        ticket: ReloadTicket,
        records: &[LocationRecord],
    ) -> ReloadOutcome {
        if ticket.0 != self.generation {
            tracing::debug!(ticket = ticket.0, current = self.generation, "stale reload dropped");
            return ReloadOutcome::Superseded;
        }
        self.registry.reload(surface, records);
        ReloadOutcome::Applied { markers: self.registry.len() }
    }

    /// Fetch all locations and reconcile the displayed set against them.
    pub async fn reload_from(
        &mut self,
        store: &dyn LocationStore,
        surface: &mut dyn MapSurface,
    ) -> Result<ReloadOutcome> {
        let ticket = self.begin_reload();
        let records = store.list_locations().await.map_err(GeomarkError::Store)?;
        Ok(self.apply_reload(surface, ticket, &records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use geomark_core::models::{HierarchyLinks, LocationId, NewLocation, UserId};
    use geomark_store::{MemoryLocationStore, MemoryMapSurface, SurfaceEvent};
    use uuid::Uuid;

    fn session() -> MapSession {
        MapSession::new(&LayeredConfig::with_defaults())
    }

    fn record(name: &str) -> LocationRecord {
        LocationRecord {
            id: LocationId(Uuid::new_v4()),
            name: name.to_string(),
            description: None,
            category: "property".to_string(),
            coordinate: Coordinate::new(-26.1, 28.2),
            file_url: None,
            media_type: None,
            owner_id: UserId(Uuid::new_v4()),
            hierarchy: HierarchyLinks::default(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn initialize_sets_the_default_viewport() {
        let mut surface = MemoryMapSurface::new();
        session().initialize(&mut surface);
        assert_eq!(
            surface.events(),
            &[SurfaceEvent::ViewSet { center: Coordinate::new(-26.106, 28.17), zoom: 13 }]
        );
    }

    #[test]
    fn superseded_ticket_does_not_touch_the_registry() {
        let mut surface = MemoryMapSurface::new();
        let mut session = session();

        let stale = session.begin_reload();
        let current = session.begin_reload();

        let records = vec![record("fresh")];
        assert_eq!(
            session.apply_reload(&mut surface, stale, &records),
            ReloadOutcome::Superseded
        );
        assert!(session.registry().is_empty());

        assert_eq!(
            session.apply_reload(&mut surface, current, &records),
            ReloadOutcome::Applied { markers: 1 }
        );
        assert_eq!(session.registry().len(), 1);
    }

    #[tokio::test]
    async fn reload_from_mirrors_the_store() {
        let store = MemoryLocationStore::new();
        for name in ["a", "b"] {
            store
                .insert_location(NewLocation {
                    name: name.to_string(),
                    description: None,
                    category: "property".to_string(),
                    coordinate: Coordinate::new(-26.1, 28.2),
                    file_url: None,
                    media_type: None,
                    owner_id: UserId(Uuid::new_v4()),
                    hierarchy: HierarchyLinks::default(),
                })
                .await
                .unwrap();
        }

        let mut surface = MemoryMapSurface::new();
        let mut session = session();
        let outcome = session.reload_from(&store, &mut surface).await.unwrap();

        assert_eq!(outcome, ReloadOutcome::Applied { markers: 2 });
        assert_eq!(surface.pin_count(), 2);
    }
}
