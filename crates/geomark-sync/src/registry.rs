//! The marker registry: the single owner of every displayed pin.
//!
//! Pins appear and disappear on the map surface only through this registry,
//! which holds at most one handle per location id.

use std::collections::HashMap;

use geomark_core::models::{Coordinate, LocationId, LocationRecord};
use geomark_core::ports::{MapSurface, PinId, PopupContent};

/// Association between a persisted location and its rendered pin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHandle {
    pub location_id: LocationId,
    pub pin: PinId,
    pub coordinate: Coordinate,
}

#[derive(Debug, Default)]
pub struct MarkerRegistry {
    handles: HashMap<LocationId, MarkerHandle>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, id: LocationId) -> bool {
        self.handles.contains_key(&id)
    }

    pub fn handle(&self, id: LocationId) -> Option<MarkerHandle> {
        self.handles.get(&id).copied()
    }

    /// Coordinates of every tracked marker, for bounds fitting.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        self.handles.values().map(|h| h.coordinate).collect()
    }

    /// Render a pin for the record unless one already exists for its id.
    ///
    /// A second upsert with the same id is a no-op returning the existing
    /// handle, so one backing record never yields duplicate pins.
    pub fn upsert(&mut self, surface: &mut dyn MapSurface, record: &LocationRecord) -> MarkerHandle {
        if let Some(handle) = self.handles.get(&record.id) {
            return *handle;
        }
        let pin = surface.add_pin(record.coordinate, PopupContent::from_record(record));
        let handle = MarkerHandle {
            location_id: record.id,
            pin,
            coordinate: record.coordinate,
        };
        self.handles.insert(record.id, handle);
        handle
    }

    /// Remove every tracked pin from the surface and empty the registry.
    pub fn clear(&mut self, surface: &mut dyn MapSurface) {
        for handle in self.handles.values() {
            surface.remove_pin(handle.pin);
        }
        self.handles.clear();
    }

    /// Replace the displayed set with the given records, in order.
    ///
    /// The fetch is newest-first, so the first record's popup is opened to
    /// surface the latest entry.
    pub fn reload(&mut self, surface: &mut dyn MapSurface, records: &[LocationRecord]) {
        self.clear(surface);
        let mut newest = None;
        for record in records {
            let handle = self.upsert(surface, record);
            if newest.is_none() {
                newest = Some(handle.pin);
            }
        }
        if let Some(pin) = newest {
            surface.open_popup(pin);
        }
        tracing::debug!(markers = self.handles.len(), "reloaded marker set");
    }
}
