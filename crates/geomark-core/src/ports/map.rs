use crate::models::{Coordinate, LocationRecord, MediaKind};

/// Opaque handle to a rendered pin, issued by the map surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PinId(pub u64);

/// Content shown in a pin's popup, derived from the backing record.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub category: String,
    pub description: Option<String>,
    pub media_url: Option<String>,
    pub media_type: Option<MediaKind>,
}

impl PopupContent {
    pub fn from_record(record: &LocationRecord) -> Self {
        Self {
            title: record.name.clone(),
            category: record.category.clone(),
            description: record.description.clone(),
            media_url: record.file_url.clone(),
            media_type: record.media_type,
        }
    }
}

/// Port for the map rendering surface.
///
/// GeoMark issues these calls but does not implement rendering. Pins appear
/// and disappear only through the marker registry.
pub trait MapSurface: Send {
    fn add_pin(&mut self, coordinate: Coordinate, popup: PopupContent) -> PinId;

    fn remove_pin(&mut self, pin: PinId);

    fn open_popup(&mut self, pin: PinId);

    fn set_view(&mut self, center: Coordinate, zoom: u8);

    fn fit_bounds(&mut self, coordinates: &[Coordinate]);
}
