//! Location records: the rows behind every map marker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::coordinate::Coordinate;
use crate::models::hierarchy::{AssetId, OrganizationId, PropertyId, SpaceId};
use crate::models::media::MediaKind;
use crate::models::user::UserId;

/// Identifier assigned by the remote store on insert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocationId(pub Uuid);

/// Optional links into the organization → property → space → asset
/// hierarchy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HierarchyLinks {
    pub organization_id: Option<OrganizationId>,
    pub property_id: Option<PropertyId>,
    pub space_id: Option<SpaceId>,
    pub asset_id: Option<AssetId>,
}

/// A persisted location. Identity (`id`) is immutable once assigned by the
/// remote store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub file_url: Option<String>,
    pub media_type: Option<MediaKind>,
    pub owner_id: UserId,
    #[serde(flatten)]
    pub hierarchy: HierarchyLinks,
    pub created_at: DateTime<Utc>,
}

/// A location awaiting insertion; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLocation {
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    pub file_url: Option<String>,
    pub media_type: Option<MediaKind>,
    pub owner_id: UserId,
    #[serde(flatten)]
    pub hierarchy: HierarchyLinks,
}
